use anyhow::{bail, Result};

use multiscroll_core::sync::{resolve_anchor, Anchor, FixedCellSizer};

/// Anchor for `displacement` over the sizes given on the command line
fn resolve(displacement: i64, size: Option<u32>, sizes: &[u32]) -> Result<Anchor> {
    let anchor = match size {
        Some(size) => FixedCellSizer::new(size).resolve(displacement),
        None if !sizes.is_empty() => {
            resolve_anchor(displacement, |position| sizes.get(position).copied())
        }
        None => bail!("Pass --size or --sizes"),
    };
    Ok(anchor.map_err(multiscroll_core::Error::from)?)
}

pub fn run(displacement: i64, size: Option<u32>, sizes: &[u32]) -> Result<()> {
    let anchor = resolve(displacement, size, sizes)?;

    println!("position: {}", anchor.position);
    println!("offset:   {}", anchor.offset);
    println!(
        "scroll_to_position_with_offset({}, {})",
        anchor.position,
        -(anchor.offset as i64)
    );
    Ok(())
}
