use std::path::Path;

use anyhow::{bail, Context, Result};

use multiscroll_tui::scenario::{self, Scenario};

pub fn run(file: &Path, json: bool) -> Result<()> {
    let scenario = Scenario::load(file)
        .with_context(|| format!("Failed to load scenario {}", file.display()))?;
    let report = scenario::run(&scenario)?;

    if json {
        println!("{}", report.to_json()?);
    } else {
        println!("{}", report);
    }

    if !report.in_sync() {
        bail!("Included lists drifted from the group displacement");
    }
    Ok(())
}
