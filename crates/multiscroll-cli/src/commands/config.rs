use std::path::Path;

use anyhow::{bail, Result};

use multiscroll_core::AppConfig;

pub fn path(config_path: &Path) -> Result<()> {
    println!("{}", config_path.display());
    Ok(())
}

pub fn show(config: &AppConfig) -> Result<()> {
    print!("{}", config.to_toml()?);
    Ok(())
}

/// Write defaults to `custom`, or to the standard location when unset
pub fn init(custom: Option<&Path>, config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            config_path.display()
        );
    }

    let config = AppConfig::default();
    match custom {
        Some(path) => config.save_to(path)?,
        None => config.save()?,
    }
    println!("Wrote {}", config_path.display());
    Ok(())
}
