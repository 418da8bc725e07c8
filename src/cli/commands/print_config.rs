//! Print configuration command.

use anyhow::Result;
use fxcalc_config::AppConfig;

pub async fn run(config: &AppConfig) -> Result<()> {
    print!("{}", config.to_toml()?);
    Ok(())
}
