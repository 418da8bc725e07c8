//! Validate configuration command.

use anyhow::{bail, Result};
use fxcalc_config::AppConfig;
use std::path::Path;

pub async fn run(config_path: &Path, config: &AppConfig) -> Result<()> {
    println!("Validating configuration: {:?}", config_path);

    if !config_path.exists() {
        bail!("Configuration file {} does not exist", config_path.display());
    }

    match config.validate() {
        Ok(()) => {
            println!("Configuration is valid!");
            println!();
            println!("App: {}", config.app.name);
            println!("Environment: {}", config.app.environment);
            println!("Log level: {}", config.logging.level);
            println!("Rates API: {}", config.rates.base_url);
            println!("Rate timeout: {}s", config.rates.timeout_secs);
            println!("Currencies: {}", config.currencies.allowed.join(", "));
            println!(
                "Defaults: {} {}/{}",
                config.defaults.account_balance, config.defaults.base, config.defaults.quote
            );
        }
        Err(e) => {
            println!("Configuration error: {}", e);
            return Err(e.into());
        }
    }

    Ok(())
}
