//! Configuration management.

mod settings;

pub use settings::{
    AppConfig, AppSettings, CurrencySettings, DefaultsSettings, LoggingConfig, RatesSettings,
    SettingsError,
};

use config::{Config, ConfigError, Environment, File, FileFormat};
use std::path::Path;

/// Environment variable prefix, e.g. `FXCALC__RATES__TIMEOUT_SECS=5`.
pub const ENV_PREFIX: &str = "FXCALC";

/// Load configuration from file and environment.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::from(path).required(true))
        .add_source(env_source())
        .build()?;

    config.try_deserialize()
}

/// Load configuration from TOML text, still layered under the environment.
pub fn load_config_str(toml: &str) -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::from_str(toml, FileFormat::Toml))
        .add_source(env_source())
        .build()?;

    config.try_deserialize()
}

fn env_source() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
