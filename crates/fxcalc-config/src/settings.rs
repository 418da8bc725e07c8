//! Configuration structures.

use fxcalc_core::types::{CurrencyAllowList, DEFAULT_CURRENCIES};
use fxcalc_form::FormDefaults;
use fxcalc_rates::FrankfurterConfig;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Problems a configuration can parse fine but still be wrong about.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("Invalid currency in allow-list: {0}")]
    InvalidCurrency(String),

    #[error("Currency allow-list is empty")]
    EmptyAllowList,

    #[error("Default {field} currency {code} is not in the allow-list")]
    DefaultNotAllowed { field: &'static str, code: String },

    #[error("Default account balance must not be negative: {0}")]
    NegativeBalance(Decimal),

    #[error("Rate timeout must be at least one second")]
    ZeroTimeout,

    #[error("Failed to serialize config: {0}")]
    Serialize(String),
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub rates: RatesSettings,
    #[serde(default)]
    pub currencies: CurrencySettings,
    #[serde(default)]
    pub defaults: DefaultsSettings,
}

impl AppConfig {
    /// The configured currency allow-list.
    pub fn allow_list(&self) -> Result<CurrencyAllowList, SettingsError> {
        let list = CurrencyAllowList::parse(&self.currencies.allowed)
            .map_err(SettingsError::InvalidCurrency)?;
        if list.is_empty() {
            return Err(SettingsError::EmptyAllowList);
        }
        Ok(list)
    }

    pub fn frankfurter(&self) -> FrankfurterConfig {
        FrankfurterConfig::new(
            self.rates.base_url.clone(),
            Duration::from_secs(self.rates.timeout_secs),
        )
    }

    pub fn form_defaults(&self) -> FormDefaults {
        FormDefaults {
            account_balance: self.defaults.account_balance,
            base: self.defaults.base.clone(),
            quote: self.defaults.quote.clone(),
        }
    }

    /// Check everything serde cannot.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let allowed = self.allow_list()?;

        for (field, code) in [("base", &self.defaults.base), ("quote", &self.defaults.quote)] {
            if !allowed.is_valid_currency(code) {
                return Err(SettingsError::DefaultNotAllowed {
                    field,
                    code: code.clone(),
                });
            }
        }

        if self.defaults.account_balance.is_sign_negative() {
            return Err(SettingsError::NegativeBalance(self.defaults.account_balance));
        }

        if self.rates.timeout_secs == 0 {
            return Err(SettingsError::ZeroTimeout);
        }

        Ok(())
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> Result<String, SettingsError> {
        toml::to_string_pretty(self).map_err(|e| SettingsError::Serialize(e.to_string()))
    }
}

/// General app settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub name: String,
    pub environment: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "fxcalc".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file: None,
        }
    }
}

/// Exchange-rate API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RatesSettings {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for RatesSettings {
    fn default() -> Self {
        let frankfurter = FrankfurterConfig::default();
        Self {
            base_url: frankfurter.base_url,
            timeout_secs: frankfurter.timeout.as_secs(),
        }
    }
}

/// Currency allow-list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencySettings {
    pub allowed: Vec<String>,
}

impl Default for CurrencySettings {
    fn default() -> Self {
        Self {
            allowed: DEFAULT_CURRENCIES.iter().map(|c| c.to_string()).collect(),
        }
    }
}

/// Initial form values.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsSettings {
    pub account_balance: Decimal,
    pub base: String,
    pub quote: String,
}

impl Default for DefaultsSettings {
    fn default() -> Self {
        let form = FormDefaults::default();
        Self {
            account_balance: form.account_balance,
            base: form.base,
            quote: form.quote,
        }
    }
}
