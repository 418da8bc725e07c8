//! CLI definitions.

pub mod commands;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use fxcalc_config::{load_config, load_config_str, AppConfig};
use rust_decimal::Decimal;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "fxcalc")]
#[command(author, version, about = "Forex position-size calculator")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Log level (overrides the config file)
    #[arg(short, long)]
    pub log_level: Option<LogLevel>,

    /// Enable JSON log format
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Calculate the lot size for a trade
    Calculate(CalculateArgs),
    /// Format an amount the way the input fields display it
    Format(FormatArgs),
    /// Parse the digits out of amount text
    Parse(ParseArgs),
    /// List accepted currencies
    Currencies,
    /// Validate configuration
    ValidateConfig,
    /// Print the effective configuration as TOML
    PrintConfig,
}

#[derive(clap::Args)]
pub struct CalculateArgs {
    /// Account balance; separators and `$` are ignored (default from config)
    #[arg(short, long)]
    pub balance: Option<String>,

    /// Risk as a percent of the balance
    #[arg(short = 'p', long, conflicts_with = "risk_amount")]
    pub risk_percent: Option<String>,

    /// Risk as an amount in account currency
    #[arg(short = 'a', long)]
    pub risk_amount: Option<String>,

    /// Stop loss distance in pips
    #[arg(short, long)]
    pub stop_loss: String,

    /// Base currency (default from config)
    #[arg(long)]
    pub base: Option<String>,

    /// Quote currency (default from config)
    #[arg(long)]
    pub quote: Option<String>,

    /// Use this USD→quote rate instead of fetching one
    #[arg(long)]
    pub offline_rate: Option<Decimal>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,
}

#[derive(clap::Args)]
pub struct FormatArgs {
    /// Amount to format
    #[arg(allow_hyphen_values = true)]
    pub amount: Decimal,
}

#[derive(clap::Args)]
pub struct ParseArgs {
    /// Raw text, e.g. "1,234$"
    #[arg(allow_hyphen_values = true)]
    pub text: String,
}

/// Load the config file, falling back to built-in defaults (still layered
/// under the environment) when the file does not exist.
pub fn load_settings(path: &Path) -> Result<AppConfig> {
    if path.exists() {
        return load_config(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()));
    }

    load_config_str("").context("Failed to read configuration from the environment")
}
