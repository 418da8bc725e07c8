//! Forex position-size calculator CLI.

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use fxcalc_monitor::{setup_logging, LogFormat};
use std::path::Path;
use tracing::{debug, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli::load_settings(&cli.config)?;

    // Setup logging
    let log_level = cli
        .log_level
        .map(|l| l.as_str().to_string())
        .unwrap_or_else(|| config.logging.level.clone());
    let format_setting = config.logging.format.parse::<LogFormat>();
    let format = if cli.json_logs {
        LogFormat::Json
    } else {
        format_setting.clone().unwrap_or_default()
    };
    let _guard = setup_logging(&log_level, format, config.logging.file.as_deref().map(Path::new));

    if let Err(e) = format_setting {
        warn!("{}, using pretty logs", e);
    }
    if !cli.config.exists() {
        debug!(path = %cli.config.display(), "Config file not found, using defaults");
    }

    // Execute command
    match cli.command {
        Commands::Calculate(args) => cli::commands::calculate::run(args, &config).await,
        Commands::Format(args) => cli::commands::format::run(args).await,
        Commands::Parse(args) => cli::commands::format::run_parse(args).await,
        Commands::Currencies => cli::commands::currencies::run(&config).await,
        Commands::ValidateConfig => cli::commands::validate::run(&cli.config, &config).await,
        Commands::PrintConfig => cli::commands::print_config::run(&config).await,
    }
}
