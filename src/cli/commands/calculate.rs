//! Calculate command implementation.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use fxcalc_config::AppConfig;
use fxcalc_core::traits::RateProvider;
use fxcalc_core::types::{CalculationInputs, CurrencyCode, LotSize};
use fxcalc_form::{CalculatorForm, Field, FormView};
use fxcalc_rates::{FixedRateProvider, FrankfurterClient};
use fxcalc_risk::CalculationState;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

use crate::cli::{CalculateArgs, OutputFormat};

/// Everything one calculation produced.
#[derive(Debug, Serialize)]
struct CalculationReport {
    generated_at: DateTime<Utc>,
    provider: String,
    inputs: CalculationInputs,
    /// USD→quote rate used, if one was needed
    rate: Option<Decimal>,
    lot_size: Option<LotSize>,
    view: FormView,
    error: Option<String>,
}

pub async fn run(args: CalculateArgs, config: &AppConfig) -> Result<()> {
    let allowed = config.allow_list().context("Invalid currency allow-list")?;
    let mut form = CalculatorForm::new(allowed, config.form_defaults());

    // Feed each argument through the same path a keystroke takes.
    let edits = [
        (Field::AccountBalance, &args.balance),
        (Field::RiskPercent, &args.risk_percent),
        (Field::RiskAmount, &args.risk_amount),
        (Field::Base, &args.base),
        (Field::Quote, &args.quote),
    ];
    for (field, value) in edits {
        if let Some(raw) = value {
            form.on_input(field, raw, raw.chars().count());
        }
    }
    form.on_input(Field::StopLoss, &args.stop_loss, args.stop_loss.chars().count());

    let provider: Box<dyn RateProvider> = match args.offline_rate {
        Some(rate) => {
            let mut fixed = FixedRateProvider::new();
            if let Ok(quote) = form.inputs().quote.parse::<CurrencyCode>() {
                fixed = fixed.with_rate(quote, rate);
            }
            Box::new(fixed)
        }
        None => Box::new(
            FrankfurterClient::new(config.frankfurter()).context("Failed to create rate client")?,
        ),
    };

    info!(provider = provider.name(), "Calculating lot size");
    form.calculate(provider.as_ref()).await;

    let rate = match form.state() {
        CalculationState::Resolved { rate, .. } => Some(*rate),
        _ => None,
    };
    let report = CalculationReport {
        generated_at: Utc::now(),
        provider: provider.name().to_string(),
        inputs: form.inputs(),
        rate,
        lot_size: form.error().is_none().then(|| form.lot_size()),
        view: form.view(),
        error: form.error().map(|e| e.to_string()),
    };

    match args.output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => println!("{}", summary(&report)),
    }

    match form.error() {
        Some(err) => Err(err.clone().into()),
        None => Ok(()),
    }
}

fn summary(report: &CalculationReport) -> String {
    let view = &report.view;
    let mut lines = vec![
        "Lot Size Calculation".to_string(),
        "═══════════════════════════════════════".to_string(),
        format!("Pair:          {}/{}", view.base, view.quote),
        format!("Balance:       {}", view.account_balance),
        format!("Risk:          {} ({}%)", view.risk_amount, view.risk_percent),
        format!("Stop loss:     {} pips", view.stop_loss),
    ];
    if let Some(rate) = report.rate {
        lines.push(format!("Rate USD/{}:  {}", view.quote, rate));
    }
    lines.push(format!("Lot size:      {}", view.result));
    lines.join("\n")
}
