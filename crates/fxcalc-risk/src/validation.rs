//! Validation gate run before any lot-size computation.

use fxcalc_core::error::{CalcError, CalcResult};
use fxcalc_core::types::{CalculationInputs, CurrencyAllowList, CurrencyPair};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Inputs that passed the validation gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatedInputs {
    pub account_balance: Decimal,
    /// Strictly positive
    pub risk_amount: Decimal,
    /// Strictly positive
    pub stop_loss_pips: Decimal,
    /// Both currencies are on the allow-list
    pub pair: CurrencyPair,
}

/// Checks calculation inputs against the currency allow-list.
#[derive(Debug, Clone, Default)]
pub struct InputValidator {
    allowed: CurrencyAllowList,
}

impl InputValidator {
    pub fn new(allowed: CurrencyAllowList) -> Self {
        Self { allowed }
    }

    /// Validate inputs in a fixed order: stop loss, risk amount, currencies.
    ///
    /// The first failing check decides the error.
    pub fn validate(&self, inputs: &CalculationInputs) -> CalcResult<ValidatedInputs> {
        let stop_loss_pips = inputs
            .stop_loss_pips
            .filter(|pips| *pips > Decimal::ZERO)
            .ok_or(CalcError::InvalidStopLoss)?;

        let risk_amount = inputs
            .risk_amount
            .filter(|amount| *amount > Decimal::ZERO)
            .ok_or(CalcError::InvalidRiskAmount)?;

        let base = self.allowed.resolve(&inputs.base);
        let quote = self.allowed.resolve(&inputs.quote);
        let pair = match (base, quote) {
            (Some(base), Some(quote)) => CurrencyPair::new(base, quote),
            _ => return Err(CalcError::InvalidCurrency),
        };

        Ok(ValidatedInputs {
            account_balance: inputs.account_balance,
            risk_amount,
            stop_loss_pips,
            pair,
        })
    }
}
