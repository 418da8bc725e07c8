//! Risk conversions and lot sizing.

use fxcalc_core::types::{LotSize, STANDARD_LOT_UNITS};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use tracing::warn;

use crate::validation::ValidatedInputs;

/// Money at risk for a percentage of the balance.
///
/// `balance * percent / 100`. Saturates at `Decimal::MAX` instead of
/// overflowing.
pub fn risk_amount_from_percent(balance: Decimal, percent: Decimal) -> Decimal {
    (percent / dec!(100))
        .checked_mul(balance)
        .unwrap_or(Decimal::MAX)
}

/// Percentage of the balance that `amount` represents, rounded to 1 dp.
///
/// A zero balance has no meaningful percentage and yields `None`; the form
/// shows that as a blank field.
pub fn risk_percent_from_amount(balance: Decimal, amount: Decimal) -> Option<Decimal> {
    let ratio = amount.checked_div(balance)?;
    let percent = ratio.checked_mul(dec!(100))?;
    let mut percent = percent.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    percent.rescale(1);
    Some(percent)
}

/// Render a risk percentage for the percent field (`"1.0"`, blank for `None`).
pub fn format_risk_percent(percent: Option<Decimal>) -> String {
    percent.map(|p| p.to_string()).unwrap_or_default()
}

/// Lot size that loses exactly the risk amount when the stop loss is hit.
///
/// ```text
/// pip_value = risk_amount * rate / stop_loss_pips / pip_decimal
/// lots      = pip_value / 100_000
/// ```
///
/// `rate` is quote units per USD; `pip_decimal` follows the quote currency
/// (0.01 for JPY, 0.0001 otherwise).
pub fn compute_lot_size(inputs: &ValidatedInputs, rate: Decimal) -> LotSize {
    let pip_decimal = inputs.pair.pip_convention().pip_decimal();

    let pip_value = inputs
        .risk_amount
        .checked_mul(rate)
        .and_then(|v| v.checked_div(inputs.stop_loss_pips))
        .and_then(|v| v.checked_div(pip_decimal));

    match pip_value {
        Some(pip_value) => LotSize::new(pip_value / STANDARD_LOT_UNITS),
        None => {
            warn!(
                risk_amount = %inputs.risk_amount,
                stop_loss_pips = %inputs.stop_loss_pips,
                %rate,
                "Lot size out of range, saturating"
            );
            LotSize::new(Decimal::MAX / STANDARD_LOT_UNITS)
        }
    }
}
