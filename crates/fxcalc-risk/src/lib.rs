//! Risk and lot-size calculation.
//!
//! Provides risk conversions, the input validation gate, exchange-rate
//! acquisition and the calculation state machine.

mod calculator;
mod position_sizer;
mod rates;
mod validation;

pub use calculator::{CalculationState, LotSizeCalculator, RateRequest, Trigger};
pub use position_sizer::{
    compute_lot_size, format_risk_percent, risk_amount_from_percent, risk_percent_from_amount,
};
pub use rates::{acquire_rate, check_rate};
pub use validation::{InputValidator, ValidatedInputs};
