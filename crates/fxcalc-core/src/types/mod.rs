//! Core value types for the lot-size calculator.

mod currency;
mod inputs;

pub use currency::{CurrencyAllowList, CurrencyCode, CurrencyPair, PipConvention, DEFAULT_CURRENCIES};
pub use inputs::{CalculationInputs, LotSize, STANDARD_LOT_UNITS};
