//! Error types for the lot-size calculator.

use thiserror::Error;

/// Reason a lot-size calculation could not proceed.
///
/// Every variant is recoverable: the user corrects the input and triggers the
/// calculation again. The `Display` text is what the form shows in place of
/// the lot size.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalcError {
    #[error("Please enter a valid stop loss value")]
    InvalidStopLoss,

    #[error("Please enter a valid risk amount")]
    InvalidRiskAmount,

    #[error("Please enter a valid base or quote currency")]
    InvalidCurrency,

    #[error("Error fetching exchange rate")]
    RateFetch(#[from] RateError),
}

/// Exchange-rate provider errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RateError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("No rate returned for {0}")]
    MissingRate(String),

    #[error("Invalid rate for {currency}: {value}")]
    InvalidRate { currency: String, value: String },
}

/// Result type alias for calculator operations.
pub type CalcResult<T> = Result<T, CalcError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_rate_fetch_keeps_source() {
        let err = CalcError::from(RateError::MissingRate("JPY".into()));
        assert_eq!(err.to_string(), "Error fetching exchange rate");
        assert_eq!(err.source().unwrap().to_string(), "No rate returned for JPY");
    }
}
