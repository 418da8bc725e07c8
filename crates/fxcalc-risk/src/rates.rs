//! Exchange-rate acquisition.

use fxcalc_core::error::RateError;
use fxcalc_core::traits::RateProvider;
use fxcalc_core::types::CurrencyCode;
use rust_decimal::Decimal;
use tracing::debug;

/// Get the quote-per-USD rate for a pair.
///
/// A USD quote is exactly 1 and never reaches the provider.
pub async fn acquire_rate(
    quote: CurrencyCode,
    provider: &dyn RateProvider,
) -> Result<Decimal, RateError> {
    if quote.is_usd() {
        return Ok(Decimal::ONE);
    }

    debug!(%quote, provider = provider.name(), "Fetching exchange rate");
    let rate = provider.fetch_rate(quote).await?;
    check_rate(quote, rate)
}

/// Reject rates a lot size cannot be computed from.
pub fn check_rate(quote: CurrencyCode, rate: Decimal) -> Result<Decimal, RateError> {
    if rate > Decimal::ZERO {
        Ok(rate)
    } else {
        Err(RateError::InvalidRate {
            currency: quote.to_string(),
            value: rate.to_string(),
        })
    }
}
