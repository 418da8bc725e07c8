//! Exchange-rate provider trait definition.

use crate::error::RateError;
use crate::types::CurrencyCode;
use async_trait::async_trait;
use rust_decimal::Decimal;

/// Source of USD-based exchange rates.
///
/// The calculator only ever needs one number: how many units of the quote
/// currency one US dollar buys. Implementations do not need to special-case
/// USD; the risk layer short-circuits that pair to a rate of exactly 1.
#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Fetch the rate for `quote`, expressed as quote units per USD.
    ///
    /// # Arguments
    /// * `quote` - The quote currency of the pair being sized
    ///
    /// # Returns
    /// A strictly positive rate, or the reason it could not be obtained
    async fn fetch_rate(&self, quote: CurrencyCode) -> Result<Decimal, RateError>;

    /// Get the provider name.
    fn name(&self) -> &str;
}
