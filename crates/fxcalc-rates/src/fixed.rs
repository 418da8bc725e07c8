//! Fixed-table rate provider for offline use.

use async_trait::async_trait;
use fxcalc_core::error::RateError;
use fxcalc_core::traits::RateProvider;
use fxcalc_core::types::CurrencyCode;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Serves rates from a fixed table.
#[derive(Debug, Clone, Default)]
pub struct FixedRateProvider {
    rates: HashMap<CurrencyCode, Decimal>,
}

impl FixedRateProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the rate for `quote` (quote units per USD).
    pub fn with_rate(mut self, quote: CurrencyCode, rate: Decimal) -> Self {
        self.rates.insert(quote, rate);
        self
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

#[async_trait]
impl RateProvider for FixedRateProvider {
    async fn fetch_rate(&self, quote: CurrencyCode) -> Result<Decimal, RateError> {
        self.rates
            .get(&quote)
            .copied()
            .ok_or_else(|| RateError::MissingRate(quote.to_string()))
    }

    fn name(&self) -> &str {
        "Fixed"
    }
}
