//! Frankfurter exchange-rate API client.

use async_trait::async_trait;
use fxcalc_core::error::RateError;
use fxcalc_core::traits::RateProvider;
use fxcalc_core::types::CurrencyCode;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;

/// Frankfurter API configuration.
#[derive(Debug, Clone)]
pub struct FrankfurterConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl FrankfurterConfig {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into(),
            timeout,
        }
    }
}

impl Default for FrankfurterConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.frankfurter.app".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// `/latest` response. Only the rates map is read.
#[derive(Debug, Deserialize)]
struct LatestResponse {
    rates: HashMap<String, serde_json::Value>,
}

/// Frankfurter API client.
pub struct FrankfurterClient {
    config: FrankfurterConfig,
    client: Client,
}

impl FrankfurterClient {
    /// Create a new client.
    pub fn new(config: FrankfurterConfig) -> Result<Self, RateError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| RateError::Connection(e.to_string()))?;

        Ok(Self { config, client })
    }

    /// Get the latest USD → `quote` rate.
    pub async fn latest(&self, quote: CurrencyCode) -> Result<Decimal, RateError> {
        let url = format!("{}/latest", self.config.base_url.trim_end_matches('/'));

        let resp = self
            .client
            .get(&url)
            .query(&[("from", "USD"), ("to", quote.as_str())])
            .send()
            .await
            .map_err(|e| RateError::Connection(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(RateError::Api(format!("{}: {}", status, text)));
        }

        let data: LatestResponse = resp
            .json()
            .await
            .map_err(|e| RateError::Parse(e.to_string()))?;

        let value = data
            .rates
            .get(quote.as_str())
            .ok_or_else(|| RateError::MissingRate(quote.to_string()))?;

        let rate = parse_rate(quote, value)?;
        debug!(%quote, %rate, "Received exchange rate");
        Ok(rate)
    }
}

/// Read a JSON rate without going through `f64`.
fn parse_rate(quote: CurrencyCode, value: &serde_json::Value) -> Result<Decimal, RateError> {
    let invalid = || RateError::InvalidRate {
        currency: quote.to_string(),
        value: value.to_string(),
    };

    let number = match value {
        serde_json::Value::Number(n) => n.to_string(),
        _ => return Err(invalid()),
    };
    Decimal::from_str(&number)
        .or_else(|_| Decimal::from_scientific(&number))
        .map_err(|_| invalid())
}

#[async_trait]
impl RateProvider for FrankfurterClient {
    async fn fetch_rate(&self, quote: CurrencyCode) -> Result<Decimal, RateError> {
        self.latest(quote).await
    }

    fn name(&self) -> &str {
        "Frankfurter"
    }
}
