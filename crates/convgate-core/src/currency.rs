//! Currency conversion backed by an external exchange-rate service.
//!
//! The service is reached through the [`RateProvider`] trait so the HTTP
//! client can be swapped out. [`HttpRateProvider`] issues one request per
//! lookup with a finite timeout and never retries.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{ConvertError, Result};
use crate::units::format_number;
use crate::ConversionOutput;

pub const DEFAULT_RATES_URL: &str = "https://open.er-api.com/v6/latest";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Rates relative to one base currency, keyed by ISO 4217 code.
pub type RateTable = HashMap<String, f64>;

#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Fetch the latest rates for `base` (an uppercase currency code).
    async fn latest_rates(&self, base: &str) -> Result<RateTable>;
}

/// Shape of `GET {base_url}/{CODE}` responses.
#[derive(Debug, Deserialize)]
struct RatesResponse {
    result: Option<String>,
    rates: Option<RateTable>,
}

/// [`RateProvider`] talking to an open.er-api.com compatible service.
#[derive(Debug, Clone)]
pub struct HttpRateProvider {
    client: Client,
    base_url: String,
}

impl HttpRateProvider {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> reqwest::Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("convgate/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self { client, base_url: base_url.into() })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl RateProvider for HttpRateProvider {
    async fn latest_rates(&self, base: &str) -> Result<RateTable> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), base);
        debug!(%url, "fetching exchange rates");

        let resp = self.client.get(&url).send().await.map_err(|e| {
            warn!(%url, error = %e, "rate service request failed");
            ConvertError::UpstreamUnavailable(if e.is_timeout() {
                "request timed out".to_owned()
            } else {
                "request failed".to_owned()
            })
        })?;

        if resp.status() != StatusCode::OK {
            warn!(%url, status = %resp.status(), "rate service returned an error status");
            return Err(ConvertError::UpstreamUnavailable(format!(
                "service answered with status {}",
                resp.status().as_u16()
            )));
        }

        let body: RatesResponse = resp.json().await.map_err(|e| {
            warn!(%url, error = %e, "rate service returned malformed JSON");
            ConvertError::UpstreamUnavailable("malformed response".to_owned())
        })?;

        match body {
            RatesResponse { result: Some(result), rates: Some(rates) } if result == "success" => {
                Ok(rates)
            }
            _ => Err(ConvertError::UpstreamUnavailable("unexpected response".to_owned())),
        }
    }
}

fn normalize_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}

/// Convert `value` from one currency to another using the provider's table.
///
/// The output amount is formatted with four decimals, e.g. `"0.9213 EUR"`.
pub async fn convert_currency(
    rates: &dyn RateProvider,
    value: f64,
    from_currency: &str,
    to_currency: &str,
) -> Result<ConversionOutput> {
    let from = normalize_code(from_currency);
    let to = normalize_code(to_currency);

    // The source code becomes a URL path segment.
    if from.is_empty() || !from.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ConvertError::UnknownCurrency(from));
    }

    let table = rates.latest_rates(&from).await?;
    let rate = table.get(&to).copied().ok_or_else(|| ConvertError::UnknownCurrency(to.clone()))?;

    Ok(ConversionOutput {
        input: format!("{} {from}", format_number(value)),
        output: format!("{:.4} {to}", value * rate),
    })
}
