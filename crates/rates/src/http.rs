//! HTTP client for a pair-keyed exchange rate service.
//!
//! One request per pair:
//!
//! ```text
//! GET {base_url}/convert?q=EUR_USD&compact=ultra[&apiKey=...]
//! {"EUR_USD": 1.0842}
//! ```

use std::str::FromStr;
use std::time::Duration;

use rust_decimal::Decimal;
use serde_json::Value;
use splitledger_core::currency::{ConversionError, RateSource};
use splitledger_shared::config::RatesConfig;
use splitledger_shared::types::CurrencyCode;
use tracing::debug;

use crate::error::RateClientError;

/// Rate source backed by the remote conversion endpoint.
#[derive(Debug, Clone)]
pub struct HttpRateSource {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpRateSource {
    /// Builds a client from the rates configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RateClientError::Http`] if the TLS backend cannot be initialised.
    pub fn new(config: &RatesConfig) -> Result<Self, RateClientError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    /// Endpoint all pair lookups go to.
    #[must_use]
    pub fn convert_url(&self) -> String {
        format!("{}/convert", self.base_url)
    }

    /// Fetches the rate for `from` → `to`.
    ///
    /// # Errors
    ///
    /// Fails on transport errors, non-success statuses, unreadable bodies
    /// and bodies that do not quote the requested pair.
    pub async fn fetch_rate(
        &self,
        from: &CurrencyCode,
        to: &CurrencyCode,
    ) -> Result<Decimal, RateClientError> {
        let key = from.pair_key(to);

        let mut request = self
            .client
            .get(self.convert_url())
            .query(&[("q", key.as_str()), ("compact", "ultra")]);
        if let Some(api_key) = &self.api_key {
            request = request.query(&[("apiKey", api_key.as_str())]);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(RateClientError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        parse_compact(&body, &key)
    }
}

impl RateSource for HttpRateSource {
    async fn rate(
        &self,
        from: &CurrencyCode,
        to: &CurrencyCode,
    ) -> Result<Decimal, ConversionError> {
        match self.fetch_rate(from, to).await {
            Ok(rate) => {
                debug!(from = %from, to = %to, rate = %rate, "Fetched exchange rate");
                Ok(rate)
            }
            Err(err) => {
                debug!(
                    from = %from,
                    to = %to,
                    code = err.error_code(),
                    error = %err,
                    "Exchange rate request failed"
                );
                Err(err.into_conversion_error(from, to))
            }
        }
    }
}

/// Reads the rate for `key` out of a compact response body.
///
/// The service quotes rates as JSON numbers; string values are accepted too.
///
/// # Errors
///
/// Returns [`RateClientError::Decode`] for malformed JSON or a non-numeric
/// rate, and [`RateClientError::MissingPair`] when `key` is absent.
pub fn parse_compact(body: &[u8], key: &str) -> Result<Decimal, RateClientError> {
    let value: Value =
        serde_json::from_slice(body).map_err(|e| RateClientError::Decode(e.to_string()))?;

    let quoted = value
        .get(key)
        .ok_or_else(|| RateClientError::MissingPair(key.to_string()))?;

    let text = match quoted {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        other => {
            return Err(RateClientError::Decode(format!(
                "rate for {key} is not a number: {other}"
            )));
        }
    };

    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|e| RateClientError::Decode(format!("rate for {key} ({text}): {e}")))
}
