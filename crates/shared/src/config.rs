//! Application configuration management.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::types::CurrencyCode;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Ledger configuration.
    #[serde(default)]
    pub ledger: LedgerConfig,
    /// Exchange rate source configuration.
    #[serde(default)]
    pub rates: RatesConfig,
}

/// Ledger configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LedgerConfig {
    /// Currency balances are reported in when the caller does not pick one.
    #[serde(default = "CurrencyCode::usd")]
    pub default_currency: CurrencyCode,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            default_currency: CurrencyCode::usd(),
        }
    }
}

/// Exchange rate source configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RatesConfig {
    /// Base URL of the pair-keyed rate service.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// API key appended to rate requests, if the service needs one.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// How long a fetched rate stays cached, in seconds.
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
    /// Maximum number of cached currency pairs.
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: u64,
    /// Offline rate table keyed `FROM_TO`. When non-empty it replaces the HTTP source.
    #[serde(default)]
    pub fixed: BTreeMap<String, Decimal>,
}

fn default_base_url() -> String {
    "https://free.currconv.com/api/v7".to_string()
}

fn default_timeout_secs() -> u64 {
    5
}

fn default_cache_ttl_secs() -> u64 {
    3600 // 1 hour
}

fn default_cache_capacity() -> u64 {
    1000
}

impl Default for RatesConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
            cache_ttl_secs: default_cache_ttl_secs(),
            cache_capacity: default_cache_capacity(),
            fixed: BTreeMap::new(),
        }
    }
}

impl RatesConfig {
    /// Returns true if rates come from the fixed table rather than the network.
    #[must_use]
    pub fn is_offline(&self) -> bool {
        !self.fixed.is_empty()
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Configuration` if configuration cannot be loaded
    /// or a value is out of range.
    pub fn load() -> AppResult<Self> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("SPLITLEDGER").separator("__"))
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> AppResult<()> {
        if self.rates.timeout_secs == 0 {
            return Err(AppError::Configuration(
                "rates.timeout_secs must be at least 1".to_string(),
            ));
        }
        if self.rates.cache_capacity == 0 {
            return Err(AppError::Configuration(
                "rates.cache_capacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
