//! Exchange rate caching using Moka.
//!
//! Sits in front of any [`RateSource`] so repeated lookups of the same pair
//! within the TTL do not hit the network.

use std::time::Duration;

use moka::future::Cache;
use rust_decimal::Decimal;
use splitledger_core::currency::{ConversionError, RateSource};
use splitledger_shared::config::RatesConfig;
use splitledger_shared::types::CurrencyCode;
use tracing::trace;

/// Default cache capacity (number of currency pairs).
const DEFAULT_CACHE_CAPACITY: u64 = 1000;

/// Default time-to-live for cached rates (1 hour).
const DEFAULT_TTL_SECS: u64 = 3600;

/// TTL cache keyed by `FROM_TO` pair.
///
/// Only successful lookups are cached; a failure is retried on the next call.
#[derive(Clone)]
pub struct CachedRateSource<S> {
    inner: S,
    cache: Cache<String, Decimal>,
}

impl<S: RateSource> CachedRateSource<S> {
    /// Wraps `inner` with default settings: 1000 pairs, 1 hour TTL.
    #[must_use]
    pub fn new(inner: S) -> Self {
        Self::with_config(inner, DEFAULT_CACHE_CAPACITY, DEFAULT_TTL_SECS)
    }

    /// Wraps `inner` with a custom capacity and TTL.
    ///
    /// # Arguments
    ///
    /// * `max_capacity` - Maximum number of pairs to cache
    /// * `ttl_secs` - Time-to-live in seconds for each rate
    #[must_use]
    pub fn with_config(inner: S, max_capacity: u64, ttl_secs: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { inner, cache }
    }

    /// Wraps `inner` using the cache settings from configuration.
    #[must_use]
    pub fn from_config(inner: S, config: &RatesConfig) -> Self {
        Self::with_config(inner, config.cache_capacity, config.cache_ttl_secs)
    }

    /// Returns the wrapped source.
    pub const fn inner(&self) -> &S {
        &self.inner
    }

    /// Drops every cached rate.
    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }
}

impl<S: RateSource> RateSource for CachedRateSource<S> {
    async fn rate(
        &self,
        from: &CurrencyCode,
        to: &CurrencyCode,
    ) -> Result<Decimal, ConversionError> {
        let key = from.pair_key(to);

        if let Some(rate) = self.cache.get(&key).await {
            trace!(pair = %key, "Exchange rate cache hit");
            return Ok(rate);
        }

        let rate = self.inner.rate(from, to).await?;
        self.cache.insert(key, rate).await;
        Ok(rate)
    }
}

impl<S> std::fmt::Debug for CachedRateSource<S>
where
    S: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedRateSource")
            .field("inner", &self.inner)
            .field("entries", &self.cache.entry_count())
            .finish()
    }
}
