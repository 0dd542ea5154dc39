//! Exchange rate lookup port.

use std::collections::{BTreeMap, HashMap};
use std::future::Future;

use rust_decimal::Decimal;
use splitledger_shared::types::CurrencyCode;

use super::error::ConversionError;

/// Something that can quote an exchange rate for a currency pair.
///
/// The production implementation lives behind the network; the engine only
/// sees this trait. A returned rate means `1 from = rate to`.
pub trait RateSource: Send + Sync {
    /// Looks up the rate for `from` → `to`.
    fn rate(
        &self,
        from: &CurrencyCode,
        to: &CurrencyCode,
    ) -> impl Future<Output = Result<Decimal, ConversionError>> + Send;
}

/// In-memory rate table keyed by `FROM_TO` pair keys.
///
/// Only the pairs that were inserted are known: the inverse is not derived
/// here, that is the converter's job.
#[derive(Debug, Clone, Default)]
pub struct FixedRates {
    rates: HashMap<String, Decimal>,
}

impl FixedRates {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rate, builder style.
    #[must_use]
    pub fn with_rate(mut self, from: &CurrencyCode, to: &CurrencyCode, rate: Decimal) -> Self {
        self.rates.insert(from.pair_key(to), rate);
        self
    }

    /// Builds a table from configured `FROM_TO` keys.
    ///
    /// # Errors
    ///
    /// Returns [`ConversionError::InvalidPairKey`] for a key that is not two
    /// currency codes joined by `_`.
    pub fn from_table(table: &BTreeMap<String, Decimal>) -> Result<Self, ConversionError> {
        let mut rates = HashMap::with_capacity(table.len());
        for (key, rate) in table {
            let (from, to) = key
                .split_once('_')
                .ok_or_else(|| ConversionError::InvalidPairKey(key.clone()))?;
            let from = CurrencyCode::new(from)
                .map_err(|_| ConversionError::InvalidPairKey(key.clone()))?;
            let to =
                CurrencyCode::new(to).map_err(|_| ConversionError::InvalidPairKey(key.clone()))?;
            rates.insert(from.pair_key(&to), *rate);
        }
        Ok(Self { rates })
    }

    /// Number of known pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// Returns true if no pair is known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl RateSource for FixedRates {
    async fn rate(
        &self,
        from: &CurrencyCode,
        to: &CurrencyCode,
    ) -> Result<Decimal, ConversionError> {
        self.rates
            .get(&from.pair_key(to))
            .copied()
            .ok_or_else(|| ConversionError::unavailable(from, to, "pair not in rate table"))
    }
}
