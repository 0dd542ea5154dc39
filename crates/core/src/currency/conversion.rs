//! Currency conversion with local recovery.
//!
//! Lookup priority:
//! 1. Same currency: amount unchanged, no lookup
//! 2. Direct rate (from -> to)
//! 3. Inverse rate (to -> from, then invert)
//! 4. Pass-through at 1:1, logged
//!
//! A wrong-currency amount is preferred over a failed computation, so
//! [`CurrencyConverter::convert`] is infallible.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use splitledger_shared::types::{CurrencyCode, Money};
use tracing::warn;

use super::error::ConversionError;
use super::exchange::ExchangeRate;
use super::source::RateSource;

/// How a converted amount was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversionMethod {
    /// Source and target currency were the same.
    Identity,
    /// Direct rate found (from -> to).
    Direct,
    /// Inverse rate calculated (to -> from, then inverted).
    Inverse,
    /// No rate available; the amount was taken as already in the target currency.
    PassThrough,
}

/// Result of a conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    /// Converted amount, labelled with the target currency.
    pub money: Money,
    /// How the amount was obtained.
    pub method: ConversionMethod,
}

impl Conversion {
    /// Returns true if the amount was not actually converted although it needed to be.
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        self.method == ConversionMethod::PassThrough
    }
}

/// Converts amounts through a [`RateSource`] and never fails.
#[derive(Debug, Clone)]
pub struct CurrencyConverter<S> {
    source: S,
}

impl<S: RateSource> CurrencyConverter<S> {
    /// Creates a converter over the given rate source.
    #[must_use]
    pub const fn new(source: S) -> Self {
        Self { source }
    }

    /// Converts `amount` from `from` to `to`.
    pub async fn convert(
        &self,
        amount: Decimal,
        from: &CurrencyCode,
        to: &CurrencyCode,
    ) -> Conversion {
        if from == to {
            return Conversion {
                money: Money::new(amount, to.clone()),
                method: ConversionMethod::Identity,
            };
        }

        let direct = self.lookup(from, to).await;
        let direct_err = match direct.and_then(|rate| rate.apply(amount)) {
            Ok(converted) => {
                return Conversion {
                    money: Money::new(converted, to.clone()),
                    method: ConversionMethod::Direct,
                };
            }
            Err(err) => err,
        };

        warn!(
            from = %from,
            to = %to,
            error = %direct_err,
            "Direct rate lookup failed, trying inverse pair"
        );

        let inverse = self.lookup(to, from).await;
        match inverse.and_then(|rate| rate.inverse().apply(amount)) {
            Ok(converted) => Conversion {
                money: Money::new(converted, to.clone()),
                method: ConversionMethod::Inverse,
            },
            Err(inverse_err) => {
                warn!(
                    from = %from,
                    to = %to,
                    amount = %amount,
                    error = %inverse_err,
                    "No exchange rate available, using unconverted amount"
                );
                Conversion {
                    money: Money::new(amount, to.clone()),
                    method: ConversionMethod::PassThrough,
                }
            }
        }
    }

    async fn lookup(
        &self,
        from: &CurrencyCode,
        to: &CurrencyCode,
    ) -> Result<ExchangeRate, ConversionError> {
        let rate = self.source.rate(from, to).await?;
        ExchangeRate::new(from.clone(), to.clone(), rate)
    }
}
