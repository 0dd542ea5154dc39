//! Exchange rate types and logic.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use splitledger_shared::types::CurrencyCode;

use super::error::ConversionError;

/// Exchange rate between two currencies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeRate {
    /// Source currency code.
    pub from_currency: CurrencyCode,
    /// Target currency code.
    pub to_currency: CurrencyCode,
    /// Exchange rate (1 from_currency = rate to_currency).
    pub rate: Decimal,
}

impl ExchangeRate {
    /// Creates a new exchange rate.
    ///
    /// # Errors
    ///
    /// Returns [`ConversionError::InvalidRate`] unless the rate is positive.
    pub fn new(
        from_currency: CurrencyCode,
        to_currency: CurrencyCode,
        rate: Decimal,
    ) -> Result<Self, ConversionError> {
        if rate <= Decimal::ZERO {
            return Err(ConversionError::InvalidRate {
                from: from_currency,
                to: to_currency,
                rate,
            });
        }
        Ok(Self {
            from_currency,
            to_currency,
            rate,
        })
    }

    /// Returns the inverse rate.
    #[must_use]
    pub fn inverse(&self) -> Self {
        Self {
            from_currency: self.to_currency.clone(),
            to_currency: self.from_currency.clone(),
            rate: Decimal::ONE / self.rate,
        }
    }

    /// Converts an amount in `from_currency` into `to_currency`.
    ///
    /// No rounding: converted amounts feed further aggregation.
    ///
    /// # Errors
    ///
    /// Returns [`ConversionError::Overflow`] if the result does not fit in a
    /// `Decimal`.
    pub fn apply(&self, amount: Decimal) -> Result<Decimal, ConversionError> {
        amount
            .checked_mul(self.rate)
            .ok_or_else(|| ConversionError::Overflow {
                from: self.from_currency.clone(),
                to: self.to_currency.clone(),
                amount,
            })
    }
}
