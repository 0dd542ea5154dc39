//! Rounding rules for money leaving the engine.
//!
//! Internal accumulation stays unrounded; values are rounded once, when a
//! balance or breakdown entry is emitted.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

/// Decimal places of every emitted amount.
pub const MONEY_DECIMAL_PLACES: u32 = 2;

/// Currency service for rounding operations.
///
/// Uses Banker's Rounding (MidpointNearestEven) throughout.
pub struct CurrencyService;

impl CurrencyService {
    /// Round a decimal value using Banker's Rounding.
    ///
    /// - Rounds 2.5 → 2 (to nearest even)
    /// - Rounds 3.5 → 4 (to nearest even)
    #[must_use]
    pub fn round(value: Decimal, decimal_places: u32) -> Decimal {
        value.round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointNearestEven)
    }

    /// Round an amount to two decimal places for emission.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use splitledger_core::currency::CurrencyService;
    ///
    /// assert_eq!(CurrencyService::round_money(dec!(33.335)), dec!(33.34));
    /// assert_eq!(CurrencyService::round_money(dec!(33.345)), dec!(33.34));
    /// ```
    #[must_use]
    pub fn round_money(value: Decimal) -> Decimal {
        Self::round(value, MONEY_DECIMAL_PLACES)
    }
}
