//! Multi-currency handling and exchange rates.
//!
//! Rates are looked up through the [`RateSource`] port. [`CurrencyConverter`]
//! layers the recovery policy on top: direct pair, then inverse pair, then a
//! logged 1:1 pass-through. Conversion never fails from the caller's view.

pub mod conversion;
pub mod error;
pub mod exchange;
pub mod service;
pub mod source;

#[cfg(test)]
mod props;

pub use conversion::{Conversion, ConversionMethod, CurrencyConverter};
pub use error::ConversionError;
pub use exchange::ExchangeRate;
pub use service::CurrencyService;
pub use source::{FixedRates, RateSource};
