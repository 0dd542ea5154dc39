//! Currency conversion error types.

use rust_decimal::Decimal;
use splitledger_shared::AppError;
use splitledger_shared::types::CurrencyCode;
use thiserror::Error;

/// Errors a rate source can report.
///
/// These never reach the balance calculator's caller: the converter
/// recovers from them locally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    /// No rate could be obtained for the pair (network error, unknown pair, timeout).
    #[error("No exchange rate available for {from} to {to}: {reason}")]
    RateUnavailable {
        /// Source currency code.
        from: CurrencyCode,
        /// Target currency code.
        to: CurrencyCode,
        /// What went wrong.
        reason: String,
    },

    /// The source returned a rate that cannot be used.
    #[error("Exchange rate for {from} to {to} must be positive, got {rate}")]
    InvalidRate {
        /// Source currency code.
        from: CurrencyCode,
        /// Target currency code.
        to: CurrencyCode,
        /// The rejected rate.
        rate: Decimal,
    },

    /// Applying the rate does not fit in a `Decimal`.
    #[error("Converting {amount} from {from} to {to} overflows")]
    Overflow {
        /// Source currency code.
        from: CurrencyCode,
        /// Target currency code.
        to: CurrencyCode,
        /// The amount that could not be converted.
        amount: Decimal,
    },

    /// A configured pair key is not of the form `FROM_TO`.
    #[error("Invalid currency pair key: {0}")]
    InvalidPairKey(String),
}

impl ConversionError {
    /// Returns the error code for logs and reports.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::RateUnavailable { .. } => "RATE_UNAVAILABLE",
            Self::InvalidRate { .. } => "INVALID_RATE",
            Self::Overflow { .. } => "CONVERSION_OVERFLOW",
            Self::InvalidPairKey(_) => "INVALID_PAIR_KEY",
        }
    }

    /// Convenience constructor for [`ConversionError::RateUnavailable`].
    pub fn unavailable(
        from: &CurrencyCode,
        to: &CurrencyCode,
        reason: impl Into<String>,
    ) -> Self {
        Self::RateUnavailable {
            from: from.clone(),
            to: to.clone(),
            reason: reason.into(),
        }
    }
}

impl From<ConversionError> for AppError {
    fn from(err: ConversionError) -> Self {
        match err {
            ConversionError::InvalidPairKey(_) => Self::Configuration(err.to_string()),
            _ => Self::ExternalService(err.to_string()),
        }
    }
}
