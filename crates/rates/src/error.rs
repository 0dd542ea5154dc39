//! Rate client error types.

use splitledger_core::currency::ConversionError;
use splitledger_shared::AppError;
use splitledger_shared::types::CurrencyCode;
use thiserror::Error;

/// Errors talking to the rate service.
#[derive(Debug, Error)]
pub enum RateClientError {
    /// Transport failure, including timeouts.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("Rate service returned status {0}")]
    Status(u16),

    /// The response body was not the expected JSON.
    #[error("Could not decode rate response: {0}")]
    Decode(String),

    /// The response did not contain the requested pair.
    #[error("Rate service has no rate for {0}")]
    MissingPair(String),
}

impl RateClientError {
    /// Returns the error code for logs.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Http(_) => "RATE_HTTP_ERROR",
            Self::Status(_) => "RATE_BAD_STATUS",
            Self::Decode(_) => "RATE_DECODE_ERROR",
            Self::MissingPair(_) => "RATE_MISSING_PAIR",
        }
    }

    /// Maps the failure onto the engine's conversion error.
    #[must_use]
    pub fn into_conversion_error(self, from: &CurrencyCode, to: &CurrencyCode) -> ConversionError {
        ConversionError::unavailable(from, to, self.to_string())
    }
}

impl From<RateClientError> for AppError {
    fn from(err: RateClientError) -> Self {
        Self::ExternalService(err.to_string())
    }
}
