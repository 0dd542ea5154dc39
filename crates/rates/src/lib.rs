//! Exchange rate sources for Splitledger.
//!
//! - `http` - client for a pair-keyed rate service
//! - `cache` - TTL cache in front of any [`RateSource`](splitledger_core::currency::RateSource)
//! - `error` - transport and decode errors

pub mod cache;
pub mod error;
pub mod http;

pub use cache::CachedRateSource;
pub use error::RateClientError;
pub use http::HttpRateSource;
