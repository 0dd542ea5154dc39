//! Property-based tests for currency conversion.
//!
//! - Direct conversion is amount * rate
//! - Inverse conversion agrees with dividing by the quoted rate
//! - Conversion without any rate preserves the amount

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use splitledger_shared::types::CurrencyCode;

use super::conversion::{ConversionMethod, CurrencyConverter};
use super::source::FixedRates;

/// Strategy to generate positive decimal amounts (0.01 to 1,000,000.00).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate positive exchange rates (0.0001 to 10000.0000).
fn positive_rate() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|v| Decimal::new(v, 4))
}

fn code(s: &str) -> CurrencyCode {
    CurrencyCode::new(s).unwrap()
}

fn block_on<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
        .block_on(future)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Direct lookups multiply by the quoted rate without rounding.
    #[test]
    fn prop_direct_conversion_multiplies(
        amount in positive_amount(),
        rate in positive_rate(),
    ) {
        let converter = CurrencyConverter::new(
            FixedRates::new().with_rate(&code("EUR"), &code("USD"), rate),
        );
        let result = block_on(converter.convert(amount, &code("EUR"), &code("USD")));

        prop_assert_eq!(result.method, ConversionMethod::Direct);
        prop_assert_eq!(result.money.amount, amount * rate);
    }

    /// Inverse lookups divide by the quoted reverse rate.
    #[test]
    fn prop_inverse_conversion_divides(
        amount in positive_amount(),
        rate in positive_rate(),
    ) {
        let converter = CurrencyConverter::new(
            FixedRates::new().with_rate(&code("USD"), &code("EUR"), rate),
        );
        let result = block_on(converter.convert(amount, &code("EUR"), &code("USD")));

        prop_assert_eq!(result.method, ConversionMethod::Inverse);
        let expected = amount / rate;
        let diff = (result.money.amount - expected).abs();
        prop_assert!(
            diff < dec!(0.000001),
            "inverse conversion drifted: got {}, expected {}",
            result.money.amount,
            expected
        );
    }

    /// Without any rate the amount passes through unchanged.
    #[test]
    fn prop_missing_rate_preserves_amount(amount in positive_amount()) {
        let converter = CurrencyConverter::new(FixedRates::new());
        let result = block_on(converter.convert(amount, &code("GBP"), &code("JPY")));

        prop_assert_eq!(result.method, ConversionMethod::PassThrough);
        prop_assert_eq!(result.money.amount, amount);
        prop_assert_eq!(result.money.currency, code("JPY"));
    }
}
