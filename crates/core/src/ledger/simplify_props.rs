//! Property-based tests for DebtSimplifier.
//!
//! - Zero-sum: net positions sum to zero before and after settlement
//! - Minimality: at most N - 1 transfers for N people with a position
//! - Transfers settle every position exactly

use proptest::prelude::*;
use rust_decimal::Decimal;
use splitledger_shared::types::CurrencyCode;

use super::balance::{Balance, NetBalance};
use super::simplify::DebtSimplifier;
use super::types::Party;

fn party(i: usize) -> Party {
    Party {
        email: format!("p{i}@example.com"),
        name: format!("Person {i}"),
    }
}

/// Strategy to generate pairwise balances among up to 8 people, in cents.
fn balances_strategy() -> impl Strategy<Value = Vec<Balance>> {
    prop::collection::vec((0usize..8, 0usize..8, 1i64..1_000_000i64), 0..20).prop_map(|raw| {
        raw.into_iter()
            .filter(|(debtor, creditor, _)| debtor != creditor)
            .map(|(debtor, creditor, cents)| Balance {
                debtor: party(debtor),
                creditor: party(creditor),
                amount: Decimal::new(cents, 2),
                currency: CurrencyCode::usd(),
                breakdown: vec![],
                simplified: false,
            })
            .collect()
    })
}

/// Positions left after applying `transfers` on top of `nets`.
fn remaining(nets: &[NetBalance], transfers: &[Balance]) -> Vec<Decimal> {
    nets.iter()
        .map(|net| {
            let paid: Decimal = transfers
                .iter()
                .filter(|t| t.debtor.email == net.party.email)
                .map(|t| t.amount)
                .sum();
            let received: Decimal = transfers
                .iter()
                .filter(|t| t.creditor.email == net.party.email)
                .map(|t| t.amount)
                .sum();
            net.amount + paid - received
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Net positions always sum to zero.
    #[test]
    fn prop_net_positions_sum_to_zero(balances in balances_strategy()) {
        let nets = NetBalance::from_balances(&balances);
        let total: Decimal = nets.iter().map(|n| n.amount).sum();
        prop_assert_eq!(total, Decimal::ZERO);
    }

    /// At most N - 1 transfers for N people with a non-zero position.
    #[test]
    fn prop_transfer_count_is_minimal(balances in balances_strategy()) {
        let nets = NetBalance::from_balances(&balances);
        let active = nets.iter().filter(|n| !n.amount.is_zero()).count();

        let transfers = DebtSimplifier::simplify(&balances, &CurrencyCode::usd());

        prop_assert!(transfers.len() <= active.saturating_sub(1));
    }

    /// Applying the transfers leaves everyone at exactly zero.
    #[test]
    fn prop_transfers_settle_everyone(balances in balances_strategy()) {
        let nets = NetBalance::from_balances(&balances);
        let transfers = DebtSimplifier::simplify(&balances, &CurrencyCode::usd());

        for left in remaining(&nets, &transfers) {
            prop_assert_eq!(left, Decimal::ZERO);
        }

        let owed: Decimal = nets
            .iter()
            .map(|n| n.amount)
            .filter(|a| *a > Decimal::ZERO)
            .sum();
        let moved: Decimal = transfers.iter().map(|t| t.amount).sum();
        prop_assert_eq!(owed, moved);
    }

    /// Transfers are well-formed.
    #[test]
    fn prop_transfers_well_formed(balances in balances_strategy()) {
        for transfer in DebtSimplifier::simplify(&balances, &CurrencyCode::usd()) {
            prop_assert!(transfer.simplified);
            prop_assert!(transfer.breakdown.is_empty());
            prop_assert!(transfer.amount > Decimal::ZERO);
            prop_assert_ne!(transfer.debtor.email, transfer.creditor.email);
        }
    }
}
