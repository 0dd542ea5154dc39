//! Property-based tests for BalanceCalculator.
//!
//! - Conservation: balances reproduce each person's paid-minus-owed position
//! - No self-debt and at most one balance per unordered pair
//! - Idempotence
//! - Emitted amounts are positive and rounded to cents

use std::collections::HashSet;

use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use splitledger_shared::types::{CurrencyCode, ExpenseId, GroupId};

use super::balance::Balance;
use super::calculator::BalanceCalculator;
use super::types::{Expense, Group, Member};

/// (payer index, split mask, amount in cents, exclude payer)
type ExpenseSpec = (usize, Vec<bool>, i64, bool);

fn members(n: usize) -> Vec<Member> {
    (0..n)
        .map(|i| Member::new(format!("p{i}@example.com"), format!("Person {i}")))
        .collect()
}

/// Strategy to generate one expense over `n` members.
fn expense_spec(n: usize) -> impl Strategy<Value = ExpenseSpec> {
    (
        0..n,
        prop::collection::vec(any::<bool>(), n),
        1i64..10_000_000i64,
        any::<bool>(),
    )
}

/// Strategy to generate a valid group of 2 to 6 members and up to 15 expenses.
fn group_strategy() -> impl Strategy<Value = Group> {
    (2usize..=6).prop_flat_map(|n| {
        prop::collection::vec(expense_spec(n), 0..15).prop_map(move |specs| build_group(n, specs))
    })
}

fn build_group(n: usize, specs: Vec<ExpenseSpec>) -> Group {
    let members = members(n);
    let usd = CurrencyCode::usd();
    let created = Utc.with_ymd_and_hms(2026, 1, 15, 9, 0, 0).unwrap();

    let expenses = specs
        .into_iter()
        .map(|(payer, mask, cents, exclude)| {
            let split: Vec<Member> = members
                .iter()
                .zip(&mask)
                .enumerate()
                .filter(|(i, (_, in_split))| **in_split && *i != payer)
                .map(|(_, (m, _))| m.clone())
                .collect();
            Expense {
                id: ExpenseId::new(),
                description: format!("expense paid by {payer}"),
                amount: Decimal::new(cents, 2),
                currency: usd.clone(),
                paid_by: members[payer].clone(),
                // An excluded payer needs someone to split with.
                exclude_payer: exclude && !split.is_empty(),
                split_between: split,
                created_by: members[payer].clone(),
                created_date: created,
            }
        })
        .collect();

    Group {
        id: GroupId::new(),
        title: "Generated".to_string(),
        admin: members[0].clone(),
        members,
        expenses,
        default_currency: usd,
    }
}

fn calculate(group: &Group) -> Vec<Balance> {
    let amounts: Vec<Decimal> = group.expenses.iter().map(|e| e.amount).collect();
    BalanceCalculator::calculate_converted(group, &CurrencyCode::usd(), &amounts)
}

/// Paid minus owed for `email`, computed straight from the expenses.
fn expected_position(group: &Group, email: &str) -> Decimal {
    let mut position = Decimal::ZERO;
    for expense in &group.expenses {
        let share = expense.amount / Decimal::from(expense.split_count());
        if expense.paid_by.email == email {
            position += expense.amount;
            if !expense.exclude_payer {
                position -= share;
            }
        }
        if expense.split_between.iter().any(|m| m.email == email) {
            position -= share;
        }
    }
    position
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Conservation: what a person is owed minus what they owe equals what
    /// they paid minus their shares, up to half a cent per counterparty.
    #[test]
    fn prop_balances_conserve_positions(group in group_strategy()) {
        let balances = calculate(&group);

        for member in &group.members {
            let mut position = Decimal::ZERO;
            for balance in balances.iter().filter(|b| b.involves(&member.email)) {
                if balance.creditor.email == member.email {
                    position += balance.amount;
                } else {
                    position -= balance.amount;
                }
            }

            let expected = expected_position(&group, &member.email);
            // Rounding error is at most half a cent per counterparty, emitted or not.
            let counterparties = Decimal::from(group.members.len() - 1);
            let tolerance = dec!(0.005) * counterparties + dec!(0.000001);
            prop_assert!(
                (position - expected).abs() <= tolerance,
                "{}: balances give {}, expenses give {}",
                member.email,
                position,
                expected
            );
        }
    }

    /// No one owes themselves, and each unordered pair appears at most once.
    #[test]
    fn prop_no_self_debt_and_unique_pairs(group in group_strategy()) {
        let balances = calculate(&group);
        let mut pairs = HashSet::new();

        for balance in &balances {
            prop_assert_ne!(&balance.debtor.email, &balance.creditor.email);

            let mut key = [balance.debtor.email.clone(), balance.creditor.email.clone()];
            key.sort();
            prop_assert!(pairs.insert(key), "pair emitted twice");
        }
    }

    /// Same group, same result.
    #[test]
    fn prop_calculation_is_idempotent(group in group_strategy()) {
        prop_assert_eq!(calculate(&group), calculate(&group));
    }

    /// Every emitted amount is positive and has at most two decimal places.
    #[test]
    fn prop_amounts_positive_and_rounded(group in group_strategy()) {
        for balance in calculate(&group) {
            prop_assert!(balance.amount > Decimal::ZERO);
            prop_assert_eq!(balance.amount, balance.amount.round_dp(2));
            prop_assert!(!balance.simplified);
            for entry in &balance.breakdown {
                prop_assert_eq!(entry.amount, entry.amount.round_dp(2));
            }
        }
    }
}
