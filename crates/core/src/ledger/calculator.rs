//! Pairwise balance calculation.
//!
//! Every expense is split into equal shares. Each participant's share
//! becomes a debt to the payer, recorded against the unordered pair of the
//! two emails. Once all expenses are in, each pair is netted into at most one
//! balance.

use std::collections::HashMap;

use rust_decimal::Decimal;
use splitledger_shared::types::CurrencyCode;
use tracing::{debug, warn};

use super::balance::{Balance, BreakdownEntry};
use super::types::{Expense, Group, Party};
use crate::currency::{CurrencyConverter, CurrencyService, RateSource};

/// Derives pairwise net debts from a group's expenses.
pub struct BalanceCalculator;

impl BalanceCalculator {
    /// Calculates the pairwise balances of a group in `target` currency.
    ///
    /// Expenses are converted one after another in input order. Conversion
    /// problems degrade the affected amounts (see [`CurrencyConverter`]) but
    /// never abort the computation.
    ///
    /// Balances are returned in the order their pair was first encountered.
    pub async fn calculate<S: RateSource>(
        group: &Group,
        target: &CurrencyCode,
        converter: &CurrencyConverter<S>,
    ) -> Vec<Balance> {
        let mut amounts = Vec::with_capacity(group.expenses.len());
        let mut unconverted = 0usize;
        for expense in &group.expenses {
            let conversion = converter
                .convert(expense.amount, &expense.currency, target)
                .await;
            if conversion.is_degraded() {
                unconverted += 1;
            }
            amounts.push(conversion.money.amount);
        }

        let balances = Self::calculate_converted(group, target, &amounts);
        debug!(
            group_id = %group.id,
            expenses = group.expenses.len(),
            unconverted,
            balances = balances.len(),
            currency = %target,
            "Calculated group balances"
        );
        balances
    }

    /// Calculates balances from amounts already converted to `target`.
    ///
    /// `amounts[i]` replaces the amount of `group.expenses[i]`; expenses
    /// without a matching amount are ignored.
    #[must_use]
    pub fn calculate_converted(
        group: &Group,
        target: &CurrencyCode,
        amounts: &[Decimal],
    ) -> Vec<Balance> {
        let mut ledger = PairLedger::default();
        for (expense, amount) in group.expenses.iter().zip(amounts) {
            ledger.record(expense, *amount, target);
        }
        ledger.into_balances(target)
    }
}

/// Running debts of one unordered pair, oriented as first encountered.
struct PairEntry {
    first: Party,
    second: Party,
    first_owes: Decimal,
    second_owes: Decimal,
    first_breakdown: Vec<BreakdownEntry>,
    second_breakdown: Vec<BreakdownEntry>,
}

impl PairEntry {
    fn new(debtor: Party, creditor: Party) -> Self {
        Self {
            first: debtor,
            second: creditor,
            first_owes: Decimal::ZERO,
            second_owes: Decimal::ZERO,
            first_breakdown: Vec::new(),
            second_breakdown: Vec::new(),
        }
    }

    fn into_balance(self, target: &CurrencyCode) -> Option<Balance> {
        let net = self.first_owes - self.second_owes;
        let amount = CurrencyService::round_money(net.abs());
        if amount.is_zero() {
            return None;
        }

        let (debtor, creditor) = if net > Decimal::ZERO {
            (self.first, self.second)
        } else {
            (self.second, self.first)
        };

        let mut breakdown = self.first_breakdown;
        breakdown.extend(self.second_breakdown);

        Some(Balance {
            debtor,
            creditor,
            amount,
            currency: target.clone(),
            breakdown,
            simplified: false,
        })
    }
}

/// Per-call accumulator of pairwise debts. Unrounded until emission.
#[derive(Default)]
struct PairLedger {
    pairs: Vec<PairEntry>,
    index: HashMap<(String, String), usize>,
}

impl PairLedger {
    fn record(&mut self, expense: &Expense, amount: Decimal, target: &CurrencyCode) {
        let split_count = expense.split_count();
        if split_count == 0 {
            warn!(
                expense_id = %expense.id,
                "Expense has nobody to split between, ignoring it"
            );
            return;
        }

        let share = amount / Decimal::from(split_count);
        let payer = expense.paid_by.party();

        for member in &expense.split_between {
            // A payer listed in their own split just carries their share.
            if member.email == payer.email {
                continue;
            }

            let debtor = member.party();
            let entry = BreakdownEntry {
                description: expense.description.clone(),
                amount: CurrencyService::round_money(share),
                paid_by: payer.clone(),
                owed_by: debtor.clone(),
                created_date: expense.created_date,
                currency: target.clone(),
                exclude_payer: expense.exclude_payer,
            };
            self.owe(debtor, &payer, share, entry);
        }
    }

    fn owe(&mut self, debtor: Party, creditor: &Party, share: Decimal, entry: BreakdownEntry) {
        let key = pair_key(&debtor.email, &creditor.email);
        let index = match self.index.get(&key) {
            Some(&index) => index,
            None => {
                self.pairs.push(PairEntry::new(debtor.clone(), creditor.clone()));
                self.index.insert(key, self.pairs.len() - 1);
                self.pairs.len() - 1
            }
        };

        let pair = &mut self.pairs[index];
        if pair.first.email == debtor.email {
            accumulate(&mut pair.first_owes, share, &debtor, creditor);
            pair.first_breakdown.push(entry);
        } else {
            accumulate(&mut pair.second_owes, share, &debtor, creditor);
            pair.second_breakdown.push(entry);
        }
    }

    fn into_balances(self, target: &CurrencyCode) -> Vec<Balance> {
        self.pairs
            .into_iter()
            .filter_map(|pair| pair.into_balance(target))
            .collect()
    }
}

/// Adds `share` to a running debt, clamping at `Decimal::MAX`.
fn accumulate(total: &mut Decimal, share: Decimal, debtor: &Party, creditor: &Party) {
    if let Some(sum) = total.checked_add(share) {
        *total = sum;
    } else {
        warn!(
            debtor = %debtor.email,
            creditor = %creditor.email,
            "Pairwise debt overflowed, clamping to the largest amount"
        );
        *total = Decimal::MAX;
    }
}

/// Canonical key of an unordered pair: the two emails in lexicographic order.
fn pair_key(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}
