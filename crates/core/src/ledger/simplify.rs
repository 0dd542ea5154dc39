//! Debt simplification.
//!
//! Collapses pairwise balances into the fewest transfers that settle every
//! person's net position, using greedy two-pointer matching of the largest
//! creditor against the largest debtor.

use rust_decimal::Decimal;
use splitledger_shared::types::CurrencyCode;
use tracing::debug;

use super::balance::{Balance, NetBalance};
use crate::currency::CurrencyService;

/// Positions below this magnitude count as settled (one cent).
pub const SETTLEMENT_EPSILON: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Reduces a pairwise debt graph to a minimal list of transfers.
pub struct DebtSimplifier;

impl DebtSimplifier {
    /// Simplifies pairwise `balances` into transfers in `target` currency.
    ///
    /// Emits at most `N - 1` transfers for `N` people with a non-zero net
    /// position. Every transfer is marked `simplified` and carries no
    /// breakdown. Among people with equal net positions the order of first
    /// appearance in `balances` decides who is matched first.
    #[must_use]
    pub fn simplify(balances: &[Balance], target: &CurrencyCode) -> Vec<Balance> {
        let mut people = NetBalance::from_balances(balances);
        // Stable: ties keep first-appearance order.
        people.sort_by(|a, b| b.amount.cmp(&a.amount));

        let mut transfers = Vec::new();
        if people.len() < 2 {
            return transfers;
        }

        let mut i = 0;
        let mut j = people.len() - 1;

        while i < j {
            let credit = people[i].amount;
            let debt = -people[j].amount;
            if credit <= Decimal::ZERO || debt <= Decimal::ZERO {
                break;
            }

            let transfer = credit.min(debt);
            if transfer < SETTLEMENT_EPSILON {
                // Dust on one side: drop the smaller position and move on.
                if credit <= debt {
                    i += 1;
                } else {
                    j -= 1;
                }
                continue;
            }

            transfers.push(Balance {
                debtor: people[j].party.clone(),
                creditor: people[i].party.clone(),
                amount: CurrencyService::round_money(transfer),
                currency: target.clone(),
                breakdown: Vec::new(),
                simplified: true,
            });
            people[i].amount -= transfer;
            people[j].amount += transfer;

            if people[i].amount.abs() < SETTLEMENT_EPSILON {
                i += 1;
            }
            if people[j].amount.abs() < SETTLEMENT_EPSILON {
                j -= 1;
            }
        }

        debug!(
            people = people.len(),
            pairwise = balances.len(),
            transfers = transfers.len(),
            "Simplified balances"
        );
        transfers
    }
}
