//! Ledger service: the three entry points callers use.
//!
//! Wraps a [`CurrencyConverter`] so callers only hand over groups and a
//! target currency. The `visible_*` variants add the settled-member filter.

use splitledger_shared::types::CurrencyCode;
use tracing::debug;

use super::balance::Balance;
use super::calculator::BalanceCalculator;
use super::settled::SettledFilter;
use super::simplify::DebtSimplifier;
use super::totals::Totals;
use super::types::Group;
use crate::currency::{CurrencyConverter, RateSource};

/// Balance, simplification and totals over a rate source.
#[derive(Debug, Clone)]
pub struct LedgerService<S> {
    converter: CurrencyConverter<S>,
}

impl<S: RateSource> LedgerService<S> {
    /// Creates a service that converts through `source`.
    #[must_use]
    pub const fn new(source: S) -> Self {
        Self {
            converter: CurrencyConverter::new(source),
        }
    }

    /// Pairwise net balances of `group` in `target` currency.
    pub async fn calculate_balances(&self, group: &Group, target: &CurrencyCode) -> Vec<Balance> {
        BalanceCalculator::calculate(group, target, &self.converter).await
    }

    /// Minimal set of transfers that settles `group`.
    pub async fn calculate_simplified_balances(
        &self,
        group: &Group,
        target: &CurrencyCode,
    ) -> Vec<Balance> {
        let balances = self.calculate_balances(group, target).await;
        DebtSimplifier::simplify(&balances, target)
    }

    /// What `email` gets and gives across `groups`, from pairwise balances.
    ///
    /// Each balance is converted to `target` (a no-op when it already is).
    /// Settled flags are not applied.
    pub async fn calculate_totals_across_groups(
        &self,
        groups: &[Group],
        email: &str,
        target: &CurrencyCode,
    ) -> Totals {
        let mut totals = Totals::default();

        for group in groups {
            let balances = self.calculate_balances(group, target).await;
            for balance in balances.iter().filter(|b| b.involves(email)) {
                let converted = self
                    .converter
                    .convert(balance.amount, &balance.currency, target)
                    .await;
                if balance.creditor.email == email {
                    totals.add_receivable(converted.money.amount);
                } else {
                    totals.add_payable(converted.money.amount);
                }
            }
        }

        debug!(
            groups = groups.len(),
            you_get = %totals.you_get,
            you_give = %totals.you_give,
            "Calculated totals across groups"
        );
        totals.rounded()
    }

    /// Pairwise balances without those owed by settled members.
    pub async fn visible_balances(&self, group: &Group, target: &CurrencyCode) -> Vec<Balance> {
        let balances = self.calculate_balances(group, target).await;
        SettledFilter::from_group(group).apply(balances)
    }

    /// Simplified transfers without those owed by settled members.
    pub async fn visible_simplified_balances(
        &self,
        group: &Group,
        target: &CurrencyCode,
    ) -> Vec<Balance> {
        let transfers = self.calculate_simplified_balances(group, target).await;
        SettledFilter::from_group(group).apply(transfers)
    }
}
