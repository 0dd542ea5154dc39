//! Computed balance types. Never persisted.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use splitledger_shared::types::CurrencyCode;

use super::types::Party;

/// One expense's contribution to a pairwise balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownEntry {
    /// Expense description.
    pub description: String,
    /// The share owed, rounded to 2 decimal places.
    pub amount: Decimal,
    /// Who paid the expense.
    pub paid_by: Party,
    /// Who owes this share.
    pub owed_by: Party,
    /// When the expense was recorded.
    pub created_date: DateTime<Utc>,
    /// Currency of `amount` (the target currency).
    pub currency: CurrencyCode,
    /// Whether the payer was excluded from the split.
    pub exclude_payer: bool,
}

/// Net debt from one person to another.
///
/// Pairwise balances carry the itemized breakdown of both directions of the
/// pair; simplified transfers carry none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Balance {
    /// Who owes.
    pub debtor: Party,
    /// Who is owed.
    pub creditor: Party,
    /// Amount owed, positive, rounded to 2 decimal places.
    pub amount: Decimal,
    /// Currency of `amount`.
    pub currency: CurrencyCode,
    /// Contributing expense shares from either direction of the pair.
    pub breakdown: Vec<BreakdownEntry>,
    /// True for transfers produced by debt simplification.
    #[serde(default)]
    pub simplified: bool,
}

impl Balance {
    /// Returns true if `email` is the debtor or the creditor.
    #[must_use]
    pub fn involves(&self, email: &str) -> bool {
        self.debtor.email == email || self.creditor.email == email
    }
}

/// A person's single net position: positive means they are owed money.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetBalance {
    /// The person.
    pub party: Party,
    /// Receivable minus payable.
    pub amount: Decimal,
}

impl NetBalance {
    /// Derives each person's net position from pairwise balances.
    ///
    /// People appear in order of first appearance (debtor before creditor
    /// within a balance). The amounts always sum to zero.
    #[must_use]
    pub fn from_balances(balances: &[Balance]) -> Vec<Self> {
        let mut nets: Vec<Self> = Vec::new();

        for balance in balances {
            Self::adjust(&mut nets, &balance.debtor, -balance.amount);
            Self::adjust(&mut nets, &balance.creditor, balance.amount);
        }

        nets
    }

    fn adjust(nets: &mut Vec<Self>, party: &Party, delta: Decimal) {
        match nets.iter_mut().find(|n| n.party.email == party.email) {
            Some(net) => net.amount = net.amount.saturating_add(delta),
            None => nets.push(Self {
                party: party.clone(),
                amount: delta,
            }),
        }
    }
}
