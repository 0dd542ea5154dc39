//! Per-person totals across groups.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::currency::CurrencyService;

/// What one person gets and gives across groups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    /// Sum of amounts owed to the person.
    pub you_get: Decimal,
    /// Sum of amounts the person owes.
    pub you_give: Decimal,
    /// `you_get - you_give`.
    pub balance: Decimal,
}

impl Totals {
    /// Adds an amount owed to the person.
    pub fn add_receivable(&mut self, amount: Decimal) {
        self.you_get = self.you_get.saturating_add(amount);
        self.balance = self.you_get - self.you_give;
    }

    /// Adds an amount the person owes.
    pub fn add_payable(&mut self, amount: Decimal) {
        self.you_give = self.you_give.saturating_add(amount);
        self.balance = self.you_get - self.you_give;
    }

    /// Rounds every figure to 2 decimal places.
    #[must_use]
    pub fn rounded(self) -> Self {
        Self {
            you_get: CurrencyService::round_money(self.you_get),
            you_give: CurrencyService::round_money(self.you_give),
            balance: CurrencyService::round_money(self.balance),
        }
    }

    /// The balance with two decimals and an explicit `+` when positive.
    #[must_use]
    pub fn formatted_balance(&self) -> String {
        let balance = CurrencyService::round_money(self.balance);
        if balance > Decimal::ZERO {
            format!("+{balance:.2}")
        } else if balance < Decimal::ZERO {
            format!("{balance:.2}")
        } else {
            "0.00".to_string()
        }
    }
}
