//! Shared-expense ledger.
//!
//! This module implements the balance engine:
//! - Group, member and expense types with creation-time validation
//! - Pairwise balance calculation with per-expense currency conversion
//! - Debt simplification to a minimal transfer list
//! - Settled-member post-filter
//! - Per-person totals across groups
//! - Ledger service tying the above to a rate source

pub mod balance;
pub mod calculator;
pub mod error;
pub mod service;
pub mod settled;
pub mod simplify;
pub mod totals;
pub mod types;

#[cfg(test)]
mod calculator_props;
#[cfg(test)]
mod simplify_props;

pub use balance::{Balance, BreakdownEntry, NetBalance};
pub use calculator::BalanceCalculator;
pub use error::LedgerError;
pub use service::LedgerService;
pub use settled::SettledFilter;
pub use simplify::{DebtSimplifier, SETTLEMENT_EPSILON};
pub use totals::Totals;
pub use types::{CreateExpenseInput, Expense, Group, Member, Party};
