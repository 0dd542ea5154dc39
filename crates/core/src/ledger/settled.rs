//! Settled-member post-filter.
//!
//! A member marked settled is never shown as owing money. The filter only
//! hides output rows; it never changes how balances are computed, and it is
//! applied the same way to pairwise and simplified results.

use std::collections::HashSet;

use super::balance::Balance;
use super::types::Group;

/// Hides balances whose debtor has been marked settled.
#[derive(Debug, Clone, Default)]
pub struct SettledFilter {
    settled: HashSet<String>,
}

impl SettledFilter {
    /// Creates a filter from an explicit set of settled emails.
    #[must_use]
    pub fn new(settled: HashSet<String>) -> Self {
        Self { settled }
    }

    /// Creates a filter from the group's current `user_settled` flags.
    #[must_use]
    pub fn from_group(group: &Group) -> Self {
        Self::new(group.settled_emails())
    }

    /// Returns true if `email` is marked settled.
    #[must_use]
    pub fn is_settled(&self, email: &str) -> bool {
        self.settled.contains(email)
    }

    /// Drops every balance owed by a settled member.
    #[must_use]
    pub fn apply(&self, balances: Vec<Balance>) -> Vec<Balance> {
        if self.settled.is_empty() {
            return balances;
        }
        balances
            .into_iter()
            .filter(|b| !self.is_settled(&b.debtor.email))
            .collect()
    }
}
