//! Ledger error types.
//!
//! These are raised only when groups and expenses are created or changed.
//! Balance computation itself never fails.

use splitledger_shared::types::ExpenseId;
use thiserror::Error;

/// Errors that can occur while building or changing a group.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    // ========== Group Errors ==========
    /// The group admin must be one of its members.
    #[error("Group admin {0} is not a member of the group")]
    AdminNotMember(String),

    /// Member emails must be unique within a group.
    #[error("Member {0} appears more than once")]
    DuplicateMember(String),

    /// Member not found in the group.
    #[error("Member not found: {0}")]
    MemberNotFound(String),

    // ========== Expense Errors ==========
    /// Expense amount must be positive.
    #[error("Expense amount must be positive")]
    NonPositiveAmount,

    /// An expense that excludes its payer needs at least one participant.
    #[error("Expense must be split between at least one member")]
    EmptySplit,

    /// A payer who is excluded from the split cannot also be in it.
    #[error("Payer {0} is excluded from the split but listed in it")]
    PayerInSplit(String),

    /// A member was listed twice in the same split.
    #[error("Member {0} appears more than once in the split")]
    DuplicateSplitMember(String),

    /// Expense not found.
    #[error("Expense not found: {0}")]
    ExpenseNotFound(ExpenseId),
}

impl LedgerError {
    /// Returns the error code for reports and logs.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::AdminNotMember(_) => "ADMIN_NOT_MEMBER",
            Self::DuplicateMember(_) => "DUPLICATE_MEMBER",
            Self::MemberNotFound(_) => "MEMBER_NOT_FOUND",
            Self::NonPositiveAmount => "NON_POSITIVE_AMOUNT",
            Self::EmptySplit => "EMPTY_SPLIT",
            Self::PayerInSplit(_) => "PAYER_IN_SPLIT",
            Self::DuplicateSplitMember(_) => "DUPLICATE_SPLIT_MEMBER",
            Self::ExpenseNotFound(_) => "EXPENSE_NOT_FOUND",
        }
    }
}
