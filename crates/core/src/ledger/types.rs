//! Group, member and expense types.
//!
//! Validation happens when a group or expense is created through the
//! constructors here. Values that arrive already built (for example
//! deserialized from storage) are trusted as-is: the calculators are total
//! over any `Group`.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use splitledger_shared::types::{CurrencyCode, ExpenseId, GroupId};

use super::error::LedgerError;

/// A person in a group, identified by email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    /// Unique identifier within a group.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Outstanding balance administratively cleared for this group.
    #[serde(default)]
    pub user_settled: bool,
}

impl Member {
    /// Creates an unsettled member.
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: name.into(),
            user_settled: false,
        }
    }

    /// Returns the member as a balance party.
    #[must_use]
    pub fn party(&self) -> Party {
        Party {
            email: self.email.clone(),
            name: self.name.clone(),
        }
    }
}

/// One side of a balance: who owes, or who is owed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Party {
    /// Email the balance is keyed by.
    pub email: String,
    /// Name as recorded on the expense.
    pub name: String,
}

/// A shared expense. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    /// Expense ID.
    pub id: ExpenseId,
    /// What the money was spent on.
    pub description: String,
    /// Amount in `currency`.
    pub amount: Decimal,
    /// Currency the expense was recorded in.
    pub currency: CurrencyCode,
    /// Who paid.
    pub paid_by: Member,
    /// Who shares the cost (besides the payer, unless `exclude_payer`).
    pub split_between: Vec<Member>,
    /// Who recorded the expense.
    pub created_by: Member,
    /// When the expense was recorded.
    pub created_date: DateTime<Utc>,
    /// The payer pays but owes no share.
    #[serde(default)]
    pub exclude_payer: bool,
}

/// Input for creating an expense.
#[derive(Debug, Clone)]
pub struct CreateExpenseInput {
    /// What the money was spent on.
    pub description: String,
    /// Amount in `currency`, must be positive.
    pub amount: Decimal,
    /// Currency the expense was recorded in.
    pub currency: CurrencyCode,
    /// Who paid.
    pub paid_by: Member,
    /// Who shares the cost.
    pub split_between: Vec<Member>,
    /// Who recorded the expense.
    pub created_by: Member,
    /// The payer pays but owes no share.
    pub exclude_payer: bool,
}

impl Expense {
    /// Number of equal shares the expense is divided into.
    ///
    /// The payer takes an implicit extra share unless excluded.
    #[must_use]
    pub fn split_count(&self) -> usize {
        self.split_between.len() + usize::from(!self.exclude_payer)
    }

    /// Validates the input and creates an expense recorded at `created_date`.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError` if the amount is not positive, an excluded payer
    /// is listed in the split, the split is empty while the payer is excluded,
    /// or a member is listed twice.
    pub fn create(
        input: CreateExpenseInput,
        created_date: DateTime<Utc>,
    ) -> Result<Self, LedgerError> {
        if input.amount <= Decimal::ZERO {
            return Err(LedgerError::NonPositiveAmount);
        }

        if input.exclude_payer {
            if input.split_between.is_empty() {
                return Err(LedgerError::EmptySplit);
            }
            if input
                .split_between
                .iter()
                .any(|m| m.email == input.paid_by.email)
            {
                return Err(LedgerError::PayerInSplit(input.paid_by.email));
            }
        }

        let mut seen = HashSet::with_capacity(input.split_between.len());
        for member in &input.split_between {
            if !seen.insert(member.email.as_str()) {
                return Err(LedgerError::DuplicateSplitMember(member.email.clone()));
            }
        }

        Ok(Self {
            id: ExpenseId::new(),
            description: input.description,
            amount: input.amount,
            currency: input.currency,
            paid_by: input.paid_by,
            split_between: input.split_between,
            created_by: input.created_by,
            created_date,
            exclude_payer: input.exclude_payer,
        })
    }
}

/// A group of people sharing expenses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    /// Group ID.
    pub id: GroupId,
    /// Group title.
    pub title: String,
    /// Current members.
    pub members: Vec<Member>,
    /// Expenses in the order they were recorded.
    #[serde(default)]
    pub expenses: Vec<Expense>,
    /// Group admin, a member at creation time.
    pub admin: Member,
    /// Currency new expenses default to.
    pub default_currency: CurrencyCode,
}

impl Group {
    /// Creates an empty group.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::AdminNotMember` if the admin is not among the
    /// members, or `LedgerError::DuplicateMember` if an email repeats.
    pub fn new(
        title: impl Into<String>,
        members: Vec<Member>,
        admin: Member,
        default_currency: CurrencyCode,
    ) -> Result<Self, LedgerError> {
        let mut seen = HashSet::with_capacity(members.len());
        for member in &members {
            if !seen.insert(member.email.as_str()) {
                return Err(LedgerError::DuplicateMember(member.email.clone()));
            }
        }

        if !seen.contains(admin.email.as_str()) {
            return Err(LedgerError::AdminNotMember(admin.email));
        }

        Ok(Self {
            id: GroupId::new(),
            title: title.into(),
            members,
            expenses: Vec::new(),
            admin,
            default_currency,
        })
    }

    /// Finds a current member by email.
    #[must_use]
    pub fn member(&self, email: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.email == email)
    }

    /// Records a new expense, stamped with the current time.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::MemberNotFound` if the payer or a split member is
    /// not currently in the group, plus any error from [`Expense::create`].
    pub fn add_expense(&mut self, input: CreateExpenseInput) -> Result<ExpenseId, LedgerError> {
        let unknown = std::iter::once(&input.paid_by)
            .chain(&input.split_between)
            .find(|m| self.member(&m.email).is_none());
        if let Some(member) = unknown {
            return Err(LedgerError::MemberNotFound(member.email.clone()));
        }

        let expense = Expense::create(input, Utc::now())?;
        let id = expense.id;
        self.expenses.push(expense);
        Ok(id)
    }

    /// Deletes an expense.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::ExpenseNotFound` if no expense has this ID.
    pub fn remove_expense(&mut self, id: ExpenseId) -> Result<Expense, LedgerError> {
        let index = self
            .expenses
            .iter()
            .position(|e| e.id == id)
            .ok_or(LedgerError::ExpenseNotFound(id))?;
        Ok(self.expenses.remove(index))
    }

    /// Removes a member. Their past expenses stay and still count.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::MemberNotFound` if the email is not a member.
    pub fn remove_member(&mut self, email: &str) -> Result<Member, LedgerError> {
        let index = self
            .members
            .iter()
            .position(|m| m.email == email)
            .ok_or_else(|| LedgerError::MemberNotFound(email.to_string()))?;
        Ok(self.members.remove(index))
    }

    /// Marks a member's balance as settled or outstanding.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::MemberNotFound` if the email is not a member.
    pub fn set_member_settled(&mut self, email: &str, settled: bool) -> Result<(), LedgerError> {
        let member = self
            .members
            .iter_mut()
            .find(|m| m.email == email)
            .ok_or_else(|| LedgerError::MemberNotFound(email.to_string()))?;
        member.user_settled = settled;
        Ok(())
    }

    /// Emails of the members currently marked settled.
    #[must_use]
    pub fn settled_emails(&self) -> HashSet<String> {
        self.members
            .iter()
            .filter(|m| m.user_settled)
            .map(|m| m.email.clone())
            .collect()
    }

    /// Label for a balance party: the live member name, or the recorded
    /// name marked "(left)" for someone no longer in the group.
    #[must_use]
    pub fn display_name(&self, party: &Party) -> String {
        match self.member(&party.email) {
            Some(member) => member.name.clone(),
            None => format!("{} (left)", party.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn alice() -> Member {
        Member::new("alice@example.com", "Alice")
    }

    fn bob() -> Member {
        Member::new("bob@example.com", "Bob")
    }

    fn carol() -> Member {
        Member::new("carol@example.com", "Carol")
    }

    fn usd() -> CurrencyCode {
        CurrencyCode::new("USD").unwrap()
    }

    fn group() -> Group {
        Group::new("Trip", vec![alice(), bob()], alice(), usd()).unwrap()
    }

    fn input(
        paid_by: Member,
        split_between: Vec<Member>,
        exclude_payer: bool,
    ) -> CreateExpenseInput {
        CreateExpenseInput {
            description: "Dinner".to_string(),
            amount: dec!(100),
            currency: usd(),
            created_by: paid_by.clone(),
            paid_by,
            split_between,
            exclude_payer,
        }
    }

    #[test]
    fn test_group_requires_admin_member() {
        let err = Group::new("Trip", vec![alice()], bob(), usd()).unwrap_err();
        assert_eq!(err, LedgerError::AdminNotMember("bob@example.com".into()));
    }

    #[test]
    fn test_group_rejects_duplicate_members() {
        let err = Group::new("Trip", vec![alice(), alice()], alice(), usd()).unwrap_err();
        assert_eq!(err, LedgerError::DuplicateMember("alice@example.com".into()));
    }

    #[test]
    fn test_split_count() {
        let now = Utc::now();
        let included = Expense::create(input(alice(), vec![bob()], false), now).unwrap();
        assert_eq!(included.split_count(), 2);

        let excluded = Expense::create(input(alice(), vec![bob()], true), now).unwrap();
        assert_eq!(excluded.split_count(), 1);
    }

    #[test]
    fn test_expense_validation() {
        let now = Utc::now();

        let mut zero = input(alice(), vec![bob()], false);
        zero.amount = dec!(0);
        assert_eq!(Expense::create(zero, now), Err(LedgerError::NonPositiveAmount));

        assert_eq!(
            Expense::create(input(alice(), vec![], true), now),
            Err(LedgerError::EmptySplit)
        );
        assert_eq!(
            Expense::create(input(alice(), vec![alice(), bob()], true), now),
            Err(LedgerError::PayerInSplit("alice@example.com".into()))
        );
        assert_eq!(
            Expense::create(input(alice(), vec![bob(), bob()], false), now),
            Err(LedgerError::DuplicateSplitMember("bob@example.com".into()))
        );

        // Payer alone, sharing with nobody else, is allowed when included.
        assert!(Expense::create(input(alice(), vec![], false), now).is_ok());
    }

    #[test]
    fn test_add_and_remove_expense() {
        let mut group = group();
        let id = group.add_expense(input(alice(), vec![bob()], true)).unwrap();
        assert_eq!(group.expenses.len(), 1);

        let removed = group.remove_expense(id).unwrap();
        assert_eq!(removed.id, id);
        assert!(group.expenses.is_empty());
        assert_eq!(group.remove_expense(id), Err(LedgerError::ExpenseNotFound(id)));
    }

    #[test]
    fn test_add_expense_requires_members() {
        let mut group = group();
        let err = group
            .add_expense(input(alice(), vec![carol()], true))
            .unwrap_err();
        assert_eq!(err, LedgerError::MemberNotFound("carol@example.com".into()));
    }

    #[test]
    fn test_remove_member_keeps_expenses() {
        let mut group = group();
        group.add_expense(input(alice(), vec![bob()], true)).unwrap();

        let removed = group.remove_member("bob@example.com").unwrap();
        assert_eq!(removed, bob());
        assert_eq!(group.expenses.len(), 1);
        assert!(group.remove_member("bob@example.com").is_err());
    }

    #[test]
    fn test_settled_toggle() {
        let mut group = group();
        group.set_member_settled("bob@example.com", true).unwrap();
        assert!(group.settled_emails().contains("bob@example.com"));

        group.set_member_settled("bob@example.com", false).unwrap();
        assert!(group.settled_emails().is_empty());

        assert!(group.set_member_settled("nobody@example.com", true).is_err());
    }

    #[test]
    fn test_display_name_marks_departed_members() {
        let mut group = group();
        assert_eq!(group.display_name(&bob().party()), "Bob");

        group.remove_member("bob@example.com").unwrap();
        assert_eq!(group.display_name(&bob().party()), "Bob (left)");
    }

    #[test]
    fn test_group_deserializes_camel_case() {
        let json = r#"{
            "id": "018f5c6e-0000-7000-8000-000000000001",
            "title": "Flat",
            "members": [{"email": "a@x", "name": "A", "userSettled": true}],
            "admin": {"email": "a@x", "name": "A"},
            "defaultCurrency": "eur"
        }"#;
        let group: Group = serde_json::from_str(json).unwrap();
        assert!(group.expenses.is_empty());
        assert!(group.members[0].user_settled);
        assert!(!group.admin.user_settled);
        assert_eq!(group.default_currency.as_str(), "EUR");
    }
}
