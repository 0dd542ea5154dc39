//! Report model: what the binary prints for each group and for one person.

use rust_decimal::Decimal;
use serde::Serialize;
use splitledger_core::currency::RateSource;
use splitledger_core::ledger::{Balance, Group, LedgerService};
use splitledger_shared::types::{CurrencyCode, GroupId};

/// Everything printed for one run.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub groups: Vec<GroupReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub totals: Option<TotalsReport>,
}

/// Balances of one group in its default currency.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupReport {
    pub id: GroupId,
    pub title: String,
    pub currency: CurrencyCode,
    pub balances: Vec<BalanceLine>,
    pub settle_up: Vec<BalanceLine>,
}

/// One "X owes Y" line, names resolved against the group.
#[derive(Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceLine {
    pub from: String,
    pub to: String,
    pub amount: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub breakdown: Vec<BreakdownLine>,
}

/// One expense share behind a pairwise line.
#[derive(Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownLine {
    pub description: String,
    pub paid_by: String,
    pub owed_by: String,
    pub amount: String,
}

/// Cross-group totals for one person.
#[derive(Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalsReport {
    pub email: String,
    pub currency: CurrencyCode,
    pub you_get: String,
    pub you_give: String,
    pub balance: String,
}

fn money(amount: Decimal) -> String {
    format!("{amount:.2}")
}

fn line(group: &Group, balance: &Balance) -> BalanceLine {
    BalanceLine {
        from: group.display_name(&balance.debtor),
        to: group.display_name(&balance.creditor),
        amount: money(balance.amount),
        breakdown: balance
            .breakdown
            .iter()
            .map(|entry| BreakdownLine {
                description: entry.description.clone(),
                paid_by: group.display_name(&entry.paid_by),
                owed_by: group.display_name(&entry.owed_by),
                amount: money(entry.amount),
            })
            .collect(),
    }
}

/// Builds the report for `groups`, adding totals when `email` is given.
///
/// Group balances hide what settled members owe; totals do not.
pub async fn build<S: RateSource>(
    service: &LedgerService<S>,
    groups: &[Group],
    email: Option<&str>,
    totals_currency: &CurrencyCode,
) -> Report {
    let mut reports = Vec::with_capacity(groups.len());

    for group in groups {
        let target = &group.default_currency;
        let balances = service.visible_balances(group, target).await;
        let transfers = service.visible_simplified_balances(group, target).await;

        reports.push(GroupReport {
            id: group.id,
            title: group.title.clone(),
            currency: target.clone(),
            balances: balances.iter().map(|b| line(group, b)).collect(),
            settle_up: transfers.iter().map(|b| line(group, b)).collect(),
        });
    }

    let totals = match email {
        Some(email) => {
            let totals = service
                .calculate_totals_across_groups(groups, email, totals_currency)
                .await;
            Some(TotalsReport {
                email: email.to_string(),
                currency: totals_currency.clone(),
                you_get: money(totals.you_get),
                you_give: money(totals.you_give),
                balance: totals.formatted_balance(),
            })
        }
        None => None,
    };

    Report {
        groups: reports,
        totals,
    }
}
