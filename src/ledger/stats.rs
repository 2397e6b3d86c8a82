//! Spending aggregates over a group's transaction history.

use crate::ledger::group::{Member, Transaction};
use chrono::{DateTime, Duration, FixedOffset, Months, NaiveDate};
use std::collections::BTreeMap;

/// Reporting window ending now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Week,
    Month,
}

impl Period {
    /// Start of the window: 7 days or one calendar month before `now`
    pub fn cutoff(self, now: DateTime<FixedOffset>) -> DateTime<FixedOffset> {
        match self {
            Period::Week => now - Duration::days(7),
            Period::Month => now.checked_sub_months(Months::new(1)).unwrap_or(now),
        }
    }
}

/// Total of all transaction amounts, in minor units
pub fn total_spent(transactions: &[Transaction]) -> i64 {
    transactions.iter().map(|tx| tx.amount).sum()
}

/// Total of transactions dated at or after `cutoff`
pub fn spent_since(transactions: &[Transaction], cutoff: DateTime<FixedOffset>) -> i64 {
    transactions
        .iter()
        .filter(|tx| tx.date >= cutoff)
        .map(|tx| tx.amount)
        .sum()
}

/// Member who fronted the most money, with the amount.
///
/// `None` when there are no transactions or no members. The first member in
/// list order wins ties; payers outside the member list are ignored.
pub fn top_spender(members: &[Member], transactions: &[Transaction]) -> Option<(String, i64)> {
    if transactions.is_empty() {
        return None;
    }

    let mut top: Option<(&Member, i64)> = None;
    for member in members {
        let paid: i64 = transactions
            .iter()
            .filter(|tx| tx.payer == member.id)
            .map(|tx| tx.amount)
            .sum();
        let current_best = top.map_or(i64::MIN, |(_, amount)| amount);
        if paid > current_best {
            top = Some((member, paid));
        }
    }

    top.map(|(member, amount)| (member.id.clone(), amount))
}

/// Per-day totals in ascending date order
pub fn spending_by_day(transactions: &[Transaction]) -> Vec<(NaiveDate, i64)> {
    let mut by_day: BTreeMap<NaiveDate, i64> = BTreeMap::new();
    for tx in transactions {
        *by_day.entry(tx.date.date_naive()).or_insert(0) += tx.amount;
    }
    by_day.into_iter().collect()
}
