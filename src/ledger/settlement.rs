//! Settlement planning: a short list of transfers that zeroes net balances.

use crate::ledger::balance::NetBalance;
use schemars::JsonSchema;
use serde::Serialize;

/// A suggested payment from one member to another, in minor units
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct Settlement {
    pub from: String,
    pub to: String,
    /// Always positive
    pub amount: i64,
}

struct Side {
    member_id: String,
    remaining: i64,
}

/// Greedy largest-first matching of debtors against creditors.
///
/// This is the standard low-transfer-count heuristic, not an optimal
/// minimum-transfer solver. For balances summing to zero every balance is
/// driven to exactly zero and at most `members - 1` transfers are emitted.
/// When the input does not sum to zero (mismatched exact/percentage shares
/// upstream) one side runs out first and the leftover stays unsettled.
///
/// Ties in magnitude keep their input order on both sides, so output is
/// deterministic for a given input.
pub fn compute_settlements(balances: &[NetBalance]) -> Vec<Settlement> {
    let mut creditors: Vec<Side> = Vec::new();
    let mut debtors: Vec<Side> = Vec::new();

    for b in balances {
        if b.balance > 0 {
            creditors.push(Side {
                member_id: b.member_id.clone(),
                remaining: b.balance,
            });
        } else if b.balance < 0 {
            debtors.push(Side {
                member_id: b.member_id.clone(),
                remaining: -b.balance,
            });
        }
    }

    // Stable descending sort: equal magnitudes keep input order
    creditors.sort_by(|a, b| b.remaining.cmp(&a.remaining));
    debtors.sort_by(|a, b| b.remaining.cmp(&a.remaining));

    let mut settlements = Vec::new();
    let mut i = 0;
    let mut j = 0;

    while i < debtors.len() && j < creditors.len() {
        let transfer = debtors[i].remaining.min(creditors[j].remaining);
        if transfer > 0 {
            log::debug!(
                "settle {} -> {}: {}",
                debtors[i].member_id,
                creditors[j].member_id,
                transfer
            );
            settlements.push(Settlement {
                from: debtors[i].member_id.clone(),
                to: creditors[j].member_id.clone(),
                amount: transfer,
            });
        }
        debtors[i].remaining -= transfer;
        creditors[j].remaining -= transfer;

        if debtors[i].remaining == 0 {
            i += 1;
        }
        if creditors[j].remaining == 0 {
            j += 1;
        }
    }

    for side in debtors[i..].iter().chain(&creditors[j..]) {
        log::warn!(
            "unsettleable residual of {} for member {}",
            side.remaining,
            side.member_id
        );
    }

    settlements
}

/// Leftover per member after applying `settlements` to `balances`.
///
/// Empty for well-formed input; non-empty entries mark the residual a
/// mismatched split sum left behind.
pub fn unsettled_residuals(
    balances: &[NetBalance],
    settlements: &[Settlement],
) -> Vec<NetBalance> {
    let mut remaining: Vec<NetBalance> = balances.to_vec();
    for s in settlements {
        for b in &mut remaining {
            if b.member_id == s.from {
                b.balance += s.amount;
            } else if b.member_id == s.to {
                b.balance -= s.amount;
            }
        }
    }
    remaining.retain(|b| b.balance != 0);
    remaining
}
