//! Net balance computation: who is owed and who owes, in minor units.

use crate::ledger::group::{Member, Split, Transaction};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use schemars::JsonSchema;
use serde::Serialize;
use std::collections::HashMap;

/// Net position for one member. Positive = owed money, negative = owes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct NetBalance {
    pub member_id: String,
    /// Signed minor units (cents)
    pub balance: i64,
}

/// Reduce transactions to one signed net balance per member, in member order.
///
/// The member list defines the domain: a transaction referencing an id not in
/// `members` contributes nothing for that credit or debit. Total function,
/// never fails; mismatched exact/percentage share sums are tolerated and
/// simply skew the result (see `validate` for the strict policy layer).
pub fn compute_net_balances(members: &[Member], transactions: &[Transaction]) -> Vec<NetBalance> {
    let mut balances: HashMap<&str, i64> = members.iter().map(|m| (m.id.as_str(), 0)).collect();

    for tx in transactions {
        if tx.participants.is_empty() {
            continue;
        }

        // Payer is credited the full amount, participant or not
        match balances.get_mut(tx.payer.as_str()) {
            Some(balance) => *balance += tx.amount,
            None => log::warn!("ignoring unknown payer {} in transaction {}", tx.payer, tx.id),
        }

        for (participant, share) in tx.participants.iter().zip(participant_shares(tx)) {
            match balances.get_mut(participant.as_str()) {
                Some(balance) => *balance -= share,
                None => log::warn!(
                    "ignoring unknown participant {} in transaction {}",
                    participant,
                    tx.id
                ),
            }
        }
    }

    members
        .iter()
        .map(|m| NetBalance {
            member_id: m.id.clone(),
            balance: balances[m.id.as_str()],
        })
        .collect()
}

/// Per-participant debits for one transaction, in participant order.
///
/// Equal splits are exact: floor shares plus one leftover cent to each of the
/// first `amount mod n` participants, so the shares always sum to `amount`.
/// Exact and percentage splits trust their share data; nothing re-checks the
/// sum against the transaction amount.
pub fn participant_shares(tx: &Transaction) -> Vec<i64> {
    let count = tx.participants.len() as i64;
    if count == 0 {
        return Vec::new();
    }

    match &tx.split {
        Split::Equal => {
            let base = tx.amount / count;
            let remainder = tx.amount - base * count;
            (0..count)
                .map(|i| if i < remainder { base + 1 } else { base })
                .collect()
        }
        Split::Exact { shares } => tx
            .participants
            .iter()
            .map(|id| shares.get(id).copied().unwrap_or(0))
            .collect(),
        Split::Percentage { shares } => tx
            .participants
            .iter()
            .map(|id| {
                let pct = shares.get(id).copied().unwrap_or(Decimal::ZERO);
                // Round to whole cents immediately, half-up
                (Decimal::from(tx.amount) * pct / dec!(100))
                    .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
                    .to_i64()
                    .unwrap_or(0)
            })
            .collect(),
    }
}
