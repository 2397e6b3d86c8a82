//! Strict split validation, an opt-in policy layer on top of the tolerant
//! balance engine. The engine itself never rejects mismatched share sums;
//! this module makes them visible.

use crate::ledger::group::{GroupInput, Split, Transaction};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use schemars::JsonSchema;
use serde::Serialize;
use std::collections::HashSet;

/// A data-quality finding for one transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(tag = "type")]
pub enum SplitWarning {
    /// Transaction has no participants and contributes nothing
    EmptyParticipants { transaction_id: String },
    /// Payer id is not in the member list; the credit is dropped
    UnknownPayer {
        transaction_id: String,
        member_id: String,
    },
    /// Participant id is not in the member list; the debit is dropped
    UnknownParticipant {
        transaction_id: String,
        member_id: String,
    },
    /// Exact shares over the participants do not sum to the amount
    ExactSumMismatch {
        transaction_id: String,
        amount: i64,
        share_total: i64,
    },
    /// Percentage shares over the participants do not sum to 100
    PercentageSumMismatch {
        transaction_id: String,
        #[schemars(with = "f64")]
        share_total: Decimal,
    },
    /// A share names a member who is not a participant; it is never applied
    ShareForNonParticipant {
        transaction_id: String,
        member_id: String,
    },
}

impl SplitWarning {
    pub fn transaction_id(&self) -> &str {
        match self {
            SplitWarning::EmptyParticipants { transaction_id }
            | SplitWarning::UnknownPayer { transaction_id, .. }
            | SplitWarning::UnknownParticipant { transaction_id, .. }
            | SplitWarning::ExactSumMismatch { transaction_id, .. }
            | SplitWarning::PercentageSumMismatch { transaction_id, .. }
            | SplitWarning::ShareForNonParticipant { transaction_id, .. } => transaction_id,
        }
    }

    pub fn message(&self) -> String {
        match self {
            SplitWarning::EmptyParticipants { .. } => {
                "no participants; transaction contributes nothing".to_string()
            }
            SplitWarning::UnknownPayer { member_id, .. } => {
                format!("payer '{}' is not a group member", member_id)
            }
            SplitWarning::UnknownParticipant { member_id, .. } => {
                format!("participant '{}' is not a group member", member_id)
            }
            SplitWarning::ExactSumMismatch {
                amount,
                share_total,
                ..
            } => format!(
                "exact shares sum to {} but the amount is {}",
                share_total, amount
            ),
            SplitWarning::PercentageSumMismatch { share_total, .. } => {
                format!("percentage shares sum to {} instead of 100", share_total)
            }
            SplitWarning::ShareForNonParticipant { member_id, .. } => {
                format!("share given for '{}', who is not a participant", member_id)
            }
        }
    }
}

/// Check every transaction against the group's member list and its own
/// share data. Returns all findings; an empty result means the balances the
/// engine computes will conserve to zero.
pub fn validate_group(group: &GroupInput) -> Vec<SplitWarning> {
    let member_ids: HashSet<&str> = group.members.iter().map(|m| m.id.as_str()).collect();

    let mut warnings = Vec::new();
    for tx in &group.transactions {
        check_transaction(tx, &member_ids, &mut warnings);
    }
    warnings
}

fn check_transaction(
    tx: &Transaction,
    member_ids: &HashSet<&str>,
    warnings: &mut Vec<SplitWarning>,
) {
    if tx.participants.is_empty() {
        warnings.push(SplitWarning::EmptyParticipants {
            transaction_id: tx.id.clone(),
        });
        return;
    }

    if !member_ids.contains(tx.payer.as_str()) {
        warnings.push(SplitWarning::UnknownPayer {
            transaction_id: tx.id.clone(),
            member_id: tx.payer.clone(),
        });
    }

    for participant in &tx.participants {
        if !member_ids.contains(participant.as_str()) {
            warnings.push(SplitWarning::UnknownParticipant {
                transaction_id: tx.id.clone(),
                member_id: participant.clone(),
            });
        }
    }

    let participants: HashSet<&str> = tx.participants.iter().map(|p| p.as_str()).collect();

    match &tx.split {
        Split::Equal => {}
        Split::Exact { shares } => {
            // Only shares of actual participants are ever debited
            let share_total: i64 = tx
                .participants
                .iter()
                .map(|id| shares.get(id).copied().unwrap_or(0))
                .sum();
            if share_total != tx.amount {
                warnings.push(SplitWarning::ExactSumMismatch {
                    transaction_id: tx.id.clone(),
                    amount: tx.amount,
                    share_total,
                });
            }
            push_non_participant_shares(tx, shares.keys(), &participants, warnings);
        }
        Split::Percentage { shares } => {
            let share_total: Decimal = tx
                .participants
                .iter()
                .map(|id| shares.get(id).copied().unwrap_or(Decimal::ZERO))
                .sum();
            if share_total != dec!(100) {
                warnings.push(SplitWarning::PercentageSumMismatch {
                    transaction_id: tx.id.clone(),
                    share_total,
                });
            }
            push_non_participant_shares(tx, shares.keys(), &participants, warnings);
        }
    }
}

// Share maps are unordered; sort so warning order is stable.
fn push_non_participant_shares<'a>(
    tx: &Transaction,
    share_ids: impl Iterator<Item = &'a String>,
    participants: &HashSet<&str>,
    warnings: &mut Vec<SplitWarning>,
) {
    let mut extra: Vec<&String> = share_ids
        .filter(|id| !participants.contains(id.as_str()))
        .collect();
    extra.sort();
    for id in extra {
        warnings.push(SplitWarning::ShareForNonParticipant {
            transaction_id: tx.id.clone(),
            member_id: id.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::group::Member;
    use chrono::DateTime;
    use std::collections::HashMap;

    fn group(transactions: Vec<Transaction>) -> GroupInput {
        GroupInput {
            name: None,
            currency: "USD".to_string(),
            members: vec![
                Member {
                    id: "a".to_string(),
                    name: "Alice".to_string(),
                    color: None,
                },
                Member {
                    id: "b".to_string(),
                    name: "Bob".to_string(),
                    color: None,
                },
            ],
            transactions,
        }
    }

    fn tx(id: &str, amount: i64, payer: &str, participants: &[&str], split: Split) -> Transaction {
        Transaction {
            id: id.to_string(),
            title: format!("tx {}", id),
            amount,
            date: DateTime::parse_from_rfc3339("2026-08-01T00:00:00+00:00").unwrap(),
            payer: payer.to_string(),
            participants: participants.iter().map(|s| s.to_string()).collect(),
            split,
        }
    }

    #[test]
    fn well_formed_group_has_no_warnings() {
        let shares = HashMap::from([("a".to_string(), 600), ("b".to_string(), 400)]);
        let g = group(vec![
            tx("t1", 1000, "a", &["a", "b"], Split::Equal),
            tx("t2", 1000, "b", &["a", "b"], Split::Exact { shares }),
        ]);
        assert!(validate_group(&g).is_empty());
    }

    #[test]
    fn flags_exact_sum_mismatch() {
        let shares = HashMap::from([("a".to_string(), 600), ("b".to_string(), 300)]);
        let g = group(vec![tx("t1", 1000, "a", &["a", "b"], Split::Exact { shares })]);
        assert_eq!(
            validate_group(&g),
            vec![SplitWarning::ExactSumMismatch {
                transaction_id: "t1".to_string(),
                amount: 1000,
                share_total: 900,
            }]
        );
    }

    #[test]
    fn flags_percentage_sum_mismatch() {
        let shares = HashMap::from([
            ("a".to_string(), rust_decimal_macros::dec!(33.3)),
            ("b".to_string(), rust_decimal_macros::dec!(33.3)),
        ]);
        let g = group(vec![tx(
            "t1",
            1000,
            "a",
            &["a", "b"],
            Split::Percentage { shares },
        )]);
        let warnings = validate_group(&g);
        assert_eq!(warnings.len(), 1);
        assert!(matches!(
            &warnings[0],
            SplitWarning::PercentageSumMismatch { share_total, .. }
                if *share_total == rust_decimal_macros::dec!(66.6)
        ));
    }

    #[test]
    fn flags_unknown_members_and_empty_participants() {
        let g = group(vec![
            tx("t1", 1000, "ghost", &["a", "phantom"], Split::Equal),
            tx("t2", 500, "a", &[], Split::Equal),
        ]);
        let warnings = validate_group(&g);
        assert_eq!(
            warnings,
            vec![
                SplitWarning::UnknownPayer {
                    transaction_id: "t1".to_string(),
                    member_id: "ghost".to_string(),
                },
                SplitWarning::UnknownParticipant {
                    transaction_id: "t1".to_string(),
                    member_id: "phantom".to_string(),
                },
                SplitWarning::EmptyParticipants {
                    transaction_id: "t2".to_string(),
                },
            ]
        );
    }

    #[test]
    fn flags_share_for_non_participant() {
        // B has a share but only A participates; the engine debits A alone
        let shares = HashMap::from([("a".to_string(), 1000), ("b".to_string(), 500)]);
        let g = group(vec![tx("t1", 1000, "a", &["a"], Split::Exact { shares })]);
        let warnings = validate_group(&g);
        assert_eq!(
            warnings,
            vec![SplitWarning::ShareForNonParticipant {
                transaction_id: "t1".to_string(),
                member_id: "b".to_string(),
            }]
        );
    }
}
