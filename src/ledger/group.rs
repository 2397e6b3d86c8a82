use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{HashMap, HashSet};
use std::io::Read;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GroupError {
    #[error("duplicate member id: {0}")]
    DuplicateMemberId(String),
    #[error("duplicate transaction id: {0}")]
    DuplicateTransactionId(String),
    #[error("negative amount in transaction {id}: {amount}")]
    NegativeAmount { id: String, amount: i64 },
    #[error("invalid datetime: {0}")]
    InvalidDatetime(String),
}

/// Input root for group JSON
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GroupInput {
    /// Display name for the group (e.g., "Flat 4B")
    #[serde(default)]
    pub name: Option<String>,
    /// ISO currency code all amounts are denominated in
    #[serde(default = "default_currency")]
    pub currency: String,
    pub members: Vec<Member>,
    pub transactions: Vec<Transaction>,
}

fn default_currency() -> String {
    "USD".to_string()
}

/// A person in the group
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Member {
    /// Unique identifier within the group
    pub id: String,
    /// Display name
    pub name: String,
    /// Presentation-only avatar colour (e.g., "#10b981"); carried opaquely
    #[serde(default)]
    pub color: Option<String>,
}

/// A shared expense record
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Transaction {
    /// Unique identifier for this transaction
    pub id: String,
    /// What the money was spent on
    pub title: String,
    /// Total cost in minor currency units (cents); never negative
    pub amount: i64,
    /// When the expense happened (RFC3339 with offset; date-only assumes UTC)
    #[serde(deserialize_with = "deserialize_datetime")]
    #[schemars(with = "String")]
    pub date: DateTime<FixedOffset>,
    /// Member id of whoever fronted the money
    pub payer: String,
    /// Member ids sharing the cost, in order; may or may not include the payer
    pub participants: Vec<String>,
    /// How the cost is divided among participants
    #[serde(flatten)]
    pub split: Split,
}

/// Split policy with mode-specific share data
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "split", rename_all = "lowercase")]
pub enum Split {
    /// Divide evenly; leftover cents go to the first participants in order
    Equal,

    /// Fixed amount per member, in minor units
    Exact {
        #[schemars(with = "HashMap<String, i64>")]
        shares: HashMap<String, i64>,
    },

    /// Percentage of the total per member (0-100)
    Percentage {
        #[schemars(with = "HashMap<String, f64>")]
        shares: HashMap<String, Decimal>,
    },
}

/// Read a group from JSON, sorted by transaction date
pub fn read_group_json<R: Read>(reader: R) -> anyhow::Result<GroupInput> {
    let mut group: GroupInput = serde_json::from_reader(reader)?;
    check_integrity(&group)?;
    group.transactions.sort_by_key(|t| t.date);
    Ok(group)
}

/// Boundary checks on identity and amounts.
///
/// Malformed split sums are deliberately NOT rejected here; the balance
/// engine tolerates them and `validate` surfaces them as warnings.
fn check_integrity(group: &GroupInput) -> Result<(), GroupError> {
    let mut member_ids = HashSet::new();
    for member in &group.members {
        if !member_ids.insert(member.id.as_str()) {
            return Err(GroupError::DuplicateMemberId(member.id.clone()));
        }
    }

    let mut tx_ids = HashSet::new();
    for tx in &group.transactions {
        if !tx_ids.insert(tx.id.as_str()) {
            return Err(GroupError::DuplicateTransactionId(tx.id.clone()));
        }
        if tx.amount < 0 {
            return Err(GroupError::NegativeAmount {
                id: tx.id.clone(),
                amount: tx.amount,
            });
        }
    }
    Ok(())
}

impl GroupInput {
    /// Display name for a member id, falling back to the raw id
    pub fn member_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.members
            .iter()
            .find(|m| m.id == id)
            .map(|m| m.name.as_str())
            .unwrap_or(id)
    }
}

fn parse_datetime(s: &str) -> Result<DateTime<FixedOffset>, GroupError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Ok(dt.and_utc().fixed_offset());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Ok(dt.and_utc().fixed_offset());
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date.and_hms_opt(0, 0, 0).unwrap().and_utc().fixed_offset());
    }
    Err(GroupError::InvalidDatetime(s.to_string()))
}

fn deserialize_datetime<'de, D>(deserializer: D) -> Result<DateTime<FixedOffset>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: String = Deserialize::deserialize(deserializer)?;
    parse_datetime(&s).map_err(|err| serde::de::Error::custom(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tagged_splits() {
        let json = r#"{
            "members": [
                {"id": "a", "name": "Alice"},
                {"id": "b", "name": "Bob"}
            ],
            "transactions": [
                {
                    "id": "t1", "title": "Groceries", "amount": 4200,
                    "date": "2026-08-01", "payer": "a",
                    "participants": ["a", "b"], "split": "equal"
                },
                {
                    "id": "t2", "title": "Rent", "amount": 100000,
                    "date": "2026-08-02T09:30:00", "payer": "b",
                    "participants": ["a", "b"],
                    "split": "exact", "shares": {"a": 60000, "b": 40000}
                },
                {
                    "id": "t3", "title": "Internet", "amount": 5000,
                    "date": "2026-08-03", "payer": "a",
                    "participants": ["a", "b"],
                    "split": "percentage", "shares": {"a": 50, "b": 50}
                }
            ]
        }"#;

        let group = read_group_json(json.as_bytes()).unwrap();
        assert_eq!(group.currency, "USD");
        assert_eq!(group.transactions.len(), 3);
        assert!(matches!(group.transactions[0].split, Split::Equal));
        match &group.transactions[1].split {
            Split::Exact { shares } => assert_eq!(shares["a"], 60000),
            other => panic!("expected exact split, got {:?}", other),
        }
        match &group.transactions[2].split {
            Split::Percentage { shares } => {
                assert_eq!(shares["b"], Decimal::from(50));
            }
            other => panic!("expected percentage split, got {:?}", other),
        }
    }

    #[test]
    fn sorts_transactions_by_date() {
        let json = r#"{
            "members": [{"id": "a", "name": "Alice"}],
            "transactions": [
                {"id": "t2", "title": "Later", "amount": 100, "date": "2026-08-05",
                 "payer": "a", "participants": ["a"], "split": "equal"},
                {"id": "t1", "title": "Earlier", "amount": 100, "date": "2026-08-01",
                 "payer": "a", "participants": ["a"], "split": "equal"}
            ]
        }"#;
        let group = read_group_json(json.as_bytes()).unwrap();
        assert_eq!(group.transactions[0].id, "t1");
        assert_eq!(group.transactions[1].id, "t2");
    }

    #[test]
    fn rejects_duplicate_member_id() {
        let json = r#"{
            "members": [
                {"id": "a", "name": "Alice"},
                {"id": "a", "name": "Alice again"}
            ],
            "transactions": []
        }"#;
        let err = read_group_json(json.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("duplicate member id"));
    }

    #[test]
    fn rejects_duplicate_transaction_id() {
        let json = r#"{
            "members": [{"id": "a", "name": "Alice"}],
            "transactions": [
                {"id": "t1", "title": "x", "amount": 100, "date": "2026-08-01",
                 "payer": "a", "participants": ["a"], "split": "equal"},
                {"id": "t1", "title": "y", "amount": 200, "date": "2026-08-02",
                 "payer": "a", "participants": ["a"], "split": "equal"}
            ]
        }"#;
        let err = read_group_json(json.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("duplicate transaction id"));
    }

    #[test]
    fn rejects_negative_amount() {
        let json = r#"{
            "members": [{"id": "a", "name": "Alice"}],
            "transactions": [
                {"id": "t1", "title": "x", "amount": -100, "date": "2026-08-01",
                 "payer": "a", "participants": ["a"], "split": "equal"}
            ]
        }"#;
        let err = read_group_json(json.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("negative amount"));
    }

    #[test]
    fn member_name_falls_back_to_id() {
        let group = GroupInput {
            name: None,
            currency: "USD".to_string(),
            members: vec![Member {
                id: "a".to_string(),
                name: "Alice".to_string(),
                color: None,
            }],
            transactions: vec![],
        };
        assert_eq!(group.member_name("a"), "Alice");
        assert_eq!(group.member_name("ghost"), "ghost");
    }
}
