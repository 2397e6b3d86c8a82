//! Schema command - print the expected group input format

use crate::ledger::GroupInput;
use clap::Args;
use schemars::schema_for;

#[derive(Args, Debug)]
pub struct SchemaCommand {
    /// Output format: json-schema or example
    #[arg(value_enum, default_value = "json-schema")]
    format: SchemaFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum SchemaFormat {
    /// JSON Schema for the group input format
    JsonSchema,
    /// A worked example group file
    Example,
}

impl SchemaCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        match self.format {
            SchemaFormat::JsonSchema => {
                let schema = schema_for!(GroupInput);
                println!("{}", serde_json::to_string_pretty(&schema)?);
            }
            SchemaFormat::Example => {
                println!("{}", EXAMPLE_GROUP.trim());
            }
        }
        Ok(())
    }
}

const EXAMPLE_GROUP: &str = r##"
{
  "name": "Flat 4B",
  "currency": "USD",
  "members": [
    { "id": "alice", "name": "Alice", "color": "#10b981" },
    { "id": "bob", "name": "Bob", "color": "#3b82f6" },
    { "id": "cara", "name": "Cara" }
  ],
  "transactions": [
    {
      "id": "t1",
      "title": "Groceries",
      "amount": 9000,
      "date": "2026-08-01",
      "payer": "alice",
      "participants": ["alice", "bob", "cara"],
      "split": "equal"
    },
    {
      "id": "t2",
      "title": "Rent",
      "amount": 150000,
      "date": "2026-08-02T09:30:00",
      "payer": "bob",
      "participants": ["alice", "bob", "cara"],
      "split": "exact",
      "shares": { "alice": 60000, "bob": 60000, "cara": 30000 }
    },
    {
      "id": "t3",
      "title": "Internet",
      "amount": 5000,
      "date": "2026-08-05",
      "payer": "cara",
      "participants": ["alice", "bob"],
      "split": "percentage",
      "shares": { "alice": 50, "bob": 50 }
    }
  ]
}
"##;
