//! Export command - CSV dumps of transactions or balances

use crate::cmd::read_group;
use crate::ledger::{compute_net_balances, GroupInput};
use clap::{Args, ValueEnum};
use serde::Serialize;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ExportCommand {
    /// JSON file describing the group, or "-" for stdin
    #[arg(short, long)]
    group: PathBuf,

    /// What to export
    #[arg(value_enum, default_value_t = ExportKind::Transactions)]
    kind: ExportKind,

    /// Write to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportKind {
    /// One row per transaction, with names resolved
    Transactions,
    /// One row per member with their net balance
    Balances,
}

#[derive(Debug, Serialize)]
struct TransactionRow {
    id: String,
    title: String,
    /// Major units with two decimal places
    amount: String,
    date: String,
    payer: String,
    participants: String,
}

#[derive(Debug, Serialize)]
struct BalanceExportRow {
    member: String,
    net_balance: String,
}

impl ExportCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let group = read_group(&self.group)?;

        match &self.output {
            Some(path) => self.write_csv(&group, File::create(path)?),
            None => self.write_csv(&group, io::stdout()),
        }
    }

    fn write_csv<W: Write>(&self, group: &GroupInput, writer: W) -> anyhow::Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);

        match self.kind {
            ExportKind::Transactions => {
                for tx in &group.transactions {
                    let participants: Vec<&str> = tx
                        .participants
                        .iter()
                        .map(|id| group.member_name(id))
                        .collect();
                    wtr.serialize(TransactionRow {
                        id: tx.id.clone(),
                        title: tx.title.clone(),
                        amount: major_units(tx.amount),
                        date: tx.date.to_rfc3339(),
                        payer: group.member_name(&tx.payer).to_string(),
                        participants: participants.join(";"),
                    })?;
                }
            }
            ExportKind::Balances => {
                let balances = compute_net_balances(&group.members, &group.transactions);
                for balance in &balances {
                    wtr.serialize(BalanceExportRow {
                        member: group.member_name(&balance.member_id).to_string(),
                        net_balance: major_units(balance.balance),
                    })?;
                }
            }
        }

        wtr.flush()?;
        Ok(())
    }
}

fn major_units(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let magnitude = cents.unsigned_abs();
    format!("{}{}.{:02}", sign, magnitude / 100, magnitude % 100)
}
