//! Balances command - net position per member

use crate::cmd::read_group;
use crate::ledger::{compute_net_balances, format_cents, NetBalance};
use clap::Args;
use serde::Serialize;
use std::io;
use std::path::PathBuf;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct BalancesCommand {
    /// JSON file describing the group, or "-" for stdin
    #[arg(short, long)]
    group: PathBuf,

    /// Output as CSV instead of formatted table
    #[arg(long)]
    csv: bool,

    /// Output as JSON instead of formatted table
    #[arg(long)]
    json: bool,
}

/// Row for the balances table output
#[derive(Debug, Clone, Tabled, Serialize)]
struct BalanceRow {
    #[tabled(rename = "Member")]
    member: String,

    #[tabled(rename = "Net")]
    net: String,

    #[tabled(rename = "Status")]
    status: String,
}

/// JSON output structure
#[derive(Debug, Serialize)]
struct BalancesData {
    currency: String,
    balances: Vec<BalanceEntry>,
}

#[derive(Debug, Serialize)]
struct BalanceEntry {
    member_id: String,
    name: String,
    /// Signed minor units
    balance: i64,
    formatted: String,
}

impl BalancesCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let group = read_group(&self.group)?;
        let balances = compute_net_balances(&group.members, &group.transactions);

        if self.json {
            let data = BalancesData {
                currency: group.currency.clone(),
                balances: balances
                    .iter()
                    .map(|b| BalanceEntry {
                        member_id: b.member_id.clone(),
                        name: group.member_name(&b.member_id).to_string(),
                        balance: b.balance,
                        formatted: format_cents(b.balance, &group.currency),
                    })
                    .collect(),
            };
            println!("{}", serde_json::to_string_pretty(&data)?);
            return Ok(());
        }

        let rows: Vec<BalanceRow> = balances
            .iter()
            .map(|b| BalanceRow {
                member: group.member_name(&b.member_id).to_string(),
                net: format_cents(b.balance, &group.currency),
                status: status_of(b).to_string(),
            })
            .collect();

        if self.csv {
            let mut wtr = csv::Writer::from_writer(io::stdout());
            for row in &rows {
                wtr.serialize(row)?;
            }
            wtr.flush()?;
            Ok(())
        } else {
            self.print_table(&rows);
            Ok(())
        }
    }

    fn print_table(&self, rows: &[BalanceRow]) {
        if rows.is_empty() {
            println!("No members in group");
            return;
        }

        let table = Table::new(rows)
            .with(Style::rounded())
            .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
            .to_string();
        println!("{}", table);
    }
}

fn status_of(balance: &NetBalance) -> &'static str {
    match balance.balance {
        b if b > 0 => "is owed",
        b if b < 0 => "owes",
        _ => "settled",
    }
}
