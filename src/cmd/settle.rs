//! Settle command - minimal transfer plan that clears the group's debts

use crate::cmd::read_group;
use crate::ledger::{compute_net_balances, compute_settlements, format_cents, unsettled_residuals};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct SettleCommand {
    /// JSON file describing the group, or "-" for stdin
    #[arg(short, long)]
    group: PathBuf,

    /// Output as JSON instead of formatted table
    #[arg(long)]
    json: bool,
}

/// Row for the settlement table output
#[derive(Debug, Clone, Tabled)]
struct SettlementRow {
    #[tabled(rename = "From")]
    from: String,

    #[tabled(rename = "To")]
    to: String,

    #[tabled(rename = "Amount")]
    amount: String,
}

/// JSON output structure
#[derive(Debug, Serialize)]
struct SettleData {
    currency: String,
    settlements: Vec<SettlementEntry>,
    /// Balances no transfer plan can clear (mismatched split sums upstream)
    residuals: Vec<ResidualEntry>,
}

#[derive(Debug, Serialize)]
struct SettlementEntry {
    from: String,
    to: String,
    amount: i64,
    formatted: String,
}

#[derive(Debug, Serialize)]
struct ResidualEntry {
    member_id: String,
    balance: i64,
}

impl SettleCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let group = read_group(&self.group)?;
        let balances = compute_net_balances(&group.members, &group.transactions);
        let settlements = compute_settlements(&balances);
        let residuals = unsettled_residuals(&balances, &settlements);

        if self.json {
            let data = SettleData {
                currency: group.currency.clone(),
                settlements: settlements
                    .iter()
                    .map(|s| SettlementEntry {
                        from: s.from.clone(),
                        to: s.to.clone(),
                        amount: s.amount,
                        formatted: format_cents(s.amount, &group.currency),
                    })
                    .collect(),
                residuals: residuals
                    .iter()
                    .map(|b| ResidualEntry {
                        member_id: b.member_id.clone(),
                        balance: b.balance,
                    })
                    .collect(),
            };
            println!("{}", serde_json::to_string_pretty(&data)?);
            return Ok(());
        }

        if settlements.is_empty() && residuals.is_empty() {
            println!("All settled up.");
            return Ok(());
        }

        let rows: Vec<SettlementRow> = settlements
            .iter()
            .map(|s| SettlementRow {
                from: group.member_name(&s.from).to_string(),
                to: group.member_name(&s.to).to_string(),
                amount: format_cents(s.amount, &group.currency),
            })
            .collect();

        if !rows.is_empty() {
            let table = Table::new(&rows)
                .with(Style::rounded())
                .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
                .to_string();
            println!("{}", table);
        }

        for residual in &residuals {
            println!(
                "\u{26A0} {} has an unsettleable balance of {} (split shares do not sum to the amount)",
                group.member_name(&residual.member_id),
                format_cents(residual.balance, &group.currency),
            );
        }

        Ok(())
    }
}
