//! Summary command - group totals and spending highlights

use crate::cmd::read_group;
use crate::ledger::{
    format_cents, spending_by_day, spent_since, top_spender, total_spent, Period,
};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct SummaryCommand {
    /// JSON file describing the group, or "-" for stdin
    #[arg(short, long)]
    group: PathBuf,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

/// Summary data for JSON output
#[derive(Debug, Serialize)]
struct SummaryData {
    group: String,
    currency: String,
    members: usize,
    transactions: usize,
    total_spent: i64,
    spent_last_week: i64,
    spent_last_month: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_spender: Option<TopSpenderData>,
    spending_by_day: Vec<DaySpendData>,
}

#[derive(Debug, Serialize)]
struct TopSpenderData {
    member_id: String,
    name: String,
    amount: i64,
}

#[derive(Debug, Serialize)]
struct DaySpendData {
    date: String,
    amount: i64,
}

impl SummaryCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let group = read_group(&self.group)?;
        let now = chrono::Utc::now().fixed_offset();

        let total = total_spent(&group.transactions);
        let last_week = spent_since(&group.transactions, Period::Week.cutoff(now));
        let last_month = spent_since(&group.transactions, Period::Month.cutoff(now));
        let top = top_spender(&group.members, &group.transactions);
        let by_day = spending_by_day(&group.transactions);

        let group_name = group.name.clone().unwrap_or_else(|| "Group".to_string());

        if self.json {
            let data = SummaryData {
                group: group_name,
                currency: group.currency.clone(),
                members: group.members.len(),
                transactions: group.transactions.len(),
                total_spent: total,
                spent_last_week: last_week,
                spent_last_month: last_month,
                top_spender: top.map(|(member_id, amount)| TopSpenderData {
                    name: group.member_name(&member_id).to_string(),
                    member_id,
                    amount,
                }),
                spending_by_day: by_day
                    .iter()
                    .map(|(date, amount)| DaySpendData {
                        date: date.format("%Y-%m-%d").to_string(),
                        amount: *amount,
                    })
                    .collect(),
            };
            println!("{}", serde_json::to_string_pretty(&data)?);
            return Ok(());
        }

        let currency = &group.currency;
        println!();
        println!("GROUP SUMMARY ({})", group_name);
        println!();
        println!("Members:      {}", group.members.len());
        println!("Transactions: {}", group.transactions.len());
        println!();
        println!("SPENDING");
        println!("  Total:       {}", format_cents(total, currency));
        println!("  Last week:   {}", format_cents(last_week, currency));
        println!("  Last month:  {}", format_cents(last_month, currency));
        match top {
            Some((member_id, amount)) => println!(
                "  Top spender: {} ({})",
                group.member_name(&member_id),
                format_cents(amount, currency)
            ),
            None => println!("  Top spender: n/a"),
        }

        if !by_day.is_empty() {
            println!();
            println!("BY DAY");
            for (date, amount) in &by_day {
                println!(
                    "  {}  {}",
                    date.format("%Y-%m-%d"),
                    format_cents(*amount, currency)
                );
            }
        }

        Ok(())
    }
}
