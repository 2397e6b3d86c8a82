//! Validate command - surface split and membership issues without changing
//! how balances are computed

use crate::cmd::read_group;
use crate::ledger::{validate_group, SplitWarning};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ValidateCommand {
    /// JSON file describing the group, or "-" for stdin
    #[arg(short, long)]
    group: PathBuf,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

/// JSON output structure
#[derive(Debug, Serialize)]
struct ValidationOutput {
    issue_count: usize,
    issues: Vec<SplitWarning>,
}

impl ValidateCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let group = read_group(&self.group)?;
        let issues = validate_group(&group);

        if self.json {
            let output = ValidationOutput {
                issue_count: issues.len(),
                issues: issues.clone(),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            self.print_text(&issues);
        }

        // Exit with code 1 if issues found
        if !issues.is_empty() {
            std::process::exit(1);
        }
        Ok(())
    }

    fn print_text(&self, issues: &[SplitWarning]) {
        println!();
        println!("VALIDATION RESULTS");
        println!();

        if issues.is_empty() {
            println!("\u{2713} No issues found.");
            return;
        }

        println!("\u{26A0} {} issue(s) found:", issues.len());
        println!();
        for (i, issue) in issues.iter().enumerate() {
            println!(
                "  {}. [{}] {}",
                i + 1,
                issue.transaction_id(),
                issue.message()
            );
        }
    }
}
