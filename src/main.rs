use clap::{Parser, Subcommand};

mod cmd;
mod ledger;

use cmd::balances::BalancesCommand;
use cmd::export::ExportCommand;
use cmd::schema::SchemaCommand;
use cmd::settle::SettleCommand;
use cmd::summary::SummaryCommand;
use cmd::validate::ValidateCommand;

#[derive(Parser, Debug)]
#[command(name = "divvy", version, about = "Split shared expenses and settle up")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Net balance per member
    Balances(BalancesCommand),
    /// Transfer plan that clears the group's debts
    Settle(SettleCommand),
    /// Group totals and spending highlights
    Summary(SummaryCommand),
    /// CSV export of transactions or balances
    Export(ExportCommand),
    /// Check split data quality
    Validate(ValidateCommand),
    /// Print the expected group input format
    Schema(SchemaCommand),
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let cli = Cli::parse();
    match &cli.command {
        Command::Balances(cmd) => cmd.exec(),
        Command::Settle(cmd) => cmd.exec(),
        Command::Summary(cmd) => cmd.exec(),
        Command::Export(cmd) => cmd.exec(),
        Command::Validate(cmd) => cmd.exec(),
        Command::Schema(cmd) => cmd.exec(),
    }
}
