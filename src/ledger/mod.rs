pub mod balance;
pub mod group;
pub mod money;
pub mod settlement;
pub mod stats;
pub mod validate;

// Flat public surface for domain types and functions.
#[allow(unused_imports)]
pub use balance::{compute_net_balances, participant_shares, NetBalance};
#[allow(unused_imports)]
pub use group::{read_group_json, GroupError, GroupInput, Member, Split, Transaction};
#[allow(unused_imports)]
pub use money::{find_currency, format_cents, CurrencyInfo, CURRENCIES};
#[allow(unused_imports)]
pub use settlement::{compute_settlements, unsettled_residuals, Settlement};
pub use stats::{spending_by_day, spent_since, top_spender, total_spent, Period};
pub use validate::{validate_group, SplitWarning};
