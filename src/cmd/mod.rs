pub mod balances;
pub mod export;
pub mod schema;
pub mod settle;
pub mod summary;
pub mod validate;

use crate::ledger::group::{read_group_json, GroupInput};
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

/// Read a group file (JSON), or stdin with "-"
pub fn read_group(path: &Path) -> anyhow::Result<GroupInput> {
    if path.as_os_str() == "-" {
        read_from_stdin()
    } else {
        let file = File::open(path)?;
        read_group_json(BufReader::new(file))
    }
}

fn read_from_stdin() -> anyhow::Result<GroupInput> {
    let stdin = io::stdin();
    let mut reader = BufReader::new(stdin.lock());

    let mut buffer = Vec::new();
    reader.read_to_end(&mut buffer)?;

    if buffer.is_empty() {
        anyhow::bail!("No input received. Provide a file or pipe data to stdin.");
    }

    read_group_json(io::Cursor::new(buffer))
}
