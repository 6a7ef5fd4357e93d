//! Bank Ledger CLI
//!
//! Bulk-loads account records from a CSV file and writes the resulting
//! registry snapshot as CSV to stdout. Rejected records are reported on
//! the log without aborting the batch.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- accounts.csv > snapshot.csv
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity

use bank_ledger::{AccountRecord, AccountRegistry, LedgerError, Result};
use csv::{ReaderBuilder, Trim};
use log::warn;
use std::env;
use std::fs::File;
use std::io::{self, BufReader, Read, Write};
use std::process;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        return Err(LedgerError::MissingArgument);
    }

    let input_path = &args[1];
    let file = File::open(input_path)?;
    let reader = BufReader::new(file);

    let mut registry = AccountRegistry::new();
    load_accounts(&mut registry, reader);

    let stdout = io::stdout();
    let handle = stdout.lock();
    write_snapshot(&registry, handle)?;

    Ok(())
}

/// Reads account records and admits them one at a time.
///
/// Rows that fail to parse are logged and skipped, mirroring the
/// per-record partial success of the bulk-load boundary.
fn load_accounts<R: Read>(registry: &mut AccountRegistry, reader: R) {
    let mut csv_reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut records = Vec::new();
    for (row_idx, result) in csv_reader.deserialize::<AccountRecord>().enumerate() {
        let row_num = row_idx + 2; // 1-indexed, accounting for header row

        match result {
            Ok(record) => records.push(record),
            Err(e) => warn!("Row {}: CSV parse error: {}", row_num, e),
        }
    }

    let report = registry.bulk_load(records);
    if !report.rejected.is_empty() {
        warn!(
            "Bulk load admitted {} record(s), rejected {}",
            report.succeeded,
            report.rejected.len()
        );
    }
}

/// Writes the registry snapshot as CSV, one row per account in creation order.
fn write_snapshot<W: Write>(registry: &AccountRegistry, writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record(["id", "holder_name", "age", "account_type", "balance", "status"])?;

    for row in registry.snapshot() {
        csv_writer.write_record([
            row.id.to_string(),
            row.holder_name,
            row.age.to_string(),
            row.account_type.to_string(),
            row.balance.to_string(),
            row.status.to_string(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}
