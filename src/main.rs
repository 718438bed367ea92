//! Bank Ledger CLI
//!
//! Interactive console front end for the bank ledger.
//!
//! # Usage
//!
//! ```bash
//! cargo run
//! cargo run -- --data-dir ./bank-data
//! cargo run -- --savings-rate 4.5 --fd-rate 6 --fd-penalty 2
//! cargo run -- --pin-reset unchecked --matured-fd convert-to-savings
//! RUST_LOG=bank_ledger=debug cargo run
//! ```
//!
//! Menus are read from stdin and written to stdout. Logs go to stderr.
//!
//! # Exit Codes
//!
//! - 0: Normal exit, including end of input
//! - 1: Error (data directory not usable, ledger unreadable, console failure)

use bank_ledger::cli;
use bank_ledger::io::{FileHistoryLog, FileLedgerStore};
use bank_ledger::menu::{self, Console};
use bank_ledger::BankEngine;
use std::{fs, io, process};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() {
    let args = cli::parse_args();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();

    let config = args.to_bank_config();
    if let Err(e) = fs::create_dir_all(&config.data_dir) {
        eprintln!("Error: cannot create data directory {}: {}", config.data_dir.display(), e);
        process::exit(1);
    }
    info!(data_dir = %config.data_dir.display(), "starting");

    let store = FileLedgerStore::new(config.ledger_path());
    let history = FileHistoryLog::new(config.data_dir.clone());
    let mut engine = match BankEngine::load(config, store, history) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout());
    if let Err(e) = menu::run(&mut engine, &mut console) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
