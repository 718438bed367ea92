//! Bank Ledger Library
//! # Overview
//!
//! An interactive bank account ledger: customers open savings, current and
//! fixed deposit accounts, move money between them, and an administrator
//! manages accounts and simulates the passage of time.
//!
//! # Architecture
//!
//! - [`types`] - Core data types (Account, HistoryEntry, LedgerError)
//! - [`config`] - Rates, penalty and policy switches
//! - [`cli`] - CLI arguments parsing
//! - [`core`] - Business logic components:
//!   - [`core::ledger`] - Account table and balance rules
//!   - [`core::engine`] - Operation orchestration (mutate, save, log)
//!   - [`core::traits`] - Storage seams for the ledger and the history logs
//! - [`io`] - Ledger file, history files and in-memory stand-ins
//! - [`menu`] - Interactive root, customer and admin menus
//!
//! # Account Kinds
//!
//! - **Savings**: earns the savings rate every month
//! - **Current**: earns nothing
//! - **Fixed Deposit**: earns the FD rate, refuses withdrawals and outgoing
//!   transfers while its countdown runs, and can be broken early for a penalty
//!
//! # Persistence
//!
//! The whole ledger is rewritten to `accounts.txt` after every change, and
//! each account gets an append-only `<number>_history.txt`.

pub mod cli;
pub mod config;
pub mod core;
pub mod io;
pub mod menu;
pub mod types;

pub use config::BankConfig;
pub use core::{BankEngine, HistoryLog, Ledger, LedgerStore};
pub use io::{FileHistoryLog, FileLedgerStore};
pub use types::{Account, AccountKind, AccountNumber, HistoryAction, HistoryEntry, LedgerError};
