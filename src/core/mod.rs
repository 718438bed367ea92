//! Core business logic module
//!
//! This module contains the core ledger components:
//! - `traits` - Storage abstractions for the ledger and the history logs
//! - `ledger` - In-memory accounts and balance rules
//! - `engine` - Operation orchestration (mutate, save, log)

pub mod engine;
pub mod ledger;
pub mod traits;

pub use engine::{AdminSession, AdvanceSummary, BankEngine, CustomerSession, NewAccount, OpenKind};
pub use ledger::{FdBreak, InterestCredit, Ledger, Maturity};
pub use traits::{HistoryLog, LedgerStore};
