//! I/O module
//!
//! Handles the ledger file, the history files and their in-memory stand-ins.
//!
//! # Components
//!
//! - `ledger_format` - Ledger line format (parsing, sanitizing, serialization)
//! - `ledger_file` - File-backed [`crate::core::LedgerStore`]
//! - `history_file` - File-backed [`crate::core::HistoryLog`]
//! - `memory` - In-memory implementations of both traits

pub mod history_file;
pub mod ledger_file;
pub mod ledger_format;
pub mod memory;

pub use history_file::FileHistoryLog;
pub use ledger_file::FileLedgerStore;
pub use ledger_format::{read_ledger, sanitize_holder, write_ledger, LedgerLoad, LedgerRow};
pub use memory::{MemoryHistoryLog, MemoryLedgerStore};
