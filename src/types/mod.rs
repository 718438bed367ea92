//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `account`: Account, account kinds and identifiers
//! - `history`: Transaction history entries
//! - `error`: Error types for the bank ledger

pub mod account;
pub mod error;
pub mod history;

pub use account::{Account, AccountKind, AccountNumber, Pin, FIRST_ACCOUNT_NUMBER};
pub use error::LedgerError;
pub use history::{HistoryAction, HistoryEntry, TIMESTAMP_FORMAT};
