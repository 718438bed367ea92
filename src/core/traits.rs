//! Storage traits for the ledger and the per-account history
//!
//! These traits are the seams between [`crate::core::BankEngine`] and the
//! filesystem. The file-backed implementations live in [`crate::io`]; the
//! in-memory ones in [`crate::io::memory`] back the tests and benchmarks.

use crate::types::{Account, AccountNumber, HistoryEntry, LedgerError};

/// Whole-table persistence for the account ledger
pub trait LedgerStore {
    /// Load every account, stopping silently at the first malformed record
    ///
    /// A missing store is an empty ledger, not an error.
    fn load(&self) -> Result<Vec<Account>, LedgerError>;

    /// Overwrite the stored table with `accounts`
    fn save(&mut self, accounts: &[&Account]) -> Result<(), LedgerError>;
}

/// Append-only history, one log per account
pub trait HistoryLog {
    /// Append one entry to its account's log
    fn append(&mut self, entry: &HistoryEntry) -> Result<(), LedgerError>;

    /// Read an account's log as display lines, oldest first
    ///
    /// # Errors
    ///
    /// Returns `NoHistory` if the account has never had an entry.
    fn read(&self, number: AccountNumber) -> Result<Vec<String>, LedgerError>;
}
