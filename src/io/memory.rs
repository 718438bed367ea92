//! In-memory ledger store and history log
//!
//! Used by tests and benchmarks in place of the file-backed implementations.

use crate::core::{HistoryLog, LedgerStore};
use crate::types::{Account, AccountNumber, HistoryEntry, LedgerError};
use std::collections::BTreeMap;

/// Ledger store that keeps the last saved table in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryLedgerStore {
    stored: Vec<Account>,
    saves: usize,
    fail: bool,
}

impl MemoryLedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose first load returns `accounts`
    pub fn with_accounts(accounts: Vec<Account>) -> Self {
        Self {
            stored: accounts,
            ..Self::default()
        }
    }

    /// The table as of the last successful save
    pub fn stored(&self) -> &[Account] {
        &self.stored
    }

    /// Number of successful saves
    pub fn saves(&self) -> usize {
        self.saves
    }

    /// Make every following save fail (or succeed again)
    pub fn fail_saves(&mut self, fail: bool) {
        self.fail = fail;
    }
}

impl LedgerStore for MemoryLedgerStore {
    fn load(&self) -> Result<Vec<Account>, LedgerError> {
        Ok(self.stored.clone())
    }

    fn save(&mut self, accounts: &[&Account]) -> Result<(), LedgerError> {
        if self.fail {
            return Err(LedgerError::persistence("memory", "save disabled"));
        }
        self.stored = accounts.iter().map(|a| (*a).clone()).collect();
        self.saves += 1;
        Ok(())
    }
}

/// History log keeping entries per account in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryHistoryLog {
    entries: BTreeMap<AccountNumber, Vec<HistoryEntry>>,
}

impl MemoryHistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries of one account, oldest first
    pub fn entries(&self, number: AccountNumber) -> &[HistoryEntry] {
        self.entries.get(&number).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl HistoryLog for MemoryHistoryLog {
    fn append(&mut self, entry: &HistoryEntry) -> Result<(), LedgerError> {
        self.entries
            .entry(entry.account)
            .or_default()
            .push(entry.clone());
        Ok(())
    }

    fn read(&self, number: AccountNumber) -> Result<Vec<String>, LedgerError> {
        match self.entries.get(&number) {
            Some(entries) => Ok(entries.iter().map(ToString::to_string).collect()),
            None => Err(LedgerError::NoHistory { number }),
        }
    }
}
