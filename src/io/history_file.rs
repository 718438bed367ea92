//! Per-account history files
//!
//! Each account's history lives in `<number>_history.txt` inside the data
//! directory. Lines are only ever appended; deleting an account leaves its
//! file behind.

use crate::core::HistoryLog;
use crate::types::{AccountNumber, HistoryEntry, LedgerError};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::PathBuf;

/// History log writing one text file per account
#[derive(Debug, Clone)]
pub struct FileHistoryLog {
    dir: PathBuf,
}

impl FileHistoryLog {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// File holding the history of `number`
    pub fn path_for(&self, number: AccountNumber) -> PathBuf {
        self.dir.join(format!("{}_history.txt", number))
    }
}

impl HistoryLog for FileHistoryLog {
    fn append(&mut self, entry: &HistoryEntry) -> Result<(), LedgerError> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.path_for(entry.account))?;
        writeln!(file, "{}", entry)?;
        Ok(())
    }

    fn read(&self, number: AccountNumber) -> Result<Vec<String>, LedgerError> {
        match fs::read_to_string(self.path_for(number)) {
            Ok(text) => Ok(text.lines().map(str::to_string).collect()),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(LedgerError::NoHistory { number }),
            Err(e) => Err(e.into()),
        }
    }
}
