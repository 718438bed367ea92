//! File-backed ledger store
//!
//! Reads and rewrites the whole ledger file. A missing file is an empty
//! ledger. Writes are plain overwrites; a crash mid-write can leave a
//! truncated file, which the next load reads up to the damage.

use crate::core::LedgerStore;
use crate::io::ledger_format::{read_ledger, write_ledger};
use crate::types::{Account, LedgerError};
use std::fs::{self, File};
use std::io::{BufReader, ErrorKind};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Ledger store over a single text file
#[derive(Debug, Clone)]
pub struct FileLedgerStore {
    path: PathBuf,
}

impl FileLedgerStore {
    /// Create a store for the file at `path`; nothing is read yet
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LedgerStore for FileLedgerStore {
    fn load(&self) -> Result<Vec<Account>, LedgerError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no ledger file, starting empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let load = read_ledger(BufReader::new(file));
        if let Some((line, reason)) = &load.truncated {
            warn!(
                path = %self.path.display(),
                line,
                reason = %reason,
                kept = load.accounts.len(),
                "ledger file truncated at malformed line"
            );
        }
        Ok(load.accounts)
    }

    fn save(&mut self, accounts: &[&Account]) -> Result<(), LedgerError> {
        let mut buffer = Vec::new();
        write_ledger(accounts, &mut buffer)?;

        fs::write(&self.path, buffer)
            .map_err(|e| LedgerError::persistence(self.path.display().to_string(), e.to_string()))?;
        debug!(path = %self.path.display(), accounts = accounts.len(), "ledger saved");
        Ok(())
    }
}
