//! Ledger file format
//!
//! One account per line, tab-delimited, no header and no quoting:
//!
//! ```text
//! number  holder  balance  pin  kind  fd_months
//! 1000    Ada Lovelace    1004.1667   1234    1   0
//! ```
//!
//! `kind` is 1 (savings), 2 (current) or 3 (fixed deposit). Balances are
//! written at the scale they carry, so a loaded `250.50` is saved as `250.50`
//! and computed amounts keep at most four decimal places.
//!
//! Reading stops at the first malformed line; everything before it is kept.
//! All functions here are pure (no file access) for easy testing.

use crate::types::{Account, AccountKind, AccountNumber, LedgerError, Pin};
use csv::{QuoteStyle, ReaderBuilder, StringRecord, Trim, WriterBuilder};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::{Read, Write};
use std::str::FromStr;

/// Field delimiter of the ledger file
pub const FIELD_DELIMITER: u8 = b'\t';

/// Number of fields on every ledger line
pub const FIELD_COUNT: usize = 6;

/// Raw ledger line
///
/// The balance is kept as a string and parsed in [`convert_ledger_row`].
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct LedgerRow {
    pub number: AccountNumber,
    pub holder: String,
    pub balance: String,
    pub pin: Pin,
    pub kind: u8,
    pub fd_months: u32,
}

/// Accounts read from a ledger file
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LedgerLoad {
    /// Accounts before the first malformed line
    pub accounts: Vec<Account>,
    /// Line and reason where reading stopped early, if it did
    pub truncated: Option<(u64, String)>,
}

/// Convert a LedgerRow to an Account
///
/// Rejects negative or unparseable balances, unknown kinds and FD months on
/// a non-FD kind.
pub fn convert_ledger_row(row: LedgerRow) -> Result<Account, String> {
    let balance = Decimal::from_str(row.balance.trim())
        .map_err(|_| format!("Invalid balance '{}' for account {}", row.balance, row.number))?;
    if balance.is_sign_negative() && !balance.is_zero() {
        return Err(format!(
            "Negative balance {} for account {}",
            balance, row.number
        ));
    }

    let kind = AccountKind::from_code(row.kind, row.fd_months).ok_or_else(|| {
        format!(
            "Invalid kind {} with {} FD month(s) for account {}",
            row.kind, row.fd_months, row.number
        )
    })?;

    Ok(Account {
        number: row.number,
        holder: row.holder,
        balance,
        pin: row.pin,
        kind,
    })
}

/// Replace characters that would break the line format with spaces
pub fn sanitize_holder(holder: &str) -> String {
    holder
        .chars()
        .map(|c| match c {
            '\t' | '\n' | '\r' => ' ',
            c => c,
        })
        .collect()
}

fn convert_record(record: &StringRecord) -> Result<Account, String> {
    if record.len() != FIELD_COUNT {
        return Err(format!(
            "Expected {} fields, found {}",
            FIELD_COUNT,
            record.len()
        ));
    }
    let row: LedgerRow = record
        .deserialize(None)
        .map_err(|e| format!("Malformed record: {}", e))?;
    convert_ledger_row(row)
}

/// Read accounts from ledger text
///
/// Never fails: a malformed line ends the read and is reported in
/// [`LedgerLoad::truncated`].
pub fn read_ledger<R: Read>(input: R) -> LedgerLoad {
    let mut reader = ReaderBuilder::new()
        .delimiter(FIELD_DELIMITER)
        .has_headers(false)
        .quoting(false)
        .flexible(true)
        .trim(Trim::None)
        .from_reader(input);

    let mut load = LedgerLoad::default();
    let mut record = StringRecord::new();

    loop {
        match reader.read_record(&mut record) {
            Ok(false) => break,
            Ok(true) => {
                let line = record.position().map(|p| p.line()).unwrap_or_default();
                match convert_record(&record) {
                    Ok(account) => load.accounts.push(account),
                    Err(reason) => {
                        load.truncated = Some((line, reason));
                        break;
                    }
                }
            }
            Err(e) => {
                let line = e.position().map(|p| p.line()).unwrap_or_default();
                load.truncated = Some((line, e.to_string()));
                break;
            }
        }
    }

    load
}

/// Write accounts in ledger format
///
/// Holder names are passed through [`sanitize_holder`]. Balances are written
/// as-is, never padded or cut.
pub fn write_ledger(accounts: &[&Account], output: &mut dyn Write) -> Result<(), LedgerError> {
    let mut writer = WriterBuilder::new()
        .delimiter(FIELD_DELIMITER)
        .has_headers(false)
        .quote_style(QuoteStyle::Never)
        .from_writer(output);

    for account in accounts {
        writer.write_record(&[
            account.number.to_string(),
            sanitize_holder(&account.holder),
            account.balance.to_string(),
            account.pin.to_string(),
            account.kind.code().to_string(),
            account.kind.fd_months_remaining().to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}
