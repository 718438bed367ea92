//! Error types for the bank ledger
//!
//! Every failure in this crate is user-facing and non-fatal: the menu prints
//! the error and returns to the enclosing loop. Messages are therefore written
//! for the person at the terminal.
//!
//! # Error Categories
//!
//! - **Access Errors**: Unknown account, wrong PIN, wrong admin password
//! - **Amount Errors**: Non-positive or over-precise amounts, insufficient funds
//! - **Fixed Deposit Errors**: Operations blocked by an active FD
//! - **Storage Errors**: Ledger file or history file I/O and parsing

use super::account::{AccountNumber, Pin};
use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for the bank ledger
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    /// No account with this number exists
    #[error("Account {number} not found")]
    AccountNotFound {
        /// The number that was looked up
        number: AccountNumber,
    },

    /// PIN did not match at customer login
    #[error("Incorrect PIN for account {number}")]
    IncorrectPin {
        /// Account the login was attempted on
        number: AccountNumber,
    },

    /// Admin password did not match
    #[error("Incorrect admin password")]
    IncorrectAdminPassword,

    /// Amount was zero or negative
    #[error("Amount must be positive, got {amount}")]
    NonPositiveAmount {
        /// The rejected amount
        amount: Decimal,
    },

    /// Amount carries more decimal places than the ledger keeps
    #[error("Amount {amount} has more than {max_scale} decimal places")]
    InvalidAmount {
        /// The rejected amount
        amount: Decimal,
        /// Maximum number of decimal places accepted
        max_scale: u32,
    },

    /// Balance too low for a withdrawal or transfer
    ///
    /// The account state remains unchanged.
    #[error("Insufficient balance in account {number}: balance {balance}, requested {requested}")]
    InsufficientFunds {
        /// Account that would be overdrawn
        number: AccountNumber,
        /// Balance at the time of the request
        balance: Decimal,
        /// Requested amount
        requested: Decimal,
    },

    /// Operation is not allowed while the fixed deposit is active
    #[error("{operation} is not allowed on active fixed deposit {number} ({months_remaining} month(s) to maturity)")]
    ActiveFixedDeposit {
        /// The FD account
        number: AccountNumber,
        /// Operation that was refused
        operation: String,
        /// Months until maturity
        months_remaining: u32,
    },

    /// Break requested on an account without an active FD
    #[error("Account {number} has no active fixed deposit to break")]
    NoActiveFixedDeposit {
        /// Account the break was requested on
        number: AccountNumber,
    },

    /// Source and destination of a transfer are the same account
    #[error("Cannot transfer from account {number} to itself")]
    SameAccountTransfer {
        /// The account on both sides
        number: AccountNumber,
    },

    /// PIN does not satisfy the active PIN policy
    #[error("PIN must be a 4-digit number, got {pin}")]
    InvalidPin {
        /// The rejected PIN
        pin: i64,
    },

    /// Month count for time advancement was not positive
    #[error("Months must be positive, got {months}")]
    InvalidMonths {
        /// The rejected month count
        months: i64,
    },

    /// Arithmetic overflow would occur
    ///
    /// The operation is rejected to maintain account integrity.
    #[error("Arithmetic overflow in {operation} for account {number}")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
        /// Account being updated
        number: AccountNumber,
    },

    /// The account has no history file yet
    #[error("No transaction history found for account {number}")]
    NoHistory {
        /// Account whose history was requested
        number: AccountNumber,
    },

    /// The ledger could not be written
    ///
    /// The in-memory change that triggered the save has already been applied
    /// and is not rolled back.
    #[error("Could not save accounts to {path}: {message}")]
    Persistence {
        /// Path of the ledger file
        path: String,
        /// Description of the underlying failure
        message: String,
    },

    /// I/O error while reading or writing files or the terminal
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// Ledger file line could not be parsed
    #[error("Ledger parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// Standard input reached end of file
    #[error("Input closed")]
    InputClosed,
}

// Conversion from io::Error to LedgerError
impl From<std::io::Error> for LedgerError {
    fn from(error: std::io::Error) -> Self {
        LedgerError::IoError {
            message: error.to_string(),
        }
    }
}

// Conversion from csv::Error to LedgerError
impl From<csv::Error> for LedgerError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        LedgerError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl LedgerError {
    /// Create an AccountNotFound error
    pub fn account_not_found(number: AccountNumber) -> Self {
        LedgerError::AccountNotFound { number }
    }

    /// Create an IncorrectPin error
    pub fn incorrect_pin(number: AccountNumber) -> Self {
        LedgerError::IncorrectPin { number }
    }

    /// Create a NonPositiveAmount error
    pub fn non_positive_amount(amount: Decimal) -> Self {
        LedgerError::NonPositiveAmount { amount }
    }

    /// Create an InsufficientFunds error
    pub fn insufficient_funds(number: AccountNumber, balance: Decimal, requested: Decimal) -> Self {
        LedgerError::InsufficientFunds {
            number,
            balance,
            requested,
        }
    }

    /// Create an ActiveFixedDeposit error
    pub fn active_fixed_deposit(number: AccountNumber, operation: &str, months_remaining: u32) -> Self {
        LedgerError::ActiveFixedDeposit {
            number,
            operation: operation.to_string(),
            months_remaining,
        }
    }

    /// Create an InvalidPin error
    pub fn invalid_pin(pin: impl Into<i64>) -> Self {
        LedgerError::InvalidPin { pin: pin.into() }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str, number: AccountNumber) -> Self {
        LedgerError::ArithmeticOverflow {
            operation: operation.to_string(),
            number,
        }
    }

    /// Create a Persistence error
    pub fn persistence(path: impl Into<String>, message: impl Into<String>) -> Self {
        LedgerError::Persistence {
            path: path.into(),
            message: message.into(),
        }
    }
}
