//! Account-related types for the bank ledger
//!
//! This module defines the Account structure, the closed set of account
//! kinds, and the identifiers used to address accounts.

use rust_decimal::Decimal;
use std::fmt;

/// Account number
///
/// Assigned sequentially from [`FIRST_ACCOUNT_NUMBER`].
pub type AccountNumber = u32;

/// Holder PIN
///
/// Four digits at creation time; a reset under the unchecked policy may store
/// any non-negative value.
pub type Pin = u32;

/// First number handed out by an empty ledger
pub const FIRST_ACCOUNT_NUMBER: AccountNumber = 1000;

/// Kind of account
///
/// A fixed deposit carries its own maturity countdown, so an active FD is a
/// distinct state rather than a flag on the account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountKind {
    /// Interest-bearing account at the savings rate
    Savings,

    /// Transaction account, earns no interest
    Current,

    /// Fixed deposit earning the FD rate
    ///
    /// `months_remaining == 0` means the deposit has matured.
    FixedDeposit { months_remaining: u32 },
}

impl AccountKind {
    /// Numeric code used by the ledger file (1, 2 or 3)
    pub fn code(&self) -> u8 {
        match self {
            AccountKind::Savings => 1,
            AccountKind::Current => 2,
            AccountKind::FixedDeposit { .. } => 3,
        }
    }

    /// Rebuild a kind from its file code and the stored FD months
    ///
    /// Returns `None` for an unknown code, or for months on a non-FD kind.
    pub fn from_code(code: u8, fd_months: u32) -> Option<Self> {
        match (code, fd_months) {
            (1, 0) => Some(AccountKind::Savings),
            (2, 0) => Some(AccountKind::Current),
            (3, months_remaining) => Some(AccountKind::FixedDeposit { months_remaining }),
            _ => None,
        }
    }

    /// Months left until maturity (0 for anything but an active FD)
    pub fn fd_months_remaining(&self) -> u32 {
        match self {
            AccountKind::FixedDeposit { months_remaining } => *months_remaining,
            _ => 0,
        }
    }

    /// Whether this is a fixed deposit that has not matured yet
    pub fn is_active_fd(&self) -> bool {
        self.fd_months_remaining() > 0
    }

    /// Short label used in the admin listing
    pub fn short_label(&self) -> &'static str {
        match self {
            AccountKind::Savings => "Savings",
            AccountKind::Current => "Current",
            AccountKind::FixedDeposit { .. } => "FD",
        }
    }
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountKind::Savings => f.write_str("Savings"),
            AccountKind::Current => f.write_str("Current"),
            AccountKind::FixedDeposit { .. } => f.write_str("Fixed Deposit"),
        }
    }
}

/// A bank account
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    /// Unique account number
    pub number: AccountNumber,

    /// Display name of the holder, may contain spaces
    pub holder: String,

    /// Current balance, never negative
    pub balance: Decimal,

    /// PIN checked at customer login
    pub pin: Pin,

    /// Savings, current or fixed deposit
    pub kind: AccountKind,
}

impl Account {
    /// Create a new account with a zero balance
    pub fn new(number: AccountNumber, holder: impl Into<String>, pin: Pin, kind: AccountKind) -> Self {
        Account {
            number,
            holder: holder.into(),
            balance: Decimal::ZERO,
            pin,
            kind,
        }
    }

    /// Shorthand for `self.kind.is_active_fd()`
    pub fn is_active_fd(&self) -> bool {
        self.kind.is_active_fd()
    }
}
