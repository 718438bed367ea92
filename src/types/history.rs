//! Transaction history types
//!
//! Every balance-affecting event on an account produces one [`HistoryEntry`].
//! Entries are written once and never changed.

use super::account::AccountNumber;
use crate::config::MONEY_SCALE;
use chrono::NaiveDateTime;
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;

/// Format of the timestamp printed at the start of each history line
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Action recorded in an account's history
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryAction {
    Deposit,
    Withdraw,
    TransferSent,
    TransferReceived,
    FdCreated,
    FdBrokenPenalty,
    SavingsInterest,
    FdInterest,
    FdMatured,
    /// A matured FD converted to savings under the convert policy
    FdConverted,
}

impl HistoryAction {
    /// Label written into the history file
    pub fn label(&self) -> &'static str {
        match self {
            HistoryAction::Deposit => "Deposit",
            HistoryAction::Withdraw => "Withdraw",
            HistoryAction::TransferSent => "Transfer Sent",
            HistoryAction::TransferReceived => "Transfer Received",
            HistoryAction::FdCreated => "FD Created",
            HistoryAction::FdBrokenPenalty => "FD Broken Penalty",
            HistoryAction::SavingsInterest => "Interest Added (Savings)",
            HistoryAction::FdInterest => "Interest Added (FD)",
            HistoryAction::FdMatured => "FD Matured",
            HistoryAction::FdConverted => "FD Converted to Savings",
        }
    }
}

impl fmt::Display for HistoryAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One line of an account's history
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    /// Account the entry belongs to
    pub account: AccountNumber,

    /// Local time the entry was recorded
    pub timestamp: NaiveDateTime,

    pub action: HistoryAction,

    /// Amount moved by the action (0 for maturity)
    pub amount: Decimal,

    /// Balance after the action
    pub balance: Decimal,
}

impl fmt::Display for HistoryEntry {
    /// `[timestamp] action : amount | Balance: balance`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} : {:.4} | Balance: {:.4}",
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.action,
            four_places(self.amount),
            four_places(self.balance)
        )
    }
}

/// Round to the ledger's precision so the fixed-width field never cuts digits
fn four_places(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}
