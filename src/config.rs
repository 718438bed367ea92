//! Bank configuration
//!
//! Interest rates, the FD break penalty and the two policy switches that
//! differ between deployments. Values come from the command line (see
//! [`crate::cli`]) and fall back to the defaults below when invalid.

use clap::ValueEnum;
use rust_decimal::Decimal;
use std::path::PathBuf;
use tracing::warn;

/// Shared admin secret, compared verbatim
pub const ADMIN_PASSWORD: &str = "admin123";

/// Name of the ledger file inside the data directory
pub const LEDGER_FILE_NAME: &str = "accounts.txt";

/// Decimal places kept for balances, interest and penalties
pub const MONEY_SCALE: u32 = 4;

/// How an admin PIN reset validates the new PIN
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PinPolicy {
    /// New PIN must be in 1000..=9999
    FourDigit,
    /// Any non-negative number is accepted
    Unchecked,
}

/// What happens to a fixed deposit when its countdown reaches zero
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum MaturedFdPolicy {
    /// Stay a fixed deposit and keep earning the FD rate
    Keep,
    /// Become a savings account at maturity
    ConvertToSavings,
}

/// Interest and penalty configuration
#[derive(Clone, Debug, PartialEq)]
pub struct BankConfig {
    /// Directory holding the ledger file and the history files
    pub data_dir: PathBuf,
    /// Annual savings rate, in percent
    pub savings_annual_rate: Decimal,
    /// Annual fixed deposit rate, in percent
    pub fd_annual_rate: Decimal,
    /// One-time penalty for breaking an FD early, in percent of the balance
    pub fd_break_penalty_percent: Decimal,
    /// Duration used when an FD is opened with a non-positive duration
    pub default_fd_months: u32,
    pub pin_reset_policy: PinPolicy,
    pub matured_fd_policy: MaturedFdPolicy,
}

impl Default for BankConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            savings_annual_rate: Decimal::new(5, 0),
            fd_annual_rate: Decimal::new(7, 0),
            fd_break_penalty_percent: Decimal::ONE,
            default_fd_months: 12,
            pin_reset_policy: PinPolicy::FourDigit,
            matured_fd_policy: MaturedFdPolicy::Keep,
        }
    }
}

impl BankConfig {
    /// Build a config, replacing out-of-range values with defaults
    ///
    /// Negative rates, penalties outside 0..=100 and a zero default FD
    /// duration are logged and replaced.
    pub fn new(
        data_dir: PathBuf,
        savings_annual_rate: Decimal,
        fd_annual_rate: Decimal,
        fd_break_penalty_percent: Decimal,
        default_fd_months: u32,
    ) -> Self {
        let default = Self::default();

        let savings_annual_rate = if savings_annual_rate.is_sign_negative() {
            warn!(
                rate = %savings_annual_rate,
                fallback = %default.savings_annual_rate,
                "invalid savings rate, using default"
            );
            default.savings_annual_rate
        } else {
            savings_annual_rate
        };

        let fd_annual_rate = if fd_annual_rate.is_sign_negative() {
            warn!(
                rate = %fd_annual_rate,
                fallback = %default.fd_annual_rate,
                "invalid FD rate, using default"
            );
            default.fd_annual_rate
        } else {
            fd_annual_rate
        };

        let fd_break_penalty_percent = if fd_break_penalty_percent.is_sign_negative()
            || fd_break_penalty_percent > Decimal::ONE_HUNDRED
        {
            warn!(
                penalty = %fd_break_penalty_percent,
                fallback = %default.fd_break_penalty_percent,
                "invalid FD break penalty, using default"
            );
            default.fd_break_penalty_percent
        } else {
            fd_break_penalty_percent
        };

        let default_fd_months = if default_fd_months == 0 {
            warn!(
                fallback = default.default_fd_months,
                "default FD duration must be positive, using default"
            );
            default.default_fd_months
        } else {
            default_fd_months
        };

        Self {
            data_dir,
            savings_annual_rate,
            fd_annual_rate,
            fd_break_penalty_percent,
            default_fd_months,
            ..default
        }
    }

    /// Set the PIN reset policy
    pub fn with_pin_reset_policy(mut self, policy: PinPolicy) -> Self {
        self.pin_reset_policy = policy;
        self
    }

    /// Set the matured FD policy
    pub fn with_matured_fd_policy(mut self, policy: MaturedFdPolicy) -> Self {
        self.matured_fd_policy = policy;
        self
    }

    /// Full path of the ledger file
    pub fn ledger_path(&self) -> PathBuf {
        self.data_dir.join(LEDGER_FILE_NAME)
    }
}
