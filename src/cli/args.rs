use crate::config::{BankConfig, MaturedFdPolicy, PinPolicy};
use clap::Parser;
use rust_decimal::Decimal;
use std::path::PathBuf;

/// Interactive bank account ledger
#[derive(Parser, Debug)]
#[command(name = "bank-ledger")]
#[command(about = "Interactive bank account ledger with savings, current and fixed deposit accounts", long_about = None)]
pub struct CliArgs {
    /// Directory holding accounts.txt and the per-account history files
    #[arg(
        long = "data-dir",
        value_name = "DIR",
        default_value = ".",
        help = "Directory for accounts.txt and <account>_history.txt files"
    )]
    pub data_dir: PathBuf,

    /// Annual savings interest rate in percent
    #[arg(long = "savings-rate", value_name = "PERCENT", help = "Annual savings rate in percent (default: 5)")]
    pub savings_rate: Option<Decimal>,

    /// Annual fixed deposit interest rate in percent
    #[arg(long = "fd-rate", value_name = "PERCENT", help = "Annual fixed deposit rate in percent (default: 7)")]
    pub fd_rate: Option<Decimal>,

    /// Penalty for breaking a fixed deposit early, in percent of the balance
    #[arg(
        long = "fd-penalty",
        value_name = "PERCENT",
        help = "FD break penalty in percent of the balance (default: 1, range: 0-100)"
    )]
    pub fd_penalty: Option<Decimal>,

    /// Duration given to fixed deposits opened with a non-positive duration
    #[arg(
        long = "default-fd-months",
        value_name = "MONTHS",
        help = "FD duration used when none is given (default: 12)"
    )]
    pub default_fd_months: Option<u32>,

    /// How the admin PIN reset validates the new PIN
    #[arg(
        long = "pin-reset",
        value_name = "POLICY",
        default_value = "four-digit",
        help = "PIN reset validation: 'four-digit' or 'unchecked'"
    )]
    pub pin_reset: PinPolicy,

    /// What happens to a fixed deposit when it matures
    #[arg(
        long = "matured-fd",
        value_name = "POLICY",
        default_value = "keep",
        help = "Matured FD handling: 'keep' or 'convert-to-savings'"
    )]
    pub matured_fd: MaturedFdPolicy,

    /// Log level used when RUST_LOG is not set
    #[arg(
        long = "log-level",
        value_name = "LEVEL",
        default_value = "warn",
        help = "Log filter when RUST_LOG is unset (e.g. 'info', 'bank_ledger=debug')"
    )]
    pub log_level: String,
}

impl CliArgs {
    /// Create a BankConfig from CLI arguments
    ///
    /// Options that are not given take their default. Out-of-range values are
    /// replaced by [`BankConfig::new`], which logs a warning.
    pub fn to_bank_config(&self) -> BankConfig {
        let default = BankConfig::default();
        BankConfig::new(
            self.data_dir.clone(),
            self.savings_rate.unwrap_or(default.savings_annual_rate),
            self.fd_rate.unwrap_or(default.fd_annual_rate),
            self.fd_penalty.unwrap_or(default.fd_break_penalty_percent),
            self.default_fd_months.unwrap_or(default.default_fd_months),
        )
        .with_pin_reset_policy(self.pin_reset)
        .with_matured_fd_policy(self.matured_fd)
    }
}
