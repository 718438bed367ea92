//! Bank engine
//!
//! This module provides the BankEngine that runs every user-visible operation
//! by coordinating the in-memory [`Ledger`], the [`LedgerStore`] and the
//! [`HistoryLog`].
//!
//! Each mutating operation follows the same sequence:
//! 1. Apply the change to the ledger (rules are checked here, nothing changes on error)
//! 2. Rewrite the whole ledger through the store
//! 3. Append one history entry per affected account
//!
//! A failed save does not fail the operation: the in-memory change stays
//! applied, the history entries are still written, and the error is kept
//! until the caller collects it with [`BankEngine::take_save_failure`]. A
//! failed history append is only logged.

use crate::config::{BankConfig, MaturedFdPolicy, PinPolicy};
use crate::core::ledger::{validate_amount, FdBreak, InterestCredit, Ledger, Maturity};
use crate::core::traits::{HistoryLog, LedgerStore};
use crate::types::{
    Account, AccountKind, AccountNumber, HistoryAction, HistoryEntry, LedgerError, Pin,
};
use chrono::{Local, NaiveDateTime};
use rust_decimal::Decimal;
use tracing::{debug, error, info, warn};

/// Holder name stored when none is given
pub const DEFAULT_HOLDER: &str = "Unknown";

/// Proof that a customer entered the right PIN for an account
///
/// Only [`BankEngine::login`] creates one.
#[derive(Debug, PartialEq, Eq)]
pub struct CustomerSession {
    number: AccountNumber,
}

impl CustomerSession {
    /// The logged-in account
    pub fn number(&self) -> AccountNumber {
        self.number
    }
}

/// Proof that the admin password was entered
///
/// Only [`BankEngine::login_admin`] creates one.
#[derive(Debug, PartialEq, Eq)]
pub struct AdminSession {
    _private: (),
}

/// Kind requested when opening an account
#[derive(Debug, Clone, PartialEq)]
pub enum OpenKind {
    Savings,
    Current,
    /// A non-positive duration uses the configured default; a negative
    /// deposit opens the FD empty.
    FixedDeposit { months: i64, deposit: Decimal },
}

/// Request to open an account
#[derive(Debug, Clone, PartialEq)]
pub struct NewAccount {
    pub holder: String,
    pub pin: i64,
    pub kind: OpenKind,
}

/// What a multi-month advance did
#[derive(Debug, Clone, PartialEq)]
pub struct AdvanceSummary {
    pub months: u32,
    /// Number of individual interest credits
    pub credits: usize,
    pub total_interest: Decimal,
    /// Deposits that matured, in the order they matured
    pub matured: Vec<Maturity>,
}

/// Check a PIN chosen at account creation or under [`PinPolicy::FourDigit`]
pub fn four_digit_pin(pin: i64) -> Result<Pin, LedgerError> {
    if (1000..=9999).contains(&pin) {
        Ok(pin as Pin)
    } else {
        Err(LedgerError::invalid_pin(pin))
    }
}

/// Account ledger engine
///
/// Owns the ledger and its storage. Generic over the store and history log so
/// the same engine runs against files or in-memory fakes.
pub struct BankEngine<S, H> {
    config: BankConfig,
    ledger: Ledger,
    store: S,
    history: H,
    save_failure: Option<LedgerError>,
}

impl<S: LedgerStore, H: HistoryLog> BankEngine<S, H> {
    /// Create an engine from the accounts currently in `store`
    ///
    /// # Errors
    ///
    /// Returns an error if the store exists but cannot be read.
    pub fn load(config: BankConfig, store: S, history: H) -> Result<Self, LedgerError> {
        let accounts = store.load()?;
        let ledger = Ledger::from_accounts(accounts);
        debug!(
            accounts = ledger.len(),
            next_number = ledger.next_number(),
            "ledger loaded"
        );
        Ok(Self::with_ledger(config, ledger, store, history))
    }

    /// Create an engine around an existing ledger
    pub fn with_ledger(config: BankConfig, ledger: Ledger, store: S, history: H) -> Self {
        BankEngine {
            config,
            ledger,
            store,
            history,
            save_failure: None,
        }
    }

    /// The first save failure since the last call, if any
    pub fn take_save_failure(&mut self) -> Option<LedgerError> {
        self.save_failure.take()
    }

    pub fn config(&self) -> &BankConfig {
        &self.config
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    /// Look up an account without authentication
    pub fn account(&self, number: AccountNumber) -> Option<&Account> {
        self.ledger.get(number)
    }

    /// Open a new account and return its number
    ///
    /// The PIN must be four digits. An empty holder name is stored as
    /// [`DEFAULT_HOLDER`]. Fixed deposits log `FD Created` with the opening
    /// deposit.
    pub fn create_account(&mut self, request: NewAccount) -> Result<AccountNumber, LedgerError> {
        let pin = four_digit_pin(request.pin)?;
        let holder = match request.holder.trim() {
            "" => DEFAULT_HOLDER.to_string(),
            name => name.to_string(),
        };

        let (kind, opening_balance) = match request.kind {
            OpenKind::Savings => (AccountKind::Savings, Decimal::ZERO),
            OpenKind::Current => (AccountKind::Current, Decimal::ZERO),
            OpenKind::FixedDeposit { months, deposit } => {
                let months_remaining = u32::try_from(months)
                    .ok()
                    .filter(|m| *m > 0)
                    .unwrap_or(self.config.default_fd_months);
                let deposit = deposit.max(Decimal::ZERO);
                if !deposit.is_zero() {
                    validate_amount(deposit)?;
                }
                (AccountKind::FixedDeposit { months_remaining }, deposit)
            }
        };

        let number = self.ledger.open(holder, pin, kind, opening_balance)?;
        info!(number, kind = %kind, balance = %opening_balance, "account created");

        let entries = match kind {
            AccountKind::FixedDeposit { .. } => vec![self.entry(
                number,
                HistoryAction::FdCreated,
                opening_balance,
                opening_balance,
            )],
            _ => Vec::new(),
        };
        self.commit(&entries);
        Ok(number)
    }

    /// Verify a customer's account number and PIN
    ///
    /// # Errors
    ///
    /// - `AccountNotFound` if the number is unknown
    /// - `IncorrectPin` if the PIN is wrong
    pub fn login(&self, number: AccountNumber, pin: i64) -> Result<CustomerSession, LedgerError> {
        let pin = Pin::try_from(pin).map_err(|_| LedgerError::incorrect_pin(number));
        let result = pin.and_then(|pin| self.ledger.authenticate(number, pin));
        match result {
            Ok(_) => {
                info!(number, "customer login");
                Ok(CustomerSession { number })
            }
            Err(e) => {
                warn!(number, error = %e, "customer login failed");
                Err(e)
            }
        }
    }

    /// Verify the admin password
    pub fn login_admin(&self, password: &str) -> Result<AdminSession, LedgerError> {
        if password == crate::config::ADMIN_PASSWORD {
            info!("admin login");
            Ok(AdminSession { _private: () })
        } else {
            warn!("admin login failed");
            Err(LedgerError::IncorrectAdminPassword)
        }
    }

    /// The logged-in account, for a balance report
    pub fn check_balance(&self, session: &CustomerSession) -> Result<&Account, LedgerError> {
        self.ledger
            .get(session.number)
            .ok_or_else(|| LedgerError::account_not_found(session.number))
    }

    /// Deposit into the logged-in account
    ///
    /// # Returns
    ///
    /// The new balance
    pub fn deposit(&mut self, session: &CustomerSession, amount: Decimal) -> Result<Decimal, LedgerError> {
        let number = session.number;
        let balance = self.ledger.deposit(number, amount)?;
        info!(number, amount = %amount, balance = %balance, "deposit");

        let entry = self.entry(number, HistoryAction::Deposit, amount, balance);
        self.commit(&[entry]);
        Ok(balance)
    }

    /// Withdraw from the logged-in account
    ///
    /// # Returns
    ///
    /// The new balance
    pub fn withdraw(&mut self, session: &CustomerSession, amount: Decimal) -> Result<Decimal, LedgerError> {
        let number = session.number;
        let balance = self.ledger.withdraw(number, amount)?;
        info!(number, amount = %amount, balance = %balance, "withdrawal");

        let entry = self.entry(number, HistoryAction::Withdraw, amount, balance);
        self.commit(&[entry]);
        Ok(balance)
    }

    /// Transfer from the logged-in account to `to`
    ///
    /// Both balances are saved in one write and each account gets its own
    /// history entry.
    pub fn transfer(
        &mut self,
        session: &CustomerSession,
        to: AccountNumber,
        amount: Decimal,
    ) -> Result<(Decimal, Decimal), LedgerError> {
        let from = session.number;
        let (from_balance, to_balance) = self.ledger.transfer(from, to, amount)?;
        info!(from, to, amount = %amount, "transfer");

        let entries = [
            self.entry(from, HistoryAction::TransferSent, amount, from_balance),
            self.entry(to, HistoryAction::TransferReceived, amount, to_balance),
        ];
        self.commit(&entries);
        Ok((from_balance, to_balance))
    }

    /// Break the logged-in account's active fixed deposit
    ///
    /// The caller is responsible for getting the holder's confirmation.
    pub fn break_fixed_deposit(&mut self, session: &CustomerSession) -> Result<FdBreak, LedgerError> {
        let number = session.number;
        let result = self
            .ledger
            .break_fixed_deposit(number, self.config.fd_break_penalty_percent)?;
        info!(number, penalty = %result.penalty, balance = %result.balance, "fixed deposit broken");

        let entry = self.entry(
            number,
            HistoryAction::FdBrokenPenalty,
            result.penalty,
            result.balance,
        );
        self.commit(&[entry]);
        Ok(result)
    }

    /// History lines of the logged-in account
    pub fn history_lines(&self, session: &CustomerSession) -> Result<Vec<String>, LedgerError> {
        self.history.read(session.number)
    }

    /// All accounts in number order
    pub fn all_accounts(&self, _admin: &AdminSession) -> impl Iterator<Item = &Account> {
        self.ledger.accounts()
    }

    /// Delete an account; its history file is left in place
    pub fn delete_account(&mut self, _admin: &AdminSession, number: AccountNumber) -> Result<Account, LedgerError> {
        let removed = self.ledger.remove(number)?;
        info!(number, "account deleted");
        self.commit(&[]);
        Ok(removed)
    }

    /// Set a new PIN under the configured [`PinPolicy`]
    pub fn reset_pin(&mut self, _admin: &AdminSession, number: AccountNumber, pin: i64) -> Result<(), LedgerError> {
        if self.ledger.get(number).is_none() {
            return Err(LedgerError::account_not_found(number));
        }
        let pin = match self.config.pin_reset_policy {
            PinPolicy::FourDigit => four_digit_pin(pin)?,
            PinPolicy::Unchecked => Pin::try_from(pin).map_err(|_| LedgerError::invalid_pin(pin))?,
        };

        self.ledger.set_pin(number, pin)?;
        info!(number, "PIN reset");
        self.commit(&[]);
        Ok(())
    }

    /// Credit one month of interest to every account and save once
    pub fn apply_monthly_interest(&mut self, _admin: &AdminSession) -> Result<Vec<InterestCredit>, LedgerError> {
        let credits = self.interest_pass();
        let entries = self.interest_entries(&credits);
        self.commit(&entries);
        Ok(credits)
    }

    /// Advance time by `months`
    ///
    /// Each month applies interest, then counts every active FD down by one,
    /// then saves.
    pub fn advance_months(&mut self, _admin: &AdminSession, months: i64) -> Result<AdvanceSummary, LedgerError> {
        let count = u32::try_from(months)
            .ok()
            .filter(|m| *m > 0)
            .ok_or(LedgerError::InvalidMonths { months })?;

        let mut summary = AdvanceSummary {
            months: count,
            credits: 0,
            total_interest: Decimal::ZERO,
            matured: Vec::new(),
        };
        for month in 1..=count {
            let credits = self.interest_pass();
            let matured = self
                .ledger
                .count_down_fixed_deposits(self.config.matured_fd_policy);

            let mut entries = self.interest_entries(&credits);
            for maturity in &matured {
                info!(number = maturity.number, month, converted = maturity.converted, "fixed deposit matured");
                entries.push(self.entry(
                    maturity.number,
                    HistoryAction::FdMatured,
                    Decimal::ZERO,
                    maturity.balance,
                ));
                if maturity.converted {
                    entries.push(self.entry(
                        maturity.number,
                        HistoryAction::FdConverted,
                        Decimal::ZERO,
                        maturity.balance,
                    ));
                }
            }

            self.commit(&entries);

            summary.credits += credits.len();
            summary.total_interest += credits.iter().map(|c| c.amount).sum::<Decimal>();
            summary.matured.extend(matured);
        }

        info!(months = count, credits = summary.credits, matured = summary.matured.len(), "time advanced");
        Ok(summary)
    }

    /// The matured FD policy in force
    pub fn matured_fd_policy(&self) -> MaturedFdPolicy {
        self.config.matured_fd_policy
    }

    fn interest_pass(&mut self) -> Vec<InterestCredit> {
        let credits = self
            .ledger
            .apply_monthly_interest(self.config.savings_annual_rate, self.config.fd_annual_rate);
        debug!(credits = credits.len(), "monthly interest applied");
        credits
    }

    fn interest_entries(&self, credits: &[InterestCredit]) -> Vec<HistoryEntry> {
        credits
            .iter()
            .map(|c| self.entry(c.number, c.action, c.amount, c.balance))
            .collect()
    }

    fn entry(&self, account: AccountNumber, action: HistoryAction, amount: Decimal, balance: Decimal) -> HistoryEntry {
        HistoryEntry {
            account,
            timestamp: now(),
            action,
            amount,
            balance,
        }
    }

    /// Save the whole ledger, then append `entries`
    ///
    /// Save failures are recorded, not returned.
    fn commit(&mut self, entries: &[HistoryEntry]) {
        let accounts: Vec<&Account> = self.ledger.accounts().collect();
        if let Err(e) = self.store.save(&accounts) {
            error!(error = %e, "ledger save failed, in-memory state kept");
            self.save_failure.get_or_insert(e);
        }

        for entry in entries {
            if let Err(e) = self.history.append(entry) {
                warn!(number = entry.account, action = %entry.action, error = %e, "history append failed");
            }
        }
    }
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}
