//! In-memory account ledger
//!
//! This module provides the `Ledger` struct which holds every account and the
//! next-account-number counter, and applies the balance rules.
//!
//! The Ledger is responsible for:
//! - Assigning sequential account numbers that are never reused in a run
//! - Enforcing the non-negative balance and active FD rules
//! - Computing monthly interest, FD countdown and the early-break penalty
//!
//! It performs no I/O. Persisting and history logging are done by
//! [`crate::core::BankEngine`] after each successful mutation.

use crate::config::{MaturedFdPolicy, MONEY_SCALE};
use crate::types::{
    Account, AccountKind, AccountNumber, HistoryAction, LedgerError, Pin, FIRST_ACCOUNT_NUMBER,
};
use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::BTreeMap;
use tracing::warn;

/// Months per year, times 100 to turn a percentage into a fraction
const MONTHLY_RATE_DIVISOR: i64 = 12 * 100;

/// A single interest credit produced by a monthly pass
#[derive(Debug, Clone, PartialEq)]
pub struct InterestCredit {
    pub number: AccountNumber,
    /// Savings or FD interest
    pub action: HistoryAction,
    pub amount: Decimal,
    /// Balance after the credit
    pub balance: Decimal,
}

/// A fixed deposit whose countdown reached zero
#[derive(Debug, Clone, PartialEq)]
pub struct Maturity {
    pub number: AccountNumber,
    pub balance: Decimal,
    /// Whether the account was turned into a savings account
    pub converted: bool,
}

/// Result of breaking a fixed deposit early
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FdBreak {
    pub penalty: Decimal,
    pub balance: Decimal,
}

/// Round a computed amount to the ledger's precision
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// One month of interest at `annual_rate` percent, rounded
///
/// Returns `None` if the computation would overflow.
pub fn monthly_interest(balance: Decimal, annual_rate: Decimal) -> Option<Decimal> {
    balance
        .checked_mul(annual_rate)?
        .checked_div(Decimal::from(MONTHLY_RATE_DIVISOR))
        .map(round_money)
}

/// Check that an amount entered by a user is usable
///
/// # Errors
///
/// - `NonPositiveAmount` if the amount is zero or negative
/// - `InvalidAmount` if it has more decimal places than the ledger keeps
pub fn validate_amount(amount: Decimal) -> Result<(), LedgerError> {
    if amount <= Decimal::ZERO {
        return Err(LedgerError::non_positive_amount(amount));
    }
    if amount.normalize().scale() > MONEY_SCALE {
        return Err(LedgerError::InvalidAmount {
            amount,
            max_scale: MONEY_SCALE,
        });
    }
    Ok(())
}

/// All accounts keyed by number, plus the number counter
#[derive(Debug, Clone)]
pub struct Ledger {
    accounts: BTreeMap<AccountNumber, Account>,
    next_number: AccountNumber,
}

impl Ledger {
    /// Create an empty ledger; the first account will be numbered 1000
    pub fn new() -> Self {
        Ledger {
            accounts: BTreeMap::new(),
            next_number: FIRST_ACCOUNT_NUMBER,
        }
    }

    /// Build a ledger from loaded records
    ///
    /// The counter becomes one past the highest number, and never less than
    /// 1000. A repeated account number keeps the first record.
    pub fn from_accounts(accounts: impl IntoIterator<Item = Account>) -> Self {
        let mut ledger = Ledger::new();
        for account in accounts {
            if ledger.accounts.contains_key(&account.number) {
                warn!(number = account.number, "duplicate account number, keeping first");
                continue;
            }
            ledger.next_number = ledger
                .next_number
                .max(account.number.saturating_add(1));
            ledger.accounts.insert(account.number, account);
        }
        ledger
    }

    /// Number the next created account will receive
    pub fn next_number(&self) -> AccountNumber {
        self.next_number
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Look up an account by number
    pub fn get(&self, number: AccountNumber) -> Option<&Account> {
        self.accounts.get(&number)
    }

    /// All accounts in account-number order, which is also creation order
    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    fn get_mut(&mut self, number: AccountNumber) -> Result<&mut Account, LedgerError> {
        self.accounts
            .get_mut(&number)
            .ok_or_else(|| LedgerError::account_not_found(number))
    }

    /// Check a customer's PIN
    ///
    /// # Errors
    ///
    /// - `AccountNotFound` if no such account exists
    /// - `IncorrectPin` if the PIN does not match
    pub fn authenticate(&self, number: AccountNumber, pin: Pin) -> Result<&Account, LedgerError> {
        let account = self
            .get(number)
            .ok_or_else(|| LedgerError::account_not_found(number))?;
        if account.pin != pin {
            return Err(LedgerError::incorrect_pin(number));
        }
        Ok(account)
    }

    /// Add a new account under the next number
    ///
    /// Callers validate the holder, PIN and opening balance beforehand.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticOverflow` once the number space is exhausted.
    pub fn open(
        &mut self,
        holder: String,
        pin: Pin,
        kind: AccountKind,
        opening_balance: Decimal,
    ) -> Result<AccountNumber, LedgerError> {
        let number = self.next_number;
        self.next_number = number
            .checked_add(1)
            .ok_or_else(|| LedgerError::arithmetic_overflow("account numbering", number))?;

        let mut account = Account::new(number, holder, pin, kind);
        account.balance = opening_balance;
        self.accounts.insert(number, account);
        Ok(number)
    }

    /// Remove an account; its number is not handed out again
    pub fn remove(&mut self, number: AccountNumber) -> Result<Account, LedgerError> {
        self.accounts
            .remove(&number)
            .ok_or_else(|| LedgerError::account_not_found(number))
    }

    /// Replace an account's PIN
    pub fn set_pin(&mut self, number: AccountNumber, pin: Pin) -> Result<(), LedgerError> {
        self.get_mut(number)?.pin = pin;
        Ok(())
    }

    /// Credit an account
    ///
    /// # Returns
    ///
    /// The balance after the deposit
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The amount is not positive or too precise
    /// - The account is an active fixed deposit
    /// - The new balance would overflow
    pub fn deposit(&mut self, number: AccountNumber, amount: Decimal) -> Result<Decimal, LedgerError> {
        validate_amount(amount)?;
        let account = self.get_mut(number)?;
        ensure_not_active_fd(account, "Deposit")?;

        account.balance = account
            .balance
            .checked_add(amount)
            .ok_or_else(|| LedgerError::arithmetic_overflow("deposit", number))?;
        Ok(account.balance)
    }

    /// Debit an account
    ///
    /// # Returns
    ///
    /// The balance after the withdrawal
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The amount is not positive or too precise
    /// - The account is an active fixed deposit
    /// - The amount exceeds the balance
    pub fn withdraw(&mut self, number: AccountNumber, amount: Decimal) -> Result<Decimal, LedgerError> {
        validate_amount(amount)?;
        let account = self.get_mut(number)?;
        ensure_not_active_fd(account, "Withdrawal")?;

        if amount > account.balance {
            return Err(LedgerError::insufficient_funds(number, account.balance, amount));
        }
        account.balance -= amount;
        Ok(account.balance)
    }

    /// Move funds between two accounts
    ///
    /// Checks happen in this order: destination exists, source is not an
    /// active FD, amount is valid, source has enough funds. Nothing changes
    /// unless every check passes.
    ///
    /// # Returns
    ///
    /// The source and destination balances after the transfer
    pub fn transfer(
        &mut self,
        from: AccountNumber,
        to: AccountNumber,
        amount: Decimal,
    ) -> Result<(Decimal, Decimal), LedgerError> {
        let destination_balance = self
            .get(to)
            .ok_or_else(|| LedgerError::account_not_found(to))?
            .balance;
        if from == to {
            return Err(LedgerError::SameAccountTransfer { number: from });
        }

        let source = self
            .get(from)
            .ok_or_else(|| LedgerError::account_not_found(from))?;
        ensure_not_active_fd(source, "Transfer")?;
        validate_amount(amount)?;
        if amount > source.balance {
            return Err(LedgerError::insufficient_funds(from, source.balance, amount));
        }

        let credited = destination_balance
            .checked_add(amount)
            .ok_or_else(|| LedgerError::arithmetic_overflow("transfer", to))?;

        let source = self.get_mut(from)?;
        source.balance -= amount;
        let debited = source.balance;
        self.get_mut(to)?.balance = credited;

        Ok((debited, credited))
    }

    /// Break an active fixed deposit early
    ///
    /// Deducts `penalty_percent` of the balance once and turns the account
    /// into a savings account.
    ///
    /// # Errors
    ///
    /// Returns `NoActiveFixedDeposit` unless the account is an active FD.
    pub fn break_fixed_deposit(
        &mut self,
        number: AccountNumber,
        penalty_percent: Decimal,
    ) -> Result<FdBreak, LedgerError> {
        let account = self.get_mut(number)?;
        if !account.is_active_fd() {
            return Err(LedgerError::NoActiveFixedDeposit { number });
        }

        let penalty = account
            .balance
            .checked_mul(penalty_percent)
            .map(|p| round_money(p / Decimal::ONE_HUNDRED))
            .ok_or_else(|| LedgerError::arithmetic_overflow("FD break", number))?
            .min(account.balance);

        account.balance -= penalty;
        account.kind = AccountKind::Savings;
        Ok(FdBreak {
            penalty,
            balance: account.balance,
        })
    }

    /// Credit one month of interest to every eligible account
    ///
    /// Savings accounts earn `savings_rate`, fixed deposits (active or
    /// matured) earn `fd_rate`, current accounts earn nothing. Zero credits
    /// are not reported.
    pub fn apply_monthly_interest(
        &mut self,
        savings_rate: Decimal,
        fd_rate: Decimal,
    ) -> Vec<InterestCredit> {
        let mut credits = Vec::new();

        for account in self.accounts.values_mut() {
            let (rate, action) = match account.kind {
                AccountKind::Savings => (savings_rate, HistoryAction::SavingsInterest),
                AccountKind::FixedDeposit { .. } => (fd_rate, HistoryAction::FdInterest),
                AccountKind::Current => continue,
            };

            let credit = monthly_interest(account.balance, rate)
                .and_then(|interest| Some((interest, account.balance.checked_add(interest)?)));
            let Some((interest, balance)) = credit else {
                warn!(number = account.number, "interest overflow, account skipped");
                continue;
            };

            if interest > Decimal::ZERO {
                account.balance = balance;
                credits.push(InterestCredit {
                    number: account.number,
                    action,
                    amount: interest,
                    balance,
                });
            }
        }

        credits
    }

    /// Advance every active fixed deposit by one month
    ///
    /// Returns the deposits that matured this month. Under
    /// [`MaturedFdPolicy::ConvertToSavings`] they become savings accounts.
    pub fn count_down_fixed_deposits(&mut self, policy: MaturedFdPolicy) -> Vec<Maturity> {
        let mut matured = Vec::new();

        for account in self.accounts.values_mut() {
            let AccountKind::FixedDeposit { months_remaining } = &mut account.kind else {
                continue;
            };
            if *months_remaining == 0 {
                continue;
            }

            *months_remaining -= 1;
            if *months_remaining == 0 {
                let converted = policy == MaturedFdPolicy::ConvertToSavings;
                if converted {
                    account.kind = AccountKind::Savings;
                }
                matured.push(Maturity {
                    number: account.number,
                    balance: account.balance,
                    converted,
                });
            }
        }

        matured
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

fn ensure_not_active_fd(account: &Account, operation: &str) -> Result<(), LedgerError> {
    match account.kind {
        AccountKind::FixedDeposit { months_remaining } if months_remaining > 0 => Err(
            LedgerError::active_fixed_deposit(account.number, operation, months_remaining),
        ),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn fd(months_remaining: u32) -> AccountKind {
        AccountKind::FixedDeposit { months_remaining }
    }

    fn ledger_with(kind: AccountKind, balance: Decimal) -> (Ledger, AccountNumber) {
        let mut ledger = Ledger::new();
        let number = ledger
            .open("Test Holder".to_string(), 1234, kind, balance)
            .unwrap();
        (ledger, number)
    }

    #[test]
    fn test_new_ledger_starts_at_first_number() {
        let ledger = Ledger::new();
        assert!(ledger.is_empty());
        assert_eq!(ledger.next_number(), 1000);
    }

    #[test]
    fn test_open_assigns_increasing_numbers() {
        let mut ledger = Ledger::new();
        let numbers: Vec<_> = (0..5)
            .map(|i| {
                ledger
                    .open(format!("Holder {}", i), 1111, AccountKind::Current, Decimal::ZERO)
                    .unwrap()
            })
            .collect();

        assert_eq!(numbers, vec![1000, 1001, 1002, 1003, 1004]);
        assert!(numbers.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_removed_number_is_not_reused() {
        let mut ledger = Ledger::new();
        let first = ledger
            .open("A".to_string(), 1111, AccountKind::Savings, Decimal::ZERO)
            .unwrap();
        let second = ledger
            .open("B".to_string(), 2222, AccountKind::Savings, Decimal::ZERO)
            .unwrap();
        ledger.remove(second).unwrap();

        let third = ledger
            .open("C".to_string(), 3333, AccountKind::Savings, Decimal::ZERO)
            .unwrap();
        assert_eq!(first, 1000);
        assert_eq!(third, 1002);
        assert!(ledger.get(second).is_none());
    }

    #[rstest]
    #[case::empty(vec![], 1000)]
    #[case::single(vec![1000], 1001)]
    #[case::gap(vec![1000, 1007, 1003], 1008)]
    #[case::below_first(vec![5], 1000)]
    fn test_from_accounts_recomputes_counter(#[case] numbers: Vec<AccountNumber>, #[case] expected: AccountNumber) {
        let accounts = numbers
            .into_iter()
            .map(|n| Account::new(n, "X", 1234, AccountKind::Current));
        let ledger = Ledger::from_accounts(accounts);
        assert_eq!(ledger.next_number(), expected);
    }

    #[test]
    fn test_from_accounts_keeps_first_duplicate() {
        let mut first = Account::new(1000, "First", 1234, AccountKind::Savings);
        first.balance = Decimal::new(10, 0);
        let second = Account::new(1000, "Second", 4321, AccountKind::Current);

        let ledger = Ledger::from_accounts(vec![first.clone(), second]);
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.get(1000), Some(&first));
    }

    #[rstest]
    #[case::correct(1234, true)]
    #[case::wrong(4321, false)]
    fn test_authenticate(#[case] pin: Pin, #[case] ok: bool) {
        let (ledger, number) = ledger_with(AccountKind::Savings, Decimal::ZERO);
        let result = ledger.authenticate(number, pin);
        assert_eq!(result.is_ok(), ok);
        if !ok {
            assert_eq!(result.unwrap_err(), LedgerError::IncorrectPin { number });
        }
    }

    #[test]
    fn test_authenticate_unknown_account() {
        let ledger = Ledger::new();
        assert_eq!(
            ledger.authenticate(4242, 1234).unwrap_err(),
            LedgerError::AccountNotFound { number: 4242 }
        );
    }

    #[rstest]
    #[case(Decimal::new(100, 0), Decimal::new(50, 0), Decimal::new(150, 0))]
    #[case(Decimal::ZERO, Decimal::new(1, 4), Decimal::new(1, 4))]
    #[case(Decimal::new(10, 0), Decimal::new(12345, 2), Decimal::new(13345, 2))]
    fn test_deposit_adds_amount(#[case] start: Decimal, #[case] amount: Decimal, #[case] expected: Decimal) {
        let (mut ledger, number) = ledger_with(AccountKind::Current, start);
        assert_eq!(ledger.deposit(number, amount).unwrap(), expected);
        assert_eq!(ledger.get(number).unwrap().balance, expected);
    }

    #[rstest]
    #[case::zero(Decimal::ZERO)]
    #[case::negative(Decimal::new(-10, 0))]
    fn test_deposit_rejects_non_positive(#[case] amount: Decimal) {
        let (mut ledger, number) = ledger_with(AccountKind::Savings, Decimal::ZERO);
        assert!(matches!(
            ledger.deposit(number, amount).unwrap_err(),
            LedgerError::NonPositiveAmount { .. }
        ));
    }

    #[test]
    fn test_deposit_rejects_excess_precision() {
        let (mut ledger, number) = ledger_with(AccountKind::Savings, Decimal::ZERO);
        assert!(matches!(
            ledger.deposit(number, Decimal::new(100001, 5)).unwrap_err(),
            LedgerError::InvalidAmount { max_scale: 4, .. }
        ));
        // trailing zeros beyond four places are fine
        assert!(ledger.deposit(number, Decimal::new(1000000, 6)).is_ok());
    }

    #[test]
    fn test_deposit_into_active_fd_fails() {
        let (mut ledger, number) = ledger_with(fd(3), Decimal::new(500, 0));
        assert!(matches!(
            ledger.deposit(number, Decimal::ONE).unwrap_err(),
            LedgerError::ActiveFixedDeposit { months_remaining: 3, .. }
        ));
        assert_eq!(ledger.get(number).unwrap().balance, Decimal::new(500, 0));
    }

    #[test]
    fn test_deposit_into_matured_fd_succeeds() {
        let (mut ledger, number) = ledger_with(fd(0), Decimal::new(500, 0));
        assert_eq!(ledger.deposit(number, Decimal::ONE).unwrap(), Decimal::new(501, 0));
    }

    #[test]
    fn test_withdraw_exact_balance() {
        let (mut ledger, number) = ledger_with(AccountKind::Savings, Decimal::new(75, 0));
        assert_eq!(ledger.withdraw(number, Decimal::new(75, 0)).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_withdraw_more_than_balance_fails_unchanged() {
        let (mut ledger, number) = ledger_with(AccountKind::Savings, Decimal::new(75, 0));
        let err = ledger.withdraw(number, Decimal::new(7501, 2)).unwrap_err();
        assert_eq!(
            err,
            LedgerError::insufficient_funds(number, Decimal::new(75, 0), Decimal::new(7501, 2))
        );
        assert_eq!(ledger.get(number).unwrap().balance, Decimal::new(75, 0));
    }

    #[test]
    fn test_withdraw_from_active_fd_fails() {
        let (mut ledger, number) = ledger_with(fd(1), Decimal::new(75, 0));
        assert!(matches!(
            ledger.withdraw(number, Decimal::ONE).unwrap_err(),
            LedgerError::ActiveFixedDeposit { .. }
        ));
    }

    #[test]
    fn test_transfer_moves_funds_and_preserves_total() {
        let mut ledger = Ledger::new();
        let a = ledger
            .open("A".to_string(), 1111, AccountKind::Savings, Decimal::new(300, 0))
            .unwrap();
        let b = ledger
            .open("B".to_string(), 2222, AccountKind::Current, Decimal::new(50, 0))
            .unwrap();

        let (from, to) = ledger.transfer(a, b, Decimal::new(1255, 1)).unwrap();
        assert_eq!(from, Decimal::new(1745, 1));
        assert_eq!(to, Decimal::new(1755, 1));
        assert_eq!(from + to, Decimal::new(350, 0));
    }

    #[rstest]
    #[case::unknown_destination(9999, Decimal::ONE, "not_found")]
    #[case::non_positive(1001, Decimal::ZERO, "non_positive")]
    #[case::insufficient(1001, Decimal::new(301, 0), "insufficient")]
    #[case::same_account(1000, Decimal::ONE, "same")]
    fn test_transfer_failures_leave_balances(
        #[case] to: AccountNumber,
        #[case] amount: Decimal,
        #[case] kind: &str,
    ) {
        let mut ledger = Ledger::new();
        ledger
            .open("A".to_string(), 1111, AccountKind::Savings, Decimal::new(300, 0))
            .unwrap();
        ledger
            .open("B".to_string(), 2222, AccountKind::Current, Decimal::new(50, 0))
            .unwrap();

        let err = ledger.transfer(1000, to, amount).unwrap_err();
        let matched = match kind {
            "not_found" => matches!(err, LedgerError::AccountNotFound { number: 9999 }),
            "non_positive" => matches!(err, LedgerError::NonPositiveAmount { .. }),
            "insufficient" => matches!(err, LedgerError::InsufficientFunds { .. }),
            "same" => matches!(err, LedgerError::SameAccountTransfer { number: 1000 }),
            _ => panic!("Unknown case: {}", kind),
        };
        assert!(matched, "unexpected error {:?}", err);
        assert_eq!(ledger.get(1000).unwrap().balance, Decimal::new(300, 0));
        assert_eq!(ledger.get(1001).unwrap().balance, Decimal::new(50, 0));
    }

    #[test]
    fn test_transfer_checks_destination_before_fd() {
        let mut ledger = Ledger::new();
        ledger
            .open("A".to_string(), 1111, fd(2), Decimal::new(300, 0))
            .unwrap();

        assert!(matches!(
            ledger.transfer(1000, 5000, Decimal::ONE).unwrap_err(),
            LedgerError::AccountNotFound { .. }
        ));
    }

    #[test]
    fn test_transfer_from_active_fd_fails() {
        let mut ledger = Ledger::new();
        ledger
            .open("A".to_string(), 1111, fd(2), Decimal::new(300, 0))
            .unwrap();
        ledger
            .open("B".to_string(), 2222, AccountKind::Current, Decimal::ZERO)
            .unwrap();

        assert!(matches!(
            ledger.transfer(1000, 1001, Decimal::ONE).unwrap_err(),
            LedgerError::ActiveFixedDeposit { .. }
        ));
    }

    #[test]
    fn test_transfer_into_active_fd_is_allowed() {
        let mut ledger = Ledger::new();
        ledger
            .open("A".to_string(), 1111, AccountKind::Savings, Decimal::new(300, 0))
            .unwrap();
        ledger
            .open("B".to_string(), 2222, fd(2), Decimal::new(100, 0))
            .unwrap();

        assert_eq!(
            ledger.transfer(1000, 1001, Decimal::new(20, 0)).unwrap(),
            (Decimal::new(280, 0), Decimal::new(120, 0))
        );
    }

    #[rstest]
    #[case(Decimal::new(1000, 0), Decimal::ONE, Decimal::new(10, 0), Decimal::new(990, 0))]
    #[case(Decimal::new(1000, 0), Decimal::new(25, 1), Decimal::new(25, 0), Decimal::new(975, 0))]
    #[case(Decimal::new(333, 0), Decimal::ONE, Decimal::new(333, 2), Decimal::new(32967, 2))]
    #[case(Decimal::ZERO, Decimal::ONE, Decimal::ZERO, Decimal::ZERO)]
    fn test_break_fixed_deposit(
        #[case] balance: Decimal,
        #[case] percent: Decimal,
        #[case] penalty: Decimal,
        #[case] remaining: Decimal,
    ) {
        let (mut ledger, number) = ledger_with(fd(6), balance);
        let result = ledger.break_fixed_deposit(number, percent).unwrap();

        assert_eq!(result.penalty, penalty);
        assert_eq!(result.balance, remaining);
        let account = ledger.get(number).unwrap();
        assert_eq!(account.kind, AccountKind::Savings);
        assert_eq!(account.kind.fd_months_remaining(), 0);
    }

    #[rstest]
    #[case::savings(AccountKind::Savings)]
    #[case::current(AccountKind::Current)]
    #[case::matured(fd(0))]
    fn test_break_requires_active_fd(#[case] kind: AccountKind) {
        let (mut ledger, number) = ledger_with(kind, Decimal::new(100, 0));
        assert_eq!(
            ledger.break_fixed_deposit(number, Decimal::ONE).unwrap_err(),
            LedgerError::NoActiveFixedDeposit { number }
        );
        assert_eq!(ledger.get(number).unwrap().kind, kind);
    }

    #[rstest]
    #[case(Decimal::new(1000, 0), Decimal::new(5, 0), Decimal::new(41667, 4))]
    #[case(Decimal::new(1000, 0), Decimal::new(7, 0), Decimal::new(58333, 4))]
    #[case(Decimal::new(12, 0), Decimal::new(1, 0), Decimal::new(1, 2))]
    #[case(Decimal::ZERO, Decimal::new(5, 0), Decimal::ZERO)]
    fn test_monthly_interest(#[case] balance: Decimal, #[case] rate: Decimal, #[case] expected: Decimal) {
        assert_eq!(monthly_interest(balance, rate), Some(expected));
    }

    #[test]
    fn test_apply_monthly_interest_by_kind() {
        let mut ledger = Ledger::new();
        let rate_savings = Decimal::new(5, 0);
        let rate_fd = Decimal::new(7, 0);
        for kind in [AccountKind::Savings, AccountKind::Current, fd(3), fd(0)] {
            ledger
                .open("X".to_string(), 1234, kind, Decimal::new(1000, 0))
                .unwrap();
        }
        ledger
            .open("Empty".to_string(), 1234, AccountKind::Savings, Decimal::ZERO)
            .unwrap();

        let credits = ledger.apply_monthly_interest(rate_savings, rate_fd);

        assert_eq!(
            credits,
            vec![
                InterestCredit {
                    number: 1000,
                    action: HistoryAction::SavingsInterest,
                    amount: Decimal::new(41667, 4),
                    balance: Decimal::new(10041667, 4),
                },
                InterestCredit {
                    number: 1002,
                    action: HistoryAction::FdInterest,
                    amount: Decimal::new(58333, 4),
                    balance: Decimal::new(10058333, 4),
                },
                InterestCredit {
                    number: 1003,
                    action: HistoryAction::FdInterest,
                    amount: Decimal::new(58333, 4),
                    balance: Decimal::new(10058333, 4),
                },
            ]
        );
        assert_eq!(ledger.get(1001).unwrap().balance, Decimal::new(1000, 0));
        assert_eq!(ledger.get(1004).unwrap().balance, Decimal::ZERO);
    }

    #[rstest]
    #[case::keep(MaturedFdPolicy::Keep, fd(0))]
    #[case::convert(MaturedFdPolicy::ConvertToSavings, AccountKind::Savings)]
    fn test_count_down_matures_once(#[case] policy: MaturedFdPolicy, #[case] final_kind: AccountKind) {
        let (mut ledger, number) = ledger_with(fd(2), Decimal::new(100, 0));

        assert!(ledger.count_down_fixed_deposits(policy).is_empty());
        assert_eq!(ledger.get(number).unwrap().kind, fd(1));

        let matured = ledger.count_down_fixed_deposits(policy);
        assert_eq!(
            matured,
            vec![Maturity {
                number,
                balance: Decimal::new(100, 0),
                converted: policy == MaturedFdPolicy::ConvertToSavings,
            }]
        );
        assert_eq!(ledger.get(number).unwrap().kind, final_kind);

        assert!(ledger.count_down_fixed_deposits(policy).is_empty());
        assert_eq!(ledger.get(number).unwrap().kind, final_kind);
    }

    #[test]
    fn test_set_pin_and_remove_unknown() {
        let (mut ledger, number) = ledger_with(AccountKind::Current, Decimal::ZERO);
        ledger.set_pin(number, 9876).unwrap();
        assert_eq!(ledger.get(number).unwrap().pin, 9876);

        assert!(matches!(
            ledger.set_pin(7777, 1234).unwrap_err(),
            LedgerError::AccountNotFound { number: 7777 }
        ));
        assert!(matches!(
            ledger.remove(7777).unwrap_err(),
            LedgerError::AccountNotFound { number: 7777 }
        ));
    }
}
