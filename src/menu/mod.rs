//! Interactive command menus
//!
//! Three levels: the root menu (create account, customer login, admin login),
//! the customer menu for one logged-in account, and the admin menu. Every
//! operation runs to completion before the next command is read.
//!
//! Errors from the engine are printed and control returns to the enclosing
//! menu. Only console failures propagate; end of input ends the program.

mod admin;
mod console;
mod customer;

pub use console::Console;

use crate::config::LEDGER_FILE_NAME;
use crate::core::engine::four_digit_pin;
use crate::core::ledger::validate_amount;
use crate::core::{BankEngine, HistoryLog, LedgerStore, NewAccount, OpenKind};
use crate::types::{AccountKind, AccountNumber, LedgerError};
use rust_decimal::{Decimal, RoundingStrategy};
use std::io::{BufRead, Write};

/// Decimal places shown for money
const DISPLAY_SCALE: u32 = 2;

/// Run the root menu until the user exits or input ends
pub fn run<S, H, R, W>(engine: &mut BankEngine<S, H>, console: &mut Console<R, W>) -> Result<(), LedgerError>
where
    S: LedgerStore,
    H: HistoryLog,
    R: BufRead,
    W: Write,
{
    match root_menu(engine, console) {
        Err(LedgerError::InputClosed) => {
            console.say("\nInput closed. Exiting...")?;
            Ok(())
        }
        other => other,
    }
}

fn root_menu<S, H, R, W>(engine: &mut BankEngine<S, H>, console: &mut Console<R, W>) -> Result<(), LedgerError>
where
    S: LedgerStore,
    H: HistoryLog,
    R: BufRead,
    W: Write,
{
    loop {
        console.say("\n--- Bank System ---")?;
        console.say("1. Create Account")?;
        console.say("2. Customer Login")?;
        console.say("3. Admin Login")?;
        console.say("4. Exit")?;

        match console.prompt_int("Enter choice: ")? {
            1 => create_account(engine, console)?,
            2 => {
                let number = prompt_account_number(console, "Enter account number: ")?;
                if engine.account(number).is_none() {
                    report(console, &LedgerError::account_not_found(number))?;
                    continue;
                }
                let pin = console.prompt_int("Enter PIN: ")?;
                if let Some(session) = outcome(console, engine.login(number, pin))? {
                    customer::customer_menu(engine, console, &session)?;
                }
            }
            3 => {
                let password = console.prompt_line("Enter Admin Password: ")?;
                if let Some(admin) = outcome(console, engine.login_admin(&password))? {
                    admin::admin_menu(engine, console, &admin)?;
                }
            }
            4 => {
                console.say("Exiting...")?;
                return Ok(());
            }
            _ => console.say("Invalid choice!")?,
        }
        report_unsaved(engine, console)?;
    }
}

fn create_account<S, H, R, W>(engine: &mut BankEngine<S, H>, console: &mut Console<R, W>) -> Result<(), LedgerError>
where
    S: LedgerStore,
    H: HistoryLog,
    R: BufRead,
    W: Write,
{
    let holder = console.prompt_line("Enter name: ")?;

    let pin = loop {
        let pin = console.prompt_int("Set a 4-digit PIN: ")?;
        match four_digit_pin(pin) {
            Ok(_) => break pin,
            Err(e) => report(console, &e)?,
        }
    };

    console.say("Select Account Type:\n1. Savings\n2. Current\n3. Fixed Deposit")?;
    let mut choice = console.prompt_int("Choice: ")?;
    while !(1..=3).contains(&choice) {
        choice = console.prompt_int("Invalid choice. Enter 1, 2, or 3: ")?;
    }

    let kind = match choice {
        1 => OpenKind::Savings,
        2 => OpenKind::Current,
        _ => {
            let prompt = format!(
                "Enter FD duration in months (e.g., {}): ",
                engine.config().default_fd_months
            );
            let months = console.prompt_int(&prompt)?;
            let deposit = prompt_fd_deposit(console)?;
            OpenKind::FixedDeposit { months, deposit }
        }
    };

    let Some(number) = outcome(console, engine.create_account(NewAccount { holder, pin, kind }))? else {
        return Ok(());
    };

    if let Some(account) = engine.account(number) {
        match account.kind {
            AccountKind::FixedDeposit { months_remaining } => console.say(format_args!(
                "FD created: Duration {} months, Initial Amount {}",
                months_remaining,
                money(account.balance)
            ))?,
            kind => console.say(format_args!(
                "Account created as {}. Initial balance: {}",
                kind,
                money(account.balance)
            ))?,
        }
    }
    console.say(format_args!("Account created successfully! Account No: {}", number))
}

/// Read the FD opening deposit, re-prompting while it is too precise
///
/// Zero and negative amounts pass through; the engine opens those FDs empty.
fn prompt_fd_deposit<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Result<Decimal, LedgerError> {
    loop {
        let deposit = console.prompt_decimal("Enter initial deposit amount for FD: ")?;
        match validate_amount(deposit) {
            Err(e @ LedgerError::InvalidAmount { .. }) => report(console, &e)?,
            _ => return Ok(deposit),
        }
    }
}

/// Read an account number, re-prompting on anything but a non-negative integer
fn prompt_account_number<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    prompt: &str,
) -> Result<AccountNumber, LedgerError> {
    console.prompt_parsed(prompt, "Invalid input. Please enter a valid account number.")
}

/// Print an engine error in the menu's words
fn report<R: BufRead, W: Write>(console: &mut Console<R, W>, error: &LedgerError) -> Result<(), LedgerError> {
    match error {
        LedgerError::Persistence { .. } => console.say(format_args!(
            "Warning: {}. The change is kept in memory but {} was not updated.",
            error, LEDGER_FILE_NAME
        )),
        LedgerError::NoHistory { .. } => console.say("No transaction history found!"),
        _ => console.say(format_args!("Error: {}", error)),
    }
}

/// Print the save failure left behind by the last operation, if any
fn report_unsaved<S, H, R, W>(engine: &mut BankEngine<S, H>, console: &mut Console<R, W>) -> Result<(), LedgerError>
where
    S: LedgerStore,
    H: HistoryLog,
    R: BufRead,
    W: Write,
{
    match engine.take_save_failure() {
        Some(e) => report(console, &e),
        None => Ok(()),
    }
}

/// Money as shown in the menus, rounded half away from zero
fn money(amount: Decimal) -> String {
    fixed(amount, DISPLAY_SCALE)
}

/// `value` rounded to `places` and padded to exactly that many decimals
fn fixed(value: Decimal, places: u32) -> String {
    let rounded = value.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.*}", places as usize, rounded)
}

/// Unwrap an engine result, printing the error if there is one
fn outcome<T, R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    result: Result<T, LedgerError>,
) -> Result<Option<T>, LedgerError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            report(console, &e)?;
            Ok(None)
        }
    }
}
