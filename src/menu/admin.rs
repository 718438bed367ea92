//! Admin menu

use super::{fixed, money, outcome, prompt_account_number, report, report_unsaved, Console};
use crate::config::{MaturedFdPolicy, PinPolicy};
use crate::core::{AdminSession, BankEngine, HistoryLog, LedgerStore};
use crate::types::{Account, AccountKind, LedgerError};
use std::io::{BufRead, Write};

pub(super) fn admin_menu<S, H, R, W>(
    engine: &mut BankEngine<S, H>,
    console: &mut Console<R, W>,
    admin: &AdminSession,
) -> Result<(), LedgerError>
where
    S: LedgerStore,
    H: HistoryLog,
    R: BufRead,
    W: Write,
{
    loop {
        console.say("\n--- Admin Menu ---")?;
        console.say("1. View All Accounts")?;
        console.say("2. Delete Account")?;
        console.say("3. Reset PIN")?;
        console.say("4. Apply Monthly Interest")?;
        console.say("5. Advance Months (Simulate Time)")?;
        console.say("6. Exit Admin")?;

        match console.prompt_int("Enter choice: ")? {
            1 => {
                let lines: Vec<String> = engine.all_accounts(admin).map(account_line).collect();
                if lines.is_empty() {
                    console.say("No accounts found.")?;
                }
                for line in lines {
                    console.say(line)?;
                }
            }
            2 => {
                let number = prompt_account_number(console, "Enter account number to delete: ")?;
                if outcome(console, engine.delete_account(admin, number))?.is_some() {
                    console.say("Account deleted successfully!")?;
                }
            }
            3 => reset_pin(engine, console, admin)?,
            4 => {
                let config = engine.config();
                console.say(format_args!(
                    "Applying monthly interest: Savings {}% p.a., FD {}% p.a.",
                    fixed(config.savings_annual_rate, 4),
                    fixed(config.fd_annual_rate, 4)
                ))?;
                if outcome(console, engine.apply_monthly_interest(admin))?.is_some() {
                    console.say("Monthly interest applied.")?;
                }
            }
            5 => {
                let months = console.prompt_int("Enter number of months to advance: ")?;
                if let Some(summary) = outcome(console, engine.advance_months(admin, months))? {
                    console.say(format_args!(
                        "Advanced {} month(s). FD durations updated.",
                        summary.months
                    ))?;
                    for maturity in &summary.matured {
                        let note = match engine.matured_fd_policy() {
                            MaturedFdPolicy::Keep => "",
                            MaturedFdPolicy::ConvertToSavings => " Converted to Savings.",
                        };
                        console.say(format_args!(
                            "FD {} matured. Balance: {}.{}",
                            maturity.number,
                            money(maturity.balance),
                            note
                        ))?;
                    }
                }
            }
            6 => {
                console.say("Exiting Admin...")?;
                return Ok(());
            }
            _ => console.say("Invalid choice!")?,
        }
        report_unsaved(engine, console)?;
    }
}

/// One row of the account listing; the PIN is always masked
fn account_line(account: &Account) -> String {
    let mut line = format!(
        "AccNo: {} | Name: {} | Type: {} | Balance: {}",
        account.number,
        account.holder,
        account.kind.short_label(),
        money(account.balance)
    );
    if let AccountKind::FixedDeposit { months_remaining } = account.kind {
        line.push_str(&format!(" | FD Months Remaining: {}", months_remaining));
    }
    line.push_str(" | PIN: ****");
    line
}

fn reset_pin<S, H, R, W>(
    engine: &mut BankEngine<S, H>,
    console: &mut Console<R, W>,
    admin: &AdminSession,
) -> Result<(), LedgerError>
where
    S: LedgerStore,
    H: HistoryLog,
    R: BufRead,
    W: Write,
{
    let number = prompt_account_number(console, "Enter account number to reset PIN: ")?;
    if engine.account(number).is_none() {
        return report(console, &LedgerError::account_not_found(number));
    }

    let prompt = match engine.config().pin_reset_policy {
        PinPolicy::FourDigit => "Enter new 4-digit PIN: ",
        PinPolicy::Unchecked => "Enter new PIN: ",
    };
    loop {
        let pin = console.prompt_int(prompt)?;
        match engine.reset_pin(admin, number, pin) {
            Ok(()) => return console.say("PIN reset successfully!"),
            Err(e @ LedgerError::InvalidPin { .. }) => report(console, &e)?,
            Err(e) => return report(console, &e),
        }
    }
}
