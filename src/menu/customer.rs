//! Customer menu for one logged-in account

use super::{fixed, money, outcome, prompt_account_number, report, report_unsaved, Console};
use crate::core::{BankEngine, CustomerSession, HistoryLog, LedgerStore};
use crate::types::{AccountKind, LedgerError};
use std::io::{BufRead, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CustomerAction {
    Deposit,
    Withdraw,
    CheckBalance,
    Transfer,
    ViewHistory,
    BreakFd,
    Exit,
}

/// Menu entries for the account's current state
///
/// `Break FD` is offered only while the fixed deposit is active.
fn actions(active_fd: bool) -> Vec<CustomerAction> {
    let mut actions = vec![
        CustomerAction::Deposit,
        CustomerAction::Withdraw,
        CustomerAction::CheckBalance,
        CustomerAction::Transfer,
        CustomerAction::ViewHistory,
    ];
    if active_fd {
        actions.push(CustomerAction::BreakFd);
    }
    actions.push(CustomerAction::Exit);
    actions
}

pub(super) fn customer_menu<S, H, R, W>(
    engine: &mut BankEngine<S, H>,
    console: &mut Console<R, W>,
    session: &CustomerSession,
) -> Result<(), LedgerError>
where
    S: LedgerStore,
    H: HistoryLog,
    R: BufRead,
    W: Write,
{
    loop {
        let active_fd = engine
            .account(session.number())
            .is_some_and(|account| account.is_active_fd());
        let actions = actions(active_fd);
        let penalty = engine.config().fd_break_penalty_percent;

        console.say("\n--- Customer Menu ---")?;
        for (index, action) in actions.iter().enumerate() {
            let label = match action {
                CustomerAction::Deposit => "Deposit".to_string(),
                CustomerAction::Withdraw => "Withdraw".to_string(),
                CustomerAction::CheckBalance => "Check Balance".to_string(),
                CustomerAction::Transfer => "Transfer".to_string(),
                CustomerAction::ViewHistory => "View History".to_string(),
                CustomerAction::BreakFd => format!("Break FD (Penalty {}%)", fixed(penalty, 2)),
                CustomerAction::Exit => "Exit Customer".to_string(),
            };
            console.say(format_args!("{}. {}", index + 1, label))?;
        }

        let choice = console.prompt_int("Enter choice: ")?;
        let action = usize::try_from(choice)
            .ok()
            .and_then(|c| c.checked_sub(1))
            .and_then(|i| actions.get(i).copied());

        match action {
            Some(CustomerAction::Deposit) => {
                let amount = console.prompt_decimal("Enter amount to deposit: ")?;
                if let Some(balance) = outcome(console, engine.deposit(session, amount))? {
                    console.say(format_args!("Deposit successful! New Balance: {}", money(balance)))?;
                }
            }
            Some(CustomerAction::Withdraw) => {
                let amount = console.prompt_decimal("Enter amount to withdraw: ")?;
                if let Some(balance) = outcome(console, engine.withdraw(session, amount))? {
                    console.say(format_args!("Withdrawal successful! New Balance: {}", money(balance)))?;
                }
            }
            Some(CustomerAction::CheckBalance) => check_balance(engine, console, session)?,
            Some(CustomerAction::Transfer) => transfer(engine, console, session)?,
            Some(CustomerAction::ViewHistory) => {
                if let Some(lines) = outcome(console, engine.history_lines(session))? {
                    console.say(format_args!(
                        "\n--- Transaction History for {} ---",
                        session.number()
                    ))?;
                    for line in lines {
                        console.say(line)?;
                    }
                }
            }
            Some(CustomerAction::BreakFd) => {
                console.say(format_args!(
                    "Breaking FD will apply a {}% penalty on the current balance and convert to Savings.",
                    fixed(penalty, 2)
                ))?;
                if console.prompt_int("Confirm break FD? (1 = Yes, 0 = No): ")? != 1 {
                    console.say("FD break cancelled.")?;
                } else if let Some(result) = outcome(console, engine.break_fixed_deposit(session))? {
                    console.say(format_args!(
                        "FD broken. Penalty deducted: {}. New Balance: {}. Account converted to Savings.",
                        money(result.penalty),
                        money(result.balance)
                    ))?;
                }
            }
            Some(CustomerAction::Exit) => {
                console.say("Exiting Customer...")?;
                return Ok(());
            }
            None => console.say("Invalid choice!")?,
        }
        report_unsaved(engine, console)?;
    }
}

fn check_balance<S, H, R, W>(
    engine: &BankEngine<S, H>,
    console: &mut Console<R, W>,
    session: &CustomerSession,
) -> Result<(), LedgerError>
where
    S: LedgerStore,
    H: HistoryLog,
    R: BufRead,
    W: Write,
{
    let Some(account) = outcome(console, engine.check_balance(session))? else {
        return Ok(());
    };
    console.say(format_args!("Account Holder: {}", account.holder))?;
    console.say(format_args!("Account Type: {}", account.kind))?;
    console.say(format_args!("Balance: {}", money(account.balance)))?;
    if let AccountKind::FixedDeposit { months_remaining } = account.kind {
        console.say(format_args!("FD Months Remaining: {}", months_remaining))?;
    }
    Ok(())
}

/// Ask for the receiver first and stop early if it is unknown or the source
/// is an active FD, before asking for an amount
fn transfer<S, H, R, W>(
    engine: &mut BankEngine<S, H>,
    console: &mut Console<R, W>,
    session: &CustomerSession,
) -> Result<(), LedgerError>
where
    S: LedgerStore,
    H: HistoryLog,
    R: BufRead,
    W: Write,
{
    let to = prompt_account_number(console, "Enter receiver account number: ")?;
    if engine.account(to).is_none() {
        return report(console, &LedgerError::account_not_found(to));
    }
    if let Some(AccountKind::FixedDeposit { months_remaining }) = engine
        .account(session.number())
        .map(|account| account.kind)
        .filter(|kind| kind.is_active_fd())
    {
        let error = LedgerError::active_fixed_deposit(session.number(), "Transfer", months_remaining);
        return report(console, &error);
    }

    let amount = console.prompt_decimal("Enter amount to transfer: ")?;
    if outcome(console, engine.transfer(session, to, amount))?.is_some() {
        console.say("Transfer successful!")?;
    }
    Ok(())
}
