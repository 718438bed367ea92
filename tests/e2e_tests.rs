//! End-to-end integration tests
//!
//! These tests drive the complete menu flow against real files. Each fixture
//! test:
//! 1. Feeds tests/fixtures/{name}/input.txt to the menus as keyboard input
//! 2. Runs it against a fresh temporary data directory
//! 3. Compares the resulting accounts.txt with expected_accounts.txt
//!
//! The remaining tests check console output, history files and reloading a
//! data directory between sessions.

#[cfg(test)]
mod tests {
    use bank_ledger::config::{BankConfig, MaturedFdPolicy};
    use bank_ledger::io::{read_ledger, FileHistoryLog, FileLedgerStore};
    use bank_ledger::menu::{self, Console};
    use bank_ledger::BankEngine;
    use rstest::rstest;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn config_for(dir: &Path) -> BankConfig {
        BankConfig {
            data_dir: dir.to_path_buf(),
            ..BankConfig::default()
        }
    }

    /// Run one menu session over `input` and return everything printed
    fn run_session(config: BankConfig, input: &str) -> String {
        let store = FileLedgerStore::new(config.ledger_path());
        let history = FileHistoryLog::new(config.data_dir.clone());
        let mut engine = BankEngine::load(config, store, history).expect("Failed to load ledger");

        let mut console = Console::new(input.as_bytes(), Vec::new());
        menu::run(&mut engine, &mut console).unwrap_or_else(|e| panic!("Session failed: {}", e));
        String::from_utf8(console.into_output()).expect("Output is not UTF-8")
    }

    fn read_data_file(dir: &TempDir, name: &str) -> String {
        fs::read_to_string(dir.path().join(name)).unwrap_or_else(|e| panic!("Failed to read {}: {}", name, e))
    }

    /// Run a fixture script and compare accounts.txt with the expected ledger
    ///
    /// Balances are compared by value: a computed `9900` and `9900.0000` are
    /// the same balance. Exact text is covered by the ledger format tests.
    fn run_test_fixture(fixture_name: &str, policy: MaturedFdPolicy) {
        let fixture_dir = format!("tests/fixtures/{}", fixture_name);
        let input = fs::read_to_string(format!("{}/input.txt", fixture_dir))
            .unwrap_or_else(|e| panic!("Failed to read input for {}: {}", fixture_name, e));
        let expected = fs::read_to_string(format!("{}/expected_accounts.txt", fixture_dir))
            .unwrap_or_else(|e| panic!("Failed to read expected ledger for {}: {}", fixture_name, e));

        let dir = TempDir::new().expect("Failed to create temp dir");
        let config = config_for(dir.path()).with_matured_fd_policy(policy);
        let output = run_session(config, &input);

        let actual = read_data_file(&dir, "accounts.txt");
        let actual_load = read_ledger(actual.as_bytes());
        let expected_load = read_ledger(expected.as_bytes());
        assert_eq!(actual_load.truncated, None);
        assert_eq!(
            actual_load.accounts, expected_load.accounts,
            "\n\nLedger mismatch for fixture: {}\n\nActual:\n{}\n\nExpected:\n{}\n\nSession output:\n{}\n",
            fixture_name, actual, expected, output
        );
    }

    #[rstest]
    #[case("savings_interest", MaturedFdPolicy::Keep)]
    #[case("transfer", MaturedFdPolicy::Keep)]
    #[case("fd_break", MaturedFdPolicy::Keep)]
    #[case("fd_maturity", MaturedFdPolicy::Keep)]
    #[case("admin_maintenance", MaturedFdPolicy::Keep)]
    #[case("convert_matured_fd", MaturedFdPolicy::ConvertToSavings)]
    fn test_fixtures(#[case] fixture: &str, #[case] policy: MaturedFdPolicy) {
        run_test_fixture(fixture, policy);
    }

    #[test]
    fn test_fd_maturity_logged_once() {
        let dir = TempDir::new().unwrap();
        // FD for 3 months, then advance 5 months
        let input = "1\nDan\n4444\n3\n3\n1200\n3\nadmin123\n5\n5\n6\n4\n";
        let output = run_session(config_for(dir.path()), input);

        assert!(output.contains("Advanced 5 month(s). FD durations updated."));
        assert!(output.contains("FD 1000 matured."));

        let history = read_data_file(&dir, "1000_history.txt");
        let lines: Vec<&str> = history.lines().collect();
        assert!(lines[0].ends_with("FD Created : 1200.0000 | Balance: 1200.0000"));
        assert_eq!(lines.iter().filter(|l| l.contains("] FD Matured : ")).count(), 1);
        assert_eq!(lines.iter().filter(|l| l.contains("Interest Added (FD)")).count(), 5);
    }

    #[test]
    fn test_transfer_logs_both_sides() {
        let dir = TempDir::new().unwrap();
        let input = fs::read_to_string("tests/fixtures/transfer/input.txt").unwrap();
        let output = run_session(config_for(dir.path()), &input);

        assert!(output.contains("Transfer successful!"));
        assert!(output.contains("Error: Insufficient balance in account 1000"));

        let sender = read_data_file(&dir, "1000_history.txt");
        let receiver = read_data_file(&dir, "1001_history.txt");
        assert!(sender.contains("] Transfer Sent : 200.0000 | Balance: 300.0000"));
        assert_eq!(receiver.lines().count(), 1);
        assert!(receiver.contains("] Transfer Received : 200.0000 | Balance: 200.0000"));
    }

    #[test]
    fn test_state_survives_restart() {
        let dir = TempDir::new().unwrap();
        run_session(config_for(dir.path()), "1\nAda\n1234\n1\n2\n1000\n1234\n1\n250.5\n6\n4\n");

        let output = run_session(
            config_for(dir.path()),
            "1\nBob\n5678\n2\n2\n1000\n1234\n3\n5\n6\n4\n",
        );
        assert!(output.contains("Account created successfully! Account No: 1001"));
        assert!(output.contains("Account Holder: Ada"));
        assert!(output.contains("Account Type: Savings"));
        assert!(output.contains("Balance: 250.50"));
        assert!(output.contains("] Deposit : 250.5000 | Balance: 250.5000"));
    }

    #[test]
    fn test_balance_shown_rounded_after_interest() {
        let dir = TempDir::new().unwrap();
        let output = run_session(
            config_for(dir.path()),
            "1\nAda\n1234\n1\n2\n1000\n1234\n1\n1000\n6\n3\nadmin123\n4\n1\n6\n2\n1000\n1234\n3\n6\n4\n",
        );

        assert!(output.contains("Balance: 1004.17\n"));
        assert!(output.contains("AccNo: 1000 | Name: Ada | Type: Savings | Balance: 1004.17 | PIN: ****"));
        assert_eq!(read_data_file(&dir, "accounts.txt"), "1000\tAda\t1004.1667\t1234\t1\t0\n");
    }

    #[test]
    fn test_fd_deposit_too_precise_is_asked_again() {
        let dir = TempDir::new().unwrap();
        let output = run_session(
            config_for(dir.path()),
            "1\nEve\n5555\n3\n6\n100.12345\n100.1234\n4\n",
        );

        assert!(output.contains("Error: Amount 100.12345 has more than 4 decimal places"));
        assert!(output.contains("FD created: Duration 6 months, Initial Amount 100.12"));
        assert!(output.contains("Account created successfully! Account No: 1000"));
        assert_eq!(read_data_file(&dir, "accounts.txt"), "1000\tEve\t100.1234\t5555\t3\t6\n");
    }

    #[test]
    fn test_two_place_ledger_survives_a_session() {
        let dir = TempDir::new().unwrap();
        let text = "1000\tAda\t1004.17\t1234\t1\t0\n1001\tBob\t250.50\t5678\t2\t0\n";
        fs::write(dir.path().join("accounts.txt"), text).unwrap();

        // Creating an account rewrites the whole file
        run_session(config_for(dir.path()), "1\nCara\n4321\n2\n4\n");
        assert_eq!(
            read_data_file(&dir, "accounts.txt"),
            format!("{}1002\tCara\t0\t4321\t2\t0\n", text)
        );
    }

    #[test]
    fn test_wrong_credentials_change_nothing() {
        let dir = TempDir::new().unwrap();
        let output = run_session(
            config_for(dir.path()),
            "1\nAda\n1234\n1\n2\n1000\n9999\n2\n4242\n3\nletmein\n4\n",
        );

        assert!(output.contains("Error: Incorrect PIN for account 1000"));
        assert!(output.contains("Error: Account 4242 not found"));
        assert!(output.contains("Error: Incorrect admin password"));
        assert_eq!(read_data_file(&dir, "accounts.txt"), "1000\tAda\t0\t1234\t1\t0\n");
    }

    #[test]
    fn test_history_missing() {
        let dir = TempDir::new().unwrap();
        let output = run_session(config_for(dir.path()), "1\nAda\n1234\n2\n2\n1000\n1234\n5\n6\n4\n");
        assert!(output.contains("No transaction history found!"));
    }

    #[rstest]
    #[case::at_root("")]
    #[case::mid_prompt("1\nAda\n")]
    #[case::in_customer_menu("1\nAda\n1234\n1\n2\n1000\n1234\n")]
    fn test_end_of_input_exits_cleanly(#[case] input: &str) {
        let dir = TempDir::new().unwrap();
        let output = run_session(config_for(dir.path()), input);
        assert!(output.ends_with("Input closed. Exiting...\n"));
    }

    #[test]
    fn test_malformed_ledger_is_truncated() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("accounts.txt"),
            "1000\tAda\t10.0000\t1234\t1\t0\nnot a record\n1001\tBob\t5.0000\t5678\t2\t0\n",
        )
        .unwrap();

        let output = run_session(config_for(dir.path()), "1\nCara\n4321\n2\n4\n");
        assert!(output.contains("Account No: 1001"));
        assert_eq!(
            read_data_file(&dir, "accounts.txt"),
            "1000\tAda\t10.0000\t1234\t1\t0\n1001\tCara\t0\t4321\t2\t0\n"
        );
    }
}
