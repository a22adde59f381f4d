use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use tempfile::TempDir;

const BIN_NAME: &str = "finance";

fn finance(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin(BIN_NAME).expect("binary exists");
    cmd.env("FINANCE_TRACKER_DATA_DIR", dir.path());
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn summary_on_fresh_data_shows_zero_safe_to_spend() {
    let dir = TempDir::new().unwrap();
    finance(&dir)
        .arg("summary")
        .assert()
        .success()
        .stdout(contains("Safe to spend").and(contains("$0.00")));
}

#[test]
fn income_and_recurring_payment_flow() {
    let dir = TempDir::new().unwrap();

    finance(&dir)
        .args(["transaction", "add", "Bank", "1,000,000", "--income"])
        .assert()
        .success()
        .stdout(contains("Recorded income"));
    finance(&dir)
        .args(["recurring", "add", "Internet", "80000", "--due-day", "5", "--account", "bank"])
        .assert()
        .success();
    finance(&dir)
        .args(["recurring", "pay", "Internet"])
        .assert()
        .success()
        .stdout(contains("Paid Internet"));
    finance(&dir)
        .args(["recurring", "pay", "Internet"])
        .assert()
        .success()
        .stdout(contains("already paid"));

    finance(&dir)
        .arg("summary")
        .assert()
        .success()
        .stdout(contains("$920000.00"));
}

#[test]
fn transfer_shows_in_account_list() {
    let dir = TempDir::new().unwrap();
    finance(&dir)
        .args(["txn", "add", "bank", "300", "--income"])
        .assert()
        .success();
    finance(&dir)
        .args(["transfer", "Bank", "Cash", "120"])
        .assert()
        .success();

    finance(&dir)
        .args(["account", "list"])
        .assert()
        .success()
        .stdout(contains("$180.00").and(contains("$120.00")).and(contains("$300.00")));
}

#[test]
fn unknown_account_is_an_error() {
    let dir = TempDir::new().unwrap();
    finance(&dir)
        .args(["transaction", "add", "Brokerage", "10"])
        .assert()
        .failure()
        .stderr(contains("Account not found: Brokerage"));
}

#[test]
fn export_then_import_round_trips() {
    let dir = TempDir::new().unwrap();
    let export = dir.path().join("export.json");

    finance(&dir)
        .args(["goal", "add", "Vacation", "500", "--saved", "100"])
        .assert()
        .success();
    finance(&dir)
        .arg("export")
        .arg(&export)
        .assert()
        .success();
    finance(&dir).args(["reset", "--force"]).assert().success();
    finance(&dir)
        .args(["goal", "list"])
        .assert()
        .success()
        .stdout(contains("No goals found."));

    finance(&dir)
        .arg("import")
        .arg(&export)
        .assert()
        .success()
        .stdout(contains("Imported"));
    finance(&dir)
        .args(["goal", "list"])
        .assert()
        .success()
        .stdout(contains("Vacation").and(contains("20%")));
}

#[test]
fn bad_import_is_rejected() {
    let dir = TempDir::new().unwrap();
    let bad = dir.path().join("bad.json");
    std::fs::write(&bad, "{not json").unwrap();

    finance(&dir)
        .arg("import")
        .arg(&bad)
        .assert()
        .failure()
        .stderr(contains("Import error"));
    finance(&dir)
        .args(["account", "list"])
        .assert()
        .success()
        .stdout(contains("Cash").and(contains("Bank")));
}

#[test]
fn reset_takes_a_backup_first() {
    let dir = TempDir::new().unwrap();
    finance(&dir).args(["reset", "--force"]).assert().success();

    finance(&dir)
        .args(["backup", "list"])
        .assert()
        .success()
        .stdout(contains("backup-"));
}

#[test]
fn csv_export_to_stdout() {
    let dir = TempDir::new().unwrap();
    finance(&dir)
        .args(["txn", "add", "Cash", "12.50", "--category", "food", "--description", "Lunch"])
        .assert()
        .success();

    finance(&dir)
        .args(["export", "--format", "csv"])
        .assert()
        .success()
        .stdout(contains("ID,Date,Type,Account").and(contains("Expense,Cash,Food,Lunch,12.50")));
}

#[test]
fn config_set_persists() {
    let dir = TempDir::new().unwrap();
    finance(&dir)
        .args(["config", "set", "currency", "€"])
        .assert()
        .success();

    finance(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(contains("currency_symbol:  €"));
    finance(&dir)
        .arg("summary")
        .assert()
        .success()
        .stdout(contains("€0.00"));
}
