use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn ledger(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("ledger").unwrap();
    cmd.env("HOUSEHOLD_LEDGER_CONFIG_DIR", config_dir.path())
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn shell_records_entries_and_reports_balance() {
    let dir = TempDir::new().unwrap();
    ledger(&dir)
        .write_stdin("add expense 食費 500\nadd income 給料 3000\nsummary\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Added ent-"))
        .stdout(predicate::str::contains("食費"))
        .stdout(predicate::str::contains("Balance: 2,500"));
}

#[test]
fn shell_reports_errors_and_keeps_going() {
    let dir = TempDir::new().unwrap();
    ledger(&dir)
        .write_stdin("add expense Food 0\nrestore ent-00000000\nadd income Gift 10\nbalance\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Error: Validation error"))
        .stdout(predicate::str::contains("Error: Trashed entry not found"))
        .stdout(predicate::str::contains("Balance: 10"));
}

#[test]
fn sample_flag_seeds_the_household() {
    let dir = TempDir::new().unwrap();
    ledger(&dir)
        .arg("--sample")
        .write_stdin("summary\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("給料"))
        .stdout(predicate::str::contains("Income:  350,000"))
        .stdout(predicate::str::contains("Expense: 165,000"))
        .stdout(predicate::str::contains("Balance: 185,000"));
}

#[test]
fn trash_starts_empty_and_sweep_reports_nothing() {
    let dir = TempDir::new().unwrap();
    ledger(&dir)
        .write_stdin("add expense Rent 800\ntrash\nsweep\nexport csv\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Trash is empty."))
        .stdout(predicate::str::contains("Purged 0 expired entries"))
        .stdout(predicate::str::contains("id,kind,category,amount,created_at"))
        .stdout(predicate::str::contains(",expense,Rent,800.00,"));
}

#[test]
fn config_init_writes_settings() {
    let dir = TempDir::new().unwrap();
    ledger(&dir)
        .args(["config", "--init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote default config"));

    assert!(dir.path().join("config.json").exists());

    ledger(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Sweep interval:   3600s"));
}

#[test]
fn invalid_config_fails_at_startup() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("config.json"), r#"{"sweep_interval_secs": 0}"#).unwrap();

    ledger(&dir)
        .arg("config")
        .assert()
        .failure()
        .stderr(predicate::str::contains("sweep_interval_secs"));
}
