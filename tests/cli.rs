use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn payperiod(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("payperiod").unwrap();
    cmd.env("PAYPERIOD_DATA_DIR", data_dir.path())
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_init_writes_settings() {
    let dir = TempDir::new().unwrap();

    payperiod(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialization complete!"));

    assert!(dir.path().join("config.json").exists());
    assert!(dir.path().join("data").join("expenses.json").exists());
}

#[test]
fn test_config_shows_defaults() {
    let dir = TempDir::new().unwrap();

    payperiod(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Salary source:           salary"))
        .stdout(predicate::str::contains("Max generated instances: 1000"));
}

#[test]
fn test_expense_add_and_list() {
    let dir = TempDir::new().unwrap();

    payperiod(&dir)
        .args(["expense", "add", "Groceries", "84.20", "--date", "2024-03-09"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added expense Groceries $84.20 due 2024-03-09"));

    payperiod(&dir)
        .args(["expense", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2024"))
        .stdout(predicate::str::contains("March"))
        .stdout(predicate::str::contains("Groceries"));
}

#[test]
fn test_monthly_recurring_expense_clamps_month_end() {
    let dir = TempDir::new().unwrap();

    payperiod(&dir)
        .args([
            "expense",
            "add-recurring",
            "Rent",
            "1200",
            "--frequency",
            "monthly",
            "--start",
            "2024-01-31",
            "--end",
            "2024-04-30",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated 4 occurrences"));

    payperiod(&dir)
        .args(["expense", "list", "--from", "2024-02-01", "--to", "2024-02-29"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-02-29"))
        .stdout(predicate::str::contains("Rent"));
}

#[test]
fn test_bi_weekly_rejected_for_expenses() {
    let dir = TempDir::new().unwrap();

    payperiod(&dir)
        .args([
            "expense",
            "add-recurring",
            "Gym",
            "40",
            "-f",
            "bi-weekly",
            "-s",
            "2024-01-01",
            "-e",
            "2024-06-01",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not supported for expenses"));

    payperiod(&dir)
        .args(["expense", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No expenses recorded."));
}

#[test]
fn test_reversed_range_fails() {
    let dir = TempDir::new().unwrap();

    payperiod(&dir)
        .args([
            "expense",
            "add-recurring",
            "Gym",
            "40",
            "-f",
            "weekly",
            "-s",
            "2024-03-01",
            "-e",
            "2024-02-01",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date range"));
}

#[test]
fn test_open_ended_recurring_requires_end_date() {
    let dir = TempDir::new().unwrap();

    payperiod(&dir)
        .args(["income", "add-recurring", "salary", "2000", "-f", "weekly", "-s", "2024-01-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("end_date"));
}

#[test]
fn test_paycheck_report_remaining_per_period() {
    let dir = TempDir::new().unwrap();

    for (payer, date) in [("Acme", "2024-01-05"), ("Acme", "2024-01-19")] {
        payperiod(&dir)
            .args(["paycheck", "add", payer, "2000", "--date", date])
            .assert()
            .success();
    }
    for (name, amount, due) in [("Power", "500", "2024-01-10"), ("Phone", "300", "2024-01-20")] {
        payperiod(&dir)
            .args(["bill", "add", name, amount, "--due", due])
            .assert()
            .success();
    }

    payperiod(&dir)
        .args(["paycheck", "report"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Period 2024-01-05 before 2024-01-19"))
        .stdout(predicate::str::contains("Remaining $1500.00"))
        .stdout(predicate::str::contains("Period 2024-01-19 onward"))
        .stdout(predicate::str::contains("Remaining $1700.00"));
}

#[test]
fn test_income_report_uses_salary_anchor() {
    let dir = TempDir::new().unwrap();

    payperiod(&dir)
        .args(["income", "add", "salary", "2000", "-d", "2024-01-01"])
        .assert()
        .success();
    payperiod(&dir)
        .args(["income", "add", "freelance", "250", "-d", "2024-01-08"])
        .assert()
        .success();
    payperiod(&dir)
        .args(["expense", "add", "Rent", "1200", "-d", "2024-01-03"])
        .assert()
        .success();

    payperiod(&dir)
        .args(["income", "report"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Period 2024-01-01 onward (salary"))
        .stdout(predicate::str::contains("freelance"))
        .stdout(predicate::str::contains("Remaining $1050.00"));
}

#[test]
fn test_export_bills_json_to_stdout() {
    let dir = TempDir::new().unwrap();

    payperiod(&dir)
        .args(["bill", "add", "Water", "30", "--due", "2024-02-03"])
        .assert()
        .success();

    payperiod(&dir)
        .args(["export", "bills", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"dataset\": \"bills\""))
        .stdout(predicate::str::contains("\"month_name\": \"February\""));
}

#[test]
fn test_export_expenses_csv_to_file() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("expenses.csv");

    payperiod(&dir)
        .args(["expense", "add", "Coffee", "4.50", "-d", "2024-01-02"])
        .assert()
        .success();

    payperiod(&dir)
        .args(["export", "expenses", "--format", "csv", "--output"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 1 expenses as csv"));

    let contents = std::fs::read_to_string(&output).unwrap();
    assert!(contents.starts_with("year,month,date,id,name,description,amount,settled,kind"));
    assert!(contents.contains("2024,January,2024-01-02"));
}

#[test]
fn test_audit_records_changes() {
    let dir = TempDir::new().unwrap();

    payperiod(&dir)
        .args(["bill", "add", "Internet", "60", "--due", "2024-02-15"])
        .assert()
        .success();

    payperiod(&dir)
        .args(["audit", "--limit", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("CREATE"))
        .stdout(predicate::str::contains("Internet"));
}

#[test]
fn test_unknown_id_is_reported() {
    let dir = TempDir::new().unwrap();

    payperiod(&dir)
        .args(["bill", "paid", "bil-00000000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}
