use assert_cmd::Command;
use predicates::prelude::*;

fn write_csv(dir: &tempfile::TempDir, name: &str, content: &str) -> String {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path.to_string_lossy().to_string()
}

// Explicit dates everywhere so the output never depends on the wall clock.
const SHEET: &str = "ITEM,DATA,VALOR,PARCELAS,CATEGORIA,FORMA DE PAGAMENTO\n\
Notebook,15/03/2024,\"R$ 1200,00\",1/3,Eletrônicos,Nubank\n\
Mercado,05/03/2024,\"350,00\",,Alimentação,Débito\n";

#[test]
fn summary_reports_month_totals() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_csv(&dir, "gastos.csv", SHEET);
    Command::cargo_bin("parcela")
        .unwrap()
        .args(["summary", &file, "--month", "2024-03", "--due-day", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-03"))
        .stdout(predicate::str::contains("R$ 1.550,00"))
        .stdout(predicate::str::contains("R$ 775,00"))
        .stdout(predicate::str::contains("Notebook"))
        .stdout(predicate::str::contains("15/03/2024"))
        .stdout(predicate::str::contains("Nubank"));
}

#[test]
fn summary_defaults_to_most_recent_month() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_csv(&dir, "gastos.csv", SHEET);
    // Most recent month is 2024-05: only the third Notebook installment.
    Command::cargo_bin("parcela")
        .unwrap()
        .args(["summary", &file, "--due-day", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-05"))
        .stdout(predicate::str::contains("3/3"))
        .stdout(predicate::str::contains("10/05/2024"));
}

#[test]
fn months_listed_most_recent_first() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_csv(&dir, "gastos.csv", SHEET);
    Command::cargo_bin("parcela")
        .unwrap()
        .args(["months", &file, "--due-day", "10"])
        .assert()
        .success()
        .stdout("2024-05\n2024-04\n2024-03\n");
}

#[test]
fn expand_writes_one_csv_row_per_installment() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_csv(&dir, "gastos.csv", SHEET);
    Command::cargo_bin("parcela")
        .unwrap()
        .args(["expand", &file, "--due-day", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "ITEM,PARCELA,VALOR,CATEGORIA,FORMA DE PAGAMENTO,DATA",
        ))
        // the amount repeats on every installment, never divided
        .stdout(predicate::str::contains("1200.00").count(3))
        .stdout(predicate::str::contains("Notebook,2/3,1200.00,Eletrônicos,Nubank,10/04/2024"))
        .stdout(predicate::str::contains("Mercado,1/1,350.00"));
}

#[test]
fn expand_emits_json_records() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_csv(&dir, "gastos.csv", SHEET);
    Command::cargo_bin("parcela")
        .unwrap()
        .args(["expand", &file, "--format", "json", "--due-day", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"due_date\": \"2024-04-10\""))
        .stdout(predicate::str::contains("\"payment_method\": \"Nubank\""));
}

#[test]
fn expand_rejects_unknown_format() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_csv(&dir, "gastos.csv", SHEET);
    Command::cargo_bin("parcela")
        .unwrap()
        .args(["expand", &file, "--format", "xml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: unknown format: xml"));
}

#[test]
fn missing_required_column_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_csv(&dir, "gastos.csv", "ITEM,VALOR\nMercado,\"100,00\"\n");
    Command::cargo_bin("parcela")
        .unwrap()
        .args(["summary", &file])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "Error: Missing required column: FORMA DE PAGAMENTO",
        ));
}

#[test]
fn header_only_sheet_reports_empty_state() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_csv(
        &dir,
        "gastos.csv",
        "ITEM,DATA,VALOR,PARCELAS,CATEGORIA,FORMA DE PAGAMENTO\n",
    );
    Command::cargo_bin("parcela")
        .unwrap()
        .args(["summary", &file])
        .assert()
        .success()
        .stdout(predicate::str::contains("No valid expense rows"));
}

#[test]
fn unreadable_file_is_fatal() {
    Command::cargo_bin("parcela")
        .unwrap()
        .args(["summary", "/nonexistent/gastos.csv"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error:"));
}
