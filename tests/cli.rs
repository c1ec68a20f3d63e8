use std::fs;
use std::path::Path;
use std::process::Command;

use roster_tools::io::excel_write;
use roster_tools::model::{Cell, Table};
use tempfile::tempdir;

fn roster_tools() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_roster-tools"));
    cmd.env("RUST_LOG", "off");
    cmd
}

fn write_workbook(path: &Path, name: &str) {
    let table = Table::from_records(vec![vec![("Participant Name", Cell::from(name))]]);
    let bytes = excel_write::render_workbook(&table).expect("workbook rendered");
    fs::write(path, bytes).expect("workbook written");
}

#[test]
fn missing_source_reports_load_failure_and_exits_1() {
    let dir = tempdir().expect("temporary directory");
    let second = dir.path().join("second.xlsx");
    write_workbook(&second, "Grace");
    let output = dir.path().join("combined.xlsx");

    let result = roster_tools()
        .arg("--source1")
        .arg(dir.path().join("absent.xlsx"))
        .arg("--source2")
        .arg(&second)
        .arg("--output")
        .arg(&output)
        .output()
        .expect("failed to run roster-tools");

    let stdout = String::from_utf8_lossy(&result.stdout);
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert_eq!(result.status.code(), Some(1), "stderr: {stderr}");
    assert!(
        stderr.contains("Error loading spreadsheets:") && stderr.contains("absent.xlsx"),
        "stderr: {stderr}"
    );
    assert!(!stdout.contains("loaded successfully"), "stdout: {stdout}");
    assert!(!output.exists());
}

#[test]
fn successful_run_prints_both_status_lines() {
    let dir = tempdir().expect("temporary directory");
    let first = dir.path().join("first.xlsx");
    let second = dir.path().join("second.xlsx");
    write_workbook(&first, "Ada");
    write_workbook(&second, "Grace");
    let output = dir.path().join("combined.xlsx");

    let result = roster_tools()
        .arg("--source1")
        .arg(&first)
        .arg("--source2")
        .arg(&second)
        .arg("--output")
        .arg(&output)
        .output()
        .expect("failed to run roster-tools");

    let stdout = String::from_utf8_lossy(&result.stdout);
    assert_eq!(
        result.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&result.stderr)
    );
    assert!(stdout.contains("Spreadsheets loaded successfully."), "stdout: {stdout}");
    assert!(
        stdout.contains(&format!("Data saved to {}.", output.display())),
        "stdout: {stdout}"
    );
    assert!(output.exists());
}

#[test]
fn unwritable_output_reports_save_failure_and_exits_1() {
    let dir = tempdir().expect("temporary directory");
    let first = dir.path().join("first.xlsx");
    let second = dir.path().join("second.xlsx");
    write_workbook(&first, "Ada");
    write_workbook(&second, "Grace");

    let result = roster_tools()
        .arg("--source1")
        .arg(&first)
        .arg("--source2")
        .arg(&second)
        .arg("--output")
        .arg(dir.path().join("missing-dir").join("combined.xlsx"))
        .output()
        .expect("failed to run roster-tools");

    let stdout = String::from_utf8_lossy(&result.stdout);
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert_eq!(result.status.code(), Some(1), "stderr: {stderr}");
    assert!(stdout.contains("Spreadsheets loaded successfully."), "stdout: {stdout}");
    assert!(stderr.contains("Failed to save data:"), "stderr: {stderr}");
}
