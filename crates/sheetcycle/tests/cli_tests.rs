//! Integration tests for the sheetcycle CLI.
//!
//! These tests run the built binary end to end against generated workbooks.

use rstest::{fixture, rstest};
use tempfile::TempDir;

mod common;
use common::{
    run_sheetcycle_in_dir, sample_workbook, stderr, stdout, write_csv, write_file,
};

// ============================================================================
// Test Fixtures
// ============================================================================

/// Provides a fresh temporary directory for each test
#[fixture]
fn temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp directory")
}

/// Provides a directory holding the three-sheet sample workbook
#[fixture]
fn sample_dir() -> TempDir {
    let temp = TempDir::new().expect("Failed to create temp directory");
    sample_workbook(temp.path());
    temp
}

const SAMPLE: &str = "sample_dependencies.xlsx";

// ============================================================================
// Help and Version Tests
// ============================================================================

#[rstest]
fn test_cli_help(temp_dir: TempDir) {
    let output = run_sheetcycle_in_dir(temp_dir.path(), &["--help"]);

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("Usage:"));
    assert!(out.contains("scan"));
    assert!(out.contains("columns"));
}

#[rstest]
fn test_cli_version(temp_dir: TempDir) {
    let output = run_sheetcycle_in_dir(temp_dir.path(), &["--version"]);

    assert!(output.status.success());
    assert!(stdout(&output).contains("0.1.0"));
}

// ============================================================================
// Scan Tests
// ============================================================================

#[rstest]
fn test_scan_reports_cycles_with_sheets(sample_dir: TempDir) {
    let output = run_sheetcycle_in_dir(
        sample_dir.path(),
        &["scan", SAMPLE, "--source", "Task", "--target", "Depends On"],
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("Sheets scanned : 3"));
    assert!(out.contains("Found 2 cyclic dependencies:"));
    assert!(out.contains("Cycle 1: Task A -> Task B -> Task C -> Task A"));
    assert!(out.contains("Cycle 2: Module X -> Module Y -> Module Z -> Module X"));
    assert!(out.contains("Task C -> Task A  (found in sheet: ProjectTasks)"));
    assert!(out.contains("Module Z -> Module X  (found in sheet: Modules)"));
}

#[rstest]
fn test_scan_json_output(sample_dir: TempDir) {
    let output = run_sheetcycle_in_dir(
        sample_dir.path(),
        &[
            "scan", SAMPLE, "-s", "task", "-t", "depends on", "--format", "json",
        ],
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["cycle_count"], 2);
    assert_eq!(
        json["cycles"][1]["chain"],
        serde_json::json!(["Module X", "Module Y", "Module Z"])
    );
    assert_eq!(
        json["cycles"][0]["links"][2],
        serde_json::json!({ "from": "Task C", "to": "Task A", "sheets": ["ProjectTasks"] })
    );
    assert_eq!(json["summary"]["source_column"], "task");
}

#[rstest]
fn test_scan_without_cycles(temp_dir: TempDir) {
    write_csv(
        &temp_dir.path().join("deps.csv"),
        &[&["Task", "Depends On"], &["A", "B"], &["B", "C"], &["C", "D"]],
    );

    let output = run_sheetcycle_in_dir(
        temp_dir.path(),
        &["scan", "deps.csv", "-s", "Task", "-t", "Depends On", "--fail-on-cycles"],
    );

    assert!(output.status.success());
    assert!(stdout(&output).contains("No cyclic dependencies found."));
}

#[rstest]
fn test_fail_on_cycles_sets_exit_code(sample_dir: TempDir) {
    let output = run_sheetcycle_in_dir(
        sample_dir.path(),
        &["scan", SAMPLE, "-s", "Task", "-t", "Depends On", "--fail-on-cycles"],
    );

    assert_eq!(output.status.code(), Some(2));
}

#[rstest]
fn test_scan_pipe_separator(temp_dir: TempDir) {
    write_csv(
        &temp_dir.path().join("deps.csv"),
        &[&["Item", "Needs"], &["A", "B | C |"], &["C", "A"]],
    );

    let output = run_sheetcycle_in_dir(
        temp_dir.path(),
        &["scan", "deps.csv", "-s", "Item", "-t", "Needs", "--separator", "pipe"],
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("Cycle 1: A -> C -> A"));
    assert!(out.contains("Total links    : 3"));
}

#[rstest]
fn test_scan_reads_config_file(temp_dir: TempDir) {
    write_csv(
        &temp_dir.path().join("deps.csv"),
        &[&["Task", "Depends On"], &["A", "A"]],
    );
    write_file(
        &temp_dir.path().join("sheetcycle.yaml"),
        "source-column: Task\ntarget-column: Depends On\nseparator: none\n",
    );

    let output = run_sheetcycle_in_dir(temp_dir.path(), &["scan", "deps.csv"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("Separator      : none"));
    assert!(out.contains("Cycle 1: A -> A"));
}

#[rstest]
fn test_flags_override_config_file(temp_dir: TempDir) {
    write_csv(
        &temp_dir.path().join("deps.csv"),
        &[&["Task", "Module", "Depends On"], &["A", "M", "B"], &["B", "N", "A"]],
    );
    write_file(
        &temp_dir.path().join("custom.yaml"),
        "source-column: Module\ntarget-column: Depends On\n",
    );

    let output = run_sheetcycle_in_dir(
        temp_dir.path(),
        &["scan", "deps.csv", "--config", "custom.yaml", "--source", "Task"],
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Cycle 1: A -> B -> A"));
}

// ============================================================================
// Error Tests
// ============================================================================

#[rstest]
fn test_missing_columns_without_terminal_fails(sample_dir: TempDir) {
    let output = run_sheetcycle_in_dir(sample_dir.path(), &["scan", SAMPLE]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("--source is required"));
}

#[rstest]
fn test_unknown_columns_report_no_data(sample_dir: TempDir) {
    let output = run_sheetcycle_in_dir(
        sample_dir.path(),
        &["scan", SAMPLE, "-s", "Module", "-t", "Requires", "--no-input"],
    );

    assert!(!output.status.success());
    assert!(stderr(&output).contains("no data found with columns 'Module' and 'Requires'"));
}

#[rstest]
#[case::flags(&["-s", "Task", "-t", "task"], None)]
#[case::config(&[], Some("source-column: Task\ntarget-column: ' TASK'\n"))]
fn test_same_source_and_target_column_is_rejected(
    temp_dir: TempDir,
    #[case] flags: &[&str],
    #[case] config: Option<&str>,
) {
    write_csv(
        &temp_dir.path().join("deps.csv"),
        &[&["Task", "Depends On"], &["A", "B"], &["B", "C"]],
    );
    if let Some(config) = config {
        write_file(&temp_dir.path().join("sheetcycle.yaml"), config);
    }

    let mut args = vec!["scan", "deps.csv", "--no-input"];
    args.extend_from_slice(flags);
    let output = run_sheetcycle_in_dir(temp_dir.path(), &args);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("source and target columns must differ"));
    assert!(!stdout(&output).contains("Cycle"));
}

#[rstest]
fn test_missing_file_fails(temp_dir: TempDir) {
    let output = run_sheetcycle_in_dir(
        temp_dir.path(),
        &["scan", "nope.xlsx", "-s", "Task", "-t", "Depends On"],
    );

    assert!(!output.status.success());
    assert!(stderr(&output).contains("nope.xlsx"));
}

#[rstest]
fn test_invalid_separator_is_rejected(sample_dir: TempDir) {
    let output = run_sheetcycle_in_dir(
        sample_dir.path(),
        &["scan", SAMPLE, "-s", "Task", "-t", "Depends On", "--separator", "tab"],
    );

    assert!(!output.status.success());
}

// ============================================================================
// Columns Tests
// ============================================================================

#[rstest]
fn test_columns_lists_sheets_and_columns(sample_dir: TempDir) {
    let output = run_sheetcycle_in_dir(sample_dir.path(), &["columns", SAMPLE]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("ProjectTasks"));
    assert!(out.contains("NoCycles"));
    assert!(out.contains("1. Task"));
    assert!(out.contains("2. Depends On"));
}

#[rstest]
fn test_columns_single_column_fails(temp_dir: TempDir) {
    write_csv(&temp_dir.path().join("one.csv"), &[&["Task"], &["A"]]);

    let output = run_sheetcycle_in_dir(temp_dir.path(), &["columns", "one.csv"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("at least 2 columns"));
}
