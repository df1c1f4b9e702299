//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use rust_xlsxwriter::Workbook;

/// A sheet to write: name, then rows (the first row is the header).
pub type SheetSpec<'a> = (&'a str, &'a [&'a [&'a str]]);

/// Write an `.xlsx` file with one worksheet per entry, in order.
///
/// Empty strings are left as blank cells.
pub fn write_xlsx(path: &Path, sheets: &[SheetSpec<'_>]) {
    let mut workbook = Workbook::new();
    for (name, rows) in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(*name).expect("valid sheet name");
        for (r, row) in rows.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                if value.is_empty() {
                    continue;
                }
                let r = u32::try_from(r).expect("row fits");
                let c = u16::try_from(c).expect("column fits");
                worksheet.write_string(r, c, *value).expect("write cell");
            }
        }
    }
    workbook.save(path).expect("save workbook");
}

/// Write a CSV file from rows (the first row is the header).
pub fn write_csv(path: &Path, rows: &[&[&str]]) {
    let mut writer = csv::Writer::from_path(path).expect("create csv");
    for row in rows {
        writer.write_record(*row).expect("write record");
    }
    writer.flush().expect("flush csv");
}

/// The three-sheet sample: two cycles and one acyclic sheet.
pub fn sample_workbook(dir: &Path) -> PathBuf {
    let path = dir.join("sample_dependencies.xlsx");
    write_xlsx(
        &path,
        &[
            (
                "ProjectTasks",
                &[
                    &["Task", "Depends On"],
                    &["Task A", "Task B"],
                    &["Task B", "Task C"],
                    &["Task C", "Task A"],
                    &["Task D", "Task B"],
                ],
            ),
            (
                "Modules",
                &[
                    &["Task", "Depends On"],
                    &["Module X", "Module Y"],
                    &["Module Y", "Module Z"],
                    &["Module Z", "Module X"],
                ],
            ),
            (
                "NoCycles",
                &[
                    &["Task", "Depends On"],
                    &["Step 1", "Step 2"],
                    &["Step 2", "Step 3"],
                ],
            ),
        ],
    );
    path
}

/// Write a file with the given contents.
pub fn write_file(path: &Path, contents: &str) {
    fs::write(path, contents).expect("write file");
}

/// Run the sheetcycle binary in `dir` with colors and logging turned off.
pub fn run_sheetcycle_in_dir(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_sheetcycle"))
        .args(args)
        .current_dir(dir)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute sheetcycle binary")
}

/// Captured stdout as a string.
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Captured stderr as a string.
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
