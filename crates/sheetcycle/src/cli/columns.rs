//! `sheetcycle columns` command implementation.

use std::path::PathBuf;

use anyhow::Result;
use colored::Colorize;
use sheetcycle::columns::available_columns;
use sheetcycle::workbook;

/// List every sheet with its columns, then the combined column list.
pub fn run(files: &[PathBuf]) -> Result<()> {
    let sheets = workbook::load_all(files)?;

    println!("{}", "Sheets:".bold());
    for sheet in &sheets {
        let columns: Vec<&str> = sheet.column_names().collect();
        println!(
            "  {} {}",
            sheet.name.white().bold(),
            format!("({} rows) {}", sheet.rows.len(), columns.join(", ")).dimmed()
        );
    }

    println!();
    println!("{}", "Columns:".bold());
    for (i, column) in available_columns(&sheets)?.iter().enumerate() {
        println!("  {}. {column}", i + 1);
    }

    Ok(())
}
