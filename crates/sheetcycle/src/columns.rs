//! Column discovery and row extraction.
//!
//! Turns loaded sheets into the `(item, dependency, sheet)` rows the graph
//! core consumes. Sheets without both chosen columns are skipped.

use sheetcycle_graph::RawRow;

use crate::error::{Error, Result};
use crate::workbook::Sheet;

/// Every distinct header name across all sheets, in first-seen order.
///
/// Fails when fewer than two columns exist, since an item column and a
/// dependency column are both needed.
///
/// # Errors
///
/// Returns [`Error::NotEnoughColumns`] when fewer than two distinct header
/// names exist.
pub fn available_columns(sheets: &[Sheet]) -> Result<Vec<String>> {
    let mut columns: Vec<String> = Vec::new();
    for name in sheets.iter().flat_map(Sheet::column_names) {
        if !columns.iter().any(|c| c == name) {
            columns.push(name.to_string());
        }
    }

    if columns.len() < 2 {
        return Err(Error::NotEnoughColumns {
            found: columns.len(),
        });
    }
    Ok(columns)
}

/// Read the chosen columns from every sheet that has both, in sheet then row order.
#[must_use]
pub fn rows_for_columns(sheets: &[Sheet], source_column: &str, target_column: &str) -> Vec<RawRow> {
    let mut out = Vec::new();

    for sheet in sheets {
        let (Some(src_idx), Some(tgt_idx)) = (
            sheet.column_index(source_column),
            sheet.column_index(target_column),
        ) else {
            tracing::info!(
                sheet = %sheet.name,
                source_column,
                target_column,
                "Sheet lacks the chosen columns, skipping"
            );
            continue;
        };

        let before = out.len();
        out.extend(sheet.rows.iter().map(|row| {
            RawRow::from_cells(
                row.get(src_idx).cloned().flatten(),
                row.get(tgt_idx).cloned().flatten(),
                sheet.name.as_str(),
            )
        }));
        tracing::debug!(sheet = %sheet.name, rows = out.len() - before, "Collected rows");
    }

    out
}
