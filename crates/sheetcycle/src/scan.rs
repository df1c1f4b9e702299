//! One full run: rows → graph → cycle analysis, plus the summary shown to users.

use serde::Serialize;
use sheetcycle_graph::{analyze, CycleAnalysis, Graph, Separator};

use crate::columns::rows_for_columns;
use crate::config::Selection;
use crate::error::{Error, Result};
use crate::workbook::Sheet;

/// What was read, printed ahead of the cycles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Sheets loaded, including ones without the chosen columns.
    pub sheets_scanned: usize,
    /// Sheets that contributed at least one dependency.
    pub sheets_with_dependencies: usize,
    /// Header of the item-name column.
    pub source_column: String,
    /// Header of the dependency column.
    pub target_column: String,
    /// How dependency cells were split.
    pub separator: Separator,
    /// Distinct items.
    pub unique_items: usize,
    /// Distinct dependency links.
    pub total_links: usize,
    /// Strongly-connected groups of items that contain a cycle.
    pub cyclic_groups: usize,
}

/// Summary and analysis of one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanReport {
    /// What was read.
    pub summary: Summary,
    /// The cycles found.
    #[serde(flatten)]
    pub analysis: CycleAnalysis,
}

/// Build the dependency graph from `sheets` and look for cycles.
///
/// Fails with [`Error::EmptyInput`] when the chosen columns produce no
/// dependency anywhere, which usually means a misspelled column name.
///
/// # Errors
///
/// Returns [`Error::EmptyInput`] as described above.
pub fn run(sheets: &[Sheet], selection: &Selection) -> Result<ScanReport> {
    let rows = rows_for_columns(sheets, &selection.source_column, &selection.target_column);
    let graph = Graph::from_rows(&rows, selection.separator);

    if graph.is_empty() {
        return Err(Error::EmptyInput {
            source_column: selection.source_column.clone(),
            target_column: selection.target_column.clone(),
        });
    }

    let stats = graph.stats();
    tracing::info!(
        rows = rows.len(),
        items = stats.items,
        links = stats.links,
        occurrences = stats.occurrences,
        "Dependency graph ready"
    );

    let summary = Summary {
        sheets_scanned: sheets.len(),
        sheets_with_dependencies: stats.sheets,
        source_column: selection.source_column.clone(),
        target_column: selection.target_column.clone(),
        separator: selection.separator,
        unique_items: stats.items,
        total_links: stats.links,
        cyclic_groups: graph.cyclic_components().len(),
    };

    Ok(ScanReport {
        summary,
        analysis: analyze(&graph),
    })
}
