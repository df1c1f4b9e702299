//! Loading spreadsheet files into materialized sheets.
//!
//! Excel and OpenDocument workbooks are read with `calamine`, every sheet in
//! workbook order. A CSV file is a single sheet named after the file stem.
//! Cells are kept as optional text: empty cells become `None`, numbers and
//! other values are coerced to their display form.

use std::path::{Path, PathBuf};

use calamine::{open_workbook_auto, Data, Reader};

use crate::error::{Error, Result};

/// One sheet: its header row and the data rows below it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sheet {
    /// Sheet name used as edge provenance.
    pub name: String,
    /// The first row of the sheet.
    pub header: Vec<Option<String>>,
    /// Every row after the header, in sheet order.
    pub rows: Vec<Vec<Option<String>>>,
}

impl Sheet {
    /// Build a sheet from a header and rows of text cells.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        header: Vec<Option<String>>,
        rows: Vec<Vec<Option<String>>>,
    ) -> Self {
        Self {
            name: name.into(),
            header,
            rows,
        }
    }

    /// Header names, trimmed, with blanks removed.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.header
            .iter()
            .filter_map(|cell| cell.as_deref().map(str::trim))
            .filter(|name| !name.is_empty())
    }

    /// Position of a header column, matched with [`same_column`].
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.header
            .iter()
            .position(|cell| cell.as_deref().is_some_and(|h| same_column(h, name)))
    }
}

/// Whether two header names refer to the same column: equal after trimming,
/// ignoring case.
#[must_use]
pub fn same_column(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

/// Supported input formats, by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Spreadsheet,
    Csv,
}

impl Format {
    fn detect(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Ok(Self::Spreadsheet),
            "csv" => Ok(Self::Csv),
            _ => Err(Error::UnsupportedFile {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// Load every sheet of every file, in argument order.
///
/// With more than one file, sheet names are qualified as `file:sheet` so
/// provenance stays unambiguous when workbooks share sheet names.
///
/// # Errors
///
/// Returns the first error from [`load`].
pub fn load_all(paths: &[PathBuf]) -> Result<Vec<Sheet>> {
    let qualify = paths.len() > 1;
    let mut sheets = Vec::new();

    for path in paths {
        let loaded = load(path)?;
        if qualify {
            let file_name = path
                .file_name()
                .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
            sheets.extend(loaded.into_iter().map(|mut sheet| {
                sheet.name = format!("{file_name}:{}", sheet.name);
                sheet
            }));
        } else {
            sheets.extend(loaded);
        }
    }

    Ok(sheets)
}

/// Load every sheet of one file.
///
/// # Errors
///
/// Returns [`Error::Workbook`] if the file is missing or cannot be parsed,
/// and [`Error::UnsupportedFile`] for an unknown extension.
pub fn load(path: &Path) -> Result<Vec<Sheet>> {
    if !path.is_file() {
        return Err(Error::workbook(path, "file not found"));
    }

    let sheets = match Format::detect(path)? {
        Format::Spreadsheet => load_spreadsheet(path)?,
        Format::Csv => vec![load_csv(path)?],
    };

    tracing::info!(
        path = %path.display(),
        sheets = sheets.len(),
        "Loaded input file"
    );
    Ok(sheets)
}

fn load_spreadsheet(path: &Path) -> Result<Vec<Sheet>> {
    let mut workbook = open_workbook_auto(path).map_err(|e| Error::workbook(path, e))?;
    let sheet_names = workbook.sheet_names().to_owned();

    let mut sheets = Vec::with_capacity(sheet_names.len());
    for sheet_name in sheet_names {
        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| Error::workbook(path, format!("sheet '{sheet_name}': {e}")))?;

        let mut rows = range
            .rows()
            .map(|row| row.iter().map(cell_text).collect::<Vec<_>>());
        let header = rows.next().unwrap_or_default();
        let rows: Vec<Vec<Option<String>>> = rows.collect();

        tracing::debug!(sheet = %sheet_name, rows = rows.len(), "Read sheet");
        sheets.push(Sheet::new(sheet_name, header, rows));
    }

    Ok(sheets)
}

fn load_csv(path: &Path) -> Result<Sheet> {
    let name = path
        .file_stem()
        .map_or_else(|| "csv".to_string(), |s| s.to_string_lossy().into_owned());

    let mut reader = csv::ReaderBuilder::new()
        // Headers are handled like any other sheet's first row.
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|e| Error::workbook(path, e))?;

    let mut records = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| Error::workbook(path, e))?;
        records.push(
            record
                .iter()
                .map(|field| (!field.is_empty()).then(|| field.to_string()))
                .collect::<Vec<_>>(),
        );
    }

    let mut records = records.into_iter();
    let header = records.next().unwrap_or_default();
    Ok(Sheet::new(name, header, records.collect()))
}

fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
