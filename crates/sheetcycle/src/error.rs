//! Error types for sheetcycle operations.
//!
//! Only whole-run problems are errors: a file that cannot be opened, columns
//! that cannot be resolved, or input that yields no dependency at all. Blank
//! or odd cells inside a sheet are skipped silently and never surface here.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for sheetcycle operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The error type for sheetcycle operations.
#[derive(Debug, Error)]
pub enum Error {
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A workbook could not be opened or a sheet could not be read.
    #[error("could not read {}: {message}", path.display())]
    Workbook {
        /// The input file.
        path: PathBuf,
        /// What went wrong.
        message: String,
    },

    /// The input file type is not supported.
    #[error("unsupported file type: {} (expected .xlsx, .xlsm, .xlsb, .xls, .ods or .csv)", path.display())]
    UnsupportedFile {
        /// The input file.
        path: PathBuf,
    },

    /// Fewer than two header columns across every sheet.
    #[error("the input must have at least 2 columns (found {found})")]
    NotEnoughColumns {
        /// Number of distinct header names found.
        found: usize,
    },

    /// No sheet produced a single dependency for the chosen columns.
    #[error("no data found with columns '{source_column}' and '{target_column}'")]
    EmptyInput {
        /// The item-name column.
        source_column: String,
        /// The dependency column.
        target_column: String,
    },

    /// Invalid configuration or arguments.
    #[error("configuration error: {0}")]
    Config(String),

    /// Interactive input ended or failed.
    #[error("prompt error: {0}")]
    Prompt(String),
}

impl Error {
    pub(crate) fn workbook(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::Workbook {
            path: path.into(),
            message: message.to_string(),
        }
    }
}
