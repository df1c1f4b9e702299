//! Edge extraction from raw spreadsheet rows.
//!
//! A row names an item and a dependency cell. The dependency cell may list
//! several items joined by a [`Separator`]; each non-blank fragment becomes
//! one edge. Blank or missing cells are not errors, they simply produce no
//! edges, since spreadsheets legitimately contain empty cells.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseSeparatorError;

/// How a multi-value dependency cell is split into individual names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Separator {
    /// `,` (e.g. `Task A, Task B`)
    #[default]
    Comma,
    /// `;` (e.g. `Task A; Task B`)
    Semicolon,
    /// `|` (e.g. `Task A | Task B`)
    Pipe,
    /// A line break inside the cell.
    Newline,
    /// One dependency per cell; the whole cell is a single name.
    None,
}

impl Separator {
    /// All separators, in menu order.
    pub const ALL: [Self; 5] = [
        Self::Comma,
        Self::Semicolon,
        Self::Pipe,
        Self::Newline,
        Self::None,
    ];

    /// The literal string cells are split on, or `None` when no splitting happens.
    #[must_use]
    pub fn as_str(self) -> Option<&'static str> {
        match self {
            Self::Comma => Some(","),
            Self::Semicolon => Some(";"),
            Self::Pipe => Some("|"),
            Self::Newline => Some("\n"),
            Self::None => None,
        }
    }

    /// Lowercase name used in config files and on the command line.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Comma => "comma",
            Self::Semicolon => "semicolon",
            Self::Pipe => "pipe",
            Self::Newline => "newline",
            Self::None => "none",
        }
    }
}

impl fmt::Display for Separator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Separator {
    type Err = ParseSeparatorError;

    /// Accepts either the literal (`,` `;` `|` `\n`) or the name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // A bare newline would be eaten by trim, so check literals first.
        if s == "\n" || s == "\r\n" {
            return Ok(Self::Newline);
        }

        match s.trim().to_ascii_lowercase().as_str() {
            "," | "comma" => Ok(Self::Comma),
            ";" | "semicolon" => Ok(Self::Semicolon),
            "|" | "pipe" => Ok(Self::Pipe),
            "\\n" | "newline" | "new-line" | "lf" => Ok(Self::Newline),
            "none" | "single" => Ok(Self::None),
            _ => Err(ParseSeparatorError {
                input: s.to_string(),
            }),
        }
    }
}

/// One input row: an item, its dependency cell and the sheet it came from.
///
/// Cells are `None` when the spreadsheet cell was empty or absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    /// The item-name cell.
    pub source: Option<String>,
    /// The dependency cell, possibly holding several names.
    pub target: Option<String>,
    /// Name of the sheet the row was read from.
    pub sheet: String,
}

impl RawRow {
    /// Create a row where both cells are present.
    #[must_use]
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        sheet: impl Into<String>,
    ) -> Self {
        Self {
            source: Some(source.into()),
            target: Some(target.into()),
            sheet: sheet.into(),
        }
    }

    /// Create a row from possibly-missing cells.
    #[must_use]
    pub fn from_cells(
        source: Option<String>,
        target: Option<String>,
        sheet: impl Into<String>,
    ) -> Self {
        Self {
            source,
            target,
            sheet: sheet.into(),
        }
    }
}

/// A single directed dependency found in a row, borrowed from that row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractedEdge<'a> {
    /// The item that depends on `target`, trimmed.
    pub source: &'a str,
    /// The dependency, trimmed.
    pub target: &'a str,
    /// The sheet the row came from.
    pub sheet: &'a str,
}

/// Split a row into its edges, in fragment order.
///
/// Returns nothing when the item cell is missing or blank, or when the
/// dependency cell has no non-blank fragment. Self-dependencies are kept.
#[must_use]
pub fn extract_edges(row: &RawRow, separator: Separator) -> Vec<ExtractedEdge<'_>> {
    let Some(source) = row.source.as_deref().map(str::trim) else {
        return Vec::new();
    };
    let Some(target) = row.target.as_deref().map(str::trim) else {
        return Vec::new();
    };
    if source.is_empty() || target.is_empty() {
        return Vec::new();
    }

    let sheet = row.sheet.as_str();
    match separator.as_str() {
        Some(sep) => target
            .split(sep)
            .map(str::trim)
            .filter(|fragment| !fragment.is_empty())
            .map(|target| ExtractedEdge {
                source,
                target,
                sheet,
            })
            .collect(),
        None => vec![ExtractedEdge {
            source,
            target,
            sheet,
        }],
    }
}
