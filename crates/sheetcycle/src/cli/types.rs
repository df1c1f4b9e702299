//! CLI value enums and their conversions to library types.

use clap::ValueEnum;
use sheetcycle_graph::Separator;

/// Separator for CLI arguments
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeparatorArg {
    /// Comma, e.g. "Task A, Task B"
    Comma,
    /// Semicolon, e.g. "Task A; Task B"
    Semicolon,
    /// Pipe, e.g. "Task A | Task B"
    Pipe,
    /// One dependency per line inside the cell
    Newline,
    /// One dependency per cell, no splitting
    None,
}

impl From<SeparatorArg> for Separator {
    fn from(arg: SeparatorArg) -> Self {
        match arg {
            SeparatorArg::Comma => Self::Comma,
            SeparatorArg::Semicolon => Self::Semicolon,
            SeparatorArg::Pipe => Self::Pipe,
            SeparatorArg::Newline => Self::Newline,
            SeparatorArg::None => Self::None,
        }
    }
}

/// Output format for the scan command
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormatArg {
    /// Human-readable, colored text
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

impl std::fmt::Display for OutputFormatArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}
