//! Error types for sheetcycle-graph.
//!
//! Building a graph and detecting cycles never fail; the only fallible
//! operation is parsing a separator from user input.

use thiserror::Error;

/// Returned when a string does not name a known [`Separator`](crate::Separator).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown separator '{input}' (expected one of: comma, semicolon, pipe, newline, none)")]
pub struct ParseSeparatorError {
    /// The rejected input, as given.
    pub input: String,
}
