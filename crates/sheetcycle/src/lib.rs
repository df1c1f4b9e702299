//! Sheetcycle - find circular dependencies in spreadsheet dependency listings.
//!
//! This crate holds everything around the graph core in `sheetcycle-graph`:
//! loading workbooks, choosing columns (from flags, a config file or
//! interactive prompts), running a scan and rendering the result.

#![forbid(unsafe_code)]

pub mod columns;
pub mod config;
pub mod error;
pub mod output;
pub mod prompt;
pub mod scan;
pub mod workbook;

pub use error::{Error, Result};
