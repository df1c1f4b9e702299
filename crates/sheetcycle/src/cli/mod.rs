//! CLI command implementations.

pub mod columns;
pub mod scan;
pub mod types;
