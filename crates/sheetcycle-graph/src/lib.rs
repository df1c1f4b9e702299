//! Graph core for finding circular dependencies in tabular dependency listings.
//!
//! The pipeline is three steps, each a module:
//!
//! 1. [`extract`] turns raw `(item, dependency cell, sheet)` rows into edges,
//!    splitting multi-value cells on a [`Separator`].
//! 2. [`graph`] accumulates the edges of every sheet into one [`Graph`],
//!    merging duplicate links while keeping each occurrence's sheet.
//! 3. [`cycles`] walks the graph and [`report`] pairs every distinct cycle
//!    with the sheets its links came from.
//!
//! # Examples
//!
//! ```
//! use sheetcycle_graph::{analyze, Graph, RawRow, Separator};
//!
//! let rows = vec![
//!     RawRow::new("A", "B", "S1"),
//!     RawRow::new("B", "C", "S1"),
//!     RawRow::new("C", "A", "S2"),
//! ];
//! let graph = Graph::from_rows(&rows, Separator::Comma);
//! let analysis = analyze(&graph);
//!
//! assert_eq!(analysis.cycle_count, 1);
//! assert_eq!(analysis.cycles[0].chain, vec!["A", "B", "C"]);
//! assert_eq!(analysis.cycles[0].links[2].sheets, vec!["S2"]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cycles;
pub mod error;
pub mod extract;
pub mod graph;
pub mod report;

pub use cycles::{detect_cycles, Cycle};
pub use error::ParseSeparatorError;
pub use extract::{extract_edges, ExtractedEdge, RawRow, Separator};
pub use graph::{Edge, EdgeId, Graph, GraphBuilder, GraphStats, NodeId, Provenance};
pub use report::{analyze, CycleAnalysis, CycleReport, Link};
