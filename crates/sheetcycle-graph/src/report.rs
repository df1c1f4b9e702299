//! Cycle reports with per-link provenance.
//!
//! [`analyze`] is the single entry point: it runs detection on a finished
//! graph and resolves every cycle into item names and, for each link, the
//! sheets it was observed in. The result is plain data, serializable as-is;
//! rendering it for people is left to the caller.

use serde::Serialize;

use crate::cycles::detect_cycles;
use crate::graph::Graph;

/// The outcome of cycle detection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CycleAnalysis {
    /// Number of distinct cycles found.
    pub cycle_count: usize,
    /// Each cycle, in discovery order.
    pub cycles: Vec<CycleReport>,
}

impl CycleAnalysis {
    /// Whether any cycle was found.
    #[must_use]
    pub fn has_cycles(&self) -> bool {
        self.cycle_count > 0
    }
}

/// One cycle and the provenance of every link in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CycleReport {
    /// Item names in cycle order. The first item is not repeated at the end.
    pub chain: Vec<String>,
    /// One link per consecutive pair, including the closing pair.
    pub links: Vec<Link>,
}

impl CycleReport {
    /// The chain closed back on its first item, e.g. `A -> B -> C -> A`.
    #[must_use]
    pub fn closed_chain(&self, arrow: &str) -> String {
        let mut out = self.chain.join(arrow);
        if let Some(first) = self.chain.first() {
            out.push_str(arrow);
            out.push_str(first);
        }
        out
    }
}

/// A dependency link within a cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    /// The dependent item.
    pub from: String,
    /// The item depended upon.
    pub to: String,
    /// Sheet of every occurrence of this link, in the order they were read.
    pub sheets: Vec<String>,
}

impl Link {
    /// Sheet names with repeats removed, keeping first-seen order.
    #[must_use]
    pub fn distinct_sheets(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::with_capacity(self.sheets.len());
        for sheet in &self.sheets {
            if !out.contains(&sheet.as_str()) {
                out.push(sheet);
            }
        }
        out
    }
}

/// Detect cycles in `graph` and resolve them into reports.
#[must_use]
pub fn analyze(graph: &Graph) -> CycleAnalysis {
    let cycles: Vec<CycleReport> = detect_cycles(graph)
        .iter()
        .map(|cycle| {
            let links: Vec<Link> = cycle
                .edges()
                .iter()
                .map(|&id| {
                    let edge = graph.edge(id);
                    Link {
                        from: graph.node_name(edge.from()).to_string(),
                        to: graph.node_name(edge.to()).to_string(),
                        sheets: edge.sheets().map(String::from).collect(),
                    }
                })
                .collect();
            let chain = links.iter().map(|link| link.from.clone()).collect();
            CycleReport { chain, links }
        })
        .collect();

    tracing::info!(cycle_count = cycles.len(), "Cycle analysis complete");

    CycleAnalysis {
        cycle_count: cycles.len(),
        cycles,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::{RawRow, Separator};

    fn analyze_rows(rows: &[RawRow], separator: Separator) -> CycleAnalysis {
        analyze(&Graph::from_rows(rows, separator))
    }

    fn link<'a>(report: &'a CycleReport, from: &str, to: &str) -> &'a Link {
        report
            .links
            .iter()
            .find(|l| l.from == from && l.to == to)
            .unwrap()
    }

    #[test]
    fn three_node_cycle_across_two_sheets() {
        let analysis = analyze_rows(
            &[
                RawRow::new("A", "B", "S1"),
                RawRow::new("B", "C", "S1"),
                RawRow::new("C", "A", "S2"),
            ],
            Separator::Comma,
        );

        assert_eq!(analysis.cycle_count, 1);
        let cycle = &analysis.cycles[0];
        assert_eq!(cycle.chain, vec!["A", "B", "C"]);
        assert_eq!(cycle.closed_chain(" -> "), "A -> B -> C -> A");
        assert_eq!(link(cycle, "A", "B").sheets, vec!["S1"]);
        assert_eq!(link(cycle, "B", "C").sheets, vec!["S1"]);
        assert_eq!(link(cycle, "C", "A").sheets, vec!["S2"]);
    }

    #[test]
    fn acyclic_input_reports_no_cycles() {
        let analysis = analyze_rows(
            &[
                RawRow::new("A", "B", "S1"),
                RawRow::new("B", "C", "S1"),
                RawRow::new("C", "D", "S1"),
            ],
            Separator::Comma,
        );

        assert!(!analysis.has_cycles());
        assert_eq!(analysis.cycle_count, 0);
        assert!(analysis.cycles.is_empty());
    }

    #[test]
    fn self_loop_report() {
        let analysis = analyze_rows(&[RawRow::new("X", "X", "S1")], Separator::Comma);

        assert_eq!(analysis.cycle_count, 1);
        let cycle = &analysis.cycles[0];
        assert_eq!(cycle.chain, vec!["X"]);
        assert_eq!(cycle.closed_chain(" -> "), "X -> X");
        assert_eq!(
            cycle.links,
            vec![Link {
                from: "X".into(),
                to: "X".into(),
                sheets: vec!["S1".into()],
            }]
        );
    }

    #[test]
    fn semicolon_cell_yields_trimmed_edges() {
        let graph = Graph::from_rows(&[RawRow::new("A", "B; C", "S1")], Separator::Semicolon);
        let a = graph.node_id("A").unwrap();

        assert!(graph.edge_between(a, graph.node_id("B").unwrap()).is_some());
        assert!(graph.edge_between(a, graph.node_id("C").unwrap()).is_some());
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn link_seen_in_two_sheets_lists_both() {
        let analysis = analyze_rows(
            &[
                RawRow::new("A", "B", "S1"),
                RawRow::new("A", "B", "S2"),
                RawRow::new("B", "A", "S3"),
            ],
            Separator::Comma,
        );

        assert_eq!(analysis.cycle_count, 1);
        let cycle = &analysis.cycles[0];
        assert_eq!(cycle.closed_chain(" -> "), "A -> B -> A");
        assert_eq!(link(cycle, "A", "B").sheets, vec!["S1", "S2"]);
        assert_eq!(link(cycle, "B", "A").sheets, vec!["S3"]);
    }

    #[test]
    fn distinct_sheets_hides_repeats_but_keeps_order() {
        let link = Link {
            from: "A".into(),
            to: "B".into(),
            sheets: vec!["S2".into(), "S1".into(), "S2".into()],
        };
        assert_eq!(link.distinct_sheets(), vec!["S2", "S1"]);
    }

    #[test]
    fn empty_graph_is_a_valid_no_cycle_run() {
        let analysis = analyze(&Graph::default());
        assert_eq!(
            analysis,
            CycleAnalysis {
                cycle_count: 0,
                cycles: Vec::new(),
            }
        );
    }

    #[test]
    fn serializes_to_output_contract_shape() {
        let analysis = analyze_rows(&[RawRow::new("X", "X", "S1")], Separator::Comma);
        let json = serde_json::to_value(&analysis).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "cycle_count": 1,
                "cycles": [{
                    "chain": ["X"],
                    "links": [{ "from": "X", "to": "X", "sheets": ["S1"] }]
                }]
            })
        );
    }
}
