//! The dependency graph aggregated across every sheet.
//!
//! Nodes and edges are kept in first-seen order: nodes are interned into a
//! dense `Vec` with a hash index for lookups, and each node's outgoing edges
//! are listed in the order they were first observed. Cycle detection and the
//! report inherit that order, which keeps output reproducible across runs.
//!
//! An edge is keyed by its `(from, to)` pair. Seeing the same pair again, in
//! the same sheet or another one, appends a [`Provenance`] record instead of
//! creating a second edge.

use std::collections::HashMap;

use petgraph::algo::tarjan_scc;
use petgraph::graph::DiGraph;
use serde::Serialize;

use crate::extract::{extract_edges, ExtractedEdge, RawRow, Separator};

/// Dense identifier of a node, in first-seen order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in [`Graph::nodes`].
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Dense identifier of an edge, in first-seen order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(usize);

impl EdgeId {
    /// Position of the edge in [`Graph::edges`].
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Where one occurrence of an edge was observed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Provenance {
    /// Name of the sheet the row came from.
    pub sheet: String,
}

/// A directed dependency link with every place it was observed.
#[derive(Debug, Clone)]
pub struct Edge {
    from: NodeId,
    to: NodeId,
    provenance: Vec<Provenance>,
}

impl Edge {
    fn new(from: NodeId, to: NodeId, first: Provenance) -> Self {
        Self {
            from,
            to,
            provenance: vec![first],
        }
    }

    /// The dependent item.
    #[must_use]
    pub fn from(&self) -> NodeId {
        self.from
    }

    /// The item depended upon.
    #[must_use]
    pub fn to(&self) -> NodeId {
        self.to
    }

    /// Every occurrence of this edge, in the order they were added. Never empty.
    #[must_use]
    pub fn provenance(&self) -> &[Provenance] {
        debug_assert!(!self.provenance.is_empty(), "edge without provenance");
        &self.provenance
    }

    /// Sheet names of every occurrence, duplicates included.
    pub fn sheets(&self) -> impl Iterator<Item = &str> {
        self.provenance().iter().map(|p| p.sheet.as_str())
    }

    /// Whether this edge points back at its own source.
    #[must_use]
    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }
}

/// Summary counts for a built graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GraphStats {
    /// Distinct sheets that contributed at least one edge.
    pub sheets: usize,
    /// Distinct items.
    pub items: usize,
    /// Distinct `(from, to)` links.
    pub links: usize,
    /// Total edge occurrences across all rows.
    pub occurrences: usize,
}

/// Directed dependency graph. Built with [`GraphBuilder`] and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    names: Vec<String>,
    node_index: HashMap<String, NodeId>,
    edges: Vec<Edge>,
    edge_index: HashMap<(NodeId, NodeId), EdgeId>,
    outgoing: Vec<Vec<EdgeId>>,
    sheets: Vec<String>,
}

impl Graph {
    /// Extract and accumulate edges from every row, in row order.
    #[must_use]
    pub fn from_rows<'a, I>(rows: I, separator: Separator) -> Self
    where
        I: IntoIterator<Item = &'a RawRow>,
    {
        let mut builder = GraphBuilder::new();
        for row in rows {
            builder.add_row(row, separator);
        }
        builder.build()
    }

    /// Number of distinct items.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.names.len()
    }

    /// Number of distinct `(from, to)` links.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Total number of provenance records over all edges.
    #[must_use]
    pub fn occurrence_count(&self) -> usize {
        self.edges.iter().map(|e| e.provenance.len()).sum()
    }

    /// Whether the graph has no edges.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Node ids in first-seen order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.names.len()).map(NodeId)
    }

    /// Edges in first-seen order.
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Look up an edge by id.
    #[must_use]
    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.0]
    }

    /// Name of a node.
    #[must_use]
    pub fn node_name(&self, id: NodeId) -> &str {
        &self.names[id.0]
    }

    /// Find a node by its exact (trimmed) name.
    #[must_use]
    pub fn node_id(&self, name: &str) -> Option<NodeId> {
        self.node_index.get(name).copied()
    }

    /// Outgoing edges of `node`, in first-seen order.
    #[must_use]
    pub fn outgoing(&self, node: NodeId) -> &[EdgeId] {
        &self.outgoing[node.0]
    }

    /// The edge from `from` to `to`, if the dependency exists.
    #[must_use]
    pub fn edge_between(&self, from: NodeId, to: NodeId) -> Option<&Edge> {
        self.edge_index.get(&(from, to)).map(|&id| self.edge(id))
    }

    /// Distinct sheet names that contributed edges, in first-seen order.
    #[must_use]
    pub fn sheets(&self) -> &[String] {
        &self.sheets
    }

    /// Summary counts.
    #[must_use]
    pub fn stats(&self) -> GraphStats {
        GraphStats {
            sheets: self.sheets.len(),
            items: self.node_count(),
            links: self.edge_count(),
            occurrences: self.occurrence_count(),
        }
    }

    /// Strongly-connected components that contain at least one cycle.
    ///
    /// A component qualifies when it has more than one node, or a single node
    /// with a self-loop. Nodes within a component and the components themselves
    /// are ordered by first appearance.
    #[must_use]
    pub fn cyclic_components(&self) -> Vec<Vec<NodeId>> {
        let mut pg: DiGraph<(), ()> = DiGraph::with_capacity(self.names.len(), self.edges.len());
        let indices: Vec<_> = self.names.iter().map(|_| pg.add_node(())).collect();
        for edge in &self.edges {
            pg.add_edge(indices[edge.from.0], indices[edge.to.0], ());
        }

        let mut components: Vec<Vec<NodeId>> = tarjan_scc(&pg)
            .into_iter()
            .map(|scc| {
                let mut nodes: Vec<NodeId> = scc.into_iter().map(|ix| NodeId(ix.index())).collect();
                nodes.sort_unstable();
                nodes
            })
            .filter(|nodes| match nodes.as_slice() {
                [single] => self.edge_between(*single, *single).is_some(),
                _ => true,
            })
            .collect();
        components.sort_unstable_by_key(|nodes| nodes[0]);
        components
    }
}

/// Accumulates edges into a [`Graph`].
///
/// Owned by the ingestion step and consumed by [`GraphBuilder::build`], so a
/// finished graph cannot be modified while cycles are being detected.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    graph: Graph,
}

impl GraphBuilder {
    /// Start an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Extract the edges of one row and add them in fragment order.
    pub fn add_row(&mut self, row: &RawRow, separator: Separator) -> usize {
        let edges = extract_edges(row, separator);
        let count = edges.len();
        for edge in edges {
            self.add_edge(edge);
        }
        count
    }

    /// Record one occurrence of an edge, creating its endpoints on first sight.
    pub fn add_edge(&mut self, edge: ExtractedEdge<'_>) -> EdgeId {
        let from = self.intern(edge.source);
        let to = self.intern(edge.target);
        let provenance = Provenance {
            sheet: edge.sheet.to_string(),
        };

        if !self.graph.sheets.iter().any(|s| s == edge.sheet) {
            self.graph.sheets.push(edge.sheet.to_string());
        }

        let graph = &mut self.graph;
        if let Some(&id) = graph.edge_index.get(&(from, to)) {
            graph.edges[id.0].provenance.push(provenance);
            return id;
        }

        let id = EdgeId(graph.edges.len());
        graph.edges.push(Edge::new(from, to, provenance));
        graph.edge_index.insert((from, to), id);
        graph.outgoing[from.0].push(id);
        id
    }

    /// Finish building.
    #[must_use]
    pub fn build(self) -> Graph {
        tracing::debug!(
            items = self.graph.node_count(),
            links = self.graph.edge_count(),
            occurrences = self.graph.occurrence_count(),
            sheets = self.graph.sheets.len(),
            "Dependency graph built"
        );
        self.graph
    }

    fn intern(&mut self, name: &str) -> NodeId {
        if let Some(&id) = self.graph.node_index.get(name) {
            return id;
        }
        let id = NodeId(self.graph.names.len());
        self.graph.names.push(name.to_string());
        self.graph.node_index.insert(name.to_string(), id);
        self.graph.outgoing.push(Vec::new());
        id
    }
}
