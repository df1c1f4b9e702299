//! Cycle detection over the dependency graph.
//!
//! A depth-first search runs from every node in first-seen order, colouring
//! nodes white (unvisited), gray (on the current path) or black (fully
//! explored). An edge into a gray node closes a cycle: the path from that
//! node to the top of the stack, plus the closing edge. Black nodes are never
//! re-entered, so each edge is examined once.
//!
//! This reports at least one cycle for every strongly-connected cyclic
//! structure, deterministically. It does not enumerate every simple cycle of
//! densely-cyclic graphs, which is exponential.
//!
//! The search keeps an explicit stack of `(node, next edge)` frames rather
//! than recursing, so deep dependency chains cannot overflow the call stack.

use std::collections::HashSet;

use crate::graph::{EdgeId, Graph, NodeId};

/// A simple cycle, stored as the edges that form it.
///
/// The first edge leaves the node where the cycle was entered during the
/// search; the last edge returns to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cycle {
    edges: Vec<EdgeId>,
}

impl Cycle {
    /// Edges of the cycle, in traversal order, including the closing edge.
    #[must_use]
    pub fn edges(&self) -> &[EdgeId] {
        &self.edges
    }

    /// Number of nodes (and edges) in the cycle. A self-loop has length 1.
    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Always `false`: a cycle has at least one edge.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Nodes of the cycle in order, without repeating the first at the end.
    pub fn nodes<'g>(&'g self, graph: &'g Graph) -> impl Iterator<Item = NodeId> + 'g {
        self.edges.iter().map(|&id| graph.edge(id).from())
    }

    /// Rotation starting at the lexicographically smallest node name.
    ///
    /// Two cycles that are rotations of each other share this key.
    fn canonical_key(&self, graph: &Graph) -> Vec<NodeId> {
        let nodes: Vec<NodeId> = self.nodes(graph).collect();
        let start = nodes
            .iter()
            .enumerate()
            .min_by_key(|&(_, &id)| graph.node_name(id))
            .map_or(0, |(idx, _)| idx);

        let mut key = Vec::with_capacity(nodes.len());
        key.extend_from_slice(&nodes[start..]);
        key.extend_from_slice(&nodes[..start]);
        key
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    White,
    Gray,
    Black,
}

struct Frame {
    node: NodeId,
    next: usize,
}

/// Find cycles, deduplicated by rotation, in discovery order.
///
/// Each reported cycle keeps the rotation it was first discovered in.
#[must_use]
pub fn detect_cycles(graph: &Graph) -> Vec<Cycle> {
    tracing::debug!(
        node_count = graph.node_count(),
        edge_count = graph.edge_count(),
        "Starting cycle detection with DFS"
    );

    let raw = find_cycles_dfs(graph);
    let raw_cycle_count = raw.len();
    let unique = deduplicate_cycles(graph, raw);

    tracing::debug!(
        raw_cycles = raw_cycle_count,
        unique_cycles = unique.len(),
        "Cycle detection complete"
    );

    unique
}

fn find_cycles_dfs(graph: &Graph) -> Vec<Cycle> {
    let mut color = vec![Color::White; graph.node_count()];
    // Stack position of each gray node.
    let mut depth = vec![0usize; graph.node_count()];
    let mut stack: Vec<Frame> = Vec::new();
    // `path_edges[i]` is the edge that entered `stack[i + 1]`.
    let mut path_edges: Vec<EdgeId> = Vec::new();
    let mut cycles = Vec::new();

    for root in graph.nodes() {
        if color[root.index()] != Color::White {
            continue;
        }

        color[root.index()] = Color::Gray;
        depth[root.index()] = 0;
        stack.push(Frame {
            node: root,
            next: 0,
        });

        while let Some(frame) = stack.last_mut() {
            let node = frame.node;
            let Some(&edge_id) = graph.outgoing(node).get(frame.next) else {
                color[node.index()] = Color::Black;
                stack.pop();
                path_edges.pop();
                continue;
            };
            frame.next += 1;

            let next = graph.edge(edge_id).to();
            match color[next.index()] {
                Color::Gray => {
                    let start = depth[next.index()];
                    let mut edges = path_edges[start..].to_vec();
                    edges.push(edge_id);
                    cycles.push(Cycle { edges });
                }
                Color::White => {
                    color[next.index()] = Color::Gray;
                    depth[next.index()] = stack.len();
                    stack.push(Frame {
                        node: next,
                        next: 0,
                    });
                    path_edges.push(edge_id);
                }
                Color::Black => {}
            }
        }
    }

    cycles
}

/// Drop cycles that are rotations of one already kept.
///
/// Only the starting point is normalized, not direction: `A->B->C->A` and
/// `A->C->B->A` follow different edges and are distinct cycles.
fn deduplicate_cycles(graph: &Graph, cycles: Vec<Cycle>) -> Vec<Cycle> {
    let mut seen: HashSet<Vec<NodeId>> = HashSet::new();
    cycles
        .into_iter()
        .filter(|cycle| !cycle.is_empty() && seen.insert(cycle.canonical_key(graph)))
        .collect()
}
