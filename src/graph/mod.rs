//! Weighted undirected graph store
//!
//! Pure container: all algorithm logic lives in the sibling modules.
//! Nodes keep their insertion order so repeated runs label and place
//! them consistently.

pub mod builder;
pub mod components;

pub use builder::{build_graph, GraphBuilder};

use std::collections::HashMap;

use crate::error::{GraphError, Result};

/// Adjacency-based weighted undirected graph.
///
/// Node identifiers are opaque strings mapped to dense `u32` indices in
/// insertion order. Parallel edges collapse into a single edge whose
/// weight is the sum of the parts. Self-loops are stored out of band:
/// they contribute twice to a node's degree but are never yielded by
/// neighbor iteration, so traversal algorithms cannot walk them.
#[derive(Debug, Clone, Default)]
pub struct WeightedGraph {
    /// Mapping from string IDs to node indices
    id_to_index: HashMap<String, u32>,

    /// Node string IDs in insertion order
    node_ids: Vec<String>,

    /// Adjacency lists: (neighbor index, accumulated edge weight)
    adjacency: Vec<Vec<(u32, f64)>>,

    /// Self-loop weight per node
    loops: Vec<f64>,

    /// Number of distinct non-loop edges
    edge_count: usize,
}

impl WeightedGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a graph with pre-allocated node capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            id_to_index: HashMap::with_capacity(capacity),
            node_ids: Vec::with_capacity(capacity),
            adjacency: Vec::with_capacity(capacity),
            loops: Vec::with_capacity(capacity),
            edge_count: 0,
        }
    }

    /// Add a node, returning its index. Idempotent: re-adding an
    /// existing ID returns the original index.
    pub fn add_node(&mut self, id: &str) -> u32 {
        if let Some(&idx) = self.id_to_index.get(id) {
            return idx;
        }

        let idx = self.node_ids.len() as u32;
        self.id_to_index.insert(id.to_string(), idx);
        self.node_ids.push(id.to_string());
        self.adjacency.push(Vec::new());
        self.loops.push(0.0);

        idx
    }

    /// Add an undirected edge, implicitly creating missing endpoints.
    ///
    /// A repeated (u, v) pair accumulates weight onto the existing edge.
    /// A self-referential pair accumulates into the node's loop weight.
    /// Weights must be finite and positive.
    pub fn add_edge(&mut self, src: &str, dst: &str, weight: f64) -> Result<()> {
        if !weight.is_finite() || weight <= 0.0 {
            return Err(GraphError::InvalidInput(format!(
                "edge ({src}, {dst}) has non-positive or non-finite weight {weight}"
            )));
        }

        let u = self.add_node(src);
        let v = self.add_node(dst);

        if u == v {
            self.loops[u as usize] += weight;
            return Ok(());
        }

        match self.adjacency[u as usize].iter().position(|&(n, _)| n == v) {
            Some(pos) => {
                self.adjacency[u as usize][pos].1 += weight;
                let back = self.adjacency[v as usize]
                    .iter()
                    .position(|&(n, _)| n == u)
                    .unwrap_or_else(|| unreachable!("adjacency lists out of sync"));
                self.adjacency[v as usize][back].1 += weight;
            }
            None => {
                self.adjacency[u as usize].push((v, weight));
                self.adjacency[v as usize].push((u, weight));
                self.edge_count += 1;
            }
        }

        Ok(())
    }

    /// Node string IDs in insertion order.
    pub fn nodes(&self) -> &[String] {
        &self.node_ids
    }

    /// String ID for a node index.
    pub fn node_id(&self, idx: u32) -> &str {
        &self.node_ids[idx as usize]
    }

    /// Index for a string ID, if present.
    pub fn index_of(&self, id: &str) -> Option<u32> {
        self.id_to_index.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.id_to_index.contains_key(id)
    }

    pub fn node_count(&self) -> usize {
        self.node_ids.len()
    }

    /// Number of distinct non-loop edges.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Neighbors of a node with accumulated edge weights. Self-loops
    /// are never included.
    pub fn neighbors(&self, idx: u32) -> &[(u32, f64)] {
        &self.adjacency[idx as usize]
    }

    /// Self-loop weight of a node (0.0 when absent).
    pub fn loop_weight(&self, idx: u32) -> f64 {
        self.loops[idx as usize]
    }

    /// Weighted degree: sum of incident edge weights, with self-loops
    /// counted twice (once per endpoint).
    pub fn degree(&self, idx: u32) -> f64 {
        let adj: f64 = self.adjacency[idx as usize].iter().map(|&(_, w)| w).sum();
        adj + 2.0 * self.loops[idx as usize]
    }

    /// Weighted degrees for all nodes, in index order.
    pub fn degrees(&self) -> Vec<f64> {
        (0..self.node_count() as u32).map(|i| self.degree(i)).collect()
    }

    /// Total edge weight: each edge once, each self-loop once.
    pub fn total_weight(&self) -> f64 {
        let half_adj: f64 = self
            .adjacency
            .iter()
            .flat_map(|list| list.iter().map(|&(_, w)| w))
            .sum();
        half_adj / 2.0 + self.loops.iter().sum::<f64>()
    }

    /// All distinct edges as (u, v, weight) with u < v, followed by
    /// self-loops as (u, u, weight).
    pub fn edges(&self) -> Vec<(u32, u32, f64)> {
        let mut out = Vec::with_capacity(self.edge_count);
        for (u, list) in self.adjacency.iter().enumerate() {
            for &(v, w) in list {
                if (u as u32) < v {
                    out.push((u as u32, v, w));
                }
            }
        }
        for (u, &w) in self.loops.iter().enumerate() {
            if w > 0.0 {
                out.push((u as u32, u as u32, w));
            }
        }
        out
    }

    /// Indices of nodes with degree zero.
    pub fn isolated_nodes(&self) -> Vec<u32> {
        (0..self.node_count() as u32)
            .filter(|&i| self.degree(i) == 0.0)
            .collect()
    }

    /// Pure filtered copy: keeps exactly the nodes the predicate accepts
    /// (called with index and ID), along with edges between kept nodes.
    pub fn retain_nodes<F>(&self, mut keep: F) -> WeightedGraph
    where
        F: FnMut(u32, &str) -> bool,
    {
        let mut out = WeightedGraph::with_capacity(self.node_count());

        let kept: Vec<u32> = (0..self.node_count() as u32)
            .filter(|&i| keep(i, self.node_id(i)))
            .collect();
        for &i in &kept {
            out.add_node(self.node_id(i));
        }

        for &i in &kept {
            let loop_w = self.loops[i as usize];
            if loop_w > 0.0 {
                let id = self.node_id(i);
                out.copy_edge(id, id, loop_w);
            }
            for &(j, w) in self.neighbors(i) {
                if i < j && out.contains(self.node_id(j)) {
                    out.copy_edge(self.node_id(i), self.node_id(j), w);
                }
            }
        }

        out
    }

    /// Insert an edge whose weight was already validated by `add_edge`
    /// on the source graph. Callers must not pass duplicate pairs.
    fn copy_edge(&mut self, src: &str, dst: &str, weight: f64) {
        let u = self.add_node(src);
        let v = self.add_node(dst);

        if u == v {
            self.loops[u as usize] += weight;
            return;
        }

        self.adjacency[u as usize].push((v, weight));
        self.adjacency[v as usize].push((u, weight));
        self.edge_count += 1;
    }

    /// Pure copy with all degree-zero nodes removed. The receiver is
    /// untouched; a fresh graph is returned for the second analysis pass.
    pub fn remove_isolated(&self) -> WeightedGraph {
        self.retain_nodes(|i, _| self.degree(i) > 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parallel_edges_merge_weights() {
        let mut g = WeightedGraph::new();
        g.add_edge("a", "b", 1.0).unwrap();
        g.add_edge("b", "a", 2.0).unwrap();

        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.neighbors(0), &[(1, 3.0)]);
        assert_eq!(g.neighbors(1), &[(0, 3.0)]);
        assert_eq!(g.edges(), vec![(0, 1, 3.0)]);
    }

    #[test]
    fn self_loops_count_twice_in_degree_but_are_not_neighbors() {
        let mut g = WeightedGraph::new();
        g.add_edge("a", "a", 1.5).unwrap();
        g.add_edge("a", "b", 1.0).unwrap();

        assert_eq!(g.degree(0), 4.0);
        assert_eq!(g.neighbors(0), &[(1, 1.0)]);
        assert_eq!(g.total_weight(), 2.5);
    }

    #[test]
    fn rejects_bad_weights() {
        let mut g = WeightedGraph::new();
        assert!(g.add_edge("a", "b", 0.0).is_err());
        assert!(g.add_edge("a", "b", f64::NAN).is_err());
        assert!(g.add_edge("a", "b", -1.0).is_err());
    }

    #[test]
    fn remove_isolated_is_pure() {
        let mut g = WeightedGraph::new();
        g.add_edge("a", "b", 1.0).unwrap();
        g.add_node("lonely");

        let trimmed = g.remove_isolated();
        assert_eq!(trimmed.node_count(), 2);
        assert!(!trimmed.contains("lonely"));
        // Source graph unchanged.
        assert_eq!(g.node_count(), 3);
        assert_eq!(g.isolated_nodes(), vec![2]);
    }

    #[test]
    fn retain_nodes_copies_loops_and_edges() {
        let mut g = WeightedGraph::new();
        g.add_edge("a", "b", 2.0).unwrap();
        g.add_edge("a", "a", 1.5).unwrap();
        g.add_edge("b", "c", 1.0).unwrap();

        let kept = g.retain_nodes(|_, id| id != "c");
        assert_eq!(kept.node_count(), 2);
        assert_eq!(kept.edge_count(), 1);
        assert_eq!(kept.loop_weight(kept.index_of("a").unwrap()), 1.5);
        assert_eq!(kept.neighbors(0), &[(1, 2.0)]);
        assert_eq!(kept.total_weight(), 3.5);
    }

    #[test]
    fn insertion_order_is_preserved() {
        let mut g = WeightedGraph::new();
        g.add_edge("c", "a", 1.0).unwrap();
        g.add_node("b");
        assert_eq!(g.nodes(), &["c", "a", "b"]);
    }
}
