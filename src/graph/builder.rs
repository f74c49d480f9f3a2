//! Graph construction module

use crate::error::Result;
use crate::graph::WeightedGraph;

/// Builder for incrementally constructing a WeightedGraph
pub struct GraphBuilder {
    graph: WeightedGraph,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self {
            graph: WeightedGraph::new(),
        }
    }

    /// Create a new graph builder with the given node capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            graph: WeightedGraph::with_capacity(capacity),
        }
    }

    /// Get or create a node for the given string ID
    pub fn get_or_create_node(&mut self, id: &str) -> u32 {
        self.graph.add_node(id)
    }

    /// Register a node without any edges (stays isolated until an edge
    /// references it).
    pub fn add_node(&mut self, id: &str) -> &mut Self {
        self.graph.add_node(id);
        self
    }

    /// Add an undirected edge, creating endpoints as needed. Duplicate
    /// pairs accumulate weight.
    pub fn add_edge(&mut self, src: &str, dst: &str, weight: f64) -> Result<&mut Self> {
        self.graph.add_edge(src, dst, weight)?;
        Ok(self)
    }

    /// Build the graph
    pub fn build(self) -> WeightedGraph {
        self.graph
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Construct a graph from an edge list and a node list.
///
/// Each edge is `(src, dst, optional weight)`; a missing weight defaults
/// to 1.0. The node list is unioned into the node set so loaders can
/// declare nodes that never appear in any edge.
pub fn build_graph<S, E, N>(edges: E, nodes: N) -> Result<WeightedGraph>
where
    S: AsRef<str>,
    E: IntoIterator<Item = (S, S, Option<f64>)>,
    N: IntoIterator<Item = S>,
{
    let mut builder = GraphBuilder::new();

    for (src, dst, weight) in edges {
        builder.add_edge(src.as_ref(), dst.as_ref(), weight.unwrap_or(1.0))?;
    }
    for id in nodes {
        builder.add_node(id.as_ref());
    }

    let graph = builder.build();
    log::debug!(
        "built graph with {} nodes and {} edges",
        graph.node_count(),
        graph.edge_count()
    );

    Ok(graph)
}
