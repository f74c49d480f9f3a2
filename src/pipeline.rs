//! Thin analysis orchestration
//!
//! Runs the full study pass over a graph: every layout strategy, the
//! PageRank scores, the Louvain partition, and a second Louvain pass on
//! the graph with isolated nodes removed. The external renderer
//! consumes the report; nothing here writes files or draws anything.

use std::collections::HashMap;

use serde::Serialize;

use crate::centrality::{pagerank, ScoreMap};
use crate::community::{louvain, CommunityMap};
use crate::config::{LayoutConfig, LouvainConfig, PageRankConfig};
use crate::graph::WeightedGraph;
use crate::layout::{layout, LayoutStrategy, PositionMap};

/// Knobs for one full analysis pass.
#[derive(Debug, Clone, Default)]
pub struct AnalysisConfig {
    pub pagerank: PageRankConfig,
    pub louvain: LouvainConfig,
    pub layout: LayoutConfig,

    /// Strategies to compute positions for. Empty means all of them.
    pub strategies: Vec<LayoutStrategy>,
}

/// Results of one analysis pass, keyed by the graph's node IDs.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// Positions per strategy. Strategies that failed (e.g. planar on
    /// a non-planar graph) appear in `layout_errors` instead.
    pub positions: HashMap<LayoutStrategy, PositionMap>,

    /// Human-readable reason per failed strategy.
    pub layout_errors: HashMap<LayoutStrategy, String>,

    pub scores: ScoreMap,

    pub communities: CommunityMap,

    /// Second partition, computed on the graph with isolated nodes
    /// removed; removed nodes have no entry.
    pub communities_connected: CommunityMap,
}

/// Run the full pass. PageRank and Louvain are independent given the
/// same read-only graph, so they are dispatched as parallel tasks.
pub fn run_analysis(graph: &WeightedGraph, config: &AnalysisConfig) -> AnalysisReport {
    log::info!(
        "analysis pass over {} nodes, {} edges",
        graph.node_count(),
        graph.edge_count()
    );

    let strategies: &[LayoutStrategy] = if config.strategies.is_empty() {
        &LayoutStrategy::ALL
    } else {
        &config.strategies
    };

    let (scores, (communities, communities_connected)) = rayon::join(
        || pagerank(graph, &config.pagerank),
        || {
            rayon::join(
                || louvain(graph, &config.louvain),
                || louvain(&graph.remove_isolated(), &config.louvain),
            )
        },
    );

    let mut positions = HashMap::new();
    let mut layout_errors = HashMap::new();
    for &strategy in strategies {
        match layout(graph, strategy, &config.layout, None) {
            Ok(placed) => {
                positions.insert(strategy, placed);
            }
            Err(err) => {
                log::warn!("{} layout skipped: {err}", strategy.name());
                layout_errors.insert(strategy, err.to_string());
            }
        }
    }

    AnalysisReport {
        positions,
        layout_errors,
        scores,
        communities,
        communities_connected,
    }
}
