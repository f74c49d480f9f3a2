//! PageRank centrality
//!
//! Damped random-walk stationary distribution over the undirected graph,
//! treating it as a symmetric transition matrix: the walker moves from u
//! to v with probability weight(u, v) / degree(u).

use std::collections::HashMap;

use crate::config::PageRankConfig;
use crate::graph::WeightedGraph;

/// Per-node centrality scores, summing to 1.0.
pub type ScoreMap = HashMap<String, f64>;

/// Compute PageRank scores for every node.
///
/// Uses power iteration with uniform initialization. Dangling nodes
/// (no traversable incident weight: isolated nodes, or nodes whose
/// only incident weight is a self-loop) redistribute their mass
/// uniformly over all nodes, so the scores always sum to 1.0.
///
/// Hitting the iteration cap is reported as a warning and the last
/// iterate is returned; it is not an error.
pub fn pagerank(graph: &WeightedGraph, config: &PageRankConfig) -> ScoreMap {
    let n = graph.node_count();
    if n == 0 {
        return ScoreMap::new();
    }

    let n_f64 = n as f64;
    let d = config.damping;
    let teleport = (1.0 - d) / n_f64;

    // Transition degrees exclude self-loops: a loop is never traversed,
    // so counting it would leak probability mass.
    let walk_degrees: Vec<f64> = (0..n as u32)
        .map(|u| graph.neighbors(u).iter().map(|&(_, w)| w).sum())
        .collect();

    let mut scores = vec![1.0 / n_f64; n];
    let mut new_scores = vec![0.0; n];
    let mut residual = f64::INFINITY;

    for iteration in 0..config.max_iterations {
        // Mass sitting on dangling nodes spreads uniformly.
        let dangling_sum: f64 = walk_degrees
            .iter()
            .enumerate()
            .filter(|&(_, &deg)| deg == 0.0)
            .map(|(u, _)| scores[u])
            .sum();
        let dangling_contrib = d * dangling_sum / n_f64;

        new_scores.fill(teleport + dangling_contrib);

        for u in 0..n {
            let deg = walk_degrees[u];
            if deg > 0.0 {
                let scale = d * scores[u] / deg;
                for &(v, w) in graph.neighbors(u as u32) {
                    new_scores[v as usize] += scale * w;
                }
            }
        }

        residual = scores
            .iter()
            .zip(new_scores.iter())
            .map(|(old, new)| (old - new).abs())
            .sum();

        std::mem::swap(&mut scores, &mut new_scores);

        if residual < config.tolerance {
            log::debug!("pagerank converged after {} iterations", iteration + 1);
            residual = 0.0;
            break;
        }
    }

    if residual > config.tolerance {
        log::warn!(
            "pagerank did not converge within {} iterations (residual {:.3e} > {:.3e}); \
             returning last iterate",
            config.max_iterations,
            residual,
            config.tolerance
        );
    }

    graph
        .nodes()
        .iter()
        .zip(scores)
        .map(|(id, score)| (id.clone(), score))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::build_graph;

    fn ring(n: usize) -> WeightedGraph {
        let ids: Vec<String> = (0..n).map(|i| format!("n{i}")).collect();
        let edges: Vec<(String, String, Option<f64>)> = (0..n)
            .map(|i| (ids[i].clone(), ids[(i + 1) % n].clone(), None))
            .collect();
        build_graph(edges, Vec::<String>::new()).unwrap()
    }

    #[test]
    fn empty_graph_gives_empty_map() {
        let g = WeightedGraph::new();
        assert!(pagerank(&g, &PageRankConfig::default()).is_empty());
    }

    #[test]
    fn scores_sum_to_one() {
        let g = build_graph(
            vec![("a", "b", None), ("b", "c", Some(2.0)), ("a", "c", None)],
            vec!["lonely"],
        )
        .unwrap();

        let scores = pagerank(&g, &PageRankConfig::default());
        let total: f64 = scores.values().sum();
        assert!((total - 1.0).abs() < 1e-6, "total {total}");
        assert!(scores.values().all(|&s| s >= 0.0));
    }

    #[test]
    fn ring_is_uniform() {
        let n = 8;
        let scores = pagerank(&ring(n), &PageRankConfig::default());
        let expected = 1.0 / n as f64;
        for (id, score) in &scores {
            assert!((score - expected).abs() < 1e-6, "{id}: {score}");
        }
    }

    #[test]
    fn all_isolated_is_uniform() {
        let g = build_graph(Vec::<(&str, &str, Option<f64>)>::new(), vec!["a", "b", "c", "d"])
            .unwrap();
        let scores = pagerank(&g, &PageRankConfig::default());
        for score in scores.values() {
            assert!((score - 0.25).abs() < 1e-9);
        }
    }

    #[test]
    fn heavier_edges_attract_more_mass() {
        // b sits on the heavy edge; it should outrank d.
        let g = build_graph(
            vec![("a", "b", Some(10.0)), ("a", "c", None), ("c", "d", None)],
            Vec::<&str>::new(),
        )
        .unwrap();

        let scores = pagerank(&g, &PageRankConfig::default());
        assert!(scores["b"] > scores["d"]);
    }

    #[test]
    fn self_loop_only_node_is_dangling() {
        let mut g = WeightedGraph::new();
        g.add_edge("a", "a", 5.0).unwrap();
        g.add_edge("b", "c", 1.0).unwrap();

        let scores = pagerank(&g, &PageRankConfig::default());
        let total: f64 = scores.values().sum();
        assert!((total - 1.0).abs() < 1e-6);
    }
}
