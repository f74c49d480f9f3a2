//! Partition quality metrics

use crate::community::CommunityMap;
use crate::graph::WeightedGraph;

/// Modularity Q of a partition over the graph.
///
/// Q = (1/2m) Σ_ij [A_ij − k_i k_j / 2m] δ(c_i, c_j), in [-1, 1].
/// Self-loops count once toward intra-community weight and twice toward
/// their node's degree. Returns 0.0 for a graph without edge weight
/// (Q is undefined there) and skips nodes absent from the partition.
pub fn modularity(graph: &WeightedGraph, partition: &CommunityMap) -> f64 {
    let m = graph.total_weight();
    if m == 0.0 {
        return 0.0;
    }

    let membership: Vec<Option<usize>> = graph
        .nodes()
        .iter()
        .map(|id| partition.get(id).copied())
        .collect();
    let community_count = membership
        .iter()
        .flatten()
        .copied()
        .max()
        .map_or(0, |c| c + 1);

    let mut w_in = vec![0.0; community_count];
    let mut tot = vec![0.0; community_count];

    for u in 0..graph.node_count() as u32 {
        let Some(community) = membership[u as usize] else {
            continue;
        };
        tot[community] += graph.degree(u);
        w_in[community] += graph.loop_weight(u);
        for &(v, w) in graph.neighbors(u) {
            if u < v && membership[v as usize] == Some(community) {
                w_in[community] += w;
            }
        }
    }

    let two_m = 2.0 * m;
    (0..community_count)
        .map(|c| w_in[c] / m - (tot[c] / two_m).powi(2))
        .sum()
}
