//! Louvain modularity optimization
//!
//! Two-phase greedy algorithm: local moving of nodes between
//! communities while modularity improves, then aggregation of each
//! community into a super-node, repeated level by level. Scans are in
//! node insertion order with ties broken by lowest community id, so
//! repeated runs on the same graph produce identical partitions.

use std::collections::HashMap;

use itertools::Itertools;

use crate::config::LouvainConfig;
use crate::community::CommunityMap;
use crate::graph::WeightedGraph;

const MAX_PASSES: usize = 100;

/// Index-based working graph for one aggregation level. Self-loops
/// carry the intra-community weight accumulated by earlier levels.
struct LevelGraph {
    adjacency: Vec<Vec<(usize, f64)>>,
    loops: Vec<f64>,
}

impl LevelGraph {
    fn from_graph(graph: &WeightedGraph) -> Self {
        let n = graph.node_count();
        let adjacency = (0..n as u32)
            .map(|u| {
                graph
                    .neighbors(u)
                    .iter()
                    .map(|&(v, w)| (v as usize, w))
                    .collect()
            })
            .collect();
        let loops = (0..n as u32).map(|u| graph.loop_weight(u)).collect();
        Self { adjacency, loops }
    }

    fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Weighted degree with self-loops counted twice.
    fn degrees(&self) -> Vec<f64> {
        self.adjacency
            .iter()
            .zip(&self.loops)
            .map(|(adj, &lw)| adj.iter().map(|&(_, w)| w).sum::<f64>() + 2.0 * lw)
            .collect()
    }
}

/// Detect communities by Louvain modularity maximization.
///
/// Returns one community id per node. An edgeless graph yields the
/// singleton partition (each node its own community). The input graph
/// is read-only; re-running on a derived graph (e.g. after
/// `remove_isolated`) produces an independent partition.
pub fn louvain(graph: &WeightedGraph, config: &LouvainConfig) -> CommunityMap {
    let n = graph.node_count();
    if n == 0 {
        return CommunityMap::new();
    }

    let m = graph.total_weight();
    if m == 0.0 {
        // No edges: modularity is undefined, fall back to singletons.
        return graph
            .nodes()
            .iter()
            .enumerate()
            .map(|(i, id)| (id.clone(), i))
            .collect();
    }

    log::info!(
        "running louvain on {} nodes, {} edges (total weight {m})",
        n,
        graph.edge_count()
    );

    let mut level = LevelGraph::from_graph(graph);
    // Composed assignment of every original node through all levels.
    let mut assignment: Vec<usize> = (0..n).collect();

    // First level always applies; later levels only while modularity
    // keeps improving by more than the configured minimum.
    let (membership, community_count, _) = one_level(&level, m);
    let mut best_q = level_modularity(&level, &membership, m);
    for slot in assignment.iter_mut() {
        *slot = membership[*slot];
    }
    level = aggregate(&level, &membership, community_count);

    let mut levels = 1;
    loop {
        let (membership, community_count, moved) = one_level(&level, m);
        if !moved {
            break;
        }
        let q = level_modularity(&level, &membership, m);
        if q - best_q < config.min_modularity_gain {
            break;
        }
        best_q = q;
        for slot in assignment.iter_mut() {
            *slot = membership[*slot];
        }
        level = aggregate(&level, &membership, community_count);
        levels += 1;
    }

    log::info!(
        "louvain finished after {levels} levels: {} communities, modularity {best_q:.4}",
        level.node_count()
    );

    graph
        .nodes()
        .iter()
        .zip(assignment)
        .map(|(id, community)| (id.clone(), community))
        .collect()
}

/// Phase 1: local moving until a full pass makes zero moves.
///
/// Returns the renumbered membership vector, the number of communities,
/// and whether any node moved at all.
fn one_level(level: &LevelGraph, m: f64) -> (Vec<usize>, usize, bool) {
    let n = level.node_count();
    let degrees = level.degrees();
    let two_m = 2.0 * m;

    let mut membership: Vec<usize> = (0..n).collect();
    // Sum of degrees per community.
    let mut tot = degrees.clone();
    let mut moved_any = false;

    // Pass cap guards against float-noise oscillation between equally
    // good moves; real inputs settle long before it.
    for _pass in 0..MAX_PASSES {
        let mut moves = 0;

        for u in 0..n {
            let k_u = degrees[u];
            let current = membership[u];

            // Weight from u into each neighboring community.
            let mut neighbor_weight: HashMap<usize, f64> = HashMap::new();
            neighbor_weight.insert(current, 0.0);
            for &(v, w) in &level.adjacency[u] {
                *neighbor_weight.entry(membership[v]).or_insert(0.0) += w;
            }

            // Evaluate gains with u taken out of its community.
            tot[current] -= k_u;

            let mut best_community = current;
            let mut best_gain = neighbor_weight[&current] - tot[current] * k_u / two_m;
            for (&community, &weight) in neighbor_weight
                .iter()
                .sorted_by_key(|&(&community, _)| community)
            {
                if community == current {
                    continue;
                }
                let gain = weight - tot[community] * k_u / two_m;
                // Strict comparison over ascending ids: equal gains keep
                // the lowest community id.
                if gain > best_gain {
                    best_gain = gain;
                    best_community = community;
                }
            }

            tot[best_community] += k_u;
            if best_community != current {
                membership[u] = best_community;
                moves += 1;
                moved_any = true;
            }
        }

        if moves == 0 {
            break;
        }
    }

    let count = renumber(&mut membership);
    (membership, count, moved_any)
}

/// Renumber community ids to 0..k in order of first occurrence over the
/// node scan. Returns k.
fn renumber(membership: &mut [usize]) -> usize {
    let mut remap: HashMap<usize, usize> = HashMap::new();
    for slot in membership.iter_mut() {
        let next = remap.len();
        *slot = *remap.entry(*slot).or_insert(next);
    }
    remap.len()
}

/// Phase 2: collapse each community into a super-node. Inter-community
/// weights sum onto a single edge; intra-community weight (including
/// carried self-loops) becomes the super-node's self-loop.
fn aggregate(level: &LevelGraph, membership: &[usize], community_count: usize) -> LevelGraph {
    let mut loops = vec![0.0; community_count];
    let mut between: HashMap<(usize, usize), f64> = HashMap::new();

    for (u, &lw) in level.loops.iter().enumerate() {
        loops[membership[u]] += lw;
    }

    for (u, adj) in level.adjacency.iter().enumerate() {
        for &(v, w) in adj {
            if u >= v {
                continue; // each undirected edge once
            }
            let (cu, cv) = (membership[u], membership[v]);
            if cu == cv {
                loops[cu] += w;
            } else {
                let key = (cu.min(cv), cu.max(cv));
                *between.entry(key).or_insert(0.0) += w;
            }
        }
    }

    let mut adjacency = vec![Vec::new(); community_count];
    for ((cu, cv), w) in between {
        adjacency[cu].push((cv, w));
        adjacency[cv].push((cu, w));
    }
    // Sorted adjacency keeps neighbor scans deterministic.
    for list in adjacency.iter_mut() {
        list.sort_unstable_by_key(|&(v, _)| v);
    }

    LevelGraph { adjacency, loops }
}

/// Modularity of a membership over a level graph. `w_in` counts each
/// intra-community edge once and self-loops once; degrees count loops
/// twice.
fn level_modularity(level: &LevelGraph, membership: &[usize], m: f64) -> f64 {
    let community_count = membership.iter().copied().max().map_or(0, |c| c + 1);
    let mut w_in = vec![0.0; community_count];
    let mut tot = vec![0.0; community_count];

    let degrees = level.degrees();
    for (u, &community) in membership.iter().enumerate() {
        tot[community] += degrees[u];
        w_in[community] += level.loops[u];
        for &(v, w) in &level.adjacency[u] {
            if u < v && membership[v] == community {
                w_in[community] += w;
            }
        }
    }

    let two_m = 2.0 * m;
    (0..community_count)
        .map(|c| w_in[c] / m - (tot[c] / two_m).powi(2))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::community::metrics::modularity;
    use crate::graph::build_graph;

    fn two_cliques() -> WeightedGraph {
        // Two K4 cliques joined by a single bridge.
        let mut edges = Vec::new();
        let left = ["a", "b", "c", "d"];
        let right = ["w", "x", "y", "z"];
        for group in [left, right] {
            for i in 0..4 {
                for j in (i + 1)..4 {
                    edges.push((group[i], group[j], None));
                }
            }
        }
        edges.push(("d", "w", None));
        build_graph(edges, Vec::<&str>::new()).unwrap()
    }

    #[test]
    fn empty_graph_gives_empty_map() {
        let g = WeightedGraph::new();
        assert!(louvain(&g, &LouvainConfig::default()).is_empty());
    }

    #[test]
    fn edgeless_graph_gives_singletons() {
        let g = build_graph(Vec::<(&str, &str, Option<f64>)>::new(), vec!["a", "b", "c"])
            .unwrap();
        let communities = louvain(&g, &LouvainConfig::default());
        assert_eq!(communities.len(), 3);
        let mut ids: Vec<usize> = communities.values().copied().collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn separates_two_cliques() {
        let g = two_cliques();
        let communities = louvain(&g, &LouvainConfig::default());

        for group in [["a", "b", "c", "d"], ["w", "x", "y", "z"]] {
            let first = communities[group[0]];
            for id in group {
                assert_eq!(communities[id], first, "{id} split off its clique");
            }
        }
        assert_ne!(communities["a"], communities["z"]);
    }

    #[test]
    fn beats_singleton_partition() {
        let g = two_cliques();
        let communities = louvain(&g, &LouvainConfig::default());

        let singletons: CommunityMap = g
            .nodes()
            .iter()
            .enumerate()
            .map(|(i, id)| (id.clone(), i))
            .collect();

        assert!(modularity(&g, &communities) >= modularity(&g, &singletons));
    }

    #[test]
    fn deterministic_across_runs() {
        let g = two_cliques();
        let first = louvain(&g, &LouvainConfig::default());
        let second = louvain(&g, &LouvainConfig::default());
        assert_eq!(first, second);
    }

    #[test]
    fn partition_covers_every_node_exactly_once() {
        let g = two_cliques();
        let communities = louvain(&g, &LouvainConfig::default());
        assert_eq!(communities.len(), g.node_count());
        for id in g.nodes() {
            assert!(communities.contains_key(id));
        }
    }

    #[test]
    fn rerun_after_removing_isolated() {
        let g = build_graph(
            vec![("a", "b", None), ("b", "c", None)],
            vec!["ghost1", "ghost2"],
        )
        .unwrap();

        let trimmed = g.remove_isolated();
        let communities = louvain(&trimmed, &LouvainConfig::default());

        assert!(!communities.contains_key("ghost1"));
        assert!(!communities.contains_key("ghost2"));
        assert_eq!(communities.len(), 3);
    }

    #[test]
    fn self_loops_do_not_break_detection() {
        let mut g = two_cliques();
        g.add_edge("a", "a", 3.0).unwrap();
        let communities = louvain(&g, &LouvainConfig::default());
        assert_eq!(communities["a"], communities["b"]);
    }
}
