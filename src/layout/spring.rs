//! Spring layout: Fruchterman-Reingold force simulation
//!
//! Every node pair repels with force k²/d, connected pairs attract
//! with force d²/k scaled by edge weight, and per-step movement is
//! capped by a temperature that decays linearly to zero. The iteration
//! count is the stopping rule; convergence is not required.

use rand::Rng;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use rayon::prelude::*;

use crate::config::SpringConfig;
use crate::graph::WeightedGraph;
use crate::layout::{Point, PositionMap};

const MIN_DISTANCE: f64 = 1e-9;

/// Run the force simulation.
///
/// Initial positions come from `warm_start` where available and from a
/// seeded uniform draw otherwise, so runs are reproducible for a fixed
/// seed.
pub fn spring_layout(
    graph: &WeightedGraph,
    config: &SpringConfig,
    seed: u64,
    warm_start: Option<&PositionMap>,
) -> PositionMap {
    let n = graph.node_count();
    if n == 0 {
        return PositionMap::new();
    }

    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    let mut positions: Vec<Point> = graph
        .nodes()
        .iter()
        .map(|id| {
            if let Some(p) = warm_start.and_then(|prior| prior.get(id)) {
                *p
            } else {
                Point::new(rng.gen(), rng.gen())
            }
        })
        .collect();

    // Optimal pair distance for unit layout area.
    let k = (1.0 / n as f64).sqrt();
    let mut temperature = config.temperature;
    let cooling = config.temperature / (config.iterations + 1) as f64;

    for _ in 0..config.iterations {
        // Per-node force accumulation reads the shared position slice
        // only, so the nodes can be processed independently.
        let displacements: Vec<(f64, f64)> = (0..n)
            .into_par_iter()
            .map(|i| node_displacement(graph, &positions, i, k))
            .collect();

        for (i, &(dx, dy)) in displacements.iter().enumerate() {
            let length = dx.hypot(dy);
            if length > MIN_DISTANCE {
                let step = length.min(temperature) / length;
                positions[i].x += dx * step;
                positions[i].y += dy * step;
            }
        }

        temperature -= cooling;
    }

    graph
        .nodes()
        .iter()
        .zip(positions)
        .map(|(id, p)| (id.clone(), p))
        .collect()
}

fn node_displacement(graph: &WeightedGraph, positions: &[Point], i: usize, k: f64) -> (f64, f64) {
    let (mut dx, mut dy) = (0.0, 0.0);
    let pi = positions[i];

    // Repulsion from every other node.
    for (j, pj) in positions.iter().enumerate() {
        if j == i {
            continue;
        }
        let (ux, uy, dist) = direction(pi, *pj, i, j);
        let force = k * k / dist;
        dx += ux * force;
        dy += uy * force;
    }

    // Attraction along incident edges, scaled by weight.
    for &(j, w) in graph.neighbors(i as u32) {
        let pj = positions[j as usize];
        let (ux, uy, dist) = direction(pi, pj, i, j as usize);
        let force = dist * dist / k * w;
        dx -= ux * force;
        dy -= uy * force;
    }

    (dx, dy)
}

/// Unit vector from `b` to `a` plus the clamped distance. Coincident
/// points get a deterministic pseudo-direction derived from the node
/// indices so overlapping nodes can separate.
fn direction(a: Point, b: Point, i: usize, j: usize) -> (f64, f64, f64) {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    let dist = dx.hypot(dy);
    if dist < MIN_DISTANCE {
        let angle = (i as f64 - j as f64) * 0.7;
        (angle.cos(), angle.sin(), MIN_DISTANCE)
    } else {
        (dx / dist, dy / dist, dist)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::build_graph;

    #[test]
    fn empty_graph_gives_empty_map() {
        let g = WeightedGraph::new();
        assert!(spring_layout(&g, &SpringConfig::default(), 0, None).is_empty());
    }

    #[test]
    fn deterministic_for_fixed_seed() {
        let g = build_graph(
            vec![("a", "b", None), ("b", "c", None), ("c", "a", None)],
            Vec::<&str>::new(),
        )
        .unwrap();

        let first = spring_layout(&g, &SpringConfig::default(), 42, None);
        let second = spring_layout(&g, &SpringConfig::default(), 42, None);
        assert_eq!(first, second);
    }

    #[test]
    fn connected_pair_ends_closer_than_disconnected_pair() {
        // Path a-b plus far-flung isolated repulsion partner c.
        let g = build_graph(vec![("a", "b", None)], vec!["c"]).unwrap();
        let pos = spring_layout(&g, &SpringConfig::default(), 1, None);

        let ab = pos["a"].distance(&pos["b"]);
        let ac = pos["a"].distance(&pos["c"]);
        let bc = pos["b"].distance(&pos["c"]);
        assert!(ab < ac && ab < bc, "ab={ab} ac={ac} bc={bc}");
    }

    #[test]
    fn warm_start_positions_are_used() {
        let g = build_graph(vec![("a", "b", None)], Vec::<&str>::new()).unwrap();
        let prior: PositionMap = [
            ("a".to_string(), Point::new(0.0, 0.0)),
            ("b".to_string(), Point::new(0.3, 0.0)),
        ]
        .into_iter()
        .collect();

        let zero_iter = SpringConfig {
            iterations: 0,
            ..SpringConfig::default()
        };
        let pos = spring_layout(&g, &zero_iter, 0, Some(&prior));
        assert_eq!(pos["b"], Point::new(0.3, 0.0));
    }
}
