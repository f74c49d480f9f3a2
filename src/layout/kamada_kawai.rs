//! Kamada-Kawai layout via stress majorization
//!
//! Minimizes Σ_{i<j} w_ij (‖p_i − p_j‖ − d_ij)² where d_ij is the
//! graph-theoretic shortest-path distance and w_ij = 1/d_ij². The
//! all-pairs distances come from one Dijkstra run per source node;
//! unreachable pairs get a large finite distance so the optimization
//! stays well-defined on disconnected graphs.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use ndarray::Array2;
use rayon::prelude::*;

use crate::config::KamadaKawaiConfig;
use crate::graph::WeightedGraph;
use crate::layout::{Point, PositionMap};

const MIN_DISTANCE: f64 = 1e-9;

/// Compute the Kamada-Kawai layout.
///
/// `warm_start` positions seed the optimization when provided;
/// otherwise it starts from the circular placement. Hitting the
/// iteration cap before the stress change drops below tolerance is
/// reported as a warning alongside the best-effort result.
pub fn kamada_kawai_layout(
    graph: &WeightedGraph,
    config: &KamadaKawaiConfig,
    warm_start: Option<&PositionMap>,
) -> PositionMap {
    let n = graph.node_count();
    if n == 0 {
        return PositionMap::new();
    }
    if n == 1 {
        return [(graph.node_id(0).to_string(), Point::new(0.0, 0.0))]
            .into_iter()
            .collect();
    }

    let distances = shortest_path_matrix(graph);

    // Stress weights 1/d².
    let mut weights = Array2::<f64>::zeros((n, n));
    for i in 0..n {
        for j in 0..n {
            if i != j {
                weights[(i, j)] = 1.0 / (distances[(i, j)] * distances[(i, j)]);
            }
        }
    }

    let mut positions: Vec<Point> = match warm_start {
        Some(prior) => graph
            .nodes()
            .iter()
            .enumerate()
            .map(|(i, id)| {
                prior.get(id).copied().unwrap_or_else(|| {
                    // Missing nodes drop onto the circle so they start
                    // away from everything else.
                    let angle = std::f64::consts::TAU * i as f64 / n as f64;
                    Point::new(angle.cos(), angle.sin())
                })
            })
            .collect(),
        None => {
            let step = std::f64::consts::TAU / n as f64;
            (0..n)
                .map(|i| {
                    let angle = step * i as f64;
                    Point::new(angle.cos(), angle.sin())
                })
                .collect()
        }
    };

    let mut previous_stress = stress(&positions, &distances, &weights);
    let mut converged = false;

    for iteration in 0..config.max_iterations {
        positions = majorize(&positions, &distances, &weights);
        let current = stress(&positions, &distances, &weights);

        let change = (previous_stress - current).abs();
        if change < config.tolerance * previous_stress.max(1.0) {
            log::debug!(
                "kamada-kawai converged after {} iterations (stress {current:.6})",
                iteration + 1
            );
            converged = true;
            break;
        }
        previous_stress = current;
    }

    if !converged {
        log::warn!(
            "kamada-kawai stress majorization hit the {} iteration cap (stress {previous_stress:.6}); \
             returning last iterate",
            config.max_iterations
        );
    }

    graph
        .nodes()
        .iter()
        .zip(positions)
        .map(|(id, p)| (id.clone(), p))
        .collect()
}

/// One SMACOF update: every point moves to the weighted average of its
/// targets at ideal distance along the current directions.
fn majorize(positions: &[Point], distances: &Array2<f64>, weights: &Array2<f64>) -> Vec<Point> {
    let n = positions.len();
    (0..n)
        .into_par_iter()
        .map(|i| {
            let pi = positions[i];
            let (mut nx, mut ny, mut denom) = (0.0, 0.0, 0.0);
            for (j, pj) in positions.iter().enumerate() {
                if j == i {
                    continue;
                }
                let w = weights[(i, j)];
                let target = distances[(i, j)];
                let dist = pi.distance(pj).max(MIN_DISTANCE);
                nx += w * (pj.x + target * (pi.x - pj.x) / dist);
                ny += w * (pj.y + target * (pi.y - pj.y) / dist);
                denom += w;
            }
            if denom > 0.0 {
                Point::new(nx / denom, ny / denom)
            } else {
                pi
            }
        })
        .collect()
}

fn stress(positions: &[Point], distances: &Array2<f64>, weights: &Array2<f64>) -> f64 {
    let n = positions.len();
    let mut total = 0.0;
    for i in 0..n {
        for j in (i + 1)..n {
            let gap = positions[i].distance(&positions[j]) - distances[(i, j)];
            total += weights[(i, j)] * gap * gap;
        }
    }
    total
}

/// All-pairs shortest paths, one Dijkstra per source in parallel.
/// Unreachable pairs are set to twice the largest finite distance
/// (1.0 when the graph has no edges at all).
fn shortest_path_matrix(graph: &WeightedGraph) -> Array2<f64> {
    let n = graph.node_count();

    let rows: Vec<Vec<f64>> = (0..n)
        .into_par_iter()
        .map(|src| dijkstra(graph, src))
        .collect();

    let max_finite = rows
        .iter()
        .flatten()
        .copied()
        .filter(|d| d.is_finite())
        .fold(0.0f64, f64::max);
    let unreachable = if max_finite > 0.0 { 2.0 * max_finite } else { 1.0 };

    let mut matrix = Array2::<f64>::zeros((n, n));
    for (i, row) in rows.iter().enumerate() {
        for (j, &d) in row.iter().enumerate() {
            matrix[(i, j)] = if d.is_finite() { d } else { unreachable };
        }
    }
    matrix
}

/// Min-heap entry ordered by score. NaN never occurs: edge weights are
/// validated finite and positive on insertion.
struct MinScored(f64, usize);

impl PartialEq for MinScored {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for MinScored {}

impl PartialOrd for MinScored {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MinScored {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so BinaryHeap pops the smallest score first.
        other.0.partial_cmp(&self.0).unwrap_or(Ordering::Equal)
    }
}

fn dijkstra(graph: &WeightedGraph, src: usize) -> Vec<f64> {
    let n = graph.node_count();
    let mut dist = vec![f64::INFINITY; n];
    let mut heap = BinaryHeap::new();

    dist[src] = 0.0;
    heap.push(MinScored(0.0, src));

    while let Some(MinScored(d, u)) = heap.pop() {
        if d > dist[u] {
            continue;
        }
        for &(v, w) in graph.neighbors(u as u32) {
            let next = d + w;
            if next < dist[v as usize] {
                dist[v as usize] = next;
                heap.push(MinScored(next, v as usize));
            }
        }
    }

    dist
}
