//! Spectral layout: Laplacian eigenvector coordinates
//!
//! Coordinates come from the eigenvectors of the two smallest non-zero
//! eigenvalues of the graph Laplacian (degree matrix minus adjacency
//! matrix). Disconnected graphs are decomposed first and each component
//! is embedded on its own, then the components are offset onto a grid
//! so their regions never overlap.

use nalgebra::{DMatrix, SymmetricEigen};

use crate::graph::components::connected_components;
use crate::graph::WeightedGraph;
use crate::layout::{circular, place_components, Point, PositionMap};

/// Compute the spectral layout.
///
/// Degenerate inputs are handled locally rather than surfaced as
/// errors: an empty graph yields an empty map, a graph of one or two
/// nodes falls back to circular placement, and tiny components get
/// fixed geometric positions.
pub fn spectral_layout(graph: &WeightedGraph) -> PositionMap {
    let n = graph.node_count();
    if n == 0 {
        return PositionMap::new();
    }
    if n <= 2 {
        // Too few nodes for two non-trivial eigenvectors.
        return circular::circular_layout(graph).unwrap_or_default();
    }

    let components = connected_components(graph);
    let per_component: Vec<Vec<Point>> = components
        .iter()
        .map(|members| embed_component(graph, members))
        .collect();

    place_components(graph, &components, per_component)
}

/// Embed one connected component. Components of one or two nodes are
/// placed geometrically; larger ones by eigendecomposition.
fn embed_component(graph: &WeightedGraph, members: &[u32]) -> Vec<Point> {
    match members.len() {
        1 => vec![Point::new(0.0, 0.0)],
        2 => vec![Point::new(-0.5, 0.0), Point::new(0.5, 0.0)],
        _ => eigenvector_positions(graph, members),
    }
}

fn eigenvector_positions(graph: &WeightedGraph, members: &[u32]) -> Vec<Point> {
    let k = members.len();
    let local: std::collections::HashMap<u32, usize> = members
        .iter()
        .enumerate()
        .map(|(i, &idx)| (idx, i))
        .collect();

    // Laplacian over the component. Self-loops cancel in D - A and are
    // left out entirely.
    let mut laplacian = DMatrix::<f64>::zeros(k, k);
    for (i, &u) in members.iter().enumerate() {
        let mut degree = 0.0;
        for &(v, w) in graph.neighbors(u) {
            if let Some(&j) = local.get(&v) {
                laplacian[(i, j)] = -w;
                degree += w;
            }
        }
        laplacian[(i, i)] = degree;
    }

    let eigen = SymmetricEigen::new(laplacian);

    // Ascending eigenvalues; skip the (numerically) zero one belonging
    // to the constant eigenvector.
    let mut order: Vec<usize> = (0..k).collect();
    order.sort_by(|&a, &b| {
        eigen.eigenvalues[a]
            .partial_cmp(&eigen.eigenvalues[b])
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    let nonzero: Vec<usize> = order
        .into_iter()
        .filter(|&i| eigen.eigenvalues[i] > 1e-9)
        .collect();

    let (fst, snd) = match nonzero[..] {
        [fst, snd, ..] => (fst, snd),
        _ => {
            // Fewer than two usable eigenvalues; a connected component
            // of three or more nodes should never get here, but a
            // degenerate decomposition must not crash the layout.
            log::debug!(
                "spectral embedding degenerate for component of {k} nodes; using circular fallback"
            );
            let step = std::f64::consts::TAU / k as f64;
            return (0..k)
                .map(|i| {
                    let angle = step * i as f64;
                    Point::new(angle.cos(), angle.sin())
                })
                .collect();
        }
    };

    (0..k)
        .map(|i| {
            Point::new(
                eigen.eigenvectors[(i, fst)],
                eigen.eigenvectors[(i, snd)],
            )
        })
        .collect()
}
