//! Circular layout: evenly spaced points on the unit circle

use std::f64::consts::TAU;

use crate::error::{GraphError, Result};
use crate::graph::WeightedGraph;
use crate::layout::{Point, PositionMap};

/// Place nodes on the unit circle, evenly spaced in insertion order.
///
/// Fails with `EmptyGraph` on zero nodes; there is no circle to place
/// nothing on.
pub fn circular_layout(graph: &WeightedGraph) -> Result<PositionMap> {
    let n = graph.node_count();
    if n == 0 {
        return Err(GraphError::EmptyGraph);
    }

    let step = TAU / n as f64;
    Ok(graph
        .nodes()
        .iter()
        .enumerate()
        .map(|(i, id)| {
            let angle = step * i as f64;
            (id.clone(), Point::new(angle.cos(), angle.sin()))
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::build_graph;

    #[test]
    fn empty_graph_fails() {
        let g = WeightedGraph::new();
        assert!(matches!(
            circular_layout(&g),
            Err(GraphError::EmptyGraph)
        ));
    }

    #[test]
    fn equal_angular_spacing_at_unit_distance() {
        let n = 6;
        let ids: Vec<String> = (0..n).map(|i| format!("n{i}")).collect();
        let g = build_graph(Vec::<(String, String, Option<f64>)>::new(), ids.clone()).unwrap();

        let pos = circular_layout(&g).unwrap();

        // All points at unit distance from the centroid (the origin).
        for id in &ids {
            let p = pos[id];
            assert!((p.x.hypot(p.y) - 1.0).abs() < 1e-12);
        }

        // Neighboring nodes separated by the same chord, i.e. the same
        // angular step of 2π/N.
        let expected_chord = 2.0 * (std::f64::consts::PI / n as f64).sin();
        for i in 0..n {
            let a = pos[&ids[i]];
            let b = pos[&ids[(i + 1) % n]];
            assert!((a.distance(&b) - expected_chord).abs() < 1e-12);
        }
    }

    #[test]
    fn single_node_sits_on_circle() {
        let g = build_graph(Vec::<(&str, &str, Option<f64>)>::new(), vec!["only"]).unwrap();
        let pos = circular_layout(&g).unwrap();
        assert!((pos["only"].x - 1.0).abs() < 1e-12);
        assert!(pos["only"].y.abs() < 1e-12);
    }
}
