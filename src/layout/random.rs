//! Random layout: seeded uniform placement in the unit square

use rand::Rng;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::graph::WeightedGraph;
use crate::layout::{Point, PositionMap};

/// Place each node uniformly at random in [0, 1) x [0, 1).
///
/// Nodes are drawn in insertion order from a generator seeded with
/// `seed`, so the same graph and seed always reproduce the same
/// placement.
pub fn random_layout(graph: &WeightedGraph, seed: u64) -> PositionMap {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);

    graph
        .nodes()
        .iter()
        .map(|id| {
            let x: f64 = rng.gen();
            let y: f64 = rng.gen();
            (id.clone(), Point::new(x, y))
        })
        .collect()
}
