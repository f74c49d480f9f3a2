//! Layout engine: 2-D node placement strategies
//!
//! Six interchangeable strategies behind one dispatch function. The
//! strategy set is a closed enum so adding a strategy forces every
//! match site to handle it. All randomized strategies are deterministic
//! given the seed in [`LayoutConfig`].

pub mod circular;
pub mod random;
pub mod spectral;
pub mod spring;
pub mod kamada_kawai;
pub mod planar;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::config::LayoutConfig;
use crate::error::Result;
use crate::graph::WeightedGraph;

/// A 2-D node coordinate. Unconstrained real values; only the circular
/// and random strategies guarantee a bounded range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Mapping from node ID to its placed coordinate.
pub type PositionMap = HashMap<String, Point>;

/// The closed set of layout strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutStrategy {
    Circular,
    Random,
    Spectral,
    Spring,
    KamadaKawai,
    Planar,
}

impl LayoutStrategy {
    pub const ALL: [LayoutStrategy; 6] = [
        LayoutStrategy::Circular,
        LayoutStrategy::Random,
        LayoutStrategy::Spectral,
        LayoutStrategy::Spring,
        LayoutStrategy::KamadaKawai,
        LayoutStrategy::Planar,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            LayoutStrategy::Circular => "circular",
            LayoutStrategy::Random => "random",
            LayoutStrategy::Spectral => "spectral",
            LayoutStrategy::Spring => "spring",
            LayoutStrategy::KamadaKawai => "kamada_kawai",
            LayoutStrategy::Planar => "planar",
        }
    }
}

/// Compute node positions with the chosen strategy.
///
/// `warm_start` seeds the iterative strategies (spring, Kamada-Kawai)
/// with prior positions; the other strategies ignore it. Strategies
/// that cannot produce a placement (circular/planar on an empty graph,
/// planar on a non-planar graph) return an error; the rest map an
/// empty graph to an empty result.
pub fn layout(
    graph: &WeightedGraph,
    strategy: LayoutStrategy,
    config: &LayoutConfig,
    warm_start: Option<&PositionMap>,
) -> Result<PositionMap> {
    log::debug!(
        "computing {} layout for {} nodes",
        strategy.name(),
        graph.node_count()
    );

    match strategy {
        LayoutStrategy::Circular => circular::circular_layout(graph),
        LayoutStrategy::Random => Ok(random::random_layout(graph, config.seed)),
        LayoutStrategy::Spectral => Ok(spectral::spectral_layout(graph)),
        LayoutStrategy::Spring => Ok(spring::spring_layout(
            graph,
            &config.spring,
            config.seed,
            warm_start,
        )),
        LayoutStrategy::KamadaKawai => Ok(kamada_kawai::kamada_kawai_layout(
            graph,
            &config.kamada_kawai,
            warm_start,
        )),
        LayoutStrategy::Planar => planar::planar_layout(graph),
    }
}

/// Center points on their centroid and scale the farthest point to
/// `radius`. No-op for empty or fully coincident point sets.
pub(crate) fn normalize(points: &mut [Point], radius: f64) {
    if points.is_empty() {
        return;
    }

    let n = points.len() as f64;
    let cx = points.iter().map(|p| p.x).sum::<f64>() / n;
    let cy = points.iter().map(|p| p.y).sum::<f64>() / n;
    for p in points.iter_mut() {
        p.x -= cx;
        p.y -= cy;
    }

    let max_norm = points
        .iter()
        .map(|p| p.x.hypot(p.y))
        .fold(0.0f64, f64::max);
    if max_norm > 1e-12 {
        let scale = radius / max_norm;
        for p in points.iter_mut() {
            p.x *= scale;
            p.y *= scale;
        }
    }
}

/// Assemble per-component layouts into global positions, offsetting
/// each component onto its own grid cell so components never overlap.
/// Component layouts are normalized to radius 0.8 inside 2.0-wide
/// cells.
pub(crate) fn place_components(
    graph: &WeightedGraph,
    components: &[Vec<u32>],
    mut per_component: Vec<Vec<Point>>,
) -> PositionMap {
    let single = components.len() <= 1;
    let columns = (components.len() as f64).sqrt().ceil().max(1.0) as usize;

    let mut out = PositionMap::with_capacity(graph.node_count());
    for (c, (members, points)) in components.iter().zip(per_component.iter_mut()).enumerate() {
        normalize(points, 0.8);
        let (dx, dy) = if single {
            (0.0, 0.0)
        } else {
            let col = (c % columns) as f64;
            let row = (c / columns) as f64;
            (col * 2.0, -row * 2.0)
        };
        for (&idx, p) in members.iter().zip(points.iter()) {
            out.insert(
                graph.node_id(idx).to_string(),
                Point::new(p.x + dx, p.y + dy),
            );
        }
    }

    out
}
