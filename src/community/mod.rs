//! Community detection module

pub mod louvain;
pub mod metrics;

use std::collections::HashMap;

pub use louvain::louvain;
pub use metrics::modularity;

/// Mapping from node ID to community id. Ids are non-negative and
/// partition the node set; they are not guaranteed contiguous across
/// graphs, only within a single run's renumbering.
pub type CommunityMap = HashMap<String, usize>;
