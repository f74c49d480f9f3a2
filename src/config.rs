//! Configuration for the analysis and layout algorithms
//!
//! Every numeric constant of the engine lives here as an overridable
//! default rather than a hard-coded literal.

use serde::{Deserialize, Serialize};

/// PageRank power-iteration parameters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PageRankConfig {
    /// Damping factor: probability of following an edge vs teleporting.
    pub damping: f64,

    /// Convergence tolerance on the L1 norm of score changes.
    pub tolerance: f64,

    /// Iteration cap; hitting it logs a warning and returns the last iterate.
    pub max_iterations: usize,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self {
            damping: 0.9,
            tolerance: 1e-6,
            max_iterations: 100,
        }
    }
}

/// Louvain community detection parameters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LouvainConfig {
    /// Minimum modularity improvement required to start another
    /// aggregation level.
    pub min_modularity_gain: f64,
}

impl Default for LouvainConfig {
    fn default() -> Self {
        Self {
            min_modularity_gain: 1e-7,
        }
    }
}

/// Fruchterman-Reingold force simulation parameters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SpringConfig {
    /// Number of simulation steps. Iteration count is the stopping rule;
    /// convergence is not required.
    pub iterations: usize,

    /// Initial temperature: the per-step displacement cap, decayed
    /// linearly to zero over the run.
    pub temperature: f64,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            iterations: 50,
            temperature: 0.1,
        }
    }
}

/// Kamada-Kawai stress majorization parameters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct KamadaKawaiConfig {
    /// Iteration cap; hitting it logs a warning and returns the last iterate.
    pub max_iterations: usize,

    /// Stop once the relative stress change between iterations drops
    /// below this value.
    pub tolerance: f64,
}

impl Default for KamadaKawaiConfig {
    fn default() -> Self {
        Self {
            max_iterations: 50,
            tolerance: 1e-5,
        }
    }
}

/// Parameters shared by the layout dispatcher.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default)]
pub struct LayoutConfig {
    /// Seed for every randomized placement. The same seed yields the
    /// same coordinates.
    pub seed: u64,

    pub spring: SpringConfig,

    pub kamada_kawai: KamadaKawaiConfig,
}
