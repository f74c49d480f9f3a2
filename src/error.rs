//! Error types for the analysis engine

use thiserror::Error;

/// Errors surfaced to callers of the engine.
///
/// Non-fatal conditions (iteration caps hit by PageRank or stress
/// majorization, spectral degeneracy on disconnected graphs) are handled
/// with a logged warning and a best-effort result instead of a variant
/// here.
#[derive(Debug, Error)]
pub enum GraphError {
    /// Malformed node or edge input (non-finite or non-positive weight).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An operation that needs at least one node was given an empty graph.
    #[error("operation requires a non-empty graph")]
    EmptyGraph,

    /// Planar layout was requested for a graph that is not planar.
    #[error("graph is not planar: {0}")]
    NonPlanar(String),
}

pub type Result<T> = std::result::Result<T, GraphError>;
