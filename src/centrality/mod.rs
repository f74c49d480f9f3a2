//! Node centrality analysis module

pub mod pagerank;

pub use pagerank::{pagerank, ScoreMap};
