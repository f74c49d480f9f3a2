//! Core library for the graph layout analyzer

pub mod config;
pub mod error;
pub mod graph;
pub mod centrality;
pub mod community;
pub mod layout;
pub mod pipeline;

pub use config::{KamadaKawaiConfig, LayoutConfig, LouvainConfig, PageRankConfig, SpringConfig};
pub use error::{GraphError, Result};
pub use graph::{build_graph, GraphBuilder, WeightedGraph};
pub use centrality::{pagerank, ScoreMap};
pub use community::{louvain, modularity, CommunityMap};
pub use layout::{layout, LayoutStrategy, Point, PositionMap};
pub use pipeline::{run_analysis, AnalysisConfig, AnalysisReport};
