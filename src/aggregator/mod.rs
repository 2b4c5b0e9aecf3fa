//! Aggregation of entity records into the city tree.
//!
//! This module transforms flat entity records into:
//! - An owned Directory/File/Class hierarchy
//! - Metrics accumulated from leaves to root
//! - Summary statistics for reporting

pub mod metrics;
pub mod node;
pub mod tree_builder;

// Re-export main types and functions
pub use metrics::{accumulate_metrics, summarize, CitySummary};
pub use node::{Footprint, Node, Position};
pub use tree_builder::{build_tree, BuildOptions, BuildReport, TreeBuilder};
