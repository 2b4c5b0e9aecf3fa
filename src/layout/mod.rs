//! Spatial layout of the city tree.
//!
//! This module turns an accumulated tree into footprints and positions:
//! - Bottom-up shelf packing of sibling footprints
//! - Flattening into ordered layout records
//! - Queries over the finished layout and a bounded snapshot cache

pub mod cache;
pub mod config;
pub mod flatten;
pub mod generator;
pub mod tree;

// Re-export main types
pub use cache::LayoutCache;
pub use config::LayoutConfig;
pub use flatten::flatten;
pub use generator::{pack_tree, PositionGenerator};
pub use tree::CityLayout;
