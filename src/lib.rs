//! Code City Layout
//!
//! Turns a flat list of analyzed source entities (directories, files and
//! classes with size metrics) into a nested "code city": a tree whose
//! nodes carry a rectangular footprint and a position relative to their
//! parent, ready to be stored per snapshot or extruded into 3D buildings.
//!
//! The pipeline is pure and synchronous:
//!
//! 1. [`aggregator::build_tree`] - flat records to an owned hierarchy
//! 2. [`aggregator::accumulate_metrics`] - bottom-up metric sums
//! 3. [`layout::pack_tree`] - bottom-up footprint packing
//! 4. [`layout::flatten()`] - ordered layout records
//!
//! [`layout::CityLayout::compute`] runs all four steps.
//!
//! ## Getting Started
//!
//! ```bash
//! codecity layout --input entities.json --output layout.json
//! codecity --help
//! ```

pub mod aggregator;
pub mod commands;
pub mod layout;
pub mod output;
pub mod parser;
pub mod utils;

pub use aggregator::{BuildOptions, Node};
pub use layout::{CityLayout, LayoutCache, LayoutConfig};
pub use parser::{EntityRecord, LayoutRecord, Metrics, NodeKind};
