//! Entity input parsing and schema definitions.
//!
//! This module handles:
//! - Parsing entity records produced by the metric extractors
//! - Splitting and validating relative paths
//! - Filtering records by exclusion patterns
//! - Defining the input and output schema

pub mod exclude;
pub mod records;
pub mod schema;

// Re-export main types
pub use exclude::ExclusionSet;
pub use records::{parse_entities, split_class_path, split_path, ClassPath};
pub use schema::{EntityInput, EntityRecord, LayoutDocument, LayoutRecord, Metrics, NodeKind};
