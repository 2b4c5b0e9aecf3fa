//! Output writers for layout data.
//!
//! This module handles writing data to disk in various formats:
//! - JSON layout documents
//! - Fixed-width text tables

pub mod json;
pub mod table;

// Re-export main functions
pub use json::{layout_to_string, read_layout, to_document, write_layout};
pub use table::{render_table, write_table};
