//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod layout;
pub mod models;
pub mod utils;

// Re-export main command functions
pub use layout::{execute_layout, read_entities, validate_args};
pub use models::{LayoutArgs, OutputFormat};
pub use utils::{display_schema, display_version, validate_layout_file};
