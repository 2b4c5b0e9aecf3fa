//! Configuration and constants for the layout engine and CLI.

/// Current output schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Gap left between packed siblings and around a parent's bounding box
pub const DEFAULT_MARGIN: f64 = 1.0;

/// Fixed footprint a parent reserves for a directory child.
// Stored layouts were produced with this value; keep it overridable rather than derived.
pub const DEFAULT_DIRECTORY_FOOTPRINT: f64 = 5.0;

/// Smallest side a footprint may have before packing
pub const MIN_FOOTPRINT: f64 = 1.0;

/// Display path of the root node in flattened output
pub const ROOT_DISPLAY_PATH: &str = "/";

/// Separator used in every full and display path, independent of host platform
pub const PATH_SEPARATOR: char = '/';

/// Default project name when the input carries none
pub const DEFAULT_PROJECT_NAME: &str = "project";

/// Patterns excluded from every analysis unless disabled
pub const DEFAULT_EXCLUSIONS: &[&str] = &["**/vendor/**"];

// Field names accepted for each input attribute (extractors disagree on naming)
pub const PATH_FIELD_NAMES: &[&str] = &["relativePath", "relative_path", "path", "file_path"];
pub const KIND_FIELD_NAMES: &[&str] = &["kind", "type"];
pub const LINES_FIELD_NAMES: &[&str] = &["loc", "lines", "numberOfLines"];
pub const METHODS_FIELD_NAMES: &[&str] = &["methods", "method_count", "numberOfMethods"];
pub const ATTRIBUTES_FIELD_NAMES: &[&str] = &["attributes", "attr_count", "numberOfAttributes"];
