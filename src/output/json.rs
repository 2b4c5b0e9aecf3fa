//! JSON layout output writer.
//!
//! Writes `LayoutDocument`s to JSON files with proper formatting.

use crate::layout::tree::CityLayout;
use crate::parser::schema::LayoutDocument;
use crate::utils::config::SCHEMA_VERSION;
use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Wrap a layout's records in a versioned, timestamped document
///
/// **Public** - used by the layout command and library callers
pub fn to_document(layout: &CityLayout, snapshot_id: Option<&str>) -> LayoutDocument {
    LayoutDocument {
        version: SCHEMA_VERSION.to_string(),
        project: layout.project().to_string(),
        snapshot_id: snapshot_id.map(str::to_string),
        generated_at: chrono::Utc::now().to_rfc3339(),
        records: layout.records(),
    }
}

/// Write a layout document to a JSON file
///
/// **Public** - main entry point for JSON output
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
///
/// # Example
/// ```ignore
/// let document = to_document(&layout, Some("abc123"));
/// write_layout(&document, "layout.json")?;
/// ```
pub fn write_layout(
    document: &LayoutDocument,
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing layout to: {}", output_path.display());

    prepare_output_path(output_path)?;

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, document).map_err(OutputError::SerializationFailed)?;

    info!(
        "Layout written successfully ({} records, {} bytes)",
        document.records.len(),
        calculate_file_size(output_path)
    );

    Ok(())
}

/// Serialize a layout document to a pretty JSON string
pub fn layout_to_string(document: &LayoutDocument) -> Result<String, OutputError> {
    serde_json::to_string_pretty(document).map_err(OutputError::SerializationFailed)
}

/// Validate the path and create missing parent directories
///
/// **Crate** - shared by every file writer
pub(crate) fn prepare_output_path(path: &Path) -> Result<(), OutputError> {
    validate_output_path(path)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    Ok(())
}

/// Validate that output path is writable
///
/// **Private** - internal validation
fn validate_output_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.exists() && path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

/// Calculate file size in bytes
///
/// **Private** - internal utility
fn calculate_file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}

/// Read a layout document from a JSON file
///
/// **Public** - useful for validation and testing
///
/// # Errors
/// * `OutputError::WriteFailed` - File read error (reusing WriteFailed for I/O)
/// * `OutputError::SerializationFailed` - JSON parse error
pub fn read_layout(input_path: impl AsRef<Path>) -> Result<LayoutDocument, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading layout from: {}", input_path.display());

    let file = File::open(input_path).map_err(OutputError::WriteFailed)?;

    let document: LayoutDocument =
        serde_json::from_reader(file).map_err(OutputError::SerializationFailed)?;

    debug!("Read layout with {} records", document.records.len());

    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::tree_builder::BuildOptions;
    use crate::layout::config::LayoutConfig;
    use crate::parser::schema::{EntityRecord, Metrics, NodeKind};
    use tempfile::NamedTempFile;

    fn create_test_document() -> LayoutDocument {
        let records = vec![EntityRecord::new(
            "pkg/a.go.(A)",
            NodeKind::Class,
            Metrics::new(10, 2, 1),
        )];
        let layout =
            CityLayout::compute(&records, &BuildOptions::new("demo"), &LayoutConfig::default())
                .unwrap();
        to_document(&layout, Some("abc123"))
    }

    #[test]
    fn test_write_and_read_layout() {
        let document = create_test_document();
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path();

        write_layout(&document, path).unwrap();
        let loaded = read_layout(path).unwrap();

        assert_eq!(loaded.version, SCHEMA_VERSION);
        assert_eq!(loaded.project, "demo");
        assert_eq!(loaded.snapshot_id.as_deref(), Some("abc123"));
        assert_eq!(loaded.records, document.records);
    }

    #[test]
    fn test_layout_to_string_uses_wire_names() {
        let json = layout_to_string(&create_test_document()).unwrap();

        assert!(json.contains("\"type\": \"STRUCT\""));
        assert!(json.contains("\"type\": \"PACKAGE\""));
        assert!(json.contains("\"root_w\""));
        assert!(json.contains("\"path\": \"pkg/a.go.(A)\""));
    }

    #[test]
    fn test_validate_output_path_empty() {
        let result = validate_output_path(Path::new(""));
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_output_path_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        let result = validate_output_path(temp_dir.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested_path = temp_dir.path().join("nested/dirs/layout.json");

        write_layout(&create_test_document(), &nested_path).unwrap();

        assert!(nested_path.exists());
    }
}
