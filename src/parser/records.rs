//! Entity record parser.
//!
//! Reads the records produced by the metric extractors into
//! `EntityRecord`s. Extractors disagree on field naming and framing,
//! so the parser accepts:
//! - a JSON array of records
//! - an object with `entities` (plus optional `project` / `snapshot_id`)
//! - newline-delimited JSON, one record per line

use super::schema::{EntityInput, EntityRecord, Metrics, NodeKind};
use crate::utils::config::{
    ATTRIBUTES_FIELD_NAMES, KIND_FIELD_NAMES, LINES_FIELD_NAMES, METHODS_FIELD_NAMES,
    PATH_FIELD_NAMES, PATH_SEPARATOR,
};
use crate::utils::error::{ParseError, PathError};
use log::{debug, warn};
use serde_json::{Map, Value};

/// Parse raw extractor output into entity records
///
/// **Public** - main entry point for parsing
///
/// # Errors
/// * `ParseError::JsonError` - input is neither JSON nor JSON Lines
/// * `ParseError::InvalidFormat` - a record is not an object or has no kind
/// * `ParseError::UnknownKind` - a record names a kind we do not model
pub fn parse_entities(raw: &str) -> Result<EntityInput, ParseError> {
    if raw.trim().is_empty() {
        debug!("Empty entity input");
        return Ok(EntityInput::default());
    }

    match serde_json::from_str::<Value>(raw) {
        Ok(value) => parse_document(&value),
        Err(whole_doc_err) => {
            debug!("Input is not a single JSON document, trying JSON Lines");
            parse_json_lines(raw).map_err(|lines_err| match lines_err {
                // A line-level JSON failure says less than the whole-document one
                ParseError::JsonError(_) => ParseError::JsonError(whole_doc_err),
                other => other,
            })
        }
    }
}

/// Parse a single JSON document (array or wrapper object)
///
/// **Private** - internal helper for parse_entities
fn parse_document(value: &Value) -> Result<EntityInput, ParseError> {
    match value {
        Value::Array(items) => Ok(EntityInput {
            entities: parse_records(items.iter())?,
            ..Default::default()
        }),

        Value::Object(obj) => match obj.get("entities") {
            Some(Value::Array(items)) => Ok(EntityInput {
                project: string_field(obj, &["project", "projectName", "project_name"]),
                snapshot_id: string_field(obj, &["snapshot_id", "snapshotId", "commit"]),
                entities: parse_records(items.iter())?,
            }),
            Some(_) => Err(ParseError::InvalidFormat(
                "'entities' must be an array".to_string(),
            )),
            // A lone object is a one-line JSON Lines document
            None => Ok(EntityInput {
                entities: parse_records(std::iter::once(value))?,
                ..Default::default()
            }),
        },

        _ => Err(ParseError::InvalidFormat(
            "Input must be a JSON object or array".to_string(),
        )),
    }
}

/// Parse newline-delimited JSON records
///
/// **Private** - internal helper for parse_entities
fn parse_json_lines(raw: &str) -> Result<EntityInput, ParseError> {
    let values = raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(serde_json::from_str::<Value>)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(EntityInput {
        entities: parse_records(values.iter())?,
        ..Default::default()
    })
}

/// Parse an iterator of record values, skipping records without a path
///
/// **Private** - internal parsing logic
fn parse_records<'a>(
    items: impl Iterator<Item = &'a Value>,
) -> Result<Vec<EntityRecord>, ParseError> {
    let mut records = Vec::new();

    for (index, item) in items.enumerate() {
        if let Some(record) = parse_record(index, item)? {
            records.push(record);
        }
    }

    debug!("Parsed {} entity records", records.len());
    Ok(records)
}

/// Parse one record value
///
/// **Private** - internal parsing logic
fn parse_record(index: usize, value: &Value) -> Result<Option<EntityRecord>, ParseError> {
    let obj = value.as_object().ok_or_else(|| {
        ParseError::InvalidFormat(format!("Record {} is not a JSON object", index))
    })?;

    let Some(relative_path) = string_field(obj, PATH_FIELD_NAMES) else {
        warn!("Skipping record {}: no path field", index);
        return Ok(None);
    };

    let kind_name = string_field(obj, KIND_FIELD_NAMES).ok_or_else(|| {
        ParseError::InvalidFormat(format!("Record {} ('{}') has no kind", index, relative_path))
    })?;

    let kind = NodeKind::from_name(&kind_name).ok_or(ParseError::UnknownKind {
        index,
        kind: kind_name,
    })?;

    let metrics = Metrics {
        lines: metric_field(obj, LINES_FIELD_NAMES),
        methods: metric_field(obj, METHODS_FIELD_NAMES),
        attributes: metric_field(obj, ATTRIBUTES_FIELD_NAMES),
    };

    Ok(Some(EntityRecord {
        relative_path,
        kind,
        metrics,
    }))
}

/// First string value among the candidate field names
fn string_field(obj: &Map<String, Value>, names: &[&str]) -> Option<String> {
    names
        .iter()
        .find_map(|name| obj.get(*name).and_then(Value::as_str))
        .map(str::to_string)
}

/// First metric value among the candidate field names, 0 when absent
fn metric_field(obj: &Map<String, Value>, names: &[&str]) -> u64 {
    names
        .iter()
        .find_map(|name| obj.get(*name).map(|val| (name, val)))
        .map(|(name, val)| {
            parse_metric(val).unwrap_or_else(|| {
                warn!("Metric field '{}' has unusable value {}, using 0", name, val);
                0
            })
        })
        .unwrap_or(0)
}

/// Parse a metric from a number or numeric string.
///
/// `"N/A"` and null count as zero; negative or non-numeric values are unusable.
fn parse_metric(val: &Value) -> Option<u64> {
    match val {
        Value::Null => Some(0),
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite() && *f >= 0.0).map(|f| f as u64)),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() || s.eq_ignore_ascii_case("N/A") {
                Some(0)
            } else {
                s.parse::<u64>()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite() && *f >= 0.0).map(|f| f as u64))
            }
        }
        _ => None,
    }
}

/// Split a relative path into validated segments
///
/// **Public** - used by the tree builder
///
/// Backslashes are treated as separators so extractors running on
/// Windows produce the same tree. `.` segments are dropped.
///
/// # Errors
/// * `PathError::Empty` - nothing left after normalization
/// * `PathError::EmptySegment` - `//` or a trailing separator
/// * `PathError::EscapesRoot` - absolute path or a `..` segment
pub fn split_path(path: &str) -> Result<Vec<String>, PathError> {
    let normalized = path.trim().replace('\\', "/");

    if normalized.is_empty() {
        return Err(PathError::Empty);
    }
    if normalized.starts_with(PATH_SEPARATOR) {
        return Err(PathError::EscapesRoot);
    }

    let mut segments = Vec::new();
    for segment in normalized.split(PATH_SEPARATOR) {
        match segment {
            "" => return Err(PathError::EmptySegment),
            "." => continue,
            ".." => return Err(PathError::EscapesRoot),
            name => segments.push(name.to_string()),
        }
    }

    if segments.is_empty() {
        return Err(PathError::Empty);
    }

    Ok(segments)
}

/// A class record's path split into its owning file and class name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassPath {
    pub file_segments: Vec<String>,
    pub class_name: String,
}

/// Split a class record path.
///
/// The canonical form is the owning file path followed by `.(ClassName)`,
/// e.g. `pkg/server.go.(Server)`. Without that suffix the last segment is
/// the class name and the rest is the file path.
pub fn split_class_path(path: &str) -> Result<ClassPath, PathError> {
    let trimmed = path.trim();

    if let Some(open) = trimmed.strip_suffix(')').and_then(|p| p.rfind(".(")) {
        let class_name = &trimmed[open + 2..trimmed.len() - 1];
        if class_name.is_empty() || class_name.contains(['/', '\\']) {
            return Err(PathError::EmptySegment);
        }
        let file_part = &trimmed[..open];
        if file_part.is_empty() {
            return Err(PathError::MissingFile);
        }
        return Ok(ClassPath {
            file_segments: split_path(file_part)?,
            class_name: class_name.to_string(),
        });
    }

    let mut segments = split_path(trimmed)?;
    if segments.len() < 2 {
        return Err(PathError::MissingFile);
    }
    let class_name = segments.pop().unwrap_or_default();

    Ok(ClassPath {
        file_segments: segments,
        class_name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_array_input() {
        let raw = r#"[
            {"relativePath": "pkg/a.go", "kind": "FILE", "loc": 10, "methods": 0, "attributes": 0},
            {"relativePath": "pkg/a.go.(Server)", "kind": "STRUCT", "loc": 40, "methods": 3, "attributes": 2}
        ]"#;

        let input = parse_entities(raw).unwrap();

        assert_eq!(input.entities.len(), 2);
        assert_eq!(input.entities[1].kind, NodeKind::Class);
        assert_eq!(input.entities[1].metrics, Metrics::new(40, 3, 2));
        assert!(input.project.is_none());
    }

    #[test]
    fn test_parse_wrapped_input_with_aliases() {
        let raw = r#"{
            "project": "demo",
            "snapshot_id": "abc123",
            "entities": [
                {"path": "src/Main.java.(Main)", "type": "CLASS", "lines": "12", "method_count": 1, "attr_count": "N/A"}
            ]
        }"#;

        let input = parse_entities(raw).unwrap();

        assert_eq!(input.project.as_deref(), Some("demo"));
        assert_eq!(input.snapshot_id.as_deref(), Some("abc123"));
        assert_eq!(input.entities[0].metrics, Metrics::new(12, 1, 0));
    }

    #[test]
    fn test_parse_json_lines() {
        let raw = "{\"relativePath\": \"a\", \"kind\": \"PACKAGE\"}\n\n{\"relativePath\": \"a/b.go\", \"kind\": \"FILE\"}\n";

        let input = parse_entities(raw).unwrap();

        assert_eq!(input.entities.len(), 2);
        assert_eq!(input.entities[0].kind, NodeKind::Directory);
        assert_eq!(input.entities[1].metrics, Metrics::default());
    }

    #[test]
    fn test_parse_empty_input() {
        let input = parse_entities("   \n").unwrap();
        assert!(input.entities.is_empty());
    }

    #[test]
    fn test_parse_unknown_kind() {
        let raw = r#"[{"relativePath": "a", "kind": "MODULE"}]"#;
        assert!(matches!(
            parse_entities(raw),
            Err(ParseError::UnknownKind { index: 0, .. })
        ));
    }

    #[test]
    fn test_parse_invalid_json() {
        assert!(matches!(parse_entities("{not json"), Err(ParseError::JsonError(_))));
    }

    #[test]
    fn test_record_without_path_is_skipped() {
        let raw = r#"[{"kind": "FILE"}, {"relativePath": "x.go", "kind": "FILE"}]"#;
        let input = parse_entities(raw).unwrap();
        assert_eq!(input.entities.len(), 1);
    }

    #[test]
    fn test_negative_metric_defaults_to_zero() {
        let raw = r#"[{"relativePath": "x.go.(X)", "kind": "STRUCT", "attributes": -4}]"#;
        let input = parse_entities(raw).unwrap();
        assert_eq!(input.entities[0].metrics.attributes, 0);
    }

    #[test]
    fn test_split_path_valid() {
        assert_eq!(split_path("src/main/App.java").unwrap(), vec!["src", "main", "App.java"]);
        assert_eq!(split_path("src\\lib.rs").unwrap(), vec!["src", "lib.rs"]);
        assert_eq!(split_path("./src/./lib.rs").unwrap(), vec!["src", "lib.rs"]);
    }

    #[test]
    fn test_split_path_rejects_malformed() {
        assert_eq!(split_path(""), Err(PathError::Empty));
        assert_eq!(split_path("."), Err(PathError::Empty));
        assert_eq!(split_path("a//b"), Err(PathError::EmptySegment));
        assert_eq!(split_path("a/b/"), Err(PathError::EmptySegment));
        assert_eq!(split_path("/etc/passwd"), Err(PathError::EscapesRoot));
        assert_eq!(split_path("a/../../b"), Err(PathError::EscapesRoot));
    }

    #[test]
    fn test_split_class_path_with_suffix() {
        let class = split_class_path("pkg/server.go.(Server)").unwrap();
        assert_eq!(class.file_segments, vec!["pkg", "server.go"]);
        assert_eq!(class.class_name, "Server");
    }

    #[test]
    fn test_split_class_path_without_suffix() {
        let class = split_class_path("pkg/server.go/Server").unwrap();
        assert_eq!(class.file_segments, vec!["pkg", "server.go"]);
        assert_eq!(class.class_name, "Server");
    }

    #[test]
    fn test_split_class_path_missing_file() {
        assert_eq!(split_class_path("Server"), Err(PathError::MissingFile));
        assert_eq!(split_class_path(".(Server)"), Err(PathError::MissingFile));
        assert_eq!(split_class_path("a.go.()"), Err(PathError::EmptySegment));
    }
}
