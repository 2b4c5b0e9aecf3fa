//! Input and output schema definitions.
//!
//! Input records come from the language-specific extractors; output
//! records are what the persistence and rendering layers consume.
//! The output document is versioned to allow future evolution.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of an analyzed entity.
///
/// Serialized with the extractor vocabulary (`PACKAGE`, `FILE`, `STRUCT`)
/// so stored layouts stay readable by existing consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    #[serde(rename = "PACKAGE", alias = "DIRECTORY")]
    Directory,
    #[serde(rename = "FILE")]
    File,
    #[serde(rename = "STRUCT", alias = "CLASS")]
    Class,
}

impl NodeKind {
    /// Parse a kind name, accepting both the wire and the model vocabulary
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_uppercase().as_str() {
            "PACKAGE" | "DIRECTORY" | "DIR" => Some(NodeKind::Directory),
            "FILE" => Some(NodeKind::File),
            "STRUCT" | "CLASS" => Some(NodeKind::Class),
            _ => None,
        }
    }

    /// Wire name used in flattened output
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Directory => "PACKAGE",
            NodeKind::File => "FILE",
            NodeKind::Class => "STRUCT",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Size metrics carried by every node
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metrics {
    /// Lines of code
    pub lines: u64,

    /// Number of methods
    pub methods: u64,

    /// Number of attributes (fields)
    pub attributes: u64,
}

impl Metrics {
    pub fn new(lines: u64, methods: u64, attributes: u64) -> Self {
        Self {
            lines,
            methods,
            attributes,
        }
    }

    /// Component-wise sum, `None` on overflow
    pub fn checked_add(&self, other: &Metrics) -> Option<Metrics> {
        Some(Metrics {
            lines: self.lines.checked_add(other.lines)?,
            methods: self.methods.checked_add(other.methods)?,
            attributes: self.attributes.checked_add(other.attributes)?,
        })
    }
}

/// One entity record produced by an extractor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityRecord {
    /// `/`-separated path relative to the project root
    pub relative_path: String,

    pub kind: NodeKind,

    /// Intrinsic metrics (meaningful for classes)
    pub metrics: Metrics,
}

impl EntityRecord {
    pub fn new(relative_path: impl Into<String>, kind: NodeKind, metrics: Metrics) -> Self {
        Self {
            relative_path: relative_path.into(),
            kind,
            metrics,
        }
    }
}

/// Parsed input document
#[derive(Debug, Clone, Default)]
pub struct EntityInput {
    /// Project name declared by the input, if any
    pub project: Option<String>,

    /// Snapshot (commit) identifier declared by the input, if any
    pub snapshot_id: Option<String>,

    pub entities: Vec<EntityRecord>,
}

/// One flattened layout row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutRecord {
    /// Display path (`/` for the root)
    pub path: String,

    #[serde(rename = "type")]
    pub kind: NodeKind,

    /// Node's own footprint
    pub root_w: f64,
    pub root_d: f64,

    /// Footprint reserved by the parent when packing this node
    pub child_w: f64,
    pub child_d: f64,

    /// Center relative to the parent's center
    pub child_x: f64,
    pub child_y: f64,

    pub lines: u64,
    pub methods: u64,
    pub attributes: u64,
}

/// Top-level layout document written to JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutDocument {
    /// Schema version for compatibility checking
    pub version: String,

    /// Project (root node) name
    pub project: String,

    /// Snapshot the layout was computed for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot_id: Option<String>,

    /// Timestamp when the layout was generated
    pub generated_at: String,

    /// Flattened records, root first
    pub records: Vec<LayoutRecord>,
}
