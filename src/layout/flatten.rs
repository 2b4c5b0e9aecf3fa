//! Flatten a packed tree into layout records.
//!
//! Records are emitted in pre-order, root first, children in packing
//! order. The root is always `/`; every other path is the node's full
//! path with the project prefix stripped.

use crate::aggregator::node::Node;
use crate::parser::schema::LayoutRecord;
use crate::utils::config::{PATH_SEPARATOR, ROOT_DISPLAY_PATH};

/// Flatten a whole tree
///
/// **Public** - main entry point for flattening
pub fn flatten(root: &Node) -> Vec<LayoutRecord> {
    let mut records = Vec::with_capacity(root.node_count());
    records.push(root_record(root));

    let prefix = root_prefix(root);
    for child in root.children() {
        flatten_into(child, &prefix, &mut records);
    }

    records
}

/// Prefix stripped from full paths to get display paths
pub(crate) fn root_prefix(root: &Node) -> String {
    format!("{}{}", root.full_path, PATH_SEPARATOR)
}

/// Display path of a non-root node
pub(crate) fn display_path(node: &Node, prefix: &str) -> String {
    node.full_path
        .strip_prefix(prefix)
        .unwrap_or(&node.full_path)
        .to_string()
}

/// Append a non-root subtree in pre-order
pub(crate) fn flatten_into(node: &Node, prefix: &str, out: &mut Vec<LayoutRecord>) {
    out.push(node_record(node, display_path(node, prefix)));
    for child in node.children() {
        flatten_into(child, prefix, out);
    }
}

/// Root record: no parent, so reserved size and position are zero
pub(crate) fn root_record(root: &Node) -> LayoutRecord {
    LayoutRecord {
        path: ROOT_DISPLAY_PATH.to_string(),
        kind: root.kind,
        root_w: root.footprint.width,
        root_d: root.footprint.depth,
        child_w: 0.0,
        child_d: 0.0,
        child_x: 0.0,
        child_y: 0.0,
        lines: root.metrics.lines,
        methods: root.metrics.methods,
        attributes: root.metrics.attributes,
    }
}

fn node_record(node: &Node, path: String) -> LayoutRecord {
    let position = node.position.unwrap_or_default();
    LayoutRecord {
        path,
        kind: node.kind,
        root_w: node.footprint.width,
        root_d: node.footprint.depth,
        child_w: node.reserved.width,
        child_d: node.reserved.depth,
        child_x: position.x,
        child_y: position.y,
        lines: node.metrics.lines,
        methods: node.metrics.methods,
        attributes: node.metrics.attributes,
    }
}
