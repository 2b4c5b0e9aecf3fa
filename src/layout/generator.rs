//! Footprint packing.
//!
//! Children are sorted by reserved width (descending, then by name) and
//! laid out in columns by a greedy shelf generator: each child goes below
//! the previous one until the column holds more than `ceil(sqrt(n))`
//! children and the next one would pass the current total width, at which
//! point a new column starts to the right.
//!
//! The result is deterministic and stable across runs, not area-optimal.

use super::config::LayoutConfig;
use crate::aggregator::node::{Footprint, Node, Position};
use crate::parser::schema::NodeKind;
use crate::utils::error::LayoutError;
use log::debug;

/// Column-filling position generator for one parent
#[derive(Debug, Clone)]
pub struct PositionGenerator {
    dimension: usize,
    margin: f64,
    x_ref: f64,
    y_ref: f64,
    current_index: usize,
    max_width: f64,
    max_height: f64,
}

impl PositionGenerator {
    /// Generator for `node_count` children
    pub fn new(node_count: usize, margin: f64) -> Self {
        Self {
            dimension: (node_count as f64).sqrt().ceil() as usize,
            margin,
            x_ref: 0.0,
            y_ref: 0.0,
            current_index: 0,
            max_width: 0.0,
            max_height: 0.0,
        }
    }

    /// Center of the next child, measured from the parent's corner
    pub fn next_position(&mut self, width: f64, depth: f64) -> Position {
        self.current_index += 1;

        if self.current_index > self.dimension && self.y_ref + depth >= self.max_width {
            self.current_index = 0;
            self.y_ref = 0.0;
            self.x_ref = self.max_width + self.margin;
        }

        let position = Position::new(
            self.x_ref + (width + self.margin) / 2.0,
            self.y_ref + (depth + self.margin) / 2.0,
        );

        self.max_width = self.max_width.max(self.x_ref + width);
        self.max_height = self.max_height.max(self.y_ref + depth);
        self.y_ref += depth + self.margin;

        position
    }

    /// Bounding box of everything placed so far
    pub fn bounds(&self) -> Footprint {
        Footprint::new(self.max_width + self.margin, self.max_height + self.margin)
    }
}

/// Compute footprints and positions for a whole subtree
///
/// **Public** - main entry point for packing
///
/// Metrics must already be accumulated. Children are packed before their
/// parent, and each parent's children end up sorted in packing order.
///
/// # Errors
/// * `LayoutError::NonFiniteFootprint` - a computed size is NaN or infinite
pub fn pack_tree(root: &mut Node, config: &LayoutConfig) -> Result<(), LayoutError> {
    pack_node(root, config)?;
    debug!(
        "Packed '{}' into {:.2} x {:.2}",
        root.full_path, root.footprint.width, root.footprint.depth
    );
    Ok(())
}

fn pack_node(node: &mut Node, config: &LayoutConfig) -> Result<(), LayoutError> {
    if node.kind == NodeKind::Class || node.is_leaf() {
        let side = (node.metrics.attributes as f64 + 1.0).max(config.min_footprint);
        node.footprint = Footprint::square(side);
        node.reserved = node.footprint;
        return ensure_finite(node);
    }

    for child in node.children_mut() {
        pack_node(child, config)?;
        if child.kind == NodeKind::Directory {
            if let Some(side) = config.directory_footprint {
                child.reserved = Footprint::square(side);
            }
        }
        child.reserved.width = child.reserved.width.max(config.min_footprint);
        child.reserved.depth = child.reserved.depth.max(config.min_footprint);
    }

    node.sort_children_by(|a, b| {
        b.reserved
            .width
            .total_cmp(&a.reserved.width)
            .then_with(|| a.name.cmp(&b.name))
    });

    let mut generator = PositionGenerator::new(node.children().len(), config.margin);
    for child in node.children_mut() {
        child.position = Some(generator.next_position(child.reserved.width, child.reserved.depth));
    }

    let bounds = generator.bounds();
    let (half_width, half_depth) = (bounds.width / 2.0, bounds.depth / 2.0);
    for child in node.children_mut() {
        if let Some(position) = child.position.as_mut() {
            position.x -= half_width;
            position.y -= half_depth;
        }
    }

    node.footprint = bounds;
    if node.kind == NodeKind::File && config.file_member_padding {
        let padding = node.metrics.attributes as f64;
        node.footprint.width += padding;
        node.footprint.depth += padding;
    }
    node.reserved = node.footprint;

    ensure_finite(node)
}

fn ensure_finite(node: &Node) -> Result<(), LayoutError> {
    if node.footprint.is_finite() && node.reserved.is_finite() {
        Ok(())
    } else {
        Err(LayoutError::NonFiniteFootprint {
            path: node.full_path.clone(),
        })
    }
}
