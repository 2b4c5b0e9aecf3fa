//! Metric accumulation and city statistics.
//!
//! Inner nodes carry the sum of their children's metrics; leaves keep
//! their intrinsic values. Footprint sizing reads the accumulated
//! attribute counts, so accumulation must run before packing.

use super::node::Node;
use crate::parser::schema::{Metrics, NodeKind};
use crate::utils::error::LayoutError;
use log::debug;

/// Accumulate metrics bottom-up over a subtree
///
/// **Public** - main entry point for accumulation
///
/// # Returns
/// The subtree's accumulated metrics (also stored on `node`)
///
/// # Errors
/// * `LayoutError::MetricOverflow` - a sum does not fit in `u64`
pub fn accumulate_metrics(node: &mut Node) -> Result<Metrics, LayoutError> {
    if node.is_leaf() {
        return Ok(node.metrics);
    }

    let mut total = Metrics::default();
    for child in node.children_mut() {
        let child_metrics = accumulate_metrics(child)?;
        total = total
            .checked_add(&child_metrics)
            .ok_or_else(|| LayoutError::MetricOverflow {
                path: child.full_path.clone(),
            })?;
    }

    node.metrics = total;
    Ok(total)
}

/// Summary statistics over a city tree
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CitySummary {
    pub directories: usize,
    pub files: usize,
    pub classes: usize,

    /// Longest root-to-leaf edge count
    pub max_depth: usize,

    /// Metrics of the root (whole project)
    pub totals: Metrics,
}

impl CitySummary {
    pub fn total_nodes(&self) -> usize {
        self.directories + self.files + self.classes
    }

    /// Get human-readable summary
    ///
    /// **Public** - for logging and debugging
    pub fn summary(&self) -> String {
        format!(
            "Nodes: {} ({} dirs, {} files, {} classes) | Depth: {} | Lines: {} | Methods: {} | Attributes: {}",
            self.total_nodes(),
            self.directories,
            self.files,
            self.classes,
            self.max_depth,
            self.totals.lines,
            self.totals.methods,
            self.totals.attributes
        )
    }
}

/// Count nodes per kind and measure depth
pub fn summarize(root: &Node) -> CitySummary {
    let mut summary = CitySummary {
        totals: root.metrics,
        ..Default::default()
    };

    let mut stack = vec![(root, 0usize)];
    while let Some((node, depth)) = stack.pop() {
        match node.kind {
            NodeKind::Directory => summary.directories += 1,
            NodeKind::File => summary.files += 1,
            NodeKind::Class => summary.classes += 1,
        }
        summary.max_depth = summary.max_depth.max(depth);
        stack.extend(node.children().iter().map(|child| (child, depth + 1)));
    }

    debug!("{}", summary.summary());
    summary
}
