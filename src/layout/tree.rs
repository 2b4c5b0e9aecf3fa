//! The finished city: a packed tree plus queries over it.
//!
//! Lookups take display paths (the same paths the flattener emits), so
//! a renderer can hand back a record's `path` to drill into it.

use super::config::LayoutConfig;
use super::flatten::{display_path, flatten, flatten_into, root_prefix};
use super::generator::pack_tree;
use crate::aggregator::metrics::{accumulate_metrics, summarize, CitySummary};
use crate::aggregator::node::Node;
use crate::aggregator::tree_builder::{build_tree, BuildOptions, BuildReport};
use crate::parser::schema::{EntityRecord, LayoutRecord};
use crate::utils::config::{PATH_SEPARATOR, ROOT_DISPLAY_PATH};
use crate::utils::error::LayoutError;
use log::{debug, info};

/// Packed, immutable city layout for one snapshot
#[derive(Debug, Clone)]
pub struct CityLayout {
    root: Node,
    report: BuildReport,
}

impl CityLayout {
    /// Build, accumulate and pack in one step
    ///
    /// **Public** - main entry point for the layout engine
    ///
    /// # Errors
    /// Any `LayoutError`, always naming the offending path. No partially
    /// packed layout is ever returned.
    pub fn compute(
        records: &[EntityRecord],
        options: &BuildOptions,
        config: &LayoutConfig,
    ) -> Result<Self, LayoutError> {
        let (mut root, report) = build_tree(records, options)?;
        if report.skipped > 0 {
            info!("Skipped {} malformed records", report.skipped);
        }

        accumulate_metrics(&mut root)?;
        pack_tree(&mut root, config)?;

        Ok(Self { root, report })
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Project (root) name
    pub fn project(&self) -> &str {
        &self.root.name
    }

    pub fn report(&self) -> &BuildReport {
        &self.report
    }

    pub fn summary(&self) -> CitySummary {
        summarize(&self.root)
    }

    /// Flattened records for the whole city
    pub fn records(&self) -> Vec<LayoutRecord> {
        flatten(&self.root)
    }

    /// Display path of a node in this layout
    pub fn display_path_of(&self, node: &Node) -> String {
        if std::ptr::eq(node, &self.root) {
            ROOT_DISPLAY_PATH.to_string()
        } else {
            display_path(node, &root_prefix(&self.root))
        }
    }

    /// Node at a display path
    pub fn find(&self, path: &str) -> Option<&Node> {
        self.path_to(path).and_then(|chain| chain.last().copied())
    }

    /// Ancestors of a node, root first, excluding the node itself
    pub fn ancestors(&self, path: &str) -> Option<Vec<&Node>> {
        let mut chain = self.path_to(path)?;
        chain.pop();
        Some(chain)
    }

    /// Descendants of a node in pre-order, excluding the node itself
    pub fn descendants(&self, path: &str) -> Option<Vec<&Node>> {
        self.find(path).map(|node| node.iter().skip(1).collect())
    }

    /// Flattened records of a node and its subtree, paths unchanged.
    ///
    /// Used to focus the city on one node.
    pub fn isolate(&self, path: &str) -> Option<Vec<LayoutRecord>> {
        let node = self.find(path)?;

        if std::ptr::eq(node, &self.root) {
            return Some(self.records());
        }

        let mut records = Vec::with_capacity(node.node_count());
        flatten_into(node, &root_prefix(&self.root), &mut records);
        debug!("Isolated '{}' with {} records", path, records.len());
        Some(records)
    }

    /// Chain of nodes from the root down to the node at `path`
    fn path_to(&self, path: &str) -> Option<Vec<&Node>> {
        let path = path.trim();
        if path == ROOT_DISPLAY_PATH || path.is_empty() {
            return Some(vec![&self.root]);
        }

        let target = format!(
            "{}{}{}",
            self.root.full_path,
            PATH_SEPARATOR,
            path.trim_start_matches(PATH_SEPARATOR)
        );

        let mut chain = vec![&self.root];
        let mut current = &self.root;
        'descend: loop {
            for child in current.children() {
                if child.full_path == target {
                    chain.push(child);
                    return Some(chain);
                }
                if is_ancestor_path(&child.full_path, &target) {
                    chain.push(child);
                    current = child;
                    continue 'descend;
                }
            }
            return None;
        }
    }
}

/// Whether `ancestor` is a strict path prefix of `path`.
///
/// A file is the ancestor of its classes (`a.go` -> `a.go.(A)`), a
/// directory of its entries (`pkg` -> `pkg/a.go`).
fn is_ancestor_path(ancestor: &str, path: &str) -> bool {
    path.strip_prefix(ancestor)
        .map(|rest| rest.starts_with(PATH_SEPARATOR) || rest.starts_with(".("))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::schema::{Metrics, NodeKind};

    fn sample_layout() -> CityLayout {
        let records = vec![
            EntityRecord::new("pkg/a.go.(A)", NodeKind::Class, Metrics::new(10, 1, 2)),
            EntityRecord::new("pkg/a.go.(B)", NodeKind::Class, Metrics::new(5, 0, 0)),
            EntityRecord::new("pkg/sub/b.go.(C)", NodeKind::Class, Metrics::new(1, 1, 1)),
            EntityRecord::new("main.go", NodeKind::File, Metrics::new(3, 0, 0)),
        ];
        CityLayout::compute(&records, &BuildOptions::new("demo"), &LayoutConfig::default()).unwrap()
    }

    #[test]
    fn test_find_by_display_path() {
        let layout = sample_layout();

        assert_eq!(layout.find("/").unwrap().full_path, "demo");
        assert_eq!(layout.find("pkg/a.go").unwrap().kind, NodeKind::File);
        assert_eq!(layout.find("pkg/a.go.(B)").unwrap().name, "B");
        assert!(layout.find("pkg/missing.go").is_none());
        assert!(layout.find("pkg/a.g").is_none());
    }

    #[test]
    fn test_ancestors_root_first() {
        let layout = sample_layout();

        let ancestors = layout.ancestors("pkg/sub/b.go.(C)").unwrap();
        let names: Vec<&str> = ancestors.iter().map(|n| n.name.as_str()).collect();

        assert_eq!(names, vec!["demo", "pkg", "sub", "b.go"]);
        assert!(layout.ancestors("/").unwrap().is_empty());
    }

    #[test]
    fn test_descendants_and_isolate() {
        let layout = sample_layout();

        let descendants = layout.descendants("pkg").unwrap();
        assert_eq!(descendants.len(), 6);

        let isolated = layout.isolate("pkg/a.go").unwrap();
        let paths: Vec<&str> = isolated.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, vec!["pkg/a.go", "pkg/a.go.(A)", "pkg/a.go.(B)"]);

        assert_eq!(layout.isolate("/").unwrap().len(), layout.root().node_count());
        assert!(layout.isolate("nope").is_none());
    }

    #[test]
    fn test_display_path_of() {
        let layout = sample_layout();
        let class = layout.find("pkg/a.go.(A)").unwrap();

        assert_eq!(layout.display_path_of(class), "pkg/a.go.(A)");
        assert_eq!(layout.display_path_of(layout.root()), "/");
    }

    #[test]
    fn test_compute_empty_input() {
        let layout =
            CityLayout::compute(&[], &BuildOptions::new("empty"), &LayoutConfig::default()).unwrap();

        let records = layout.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].path, "/");
        assert_eq!((records[0].root_w, records[0].root_d), (1.0, 1.0));
    }
}
