//! Build the city tree from flat entity records.
//!
//! Each record's path is walked from the root, creating intermediate
//! directory nodes on demand. The terminal segment becomes the record's
//! node; class records hang below their owning file under a synthetic
//! `file.(Class)` path.
//!
//! Example: `pkg/server.go.(Server)` yields
//! `project/pkg` (directory) -> `project/pkg/server.go` (file) ->
//! `project/pkg/server.go.(Server)` (class).

use super::node::Node;
use crate::parser::records::{split_class_path, split_path};
use crate::parser::schema::{EntityRecord, NodeKind};
use crate::utils::config::DEFAULT_PROJECT_NAME;
use crate::utils::error::{LayoutError, PathError};
use log::{debug, warn};

/// Options controlling tree construction
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Name (and full path) of the root node
    pub project_name: String,

    /// Abort on the first malformed record instead of skipping it
    pub strict: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            project_name: DEFAULT_PROJECT_NAME.to_string(),
            strict: false,
        }
    }
}

impl BuildOptions {
    pub fn new(project_name: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
            ..Default::default()
        }
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

/// What happened to the records fed into the builder
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Records that created their terminal node
    pub inserted: usize,

    /// Records whose terminal node already existed
    pub merged: usize,

    /// Malformed records that were dropped
    pub skipped: usize,

    /// Records that changed the kind of an existing node
    pub kind_conflicts: usize,
}

/// Incremental tree builder
///
/// **Public** - use `build_tree` for the common one-shot case
#[derive(Debug)]
pub struct TreeBuilder {
    root: Node,
    options: BuildOptions,
    report: BuildReport,
}

impl TreeBuilder {
    pub fn new(options: BuildOptions) -> Self {
        Self {
            root: Node::root(&options.project_name),
            options,
            report: BuildReport::default(),
        }
    }

    /// Insert one record.
    ///
    /// Malformed paths are skipped with a warning, or returned as
    /// `LayoutError::InvalidPath` in strict mode.
    pub fn insert(&mut self, record: &EntityRecord) -> Result<(), LayoutError> {
        let located = match record.kind {
            NodeKind::Class => split_class_path(&record.relative_path)
                .map(|class| (class.file_segments, Some(class.class_name))),
            NodeKind::Directory | NodeKind::File => {
                split_path(&record.relative_path).map(|segments| (segments, None))
            }
        };

        match located {
            Ok((segments, class_name)) => {
                self.attach(record, &segments, class_name.as_deref());
                Ok(())
            }
            Err(reason) => self.reject(&record.relative_path, reason),
        }
    }

    /// Insert every record in order
    pub fn extend<'a>(
        &mut self,
        records: impl IntoIterator<Item = &'a EntityRecord>,
    ) -> Result<(), LayoutError> {
        for record in records {
            self.insert(record)?;
        }
        Ok(())
    }

    /// Current report
    pub fn report(&self) -> BuildReport {
        self.report
    }

    /// Finish building and hand over the tree
    pub fn finish(self) -> (Node, BuildReport) {
        debug!(
            "Built tree '{}': {} nodes ({} inserted, {} merged, {} skipped)",
            self.root.full_path,
            self.root.node_count(),
            self.report.inserted,
            self.report.merged,
            self.report.skipped
        );
        (self.root, self.report)
    }

    fn reject(&mut self, path: &str, reason: PathError) -> Result<(), LayoutError> {
        if self.options.strict {
            return Err(LayoutError::InvalidPath {
                path: path.to_string(),
                reason,
            });
        }
        warn!("Skipping malformed path '{}': {}", path, reason);
        self.report.skipped += 1;
        Ok(())
    }

    fn attach(&mut self, record: &EntityRecord, segments: &[String], class_name: Option<&str>) {
        let Some((last, parents)) = segments.split_last() else {
            return;
        };

        let mut current = &mut self.root;
        for segment in parents {
            current = current.get_or_insert_child(segment, NodeKind::Directory).0;
        }

        let terminal = match class_name {
            Some(class_name) => {
                // The owning file is implied by the class path
                let file = current.get_or_insert_child(last, NodeKind::File).0;
                if file.kind != NodeKind::File {
                    warn!(
                        "Path '{}' re-declared as {} (was {}) by class '{}', last kind wins",
                        file.full_path,
                        NodeKind::File,
                        file.kind,
                        class_name
                    );
                    file.kind = NodeKind::File;
                    self.report.kind_conflicts += 1;
                }
                file.get_or_insert_child(class_name, NodeKind::Class)
            }
            None => current.get_or_insert_child(last, record.kind),
        };

        let (node, created) = terminal;
        if created {
            self.report.inserted += 1;
        } else {
            self.report.merged += 1;
            if node.kind != record.kind {
                warn!(
                    "Path '{}' re-declared as {} (was {}), last kind wins",
                    record.relative_path, record.kind, node.kind
                );
                node.kind = record.kind;
                self.report.kind_conflicts += 1;
            }
        }
        node.metrics = record.metrics;
    }
}

/// Build a tree from records
///
/// **Public** - main entry point for tree building
///
/// # Errors
/// * `LayoutError::InvalidPath` - malformed record in strict mode
pub fn build_tree(
    records: &[EntityRecord],
    options: &BuildOptions,
) -> Result<(Node, BuildReport), LayoutError> {
    debug!("Building tree from {} records", records.len());

    let mut builder = TreeBuilder::new(options.clone());
    builder.extend(records)?;
    Ok(builder.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::schema::Metrics;

    fn record(path: &str, kind: NodeKind) -> EntityRecord {
        EntityRecord::new(path, kind, Metrics::default())
    }

    #[test]
    fn test_build_creates_intermediate_directories() {
        let records = vec![record("src/net/http.go", NodeKind::File)];

        let (root, report) = build_tree(&records, &BuildOptions::new("demo")).unwrap();

        let src = root.child("src", NodeKind::Directory).unwrap();
        let net = src.child("net", NodeKind::Directory).unwrap();
        let file = net.child("http.go", NodeKind::File).unwrap();
        assert_eq!(file.full_path, "demo/src/net/http.go");
        assert_eq!(report.inserted, 1);
    }

    #[test]
    fn test_class_attaches_under_file() {
        let records = vec![EntityRecord::new(
            "pkg/a.go.(Server)",
            NodeKind::Class,
            Metrics::new(30, 2, 3),
        )];

        let (root, _) = build_tree(&records, &BuildOptions::new("demo")).unwrap();

        let file = root
            .child("pkg", NodeKind::Directory)
            .and_then(|pkg| pkg.child("a.go", NodeKind::File))
            .unwrap();
        let class = file.child("Server", NodeKind::Class).unwrap();
        assert_eq!(class.full_path, "demo/pkg/a.go.(Server)");
        assert_eq!(class.metrics, Metrics::new(30, 2, 3));
    }

    #[test]
    fn test_reinsert_is_idempotent() {
        let records = vec![record("a/b.go", NodeKind::File), record("a/b.go", NodeKind::File)];

        let (root, report) = build_tree(&records, &BuildOptions::default()).unwrap();

        assert_eq!(root.node_count(), 3);
        assert_eq!(report.inserted, 1);
        assert_eq!(report.merged, 1);
    }

    #[test]
    fn test_conflicting_kind_last_wins() {
        let records = vec![record("a/b", NodeKind::File), record("a/b", NodeKind::Directory)];

        let (root, report) = build_tree(&records, &BuildOptions::default()).unwrap();

        let a = root.child("a", NodeKind::Directory).unwrap();
        assert_eq!(a.children()[0].kind, NodeKind::Directory);
        assert_eq!(report.kind_conflicts, 1);
    }

    #[test]
    fn test_class_under_directory_turns_it_into_file() {
        let records = vec![
            record("pkg", NodeKind::Directory),
            EntityRecord::new("pkg.(Handler)", NodeKind::Class, Metrics::new(10, 1, 2)),
        ];

        let (root, report) = build_tree(&records, &BuildOptions::default()).unwrap();

        let pkg = root.child("pkg", NodeKind::File).unwrap();
        assert_eq!(pkg.kind, NodeKind::File);
        assert!(pkg.child("Handler", NodeKind::Class).is_some());
        assert_eq!(report.kind_conflicts, 1);
        assert_eq!(report.inserted, 2);
    }

    #[test]
    fn test_malformed_paths_are_skipped() {
        let records = vec![
            record("ok.go", NodeKind::File),
            record("a//b.go", NodeKind::File),
            record("../escape.go", NodeKind::File),
            record("", NodeKind::Directory),
        ];

        let (root, report) = build_tree(&records, &BuildOptions::default()).unwrap();

        assert_eq!(root.children().len(), 1);
        assert_eq!(report.skipped, 3);
    }

    #[test]
    fn test_strict_mode_reports_offending_path() {
        let records = vec![record("../escape.go", NodeKind::File)];
        let options = BuildOptions::default().with_strict(true);

        match build_tree(&records, &options) {
            Err(LayoutError::InvalidPath { path, reason }) => {
                assert_eq!(path, "../escape.go");
                assert_eq!(reason, PathError::EscapesRoot);
            }
            other => panic!("expected InvalidPath, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_input_yields_root_only() {
        let (root, report) = build_tree(&[], &BuildOptions::new("empty")).unwrap();
        assert!(root.is_leaf());
        assert_eq!(root.full_path, "empty");
        assert_eq!(report, BuildReport::default());
    }
}
