//! City tree node.
//!
//! A parent exclusively owns its children. Lookup by name goes through a
//! per-parent index, so inserting the same segment twice yields the same
//! node and cycles cannot be formed.

use crate::parser::schema::{Metrics, NodeKind};
use crate::utils::config::PATH_SEPARATOR;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Rectangular base area of a node
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Footprint {
    pub width: f64,
    pub depth: f64,
}

impl Footprint {
    pub fn new(width: f64, depth: f64) -> Self {
        Self { width, depth }
    }

    pub fn square(side: f64) -> Self {
        Self::new(side, side)
    }

    pub fn is_finite(&self) -> bool {
        self.width.is_finite() && self.depth.is_finite()
    }
}

/// Center of a node relative to its parent's center
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Key of a child in its parent's index.
///
/// Classes live in their own namespace so a class never collides with a
/// file or directory of the same name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum ChildKey {
    Entry(String),
    Class(String),
}

impl ChildKey {
    fn for_kind(kind: NodeKind, name: &str) -> Self {
        match kind {
            NodeKind::Class => ChildKey::Class(name.to_string()),
            NodeKind::Directory | NodeKind::File => ChildKey::Entry(name.to_string()),
        }
    }
}

/// One entity in the city tree
#[derive(Debug, Clone)]
pub struct Node {
    /// Leaf identifier (directory, file or class name)
    pub name: String,

    pub kind: NodeKind,

    /// Unique path; the root's full path is the project name
    pub full_path: String,

    /// Intrinsic for leaves, accumulated for inner nodes
    pub metrics: Metrics,

    /// Own footprint
    pub footprint: Footprint,

    /// Footprint the parent packs this node with
    pub reserved: Footprint,

    /// Center relative to the parent's center (`None` for the root)
    pub position: Option<Position>,

    children: Vec<Node>,
    child_index: HashMap<ChildKey, usize>,
}

impl Node {
    pub fn new(name: impl Into<String>, kind: NodeKind, full_path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            full_path: full_path.into(),
            metrics: Metrics::default(),
            footprint: Footprint::default(),
            reserved: Footprint::default(),
            position: None,
            children: Vec::new(),
            child_index: HashMap::new(),
        }
    }

    /// Root node of a project
    pub fn root(project_name: &str) -> Self {
        Self::new(project_name, NodeKind::Directory, project_name)
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub(crate) fn children_mut(&mut self) -> &mut [Node] {
        &mut self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Child with the given name and kind namespace
    pub fn child(&self, name: &str, kind: NodeKind) -> Option<&Node> {
        self.child_index
            .get(&ChildKey::for_kind(kind, name))
            .map(|&index| &self.children[index])
    }

    /// Full path a child of this node would get
    pub fn child_path(&self, name: &str, kind: NodeKind) -> String {
        match kind {
            NodeKind::Class => format!("{}.({})", self.full_path, name),
            NodeKind::Directory | NodeKind::File => {
                format!("{}{}{}", self.full_path, PATH_SEPARATOR, name)
            }
        }
    }

    /// Return the named child, creating it with `kind` if missing.
    ///
    /// The flag is true when the child was created by this call.
    pub fn get_or_insert_child(&mut self, name: &str, kind: NodeKind) -> (&mut Node, bool) {
        let key = ChildKey::for_kind(kind, name);

        let existing = self.child_index.get(&key).copied();
        let (index, created) = match existing {
            Some(index) => (index, false),
            None => {
                let child = Node::new(name, kind, self.child_path(name, kind));
                self.children.push(child);
                let index = self.children.len() - 1;
                self.child_index.insert(key, index);
                (index, true)
            }
        };

        (&mut self.children[index], created)
    }

    /// Reorder children and keep the name index consistent
    pub(crate) fn sort_children_by<F>(&mut self, compare: F)
    where
        F: FnMut(&Node, &Node) -> Ordering,
    {
        self.children.sort_by(compare);
        self.child_index = self
            .children
            .iter()
            .enumerate()
            .map(|(index, child)| (ChildKey::for_kind(child.kind, &child.name), index))
            .collect();
    }

    /// This node and all descendants in pre-order
    pub fn iter(&self) -> PreOrder<'_> {
        PreOrder { stack: vec![self] }
    }

    /// Number of nodes in this subtree, including this one
    pub fn node_count(&self) -> usize {
        self.iter().count()
    }
}

/// Pre-order iterator over a subtree
pub struct PreOrder<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_or_insert_is_idempotent() {
        let mut root = Node::root("demo");

        let (_, created) = root.get_or_insert_child("src", NodeKind::Directory);
        assert!(created);
        let (src, created) = root.get_or_insert_child("src", NodeKind::Directory);
        assert!(!created);
        assert_eq!(src.full_path, "demo/src");
        assert_eq!(root.children().len(), 1);
    }

    #[test]
    fn test_class_namespace_is_separate() {
        let mut file = Node::new("a.go", NodeKind::File, "demo/a.go");
        file.get_or_insert_child("X", NodeKind::Class);
        file.get_or_insert_child("X", NodeKind::File);

        assert_eq!(file.children().len(), 2);
        assert_eq!(file.child("X", NodeKind::Class).unwrap().full_path, "demo/a.go.(X)");
        assert_eq!(file.child("X", NodeKind::File).unwrap().full_path, "demo/a.go/X");
    }

    #[test]
    fn test_sort_keeps_index_consistent() {
        let mut root = Node::root("demo");
        root.get_or_insert_child("b", NodeKind::File);
        root.get_or_insert_child("a", NodeKind::File);

        root.sort_children_by(|x, y| x.name.cmp(&y.name));

        assert_eq!(root.children()[0].name, "a");
        assert_eq!(root.child("b", NodeKind::File).unwrap().name, "b");
    }

    #[test]
    fn test_preorder_iteration() {
        let mut root = Node::root("demo");
        let (src, _) = root.get_or_insert_child("src", NodeKind::Directory);
        src.get_or_insert_child("main.go", NodeKind::File);
        root.get_or_insert_child("README.md", NodeKind::File);

        let paths: Vec<&str> = root.iter().map(|n| n.full_path.as_str()).collect();
        assert_eq!(paths, vec!["demo", "demo/src", "demo/src/main.go", "demo/README.md"]);
        assert_eq!(root.node_count(), 4);
    }
}
