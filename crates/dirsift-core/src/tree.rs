//! File tree container and statistics.

use std::collections::{HashMap, HashSet};
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ClassifyError;
use crate::node::{FileNode, NodeId, NodeKind};

/// Summary statistics for a scanned tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeStats {
    /// Total size in bytes of all plain files.
    pub total_size: u64,
    /// Total number of files.
    pub total_files: u64,
    /// Total number of directories.
    pub total_dirs: u64,
    /// Total number of symbolic links.
    pub total_symlinks: u64,
    /// Number of excluded subtrees.
    pub excluded_dirs: u64,
    /// Maximum depth reached.
    pub max_depth: u32,
}

impl TreeStats {
    /// Create new empty stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect statistics for every authoritative node below `root`.
    ///
    /// Excluded subtrees are counted but not entered. Dot entries are
    /// transparent and do not add a level of depth.
    pub fn from_root(root: &FileNode) -> Self {
        let mut stats = Self::new();
        stats.visit(root, 0);
        stats
    }

    fn visit(&mut self, node: &FileNode, depth: u32) {
        if node.excluded {
            self.excluded_dirs += 1;
            return;
        }

        match &node.kind {
            NodeKind::File { .. } => self.record_file(node.size, depth),
            NodeKind::Symlink { .. } => self.record_symlink(),
            NodeKind::Directory { .. } => self.record_dir(depth),
            NodeKind::DotEntry => {}
        }

        let child_depth = if node.is_dot_entry() { depth } else { depth + 1 };
        for child in &node.children {
            self.visit(child, child_depth);
        }
    }

    /// Update stats with a file entry.
    pub fn record_file(&mut self, size: u64, depth: u32) {
        self.total_files += 1;
        self.total_size += size;
        self.max_depth = self.max_depth.max(depth);
    }

    /// Record a directory.
    pub fn record_dir(&mut self, depth: u32) {
        self.total_dirs += 1;
        self.max_depth = self.max_depth.max(depth);
    }

    /// Record a symlink.
    pub fn record_symlink(&mut self) {
        self.total_symlinks += 1;
    }
}

/// Complete scanned file tree with metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileTree {
    /// Root node of the tree.
    pub root: FileNode,

    /// Root path that was scanned.
    pub root_path: PathBuf,

    /// Summary statistics.
    #[serde(default)]
    pub stats: TreeStats,
}

impl FileTree {
    /// Create a new file tree, computing its statistics.
    pub fn new(root: FileNode, root_path: impl Into<PathBuf>) -> Self {
        let stats = TreeStats::from_root(&root);
        Self {
            root,
            root_path: root_path.into(),
            stats,
        }
    }

    /// Recompute statistics after the tree was loaded or rebuilt.
    pub fn refresh_stats(&mut self) {
        self.stats = TreeStats::from_root(&self.root);
    }

    /// Get the total size of the tree.
    pub fn total_size(&self) -> u64 {
        self.root.size
    }

    /// Get the total number of files.
    pub fn total_files(&self) -> u64 {
        self.stats.total_files
    }

    /// Get the total number of directories.
    pub fn total_dirs(&self) -> u64 {
        self.stats.total_dirs
    }

    /// Look up a node by id.
    pub fn find(&self, id: NodeId) -> Option<&FileNode> {
        self.root.find(id)
    }

    /// Look up the node owning `id`. The root has no parent.
    pub fn parent_of(&self, id: NodeId) -> Option<&FileNode> {
        self.root.parent_of(id)
    }

    /// The subtree a classification should run over: the selected node, or
    /// the root when nothing is selected.
    pub fn subtree(&self, selection: Option<NodeId>) -> Result<&FileNode, ClassifyError> {
        match selection {
            None => Ok(&self.root),
            Some(id) => self.find(id).ok_or(ClassifyError::NodeNotFound { id }),
        }
    }

    /// Resolve a path relative to the root (or an absolute path under
    /// `root_path`) to a node.
    ///
    /// Dot entries are transparent: a file directly inside a directory is
    /// found even when the scanner grouped it under a dot entry.
    pub fn resolve(&self, path: impl AsRef<Path>) -> Result<&FileNode, ClassifyError> {
        let path = path.as_ref();
        let not_found = || ClassifyError::SubtreeNotFound {
            path: path.to_path_buf(),
        };
        let relative = match path.strip_prefix(&self.root_path) {
            Ok(relative) => relative,
            Err(_) if path.has_root() => return Err(not_found()),
            Err(_) => path,
        };

        let mut current = &self.root;
        for component in relative.components() {
            let name = match component {
                Component::Normal(name) => name.to_str().ok_or_else(not_found)?,
                Component::CurDir | Component::RootDir | Component::Prefix(_) => continue,
                Component::ParentDir => return Err(not_found()),
            };
            current = find_child(current, name).ok_or_else(not_found)?;
        }
        Ok(current)
    }

    /// Full path of every node in the tree, keyed by id.
    pub fn paths(&self) -> HashMap<NodeId, PathBuf> {
        let mut paths = HashMap::new();
        collect_paths(&self.root, &self.root_path, &mut paths);
        paths
    }

    /// Size of the node owning each node, keyed by the owned node's id.
    ///
    /// The owner is the direct parent, a dot entry included. The root has
    /// no entry.
    pub fn parent_sizes(&self) -> HashMap<NodeId, u64> {
        let mut sizes = HashMap::new();
        let mut stack = vec![&self.root];
        while let Some(node) = stack.pop() {
            for child in &node.children {
                sizes.insert(child.id, node.size);
                stack.push(child);
            }
        }
        sizes
    }

    /// Check that no two nodes share an id.
    ///
    /// Lookups by id assume uniqueness; trees from an external scanner
    /// should be checked once after loading.
    pub fn check_unique_ids(&self) -> Result<(), ClassifyError> {
        let mut seen = HashSet::new();
        let mut stack = vec![&self.root];
        while let Some(node) = stack.pop() {
            if !seen.insert(node.id) {
                return Err(ClassifyError::DuplicateId { id: node.id });
            }
            stack.extend(&node.children);
        }
        Ok(())
    }
}

fn find_child<'a>(node: &'a FileNode, name: &str) -> Option<&'a FileNode> {
    node.children.iter().find_map(|child| {
        if child.is_dot_entry() {
            find_child(child, name)
        } else if child.name == name {
            Some(child)
        } else {
            None
        }
    })
}

fn collect_paths(node: &FileNode, path: &Path, paths: &mut HashMap<NodeId, PathBuf>) {
    paths.insert(node.id, path.to_path_buf());
    for child in &node.children {
        if child.is_dot_entry() {
            collect_paths(child, path, paths);
        } else {
            collect_paths(child, &path.join(&*child.name), paths);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> FileTree {
        let root = FileNode::new_directory(NodeId::new(1), "root", 0).with_children([
            FileNode::new_dot_entry(NodeId::new(2))
                .with_children([FileNode::new_file(NodeId::new(3), "a.txt", 100, 0)]),
            FileNode::new_directory(NodeId::new(4), "sub", 0).with_children([
                FileNode::new_file(NodeId::new(5), "b.txt", 50, 0),
                FileNode::new_symlink(NodeId::new(6), "link", "b.txt", 0, false),
            ]),
            FileNode::new_directory(NodeId::new(7), "skipped", 0)
                .with_excluded(true)
                .with_children([FileNode::new_file(NodeId::new(8), "c.txt", 999, 0)]),
        ]);
        FileTree::new(root, "/data")
    }

    #[test]
    fn test_tree_stats_default() {
        let stats = TreeStats::default();
        assert_eq!(stats.total_size, 0);
        assert_eq!(stats.total_files, 0);
        assert_eq!(stats.total_dirs, 0);
    }

    #[test]
    fn test_tree_stats_from_root() {
        let tree = sample_tree();
        assert_eq!(tree.stats.total_files, 2);
        assert_eq!(tree.stats.total_size, 150);
        // root and sub; the excluded directory is counted separately
        assert_eq!(tree.stats.total_dirs, 2);
        assert_eq!(tree.stats.total_symlinks, 1);
        assert_eq!(tree.stats.excluded_dirs, 1);
        assert_eq!(tree.stats.max_depth, 2);
    }

    #[test]
    fn test_subtree_defaults_to_root() {
        let tree = sample_tree();
        assert_eq!(tree.subtree(None).unwrap().id, NodeId::new(1));
        assert_eq!(tree.subtree(Some(NodeId::new(4))).unwrap().name, "sub");
        assert!(matches!(
            tree.subtree(Some(NodeId::new(99))),
            Err(ClassifyError::NodeNotFound { .. })
        ));
    }

    #[test]
    fn test_resolve_through_dot_entry() {
        let tree = sample_tree();
        assert_eq!(tree.resolve("a.txt").unwrap().id, NodeId::new(3));
        assert_eq!(tree.resolve("/data/sub/b.txt").unwrap().id, NodeId::new(5));
        assert_eq!(tree.resolve("").unwrap().id, NodeId::new(1));
        assert!(tree.resolve("sub/missing").is_err());
        assert!(tree.resolve("../etc").is_err());
    }

    #[test]
    fn test_resolve_rejects_absolute_path_outside_root() {
        let tree = sample_tree();
        // `/sub` is not under `/data`; it must not resolve as `sub`.
        assert!(matches!(
            tree.resolve("/sub"),
            Err(ClassifyError::SubtreeNotFound { .. })
        ));
        assert!(tree.resolve("/etc/passwd").is_err());
        assert_eq!(tree.resolve("/data").unwrap().id, NodeId::new(1));
    }

    #[test]
    fn test_paths() {
        let paths = sample_tree().paths();
        assert_eq!(paths[&NodeId::new(3)], PathBuf::from("/data/a.txt"));
        assert_eq!(paths[&NodeId::new(5)], PathBuf::from("/data/sub/b.txt"));
        assert_eq!(paths[&NodeId::new(2)], PathBuf::from("/data"));
    }

    #[test]
    fn test_parent_sizes() {
        let mut tree = sample_tree();
        tree.root.update_aggregates();
        let sizes = tree.parent_sizes();

        assert!(!sizes.contains_key(&NodeId::new(1)));
        // a.txt is owned by the dot entry
        assert_eq!(sizes[&NodeId::new(3)], 100);
        assert_eq!(sizes[&NodeId::new(5)], 50);
        assert_eq!(sizes[&NodeId::new(4)], tree.root.size);
        for (id, size) in &sizes {
            assert_eq!(tree.parent_of(*id).map(|p| p.size), Some(*size));
        }
    }

    #[test]
    fn test_check_unique_ids() {
        let tree = sample_tree();
        assert!(tree.check_unique_ids().is_ok());

        let root = FileNode::new_directory(NodeId::new(1), "root", 0).with_children([
            FileNode::new_directory(NodeId::new(2), "a", 0),
            FileNode::new_directory(NodeId::new(3), "b", 0)
                .with_children([FileNode::new_file(NodeId::new(2), "dup", 1, 0)]),
        ]);
        let tree = FileTree::new(root, "/x");
        assert!(matches!(
            tree.check_unique_ids(),
            Err(ClassifyError::DuplicateId { id }) if id == NodeId::new(2)
        ));
    }
}
