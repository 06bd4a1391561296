//! File and directory node types.

use std::fmt;

use chrono::{DateTime, Utc};
use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// Unique identifier for a node within a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u64);

impl NodeId {
    /// Create a new NodeId from a u64.
    pub fn new(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Type of file system node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    /// Regular file.
    File {
        /// Hard link count.
        links: u64,
        /// Whether fewer blocks are allocated than the logical size needs.
        sparse: bool,
    },
    /// Directory.
    Directory {
        /// Total number of files in this subtree.
        file_count: u64,
        /// Total number of directories in this subtree.
        dir_count: u64,
    },
    /// Symbolic link.
    Symlink {
        /// Link target path.
        target: CompactString,
        /// Whether the link target could not be resolved.
        broken: bool,
    },
    /// Synthetic aggregate holding a directory's direct files.
    ///
    /// Not a file itself: never counted, never classified.
    DotEntry,
}

impl NodeKind {
    /// Check if this is a directory.
    pub fn is_dir(&self) -> bool {
        matches!(self, NodeKind::Directory { .. })
    }

    /// Check if this is a regular file.
    pub fn is_file(&self) -> bool {
        matches!(self, NodeKind::File { .. })
    }

    /// Check if this is a symlink.
    pub fn is_symlink(&self) -> bool {
        matches!(self, NodeKind::Symlink { .. })
    }

    /// Check if this is a dot entry aggregate.
    pub fn is_dot_entry(&self) -> bool {
        matches!(self, NodeKind::DotEntry)
    }
}

/// A single item in the scanned tree.
///
/// Each node exclusively owns its children. Relations such as "parent of" or
/// "current selection" are expressed through [`NodeId`] lookups on the
/// containing [`FileTree`](crate::FileTree), never through a second owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileNode {
    /// Unique identifier for this node.
    pub id: NodeId,

    /// File/directory name (not full path).
    pub name: CompactString,

    /// Node type and associated metadata.
    pub kind: NodeKind,

    /// Size in bytes (aggregate for directories).
    pub size: u64,

    /// Last modification time in seconds since the Unix epoch.
    pub mtime: i64,

    /// Subtree was deliberately not scanned.
    #[serde(default)]
    pub excluded: bool,

    /// Children nodes in scan order.
    #[serde(default)]
    pub children: Vec<FileNode>,
}

impl FileNode {
    /// Create a new plain file node with a single link.
    pub fn new_file(id: NodeId, name: impl Into<CompactString>, size: u64, mtime: i64) -> Self {
        Self {
            id,
            name: name.into(),
            kind: NodeKind::File {
                links: 1,
                sparse: false,
            },
            size,
            mtime,
            excluded: false,
            children: Vec::new(),
        }
    }

    /// Create a new directory node.
    pub fn new_directory(id: NodeId, name: impl Into<CompactString>, mtime: i64) -> Self {
        Self {
            id,
            name: name.into(),
            kind: NodeKind::Directory {
                file_count: 0,
                dir_count: 0,
            },
            size: 0,
            mtime,
            excluded: false,
            children: Vec::new(),
        }
    }

    /// Create a new symlink node.
    pub fn new_symlink(
        id: NodeId,
        name: impl Into<CompactString>,
        target: impl Into<CompactString>,
        mtime: i64,
        broken: bool,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            kind: NodeKind::Symlink {
                target: target.into(),
                broken,
            },
            size: 0,
            mtime,
            excluded: false,
            children: Vec::new(),
        }
    }

    /// Create a new dot entry aggregate.
    pub fn new_dot_entry(id: NodeId) -> Self {
        Self {
            id,
            name: CompactString::const_new("<Files>"),
            kind: NodeKind::DotEntry,
            size: 0,
            mtime: 0,
            excluded: false,
            children: Vec::new(),
        }
    }

    /// Set the hard link count of a file node. No effect on other kinds.
    pub fn with_links(mut self, count: u64) -> Self {
        if let NodeKind::File { ref mut links, .. } = self.kind {
            *links = count;
        }
        self
    }

    /// Mark a file node as sparse. No effect on other kinds.
    pub fn with_sparse(mut self, is_sparse: bool) -> Self {
        if let NodeKind::File { ref mut sparse, .. } = self.kind {
            *sparse = is_sparse;
        }
        self
    }

    /// Mark this node as excluded from the scan.
    pub fn with_excluded(mut self, excluded: bool) -> Self {
        self.excluded = excluded;
        self
    }

    /// Append children in order.
    pub fn with_children(mut self, children: impl IntoIterator<Item = FileNode>) -> Self {
        self.children.extend(children);
        self
    }

    /// Check if this node is a directory.
    pub fn is_dir(&self) -> bool {
        self.kind.is_dir()
    }

    /// Check if this node is a file.
    pub fn is_file(&self) -> bool {
        self.kind.is_file()
    }

    /// Check if this node is a symlink.
    pub fn is_symlink(&self) -> bool {
        self.kind.is_symlink()
    }

    /// Check if this node is a dot entry aggregate.
    pub fn is_dot_entry(&self) -> bool {
        self.kind.is_dot_entry()
    }

    /// Hard link count for files, `None` otherwise.
    pub fn links(&self) -> Option<u64> {
        match self.kind {
            NodeKind::File { links, .. } => Some(links),
            _ => None,
        }
    }

    /// Whether this is a sparse file.
    pub fn is_sparse(&self) -> bool {
        matches!(self.kind, NodeKind::File { sparse: true, .. })
    }

    /// Whether this is a symlink whose target does not resolve.
    pub fn is_broken_symlink(&self) -> bool {
        matches!(self.kind, NodeKind::Symlink { broken: true, .. })
    }

    /// Modification time as a UTC timestamp, if representable.
    pub fn modified_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.mtime, 0)
    }

    /// Get the number of direct children.
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Get file count for directories, 1 for files.
    pub fn file_count(&self) -> u64 {
        match &self.kind {
            NodeKind::Directory { file_count, .. } => *file_count,
            NodeKind::File { .. } => 1,
            NodeKind::DotEntry => self.children.iter().map(FileNode::file_count).sum(),
            NodeKind::Symlink { .. } => 0,
        }
    }

    /// Get directory count for directories.
    pub fn dir_count(&self) -> u64 {
        match &self.kind {
            NodeKind::Directory { dir_count, .. } => *dir_count,
            NodeKind::DotEntry => self.children.iter().map(FileNode::dir_count).sum(),
            _ => 0,
        }
    }

    /// Find a node by id in this subtree.
    pub fn find(&self, id: NodeId) -> Option<&FileNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    /// Find the node directly owning `id` in this subtree.
    pub fn parent_of(&self, id: NodeId) -> Option<&FileNode> {
        if self.children.iter().any(|child| child.id == id) {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.parent_of(id))
    }

    /// Recompute sizes and counts of directories and dot entries from
    /// their children, bottom-up.
    ///
    /// The scanner normally provides these aggregates; this is for code
    /// that assembles trees by hand.
    pub fn update_aggregates(&mut self) {
        if self.is_dir() || self.is_dot_entry() {
            for child in &mut self.children {
                child.update_aggregates();
            }
            self.size = self.children.iter().map(|c| c.size).sum();
            self.update_counts();
        }
    }

    /// Update directory counts based on children.
    pub fn update_counts(&mut self) {
        let (files, dirs) = self
            .children
            .iter()
            .fold((0, 0), |(files, dirs), child| match &child.kind {
                NodeKind::File { .. } => (files + 1, dirs),
                NodeKind::Directory {
                    file_count: fc,
                    dir_count: dc,
                } => (files + fc, dirs + dc + 1),
                NodeKind::DotEntry => (files + child.file_count(), dirs + child.dir_count()),
                NodeKind::Symlink { .. } => (files, dirs),
            });

        if let NodeKind::Directory {
            ref mut file_count,
            ref mut dir_count,
        } = self.kind
        {
            *file_count = files;
            *dir_count = dirs;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id() {
        let id = NodeId::new(42);
        assert_eq!(id.0, 42);
        assert_eq!(id.to_string(), "#42");
    }

    #[test]
    fn test_file_node_creation() {
        let node = FileNode::new_file(NodeId::new(1), "test.txt", 1024, 1_700_000_000);
        assert!(node.is_file());
        assert!(!node.is_dir());
        assert_eq!(node.size, 1024);
        assert_eq!(node.links(), Some(1));
        assert!(!node.is_sparse());
    }

    #[test]
    fn test_file_attributes() {
        let node = FileNode::new_file(NodeId::new(1), "db", 4096, 0)
            .with_links(3)
            .with_sparse(true);
        assert_eq!(node.links(), Some(3));
        assert!(node.is_sparse());

        // Only files carry link counts.
        let dir = FileNode::new_directory(NodeId::new(2), "d", 0).with_links(5);
        assert_eq!(dir.links(), None);
    }

    #[test]
    fn test_symlink_node() {
        let link = FileNode::new_symlink(NodeId::new(1), "l", "../gone", 0, true);
        assert!(link.is_symlink());
        assert!(link.is_broken_symlink());
        assert_eq!(link.file_count(), 0);
    }

    #[test]
    fn test_update_aggregates_through_dot_entry() {
        let mut root = FileNode::new_directory(NodeId::new(1), "root", 0).with_children([
            FileNode::new_dot_entry(NodeId::new(2)).with_children([
                FileNode::new_file(NodeId::new(3), "a", 10, 0),
                FileNode::new_file(NodeId::new(4), "b", 20, 0),
            ]),
            FileNode::new_directory(NodeId::new(5), "sub", 0)
                .with_children([FileNode::new_file(NodeId::new(6), "c", 5, 0)]),
        ]);

        root.update_aggregates();

        assert_eq!(root.size, 35);
        assert_eq!(root.file_count(), 3);
        assert_eq!(root.dir_count(), 1);
    }

    #[test]
    fn test_find() {
        let root = FileNode::new_directory(NodeId::new(1), "root", 0)
            .with_children([FileNode::new_file(NodeId::new(7), "x", 1, 0)]);
        assert_eq!(root.find(NodeId::new(7)).map(|n| n.name.as_str()), Some("x"));
        assert!(root.find(NodeId::new(8)).is_none());
        assert_eq!(root.parent_of(NodeId::new(7)).map(|n| n.id), Some(NodeId::new(1)));
        assert!(root.parent_of(NodeId::new(1)).is_none());
    }

    #[test]
    fn test_modified_at() {
        let node = FileNode::new_file(NodeId::new(1), "f", 0, 86_400);
        let dt = node.modified_at().unwrap();
        assert_eq!(dt.timestamp(), 86_400);
    }
}
