use dirsift_core::{ClassifyError, FileNode, FileTree, NodeId, NodeKind, ThresholdConfig};
use std::path::PathBuf;

#[test]
fn test_node_id_operations() {
    let id1 = NodeId::new(42);
    let id2 = NodeId::new(42);

    assert_eq!(id1, id2);
    assert_eq!(id1.0, 42);
    assert!(NodeId::new(1) < NodeId::new(2));
}

#[test]
fn test_node_kind_discrimination() {
    let file_node = NodeKind::File {
        links: 1,
        sparse: false,
    };
    assert!(file_node.is_file());
    assert!(!file_node.is_dir());
    assert!(!file_node.is_symlink());
    assert!(!file_node.is_dot_entry());

    let dir_node = NodeKind::Directory {
        file_count: 10,
        dir_count: 5,
    };
    assert!(dir_node.is_dir());
    assert!(!dir_node.is_file());

    let symlink_node = NodeKind::Symlink {
        target: "target/path".into(),
        broken: false,
    };
    assert!(symlink_node.is_symlink());
    assert!(!symlink_node.is_file());

    let dot_entry = NodeKind::DotEntry;
    assert!(dot_entry.is_dot_entry());
    assert!(!dot_entry.is_file());
    assert!(!dot_entry.is_dir());
}

#[test]
fn test_file_node_creation_and_properties() {
    let node = FileNode::new_file(NodeId::new(1), "test.txt", 2048, 1_600_000_000)
        .with_links(2)
        .with_sparse(true);

    assert!(node.is_file());
    assert!(!node.is_dir());
    assert_eq!(node.name.as_str(), "test.txt");
    assert_eq!(node.size, 2048);
    assert_eq!(node.mtime, 1_600_000_000);
    assert_eq!(node.child_count(), 0);
    assert_eq!(node.file_count(), 1);
    assert_eq!(node.dir_count(), 0);

    match &node.kind {
        NodeKind::File { links, sparse } => {
            assert_eq!(*links, 2);
            assert!(sparse);
        }
        _ => panic!("Expected File node kind"),
    }
}

#[test]
fn test_directory_counts() {
    let mut node = FileNode::new_directory(NodeId::new(1), "test_dir", 0);
    assert_eq!(node.file_count(), 0);
    assert_eq!(node.dir_count(), 0);

    let mut child_dir = FileNode::new_directory(NodeId::new(3), "subdir", 0);
    child_dir.kind = NodeKind::Directory {
        file_count: 1,
        dir_count: 0,
    };
    node.children.push(FileNode::new_file(NodeId::new(2), "file1.txt", 1024, 0));
    node.children.push(child_dir);
    node.children
        .push(FileNode::new_symlink(NodeId::new(4), "link", "file1.txt", 0, false));

    node.update_counts();
    assert_eq!(node.file_count(), 2); // 1 direct + 1 in subdir
    assert_eq!(node.dir_count(), 1);
}

#[test]
fn test_nested_aggregates() {
    let mut root = FileNode::new_directory(NodeId::new(1), "root", 0).with_children([
        FileNode::new_directory(NodeId::new(2), "dir1", 0)
            .with_children([FileNode::new_file(NodeId::new(3), "file1.txt", 512, 0)]),
        FileNode::new_directory(NodeId::new(4), "dir2", 0)
            .with_children([FileNode::new_file(NodeId::new(5), "file2.txt", 1024, 0)]),
    ]);

    root.update_aggregates();

    assert_eq!(root.size, 1536);
    assert_eq!(root.children[1].size, 1024);
    assert_eq!(root.file_count(), 2);
    assert_eq!(root.dir_count(), 2);
}

#[test]
fn test_tree_json_round_trip_keeps_shape() {
    let root = FileNode::new_directory(NodeId::new(1), "root", 0).with_children([
        FileNode::new_file(NodeId::new(2), "a", 10, 5).with_links(3),
        FileNode::new_symlink(NodeId::new(3), "dead", "/nowhere", 7, true),
        FileNode::new_directory(NodeId::new(4), "cache", 0).with_excluded(true),
    ]);
    let tree = FileTree::new(root, "/srv");

    let json = serde_json::to_string(&tree).unwrap();
    let loaded: FileTree = serde_json::from_str(&json).unwrap();

    assert_eq!(loaded.root_path, PathBuf::from("/srv"));
    assert_eq!(loaded.stats, tree.stats);
    assert_eq!(loaded.root.children[0].links(), Some(3));
    assert!(loaded.root.children[1].is_broken_symlink());
    assert!(loaded.root.children[2].excluded);
}

#[test]
fn test_tree_json_optional_fields() {
    // Scanners may omit `excluded`, `children` and `stats`.
    let json = r#"{
        "root": {
            "id": 1, "name": "root", "size": 3, "mtime": 0,
            "kind": { "Directory": { "file_count": 1, "dir_count": 0 } },
            "children": [
                { "id": 2, "name": "f", "size": 3, "mtime": 9,
                  "kind": { "File": { "links": 1, "sparse": false } } }
            ]
        },
        "root_path": "/tmp/x"
    }"#;

    let mut tree: FileTree = serde_json::from_str(json).unwrap();
    assert_eq!(tree.total_files(), 0);
    tree.refresh_stats();
    assert_eq!(tree.total_files(), 1);
    assert_eq!(tree.total_dirs(), 1);
    assert!(!tree.root.children[0].excluded);
}

#[test]
fn test_selection_lookup() {
    let root = FileNode::new_directory(NodeId::new(1), "root", 0).with_children([
        FileNode::new_directory(NodeId::new(2), "docs", 0)
            .with_children([FileNode::new_file(NodeId::new(3), "readme", 1, 0)]),
    ]);
    let tree = FileTree::new(root, "/home/u");

    assert_eq!(tree.find(NodeId::new(3)).unwrap().name, "readme");
    assert_eq!(tree.resolve("docs/readme").unwrap().id, NodeId::new(3));
    assert!(matches!(
        tree.resolve("docs/missing"),
        Err(ClassifyError::SubtreeNotFound { .. })
    ));
    assert!(matches!(
        tree.subtree(Some(NodeId::new(42))),
        Err(ClassifyError::NodeNotFound { .. })
    ));
}

#[test]
fn test_threshold_config_validation() {
    let config = ThresholdConfig::builder()
        .cap(300usize)
        .percentile(0.25)
        .build()
        .unwrap();
    assert_eq!(config.cap, 300);
    assert!(config.validate().is_ok());

    let bad = ThresholdConfig {
        cap: 0,
        percentile: 0.1,
    };
    assert!(matches!(bad.validate(), Err(ClassifyError::InvalidConfig { .. })));
}
