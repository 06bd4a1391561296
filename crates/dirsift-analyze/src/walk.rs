//! Pre-order traversal over the authoritative part of a tree.

use dirsift_core::FileNode;

/// Depth-first, pre-order iterator over a subtree.
///
/// Children are visited in their stored order. Excluded nodes are neither
/// yielded nor entered. Dot entries are not yielded but their children are.
#[derive(Debug, Clone)]
pub struct Walk<'a> {
    stack: Vec<&'a FileNode>,
}

impl<'a> Walk<'a> {
    /// Start a walk at `root`.
    pub fn new(root: &'a FileNode) -> Self {
        Self { stack: vec![root] }
    }
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a FileNode;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            if node.excluded {
                continue;
            }
            self.stack.extend(node.children.iter().rev());
            if !node.is_dot_entry() {
                return Some(node);
            }
        }
        None
    }
}

/// Plain files in a subtree, in walk order.
pub fn files(root: &FileNode) -> impl Iterator<Item = &FileNode> {
    Walk::new(root).filter(|node| node.is_file())
}
