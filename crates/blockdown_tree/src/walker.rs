//! Depth-first traversal of the block tree.

use crate::{NodeId, Tree};

/// A cursor over the subtree rooted at `root`, yielding `(node, entering)`
/// pairs: `entering == true` on the way down, `false` when the node is left
/// for the last time. Leaves produce both events back to back.
///
/// The walker holds only node ids and borrows the tree per step, so callers
/// are free to mutate node payloads (`string_content`, literals) between
/// steps. Structural mutation invalidates the cursor.
pub struct TreeWalker {
    root: NodeId,
    next: Option<(NodeId, bool)>,
}

impl TreeWalker {
    pub fn new(root: NodeId) -> Self {
        TreeWalker {
            root,
            next: Some((root, true)),
        }
    }

    /// Advance to the next event, or `None` once the root has been left.
    pub fn next(&mut self, tree: &Tree) -> Option<(NodeId, bool)> {
        let (current, entering) = self.next?;

        self.next = if entering {
            match tree.first_child(current) {
                Some(child) => Some((child, true)),
                None => Some((current, false)),
            }
        } else if current == self.root {
            None
        } else if let Some(sibling) = tree.next_sibling(current) {
            Some((sibling, true))
        } else {
            // Every non-root node reached by the walk has a parent.
            tree.parent(current).map(|parent| (parent, false))
        };

        Some((current, entering))
    }
}
