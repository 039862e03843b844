//! Arena storage for block nodes.
//!
//! Parent and sibling links would form reference cycles if they were owned
//! pointers, so every node lives in a flat arena owned by the [`Tree`] and
//! links are typed indices. Detached nodes keep their arena slot; `unlink`
//! only rewires links.

use std::fmt;
use std::ops::{Index, IndexMut};

use crate::node::{Node, NodeValue};
use crate::walker::TreeWalker;

/// An index into a [`Tree`]'s arena. Ids are only meaningful for the tree
/// that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A source span, 1-based, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sourcepos {
    /// `(line, column)` of the first character of the block.
    pub start: (usize, usize),
    /// `(line, column)` of the last character of the block.
    pub end: (usize, usize),
}

impl Sourcepos {
    /// A span whose start is known but whose end has not been recorded yet.
    pub fn starting_at(start: (usize, usize)) -> Self {
        Sourcepos { start, end: (0, 0) }
    }
}

impl fmt::Display for Sourcepos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}-{}:{}",
            self.start.0, self.start.1, self.end.0, self.end.1
        )
    }
}

/// The block tree. Always rooted at a `Document` node.
#[derive(Debug, Clone)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Default for Tree {
    fn default() -> Self {
        Tree::new()
    }
}

impl Tree {
    /// Create a tree holding a single open `Document` starting at 1:1.
    pub fn new() -> Self {
        Tree {
            nodes: vec![Node::new(NodeValue::Document, (1, 1))],
        }
    }

    /// The `Document` root. Never unlinked.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Number of nodes ever allocated, including detached ones.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self[id].parent
    }

    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self[id].first_child
    }

    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self[id].last_child
    }

    pub fn previous_sibling(&self, id: NodeId) -> Option<NodeId> {
        self[id].prev
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self[id].next
    }

    /// Append `node` as the last child of `parent`, returning its id.
    pub fn append_child(&mut self, parent: NodeId, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);

        self[id].parent = Some(parent);
        let previous_last = self[parent].last_child;
        match previous_last {
            Some(last) => {
                self[last].next = Some(id);
                self[id].prev = Some(last);
            }
            None => {
                self[parent].first_child = Some(id);
            }
        }
        self[parent].last_child = Some(id);
        id
    }

    /// Detach a node (and its subtree) from its parent and siblings. The
    /// node stays allocated; only links change.
    pub fn unlink(&mut self, id: NodeId) {
        let (parent, prev, next) = {
            let node = &self[id];
            (node.parent, node.prev, node.next)
        };

        match prev {
            Some(prev) => self[prev].next = next,
            None => {
                if let Some(parent) = parent {
                    self[parent].first_child = next;
                }
            }
        }
        match next {
            Some(next) => self[next].prev = prev,
            None => {
                if let Some(parent) = parent {
                    self[parent].last_child = prev;
                }
            }
        }

        let node = &mut self[id];
        node.parent = None;
        node.prev = None;
        node.next = None;
    }

    /// Iterate the direct children of `id`, first to last.
    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            tree: self,
            next: self.first_child(id),
        }
    }

    /// Depth-first walker over the subtree rooted at `id`, yielding
    /// `(node, entering)` events in document order. The walker borrows the
    /// tree one step at a time, so node payloads may be mutated between
    /// steps; structural mutation mid-walk is not supported.
    pub fn walk(&self, id: NodeId) -> TreeWalker {
        TreeWalker::new(id)
    }

    /// Number of ancestors between `id` and the root.
    pub fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut cur = self.parent(id);
        while let Some(p) = cur {
            depth += 1;
            cur = self.parent(p);
        }
        depth
    }

    /// Whether the block effectively ends with a blank line, chasing the
    /// last child through nested lists and items. Drives list tightness.
    pub fn ends_with_blank_line(&self, id: NodeId) -> bool {
        let mut cur = Some(id);
        while let Some(n) = cur {
            if self[n].last_line_blank {
                return true;
            }
            cur = match self[n].value {
                NodeValue::List(..) | NodeValue::Item(..) => self.last_child(n),
                _ => None,
            };
        }
        false
    }
}

impl Index<NodeId> for Tree {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }
}

impl IndexMut<NodeId> for Tree {
    fn index_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }
}

/// Iterator over a node's direct children.
pub struct Children<'a> {
    tree: &'a Tree,
    next: Option<NodeId>,
}

impl<'a> Iterator for Children<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.next?;
        self.next = self.tree.next_sibling(id);
        Some(id)
    }
}
