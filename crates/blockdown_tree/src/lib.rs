//! The block-level node tree produced by the `blockdown` parser.
//!
//! Nodes are stored in an arena owned by [`Tree`] and addressed by
//! [`NodeId`], so parent and sibling back-links never form ownership
//! cycles. The parser mutates the tree one line at a time; consumers walk
//! the finished tree with [`Tree::walk`] or serialize it with `serde`.

pub use node::{
    ListData, ListDelimType, ListType, Node, NodeCodeBlock, NodeHeader, NodeHtmlBlock, NodeValue,
};
pub use tree::{Children, NodeId, Sourcepos, Tree};
pub use walker::TreeWalker;

mod node;
mod serialize;
mod tree;
mod walker;
