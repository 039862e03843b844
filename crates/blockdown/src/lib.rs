//! A streaming, line-oriented block-structure parser for CommonMark.
//!
//! The parser consumes a text document one line at a time and produces a
//! tree of block-level nodes: block quotes, lists and items, headers, code
//! blocks, HTML blocks, paragraphs, and horizontal rules. Inline syntax is
//! not interpreted here; the parser talks to an inline collaborator through
//! the two-operation [`InlineParser`] trait, harvesting link reference
//! definitions as paragraphs close and handing every finished paragraph
//! and header to the collaborator once block structure is known.
//!
//! ```ignore
//! let tree = blockdown::parse_document("# hi\n")?;
//! ```

pub use blockdown_tree::{
    Children, ListData, ListDelimType, ListType, Node, NodeCodeBlock, NodeHeader, NodeHtmlBlock,
    NodeId, NodeValue, Sourcepos, Tree, TreeWalker,
};

pub use error::{ParseError, ParseResult, MAX_CONTAINER_DEPTH};
pub use inlines::{scan_link_reference, DefaultInlineParser, InlineParser};
pub use parser::{Parser, ParserOptions};
pub use refmap::{normalize_label, RefMap, Reference};

mod error;
mod inlines;
mod parser;
pub mod preprocess;
mod refmap;
mod scanners;

/// Parse a document with default options and the default inline
/// collaborator.
pub fn parse_document(input: &str) -> ParseResult<Tree> {
    Parser::new(ParserOptions::default()).parse(input)
}
