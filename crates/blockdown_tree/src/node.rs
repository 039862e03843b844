//! Block node definitions: the tag enum, per-tag payloads, and the
//! containment rules that the parser consults when growing the tree.

use crate::Sourcepos;

/// The core node enum. One variant per block tag.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeValue {
    /// The root of every document. Contains any block except another
    /// `Document` or a bare `Item`.
    Document,

    /// A block quote. Contains other blocks.
    ///
    /// ``` md
    /// > quoted
    /// ```
    BlockQuote,

    /// A list. Contains only [`NodeValue::Item`] children; the payload is
    /// shared by every item agglomerated into the list.
    List(ListData),

    /// A list item. Carries a copy of the owning list's [`ListData`] as it
    /// was when the item opened.
    Item(ListData),

    /// A paragraph. The collected lines end up in the node's
    /// `string_content` once the paragraph closes.
    Paragraph,

    /// An ATX or setext header. Setext headers start life as paragraphs and
    /// are converted in place when the underline is seen.
    Header(NodeHeader),

    /// A horizontal rule. Has no children and no content.
    HorizontalRule,

    /// A fenced or indented code block. The raw text lives in the payload's
    /// `literal`, never in child nodes.
    CodeBlock(NodeCodeBlock),

    /// A raw HTML block. As with code blocks, the text is kept verbatim in
    /// the payload.
    HtmlBlock(NodeHtmlBlock),
}

impl NodeValue {
    /// The stable lowercase name of the tag, used by the serializer and in
    /// diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            NodeValue::Document => "document",
            NodeValue::BlockQuote => "block_quote",
            NodeValue::List(..) => "list",
            NodeValue::Item(..) => "item",
            NodeValue::Paragraph => "paragraph",
            NodeValue::Header(..) => "header",
            NodeValue::HorizontalRule => "horizontal_rule",
            NodeValue::CodeBlock(..) => "code_block",
            NodeValue::HtmlBlock(..) => "html_block",
        }
    }

    /// Returns true if blocks of this tag keep accepting raw lines after
    /// they open. Everything else receives its content at opening time or
    /// through children.
    pub fn accepts_lines(&self) -> bool {
        matches!(self, NodeValue::Paragraph | NodeValue::CodeBlock(..))
    }

    /// Containment rules for the block grammar: lists hold only items, the
    /// other container blocks hold anything that is not a document or a
    /// stray item, and leaf blocks hold nothing.
    pub fn can_contain(&self, child: &NodeValue) -> bool {
        if matches!(child, NodeValue::Document) {
            return false;
        }

        match self {
            NodeValue::Document | NodeValue::BlockQuote | NodeValue::Item(..) => {
                !matches!(child, NodeValue::Item(..))
            }
            NodeValue::List(..) => matches!(child, NodeValue::Item(..)),
            _ => false,
        }
    }
}

/// The metadata of a header.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NodeHeader {
    /// 1 through 6 for ATX headers, 1 or 2 for setext headers.
    pub level: u32,
}

/// The metadata and finalized text of a code block.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NodeCodeBlock {
    /// Whether the block is fenced; indented code blocks leave the fence
    /// fields at their defaults.
    pub fenced: bool,

    /// The fence character itself, `` ` `` or `~`.
    pub fence_char: u8,

    /// Length of the opening fence run. A closing fence must be at least
    /// this long.
    pub fence_length: usize,

    /// Indent of the opening fence. Continuation lines have up to this many
    /// leading spaces stripped.
    pub fence_offset: usize,

    /// The info string after the opening fence, trimmed and
    /// backslash-unescaped.
    pub info: String,

    /// The literal contents. The text is never parsed further, so it lives
    /// here rather than in children.
    pub literal: String,
}

/// The finalized text of an HTML block.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NodeHtmlBlock {
    /// The raw lines of the block, joined.
    pub literal: String,
}

/// The kind of list marker.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ListType {
    #[default]
    Bullet,
    Ordered,
}

impl ListType {
    pub fn name(&self) -> &'static str {
        match self {
            ListType::Bullet => "bullet",
            ListType::Ordered => "ordered",
        }
    }
}

/// The delimiter after an ordered list marker's number.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ListDelimType {
    /// `.`
    #[default]
    Period,
    /// `)`
    Paren,
}

impl ListDelimType {
    pub fn name(&self) -> &'static str {
        match self {
            ListDelimType::Period => "period",
            ListDelimType::Paren => "paren",
        }
    }
}

/// The metadata of a list or list item marker.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ListData {
    /// Bullet (unordered) or ordered.
    pub list_type: ListType,

    /// For bullet lists, the character used for each bullet.
    pub bullet_char: u8,

    /// For ordered lists, the ordinal the list starts at.
    pub start: usize,

    /// For ordered lists, the delimiter after each number.
    pub delimiter: ListDelimType,

    #[doc(hidden)]
    pub padding: usize,

    #[doc(hidden)]
    pub marker_offset: usize,

    /// Whether the list is tight. Computed only when the list closes.
    pub tight: bool,
}

impl ListData {
    /// Two markers continue the same list only when the marker style is
    /// identical.
    pub fn matches(&self, other: &ListData) -> bool {
        self.list_type == other.list_type
            && self.delimiter == other.delimiter
            && self.bullet_char == other.bullet_char
    }
}

/// A single block node: the tag plus the bookkeeping the parser maintains
/// while the block is open.
#[derive(Debug, Clone)]
pub struct Node {
    /// The node value itself.
    pub value: NodeValue,

    /// Where the block starts and ends in the source, 1-based. The end is
    /// recorded when the block closes.
    pub sourcepos: Sourcepos,

    /// Whether the block is still accepting lines. Set false exactly once,
    /// at finalization.
    pub open: bool,

    /// The finalized content of a paragraph or header. Empty for every
    /// other tag.
    pub string_content: String,

    #[doc(hidden)]
    pub strings: Vec<String>,

    #[doc(hidden)]
    pub last_line_blank: bool,

    pub(crate) parent: Option<crate::NodeId>,
    pub(crate) first_child: Option<crate::NodeId>,
    pub(crate) last_child: Option<crate::NodeId>,
    pub(crate) prev: Option<crate::NodeId>,
    pub(crate) next: Option<crate::NodeId>,
}

impl Node {
    /// Create an open block starting at the given 1-based line and column.
    pub fn new(value: NodeValue, start: (usize, usize)) -> Self {
        Node {
            value,
            sourcepos: Sourcepos::starting_at(start),
            open: true,
            string_content: String::new(),
            strings: Vec::new(),
            last_line_blank: false,
            parent: None,
            first_child: None,
            last_child: None,
            prev: None,
            next: None,
        }
    }
}
