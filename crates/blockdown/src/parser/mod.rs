//! The block parser state machine.
//!
//! A parse is a left-fold over prepared lines. Each line passes through
//! four phases: matching the open containers from the root down
//! (continuation), breaking out of lists on a second blank line, opening
//! new containers at the deepest match, and adding the remaining text to
//! the right block. Blocks close when a later line fails to continue them,
//! when a new sibling forces them shut, or at the end of input.

use std::time::Instant;

use blockdown_tree::{Node, NodeId, NodeValue, Tree};

use crate::error::{ParseError, ParseResult, MAX_CONTAINER_DEPTH};
use crate::inlines::{DefaultInlineParser, InlineParser};
use crate::preprocess;
use crate::refmap::RefMap;
use crate::scanners;

mod starts;

/// Lines indented by this much start or continue indented code.
pub(crate) const CODE_INDENT: usize = 4;

/// Flat parser configuration.
#[derive(Debug, Default, Clone, Copy)]
pub struct ParserOptions {
    /// Report elapsed time for the preparing/block/inline phases through
    /// `log::info!`. Silent when false.
    pub time: bool,
}

/// The block parser. One instance owns one tree, its cursors, and its
/// reference map for the duration of [`Parser::parse`]; instances are
/// reusable across documents.
pub struct Parser<I: InlineParser = DefaultInlineParser> {
    tree: Tree,
    /// The deepest open block, the one receiving lines.
    tip: NodeId,
    /// The tip as of the start of the current line; unmatched blocks
    /// between it and the last matched container close lazily.
    oldtip: NodeId,
    last_matched_container: NodeId,
    line_number: usize,
    /// Length of the most recently incorporated line, for sourcepos end
    /// columns.
    last_line_length: usize,
    refmap: RefMap,
    inlines: I,
    options: ParserOptions,
}

/// Outcome of testing one open block's continuation rule against a line.
enum Continuation {
    /// The block continues; the offset moves past the consumed prefix.
    Match(usize),
    /// The block does not continue. `mark_blank` records a trailing blank
    /// line on the block for tightness bookkeeping.
    Fail { mark_blank: bool },
}

impl Parser<DefaultInlineParser> {
    pub fn new(options: ParserOptions) -> Self {
        Parser::with_inlines(DefaultInlineParser, options)
    }
}

impl Default for Parser<DefaultInlineParser> {
    fn default() -> Self {
        Parser::new(ParserOptions::default())
    }
}

impl<I: InlineParser> Parser<I> {
    /// Build a parser around an injected inline collaborator.
    pub fn with_inlines(inlines: I, options: ParserOptions) -> Self {
        let tree = Tree::new();
        let root = tree.root();
        Parser {
            tree,
            tip: root,
            oldtip: root,
            last_matched_container: root,
            line_number: 0,
            last_line_length: 0,
            refmap: RefMap::new(),
            inlines,
            options,
        }
    }

    /// The reference map harvested by the most recent [`Parser::parse`].
    pub fn reference_map(&self) -> &RefMap {
        &self.refmap
    }

    pub fn inlines(&self) -> &I {
        &self.inlines
    }

    pub fn inlines_mut(&mut self) -> &mut I {
        &mut self.inlines
    }

    /// Parse `input` into a block tree. Any byte sequence produces a tree;
    /// the only failure is pathological container nesting.
    pub fn parse(&mut self, input: &str) -> ParseResult<Tree> {
        self.reset();
        log::debug!("block parse over {} bytes", input.len());

        let started = Instant::now();
        let lines = preprocess::prepare_lines(input);
        if self.options.time {
            log::info!("preparing input: {:.2?}", started.elapsed());
        }

        let started = Instant::now();
        for line in &lines {
            self.incorporate_line(line)?;
        }
        loop {
            let tip = self.tip;
            self.finalize(tip, self.line_number);
            if tip == self.tree.root() {
                break;
            }
        }
        if self.options.time {
            log::info!("block parsing: {:.2?}", started.elapsed());
        }

        let started = Instant::now();
        self.process_inlines();
        if self.options.time {
            log::info!("inline parsing: {:.2?}", started.elapsed());
        }

        Ok(std::mem::take(&mut self.tree))
    }

    fn reset(&mut self) {
        self.tree = Tree::new();
        let root = self.tree.root();
        self.tip = root;
        self.oldtip = root;
        self.last_matched_container = root;
        self.line_number = 0;
        self.last_line_length = 0;
        self.refmap = RefMap::new();
    }

    /// Run one prepared line through all four phases.
    fn incorporate_line(&mut self, line: &str) -> ParseResult<()> {
        self.line_number += 1;
        self.oldtip = self.tip;
        let mut offset = 0usize;
        let mut all_matched = true;
        let mut blank = scanners::is_blank(line, offset);

        // Phase 1: walk the open last-child spine, testing each block's
        // continuation rule. No tree mutation happens here.
        let mut container = self.tree.root();
        while let Some(child) = self.tree.last_child(container) {
            if !self.tree[child].open {
                break;
            }
            container = child;

            let first_nonspace = scanners::first_nonspace(line, offset);
            let indent = first_nonspace - offset;
            blank = first_nonspace == line.len();
            let bytes = line.as_bytes();

            let outcome = match &self.tree[container].value {
                NodeValue::BlockQuote => {
                    if indent <= 3 && bytes.get(first_nonspace) == Some(&b'>') {
                        let mut consumed_to = first_nonspace + 1;
                        if bytes.get(consumed_to) == Some(&b' ') {
                            consumed_to += 1;
                        }
                        Continuation::Match(consumed_to)
                    } else {
                        Continuation::Fail { mark_blank: false }
                    }
                }
                NodeValue::Item(data) => {
                    if indent >= data.marker_offset + data.padding {
                        Continuation::Match(offset + data.marker_offset + data.padding)
                    } else if blank {
                        Continuation::Match(first_nonspace)
                    } else {
                        Continuation::Fail { mark_blank: false }
                    }
                }
                NodeValue::Header(..) | NodeValue::HorizontalRule => {
                    // single-line blocks never continue
                    Continuation::Fail { mark_blank: blank }
                }
                NodeValue::CodeBlock(code) if code.fenced => {
                    let mut consumed_to = offset;
                    let mut remaining = code.fence_offset;
                    while remaining > 0 && bytes.get(consumed_to) == Some(&b' ') {
                        consumed_to += 1;
                        remaining -= 1;
                    }
                    Continuation::Match(consumed_to)
                }
                NodeValue::CodeBlock(..) => {
                    if indent >= CODE_INDENT {
                        Continuation::Match(offset + CODE_INDENT)
                    } else if blank {
                        Continuation::Match(first_nonspace)
                    } else {
                        Continuation::Fail { mark_blank: false }
                    }
                }
                NodeValue::HtmlBlock(..) | NodeValue::Paragraph => {
                    if blank {
                        Continuation::Fail { mark_blank: true }
                    } else {
                        Continuation::Match(offset)
                    }
                }
                NodeValue::Document | NodeValue::List(..) => Continuation::Match(offset),
            };

            match outcome {
                Continuation::Match(consumed_to) => offset = consumed_to,
                Continuation::Fail { mark_blank } => {
                    if mark_blank {
                        self.tree[container].last_line_blank = true;
                    }
                    all_matched = false;
                }
            }

            if !all_matched {
                container = self
                    .tree
                    .parent(container)
                    .expect("unmatched block has a matched parent");
                break;
            }
        }
        self.last_matched_container = container;

        // Phase 2: a second consecutive blank line closes every list on the
        // chain, outermost included.
        if blank && self.tree[container].last_line_blank {
            self.break_out_of_lists(&mut container);
        }

        // Phase 3: open new containers at the deepest match.
        self.open_new_blocks(&mut container, line, &mut offset)?;

        // Phase 4: add what remains of the line to the right block.
        let first_nonspace = scanners::first_nonspace(line, offset);
        let indent = first_nonspace - offset.min(line.len());
        let blank = first_nonspace == line.len();

        let tip = self.tip;
        let lazy = self.tip != self.last_matched_container
            && !blank
            && matches!(self.tree[tip].value, NodeValue::Paragraph)
            && !self.tree[tip].strings.is_empty();

        if lazy {
            // Lazy paragraph continuation: the line joins the open
            // paragraph even though its ancestors did not all match.
            self.add_line(line, offset);
        } else {
            self.close_unmatched();

            let is_empty_item_opened_now = matches!(self.tree[container].value, NodeValue::Item(..))
                && self.tree.first_child(container).is_none()
                && self.tree[container].sourcepos.start.0 == self.line_number;
            let exempt = match &self.tree[container].value {
                NodeValue::BlockQuote | NodeValue::Header(..) => true,
                NodeValue::CodeBlock(code) => code.fenced,
                _ => is_empty_item_opened_now,
            };
            self.tree[container].last_line_blank = blank && !exempt;

            let mut ancestor = container;
            while let Some(parent) = self.tree.parent(ancestor) {
                self.tree[parent].last_line_blank = false;
                ancestor = parent;
            }

            enum Action {
                AppendRaw,
                TryFenceClose { fence_char: u8, fence_length: usize },
                Nothing,
                AppendText,
                OpenParagraph,
            }

            let action = match &self.tree[container].value {
                NodeValue::HtmlBlock(..) => Action::AppendRaw,
                NodeValue::CodeBlock(code) if code.fenced => Action::TryFenceClose {
                    fence_char: code.fence_char,
                    fence_length: code.fence_length,
                },
                NodeValue::CodeBlock(..) => Action::AppendRaw,
                NodeValue::Header(..) | NodeValue::HorizontalRule => Action::Nothing,
                NodeValue::Paragraph => Action::AppendText,
                _ => Action::OpenParagraph,
            };

            match action {
                Action::AppendRaw => self.add_line(line, offset),
                Action::TryFenceClose {
                    fence_char,
                    fence_length,
                } => {
                    let closing = if indent <= 3 {
                        scanners::scan_close_code_fence(line, first_nonspace, fence_char)
                            .filter(|&run| run >= fence_length)
                    } else {
                        None
                    };
                    match closing {
                        Some(run) => {
                            // the closing fence belongs to the block's span
                            // but not to its content
                            self.last_line_length = first_nonspace + run;
                            self.finalize(container, self.line_number);
                        }
                        None => self.add_line(line, offset),
                    }
                }
                Action::Nothing => {}
                Action::AppendText => self.add_line(line, first_nonspace),
                Action::OpenParagraph => {
                    if !blank {
                        self.add_child(NodeValue::Paragraph, first_nonspace)?;
                        self.add_line(line, first_nonspace);
                    }
                }
            }
        }

        self.last_line_length = line.len();
        Ok(())
    }

    /// Find the outermost list enclosing `container` and close everything
    /// from `container` up to and including it.
    fn break_out_of_lists(&mut self, container: &mut NodeId) {
        let mut candidate = Some(*container);
        let mut outermost_list = None;
        while let Some(id) = candidate {
            if matches!(self.tree[id].value, NodeValue::List(..)) {
                outermost_list = Some(id);
            }
            candidate = self.tree.parent(id);
        }

        if let Some(list) = outermost_list {
            let mut block = *container;
            while block != list {
                let parent = self
                    .tree
                    .parent(block)
                    .expect("the enclosing list is an ancestor");
                self.finalize(block, self.line_number);
                block = parent;
            }
            self.finalize(list, self.line_number);
            let above = self
                .tree
                .parent(list)
                .expect("a list always has a parent");
            self.tip = above;
            *container = above;
        }
    }

    /// Close the blocks between the start-of-line tip and the last matched
    /// container. They failed to continue, so they end on the previous
    /// line. Idempotent within a line.
    pub(super) fn close_unmatched(&mut self) {
        while self.oldtip != self.last_matched_container {
            let parent = self
                .tree
                .parent(self.oldtip)
                .expect("unmatched block has a parent");
            self.finalize(self.oldtip, self.line_number.saturating_sub(1));
            self.oldtip = parent;
        }
    }

    /// Open a block as a child of the tip, closing tips upward until one
    /// can contain it, and make it the new tip. `offset` is the 0-based
    /// column of the block's first character.
    pub(super) fn add_child(&mut self, value: NodeValue, offset: usize) -> ParseResult<NodeId> {
        while !self.tree[self.tip].value.can_contain(&value) {
            let tip = self.tip;
            assert!(
                tip != self.tree.root(),
                "no open block can contain a {}",
                value.name()
            );
            self.finalize(tip, self.line_number.saturating_sub(1));
        }

        if self.tree.depth(self.tip) + 1 > MAX_CONTAINER_DEPTH {
            return Err(ParseError::DepthLimitExceeded(MAX_CONTAINER_DEPTH));
        }

        let node = Node::new(value, (self.line_number, offset + 1));
        let id = self.tree.append_child(self.tip, node);
        self.tip = id;
        Ok(id)
    }

    /// Append the rest of the line, from `offset`, to the tip's raw lines.
    pub(super) fn add_line(&mut self, line: &str, offset: usize) {
        let tip = self.tip;
        assert!(
            self.tree[tip].open,
            "attempted to add a line to a closed {} block",
            self.tree[tip].value.name()
        );
        let start = offset.min(line.len());
        self.tree[tip].strings.push(line[start..].to_string());
    }

    /// Close a block: record its end position, turn its collected lines
    /// into finalized content, and step the tip back to its parent.
    fn finalize(&mut self, id: NodeId, line_number: usize) {
        debug_assert!(self.tree[id].open, "block finalized twice");
        let parent = self.tree.parent(id);
        self.tree[id].open = false;
        self.tree[id].sourcepos.end = (line_number, self.last_line_length);

        let strings = std::mem::take(&mut self.tree[id].strings);
        // payloads are still empty while a block is open, so this clone
        // copies tags and marker data only
        match self.tree[id].value.clone() {
            NodeValue::Paragraph => {
                let mut content = strings.join("\n");
                let mut consumed_any = false;
                while content.starts_with('[') {
                    let consumed = self.inlines.parse_reference(&content, &mut self.refmap);
                    if consumed == 0 {
                        break;
                    }
                    content.drain(..consumed);
                    consumed_any = true;
                }
                let only_references = consumed_any && scanners::is_blank_str(&content);
                self.tree[id].string_content = content;
                if only_references {
                    self.tree.unlink(id);
                }
            }
            NodeValue::Header(..) => {
                self.tree[id].string_content = strings.join("\n");
            }
            NodeValue::HtmlBlock(..) => {
                let literal = strings.join("\n");
                if let NodeValue::HtmlBlock(html) = &mut self.tree[id].value {
                    html.literal = literal;
                }
            }
            NodeValue::CodeBlock(code) if code.fenced => {
                // the first collected line is the info string, the rest are
                // the body
                let info =
                    scanners::unescape_string(strings.first().map(|s| s.trim()).unwrap_or(""));
                let literal = if strings.len() <= 1 {
                    String::new()
                } else {
                    let mut body = strings[1..].join("\n");
                    body.push('\n');
                    body
                };
                if let NodeValue::CodeBlock(code) = &mut self.tree[id].value {
                    code.info = info;
                    code.literal = literal;
                }
            }
            NodeValue::CodeBlock(..) => {
                let mut lines = strings;
                while lines
                    .last()
                    .is_some_and(|line| scanners::is_blank_str(line))
                {
                    lines.pop();
                }
                let mut literal = lines.join("\n");
                literal.push('\n');
                if let NodeValue::CodeBlock(code) = &mut self.tree[id].value {
                    code.literal = literal;
                }
            }
            NodeValue::List(..) => {
                let tight = self.list_is_tight(id);
                if let NodeValue::List(data) = &mut self.tree[id].value {
                    data.tight = tight;
                }
            }
            NodeValue::Document | NodeValue::BlockQuote | NodeValue::Item(..)
            | NodeValue::HorizontalRule => {}
        }

        if let Some(parent) = parent {
            self.tip = parent;
        }
    }

    /// A list is loose when an item that has a following sibling ends with
    /// a blank line, or when any sub-block inside an item ends with a blank
    /// line while further items or sub-blocks follow.
    fn list_is_tight(&self, list: NodeId) -> bool {
        let mut item = self.tree.first_child(list);
        while let Some(current_item) = item {
            let item_is_last = self.tree.next_sibling(current_item).is_none();
            if self.tree.ends_with_blank_line(current_item) && !item_is_last {
                return false;
            }
            let mut sub = self.tree.first_child(current_item);
            while let Some(current_sub) = sub {
                let sub_is_last = self.tree.next_sibling(current_sub).is_none();
                if self.tree.ends_with_blank_line(current_sub) && (!item_is_last || !sub_is_last) {
                    return false;
                }
                sub = self.tree.next_sibling(current_sub);
            }
            item = self.tree.next_sibling(current_item);
        }
        true
    }

    /// Hand every finished paragraph and header to the inline collaborator,
    /// on the walker's leaving event so freshly built children do not
    /// disturb the traversal.
    fn process_inlines(&mut self) {
        let root = self.tree.root();
        let mut walker = self.tree.walk(root);
        while let Some((node, entering)) = walker.next(&self.tree) {
            if !entering
                && matches!(
                    self.tree[node].value,
                    NodeValue::Paragraph | NodeValue::Header(..)
                )
            {
                self.inlines.parse_inlines(&mut self.tree, node, &self.refmap);
            }
        }
    }
}
