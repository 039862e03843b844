//! The inline collaborator boundary.
//!
//! Block parsing needs exactly two things from an inline parser: a scanner
//! for link reference definitions at the head of a closing paragraph, and a
//! pass over each finished paragraph and header. The [`InlineParser`] trait
//! captures that contract; the parser is generic over it so tests can
//! inject a recording stub.
//!
//! [`DefaultInlineParser`] implements the reference-definition grammar in
//! full and leaves `parse_inlines` as a hook, since inline tokenization
//! lives outside this crate.

use blockdown_tree::{NodeId, Tree};

use crate::refmap::{normalize_label, RefMap};
use crate::scanners::unescape_string;

/// Labels longer than this (between the brackets) are not reference links.
const MAX_LABEL_LENGTH: usize = 999;

/// The two operations the block parser requires of an inline parser.
pub trait InlineParser {
    /// Try to parse one link reference definition at the start of `text`.
    /// On success, record it in `refmap` and return the number of bytes
    /// consumed, including the line terminator; return 0 otherwise.
    fn parse_reference(&mut self, text: &str, refmap: &mut RefMap) -> usize;

    /// Parse the `string_content` of a finished paragraph or header into
    /// inline children. Invoked once per node, on the walker's leaving
    /// event, after block parsing completes.
    fn parse_inlines(&mut self, tree: &mut Tree, node: NodeId, refmap: &RefMap);
}

/// The collaborator used when none is injected: a complete
/// reference-definition scanner with no inline tokenization.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultInlineParser;

impl InlineParser for DefaultInlineParser {
    fn parse_reference(&mut self, text: &str, refmap: &mut RefMap) -> usize {
        scan_link_reference(text, refmap)
    }

    fn parse_inlines(&mut self, _tree: &mut Tree, _node: NodeId, _refmap: &RefMap) {}
}

/// Scan one link reference definition:
/// `[label]: destination "optional title"`, where the title may start on
/// the following line and nothing else may share a line with the
/// definition. Returns the bytes consumed, or 0 if the text does not begin
/// with a definition.
pub fn scan_link_reference(text: &str, refmap: &mut RefMap) -> usize {
    let mut scanner = Scanner::new(text);

    let Some(label) = scanner.link_label() else {
        return 0;
    };
    if !scanner.eat(b':') {
        return 0;
    }

    scanner.spaces_with_one_newline();
    let Some(destination) = scanner.link_destination() else {
        return 0;
    };

    let before_title = scanner.pos;
    scanner.spaces_with_one_newline();
    let mut title = scanner.link_title();
    if title.is_none() {
        scanner.pos = before_title;
    }

    if !scanner.rest_of_line_blank() {
        if title.is_none() {
            return 0;
        }
        // The title was on the definition's last line but trailed by junk;
        // retry treating it as no title at all.
        title = None;
        scanner.pos = before_title;
        if !scanner.rest_of_line_blank() {
            return 0;
        }
    }

    if normalize_label(&label).is_empty() {
        return 0;
    }

    refmap.insert(&label, destination, title.unwrap_or_default());
    scanner.pos
}

struct Scanner<'a> {
    text: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(text: &'a str) -> Self {
        Scanner {
            text,
            bytes: text.as_bytes(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn eat(&mut self, byte: u8) -> bool {
        if self.peek() == Some(byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Skip spaces and tabs, at most one newline, then spaces and tabs.
    fn spaces_with_one_newline(&mut self) {
        while matches!(self.peek(), Some(b' ') | Some(b'\t')) {
            self.pos += 1;
        }
        if self.eat(b'\n') {
            while matches!(self.peek(), Some(b' ') | Some(b'\t')) {
                self.pos += 1;
            }
        }
    }

    /// True when only spaces and tabs remain before the next newline or the
    /// end of input; consumes them, and the newline if present.
    fn rest_of_line_blank(&mut self) -> bool {
        let mut i = self.pos;
        while matches!(self.bytes.get(i), Some(b' ') | Some(b'\t')) {
            i += 1;
        }
        match self.bytes.get(i) {
            None => {
                self.pos = i;
                true
            }
            Some(b'\n') => {
                self.pos = i + 1;
                true
            }
            Some(_) => false,
        }
    }

    /// `[label]` with balanced escapes; the raw label text (between the
    /// brackets) is returned unnormalized.
    fn link_label(&mut self) -> Option<String> {
        if !self.eat(b'[') {
            return None;
        }
        let content_start = self.pos;
        loop {
            match self.peek()? {
                b']' => break,
                b'[' => return None,
                b'\\' => {
                    self.pos += 1;
                    if self
                        .peek()
                        .is_some_and(|next| next.is_ascii_punctuation())
                    {
                        self.pos += 1;
                    }
                }
                _ => self.pos += 1,
            }
            if self.pos - content_start > MAX_LABEL_LENGTH {
                return None;
            }
        }
        let label = self.text[content_start..self.pos].to_string();
        self.pos += 1;
        Some(label)
    }

    /// A destination in angle brackets, or a bare destination with balanced
    /// parentheses. Returned backslash-unescaped.
    fn link_destination(&mut self) -> Option<String> {
        if self.eat(b'<') {
            let content_start = self.pos;
            loop {
                match self.peek()? {
                    b'>' => break,
                    b'<' | b'\n' => return None,
                    b'\\' => {
                        self.pos += 1;
                        if self
                            .peek()
                            .is_some_and(|next| next.is_ascii_punctuation())
                        {
                            self.pos += 1;
                        }
                    }
                    _ => self.pos += 1,
                }
            }
            let raw = &self.text[content_start..self.pos];
            self.pos += 1;
            return Some(unescape_string(raw));
        }

        let content_start = self.pos;
        let mut paren_depth = 0usize;
        while let Some(byte) = self.peek() {
            match byte {
                b'\\' => {
                    self.pos += 1;
                    if self
                        .peek()
                        .is_some_and(|next| next.is_ascii_punctuation())
                    {
                        self.pos += 1;
                    }
                }
                b'(' => {
                    paren_depth += 1;
                    self.pos += 1;
                }
                b')' => {
                    if paren_depth == 0 {
                        break;
                    }
                    paren_depth -= 1;
                    self.pos += 1;
                }
                byte if byte <= b' ' => break,
                _ => self.pos += 1,
            }
        }
        if self.pos == content_start {
            return None;
        }
        Some(unescape_string(&self.text[content_start..self.pos]))
    }

    /// A title in double quotes, single quotes, or parentheses. Returned
    /// backslash-unescaped.
    fn link_title(&mut self) -> Option<String> {
        let closer = match self.peek()? {
            b'"' => b'"',
            b'\'' => b'\'',
            b'(' => b')',
            _ => return None,
        };
        let start = self.pos;
        self.pos += 1;
        let content_start = self.pos;
        loop {
            match self.peek() {
                None => {
                    self.pos = start;
                    return None;
                }
                Some(byte) if byte == closer => break,
                Some(b'\\') => {
                    self.pos += 1;
                    if self
                        .peek()
                        .is_some_and(|next| next.is_ascii_punctuation())
                    {
                        self.pos += 1;
                    }
                }
                Some(_) => self.pos += 1,
            }
        }
        let raw = &self.text[content_start..self.pos];
        self.pos += 1;
        Some(unescape_string(raw))
    }
}
