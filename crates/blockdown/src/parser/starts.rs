//! Phase 3 of line incorporation: opening new containers at the deepest
//! matched block, in priority order. Block quotes and list items loop so a
//! single line can open several nested containers; every other start is
//! terminal for the line.

use blockdown_tree::{NodeCodeBlock, NodeHeader, NodeHtmlBlock, NodeId, NodeValue};

use super::{Parser, CODE_INDENT};
use crate::error::ParseResult;
use crate::inlines::InlineParser;
use crate::scanners;

impl<I: InlineParser> Parser<I> {
    pub(super) fn open_new_blocks(
        &mut self,
        container: &mut NodeId,
        line: &str,
        offset: &mut usize,
    ) -> ParseResult<()> {
        loop {
            // code blocks and HTML blocks swallow anything that looks like
            // a marker
            if matches!(
                self.tree[*container].value,
                NodeValue::CodeBlock(..) | NodeValue::HtmlBlock(..)
            ) {
                break;
            }

            let first_nonspace = scanners::first_nonspace(line, *offset);
            let indent = first_nonspace - *offset;
            let blank = first_nonspace == line.len();
            let bytes = line.as_bytes();
            let marker_byte = bytes.get(first_nonspace).copied();

            // cheap early exit before the full cascade; indented lines pass
            // regardless of their first byte
            if indent < CODE_INDENT
                && !marker_byte.map_or(false, scanners::is_maybe_special)
            {
                break;
            }

            if indent >= CODE_INDENT {
                // indented code cannot interrupt a paragraph, and a blank
                // indented line opens nothing
                if !matches!(self.tree[self.tip].value, NodeValue::Paragraph) && !blank {
                    *offset += CODE_INDENT;
                    self.close_unmatched();
                    *container =
                        self.add_child(NodeValue::CodeBlock(NodeCodeBlock::default()), *offset)?;
                }
                break;
            } else if marker_byte == Some(b'>') {
                *offset = first_nonspace + 1;
                if bytes.get(*offset) == Some(&b' ') {
                    *offset += 1;
                }
                self.close_unmatched();
                *container = self.add_child(NodeValue::BlockQuote, *offset)?;
            } else if let Some((level, marker_width)) =
                scanners::scan_atx_header(line, first_nonspace)
            {
                *offset = first_nonspace + marker_width;
                self.close_unmatched();
                *container =
                    self.add_child(NodeValue::Header(NodeHeader { level }), first_nonspace)?;
                let content = scanners::strip_atx_closing(&line[*offset..]).to_string();
                self.tree[*container].strings.push(content);
                *offset = line.len();
                break;
            } else if let Some((fence_char, fence_length)) =
                scanners::scan_open_code_fence(line, first_nonspace)
            {
                self.close_unmatched();
                *container = self.add_child(
                    NodeValue::CodeBlock(NodeCodeBlock {
                        fenced: true,
                        fence_char,
                        fence_length,
                        fence_offset: indent,
                        ..NodeCodeBlock::default()
                    }),
                    first_nonspace,
                )?;
                *offset = first_nonspace + fence_length;
                break;
            } else if scanners::scan_html_block_open(line, first_nonspace) {
                self.close_unmatched();
                *container =
                    self.add_child(NodeValue::HtmlBlock(NodeHtmlBlock::default()), first_nonspace)?;
                // the offset is left before the indent so the raw line,
                // leading spaces included, lands in the block
                break;
            } else if let Some(level) = self.setext_level(*container, line, first_nonspace) {
                // an underline below a one-line paragraph rewrites it in
                // place; nothing new opens
                self.close_unmatched();
                self.tree[*container].value = NodeValue::Header(NodeHeader { level });
                *offset = line.len();
                break;
            } else if scanners::scan_hrule(line, first_nonspace) {
                self.close_unmatched();
                *container = self.add_child(NodeValue::HorizontalRule, first_nonspace)?;
                // stop on the rule's last marker character, never on trailing
                // spaces: the line must not read as blank in the content phase
                *offset = line
                    .trim_end_matches(' ')
                    .len()
                    .saturating_sub(1)
                    .max(first_nonspace);
                break;
            } else if let Some(mut data) = scanners::parse_list_marker(line, first_nonspace) {
                data.marker_offset = indent;
                self.close_unmatched();
                *offset = (first_nonspace + data.padding).min(line.len());

                let continues_open_list = match &self.tree[*container].value {
                    NodeValue::List(open_list) => open_list.matches(&data),
                    _ => false,
                };
                if !continues_open_list {
                    *container = self.add_child(NodeValue::List(data), first_nonspace)?;
                }
                *container = self.add_child(NodeValue::Item(data), first_nonspace)?;
            } else {
                break;
            }
        }
        Ok(())
    }

    fn setext_level(&self, container: NodeId, line: &str, pos: usize) -> Option<u32> {
        if !matches!(self.tree[container].value, NodeValue::Paragraph)
            || self.tree[container].strings.len() != 1
        {
            return None;
        }
        scanners::scan_setext_underline(line, pos)
    }
}
