//! Input preparation: line splitting, NUL replacement, and tab expansion.
//!
//! Every line handed to the block parser has already been split on any of
//! the three terminators, scrubbed of NUL bytes, and detabbed, so the rest
//! of the crate can treat byte offsets within a line as column offsets.

use memchr::memchr2;

/// Tabs stop every four columns, counted from the start of the line.
pub const TAB_STOP: usize = 4;

/// Split `input` into prepared lines.
///
/// Terminators are `\r\n`, `\n`, and `\r`, in any mixture. A terminator on
/// the final line does not produce a trailing empty line.
pub fn prepare_lines(input: &str) -> Vec<String> {
    let bytes = input.as_bytes();
    let mut lines = Vec::new();
    let mut offset = 0;

    while offset < bytes.len() {
        let (end, next) = match memchr2(b'\n', b'\r', &bytes[offset..]) {
            Some(found) => {
                let end = offset + found;
                let next = if bytes[end] == b'\r' && bytes.get(end + 1) == Some(&b'\n') {
                    end + 2
                } else {
                    end + 1
                };
                (end, next)
            }
            None => (bytes.len(), bytes.len()),
        };
        lines.push(prepare_line(&input[offset..end]));
        offset = next;
    }

    lines
}

/// Scrub one terminator-free line: NUL becomes U+FFFD and tabs expand to
/// the next tab stop. Columns are counted per character from the start of
/// the line, not from the previous tab, so runs of tabs advance by
/// variable amounts.
pub fn prepare_line(line: &str) -> String {
    if !line.bytes().any(|b| b == b'\t' || b == 0) {
        return line.to_string();
    }

    let mut out = String::with_capacity(line.len() + TAB_STOP);
    let mut column = 0usize;
    for ch in line.chars() {
        match ch {
            '\t' => {
                let spaces = TAB_STOP - column % TAB_STOP;
                for _ in 0..spaces {
                    out.push(' ');
                }
                column += spaces;
            }
            '\0' => {
                out.push('\u{FFFD}');
                column += 1;
            }
            _ => {
                out.push(ch);
                column += 1;
            }
        }
    }
    out
}
