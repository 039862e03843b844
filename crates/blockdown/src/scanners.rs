//! Byte-level line scanners for block markers.
//!
//! Every scanner takes a prepared line (detabbed, NUL-free, no terminator)
//! and an offset, and reads at most that one line. Markers are all ASCII,
//! so the scanners work on bytes; offsets produced here are always on
//! character boundaries.

use blockdown_tree::{ListData, ListDelimType, ListType};
use lazy_static::lazy_static;
use rustc_hash::FxHashSet;

const fn build_lookup(chars: &[u8]) -> [bool; 256] {
    let mut table = [false; 256];
    let mut i = 0;
    while i < chars.len() {
        table[chars[i] as usize] = true;
        i += 1;
    }
    table
}

/// First-character filter for the container-opening phase: only lines whose
/// first non-space byte is one of these can open a new block. Indented code
/// is the exception and is gated on the indent instead.
static MAYBE_SPECIAL: [bool; 256] = build_lookup(b"#`~*+_=<>-0123456789");

lazy_static! {
    /// The fixed set of tag names that can open an HTML block.
    static ref HTML_BLOCK_TAGS: FxHashSet<&'static str> = [
        "article", "header", "aside", "hgroup", "iframe", "blockquote", "hr",
        "body", "li", "map", "button", "object", "canvas", "ol", "caption",
        "output", "col", "p", "colgroup", "pre", "dd", "progress", "div",
        "section", "dl", "table", "td", "dt", "tbody", "embed", "textarea",
        "fieldset", "tfoot", "figcaption", "th", "figure", "thead", "footer",
        "tr", "form", "ul", "h1", "h2", "h3", "h4", "h5", "h6", "video",
        "script", "style",
    ]
    .into_iter()
    .collect();
}

#[inline(always)]
pub(crate) fn is_maybe_special(byte: u8) -> bool {
    MAYBE_SPECIAL[byte as usize]
}

/// Index of the first non-space byte at or after `offset`, or the line
/// length if only spaces remain.
pub(crate) fn first_nonspace(line: &str, offset: usize) -> usize {
    let start = offset.min(line.len());
    line.as_bytes()[start..]
        .iter()
        .position(|&b| b != b' ')
        .map(|found| start + found)
        .unwrap_or(line.len())
}

/// True if nothing but spaces remains at `offset`.
pub(crate) fn is_blank(line: &str, offset: usize) -> bool {
    first_nonspace(line, offset) == line.len()
}

/// True if the text is empty or whitespace only. Used on finalized content,
/// which may span several lines.
pub(crate) fn is_blank_str(text: &str) -> bool {
    text.chars().all(|c| c.is_ascii_whitespace())
}

/// Scan an ATX header marker: one to six `#` followed by a space or the end
/// of the line. Returns the level and the number of bytes consumed,
/// including the run of spaces after the marker.
pub(crate) fn scan_atx_header(line: &str, pos: usize) -> Option<(u32, usize)> {
    let bytes = &line.as_bytes()[pos..];
    let mut hashes = 0;
    while hashes < bytes.len() && bytes[hashes] == b'#' {
        hashes += 1;
    }
    if hashes == 0 || hashes > 6 {
        return None;
    }
    let mut end = hashes;
    while end < bytes.len() && bytes[end] == b' ' {
        end += 1;
    }
    if end == hashes && end < bytes.len() {
        // `#text` without a separating space is not a header
        return None;
    }
    Some((hashes as u32, end))
}

/// Strip an ATX header's closing sequence from its content: a line that is
/// nothing but spaces and `#` becomes empty, and a trailing ` ###` run is
/// removed along with the spaces before it. Trailing `#` glued to text is
/// kept.
pub(crate) fn strip_atx_closing(content: &str) -> &str {
    let bytes = content.as_bytes();

    let mut i = 0;
    while i < bytes.len() && bytes[i] == b' ' {
        i += 1;
    }
    let hash_start = i;
    while i < bytes.len() && bytes[i] == b'#' {
        i += 1;
    }
    let hash_end = i;
    while i < bytes.len() && bytes[i] == b' ' {
        i += 1;
    }
    if i == bytes.len() && hash_end > hash_start {
        return "";
    }

    let mut end = bytes.len();
    while end > 0 && bytes[end - 1] == b' ' {
        end -= 1;
    }
    let hashes_until = end;
    while end > 0 && bytes[end - 1] == b'#' {
        end -= 1;
    }
    if end < hashes_until {
        let spaces_until = end;
        while end > 0 && bytes[end - 1] == b' ' {
            end -= 1;
        }
        if end < spaces_until {
            return &content[..end];
        }
    }
    content
}

/// Scan an opening code fence: at least three backticks with no later
/// backtick on the line, or the same with tildes. Returns the fence
/// character and length.
pub(crate) fn scan_open_code_fence(line: &str, pos: usize) -> Option<(u8, usize)> {
    let bytes = &line.as_bytes()[pos..];
    let fence_char = *bytes.first()?;
    if fence_char != b'`' && fence_char != b'~' {
        return None;
    }
    let mut length = 0;
    while length < bytes.len() && bytes[length] == fence_char {
        length += 1;
    }
    if length < 3 {
        return None;
    }
    if bytes[length..].contains(&fence_char) {
        return None;
    }
    Some((fence_char, length))
}

/// Scan a closing fence of `fence_char`: a run of at least three, followed
/// by spaces only. Returns the run length; the caller compares it against
/// the opening length.
pub(crate) fn scan_close_code_fence(line: &str, pos: usize, fence_char: u8) -> Option<usize> {
    let bytes = &line.as_bytes()[pos..];
    let mut length = 0;
    while length < bytes.len() && bytes[length] == fence_char {
        length += 1;
    }
    if length < 3 {
        return None;
    }
    if bytes[length..].iter().any(|&b| b != b' ') {
        return None;
    }
    Some(length)
}

/// Scan a setext header underline: a run of `=` (level 1) or `-` (level 2),
/// optionally trailed by spaces.
pub(crate) fn scan_setext_underline(line: &str, pos: usize) -> Option<u32> {
    let bytes = &line.as_bytes()[pos..];
    let marker = *bytes.first()?;
    let level = match marker {
        b'=' => 1,
        b'-' => 2,
        _ => return None,
    };
    let mut i = 0;
    while i < bytes.len() && bytes[i] == marker {
        i += 1;
    }
    if bytes[i..].iter().any(|&b| b != b' ') {
        return None;
    }
    Some(level)
}

/// Scan a horizontal rule: three or more of the same one of `*`, `_`, `-`,
/// with any amount of interspersed spaces and nothing else.
pub(crate) fn scan_hrule(line: &str, pos: usize) -> bool {
    let bytes = &line.as_bytes()[pos..];
    let mut marker = 0u8;
    let mut count = 0;
    for &byte in bytes {
        match byte {
            b' ' => continue,
            b'*' | b'_' | b'-' => {
                if marker == 0 {
                    marker = byte;
                }
                if byte != marker {
                    return false;
                }
                count += 1;
            }
            _ => return false,
        }
    }
    count >= 3
}

/// Parse a list marker at `pos`: a bullet (`*`, `+`, `-`) or an ordered
/// marker (digits then `.` or `)`), followed by at least one space or the
/// end of the line. A line that scans as a horizontal rule is never a
/// marker.
///
/// `padding` is the column width the marker claims for its item: marker
/// plus following spaces, except that markers trailed by nothing, or by
/// five or more spaces (the content is then indented code), claim marker
/// plus one.
pub(crate) fn parse_list_marker(line: &str, pos: usize) -> Option<ListData> {
    let bytes = line.as_bytes();
    if pos >= bytes.len() || scan_hrule(line, pos) {
        return None;
    }

    let mut data = ListData {
        tight: true,
        ..ListData::default()
    };
    let marker_end;
    match bytes[pos] {
        marker @ (b'*' | b'+' | b'-') => {
            data.list_type = ListType::Bullet;
            data.bullet_char = marker;
            marker_end = pos + 1;
        }
        b'0'..=b'9' => {
            let mut i = pos;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            let delimiter = match bytes.get(i) {
                Some(b'.') => ListDelimType::Period,
                Some(b')') => ListDelimType::Paren,
                _ => return None,
            };
            data.list_type = ListType::Ordered;
            data.start = line[pos..i].parse().ok()?;
            data.delimiter = delimiter;
            marker_end = i + 1;
        }
        _ => return None,
    }

    let mut i = marker_end;
    while i < bytes.len() && bytes[i] == b' ' {
        i += 1;
    }
    let spaces_after = i - marker_end;
    if spaces_after == 0 && i < bytes.len() {
        return None;
    }

    let blank_item = i == bytes.len();
    let marker_width = marker_end - pos;
    data.padding = if !(1..5).contains(&spaces_after) || blank_item {
        marker_width + 1
    } else {
        marker_width + spaces_after
    };
    Some(data)
}

/// Scan an HTML block opener: `<tag`, `</tag`, `<?`, or `<!`, where `tag`
/// is one of the fixed block-level tag names (case-insensitive) and is
/// followed by a terminator.
pub(crate) fn scan_html_block_open(line: &str, pos: usize) -> bool {
    let bytes = &line.as_bytes()[pos..];
    if bytes.first() != Some(&b'<') {
        return false;
    }
    match bytes.get(1) {
        Some(b'?') | Some(b'!') => true,
        Some(b'/') => scan_block_tag(&bytes[2..], false),
        Some(_) => scan_block_tag(&bytes[1..], true),
        None => false,
    }
}

fn scan_block_tag(bytes: &[u8], open_tag: bool) -> bool {
    let mut len = 0;
    while len < bytes.len() && bytes[len].is_ascii_alphanumeric() {
        len += 1;
    }
    if len == 0 {
        return false;
    }
    let name = bytes[..len].to_ascii_lowercase();
    let name = std::str::from_utf8(&name).expect("tag name is ASCII");
    if !HTML_BLOCK_TAGS.contains(name) {
        return false;
    }
    match bytes.get(len) {
        Some(b' ') | Some(b'>') => true,
        Some(b'/') => open_tag,
        _ => false,
    }
}

/// Remove backslashes before ASCII punctuation. Backslashes before
/// anything else are literal.
pub(crate) fn unescape_string(text: &str) -> String {
    if !text.contains('\\') {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            match chars.peek() {
                Some(&next) if next.is_ascii_punctuation() => {
                    out.push(next);
                    chars.next();
                }
                _ => out.push('\\'),
            }
        } else {
            out.push(ch);
        }
    }
    out
}
