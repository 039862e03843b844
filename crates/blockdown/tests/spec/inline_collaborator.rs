use blockdown::{InlineParser, NodeId, Parser, ParserOptions, RefMap, Tree};

/// Records every call the block parser makes across the collaborator
/// boundary.
#[derive(Default)]
struct RecordingInlines {
    reference_calls: Vec<String>,
    inline_nodes: Vec<&'static str>,
}

impl InlineParser for RecordingInlines {
    fn parse_reference(&mut self, text: &str, _refmap: &mut RefMap) -> usize {
        self.reference_calls.push(text.to_string());
        0
    }

    fn parse_inlines(&mut self, tree: &mut Tree, node: NodeId, _refmap: &RefMap) {
        self.inline_nodes.push(tree[node].value.name());
        // payload mutation mid-walk is allowed
        tree[node].string_content.make_ascii_uppercase();
    }
}

#[test]
fn parse_inlines_runs_once_per_paragraph_and_header() {
    let mut parser = Parser::with_inlines(RecordingInlines::default(), ParserOptions::default());
    parser.parse("# h\n\none\n\n> two\n").unwrap();
    assert_eq!(
        parser.inlines().inline_nodes,
        vec!["header", "paragraph", "paragraph"]
    );
}

#[test]
fn reference_scanner_sees_bracket_led_paragraphs_only() {
    let mut parser = Parser::with_inlines(RecordingInlines::default(), ParserOptions::default());
    parser.parse("[maybe]: /def\n\nplain text\n").unwrap();
    assert_eq!(parser.inlines().reference_calls, vec!["[maybe]: /def"]);
}

#[test]
fn collaborator_can_rewrite_content() {
    let mut parser = Parser::with_inlines(RecordingInlines::default(), ParserOptions::default());
    let tree = parser.parse("hello\n").unwrap();
    let paragraph = tree.children(tree.root()).next().unwrap();
    assert_eq!(tree[paragraph].string_content, "HELLO");
}

#[test]
fn stub_returning_zero_keeps_the_paragraph() {
    // with a collaborator that never consumes a definition, the bracketed
    // text stays paragraph content
    let mut parser = Parser::with_inlines(RecordingInlines::default(), ParserOptions::default());
    let tree = parser.parse("[ref]: /url\n").unwrap();
    let paragraph = tree.children(tree.root()).next().unwrap();
    assert_eq!(tree[paragraph].string_content, "[REF]: /URL");
}
