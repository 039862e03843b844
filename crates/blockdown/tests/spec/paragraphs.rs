use super::harness;

#[test]
fn consecutive_lines_share_a_paragraph() {
    harness::assert_tree(
        "aaa\nbbb\n",
        &["document", "  paragraph \"aaa\\nbbb\""],
    );
}

#[test]
fn blank_line_separates_paragraphs() {
    harness::assert_tree(
        "aaa\n\nbbb\n",
        &["document", "  paragraph \"aaa\"", "  paragraph \"bbb\""],
    );
}

#[test]
fn a_blank_line_of_spaces_separates_too() {
    harness::assert_tree(
        "aaa\n   \nbbb\n",
        &["document", "  paragraph \"aaa\"", "  paragraph \"bbb\""],
    );
}

#[test]
fn leading_spaces_are_stripped_per_line() {
    harness::assert_tree(
        "  aaa\n bbb\n",
        &["document", "  paragraph \"aaa\\nbbb\""],
    );
}

#[test]
fn no_trailing_newline_needed() {
    harness::assert_tree("aaa", &["document", "  paragraph \"aaa\""]);
}

#[test]
fn markers_degrade_to_text_mid_paragraph() {
    // the underline candidate has interior text, the marker has no space
    harness::assert_tree(
        "aaa\n=x\n-b\n",
        &["document", "  paragraph \"aaa\\n=x\\n-b\""],
    );
}
