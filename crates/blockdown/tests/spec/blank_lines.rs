use super::harness;

#[test]
fn empty_input_is_an_empty_document() {
    harness::assert_tree("", &["document"]);
}

#[test]
fn a_single_newline_is_an_empty_document() {
    harness::assert_tree("\n", &["document"]);
}

#[test]
fn blank_lines_around_content_are_ignored() {
    harness::assert_tree(
        "\n\naaa\n\n\n",
        &["document", "  paragraph \"aaa\""],
    );
}

#[test]
fn blank_lines_of_spaces_count_as_blank() {
    harness::assert_tree(
        "      \naaa\n",
        &["document", "  paragraph \"aaa\""],
    );
}
