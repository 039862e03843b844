use super::harness;

#[test]
fn two_marked_lines_share_a_paragraph() {
    harness::assert_tree(
        "> a\n> b\n",
        &["document", "  block_quote", "    paragraph \"a\\nb\""],
    );
}

#[test]
fn lazy_continuation_line() {
    harness::assert_tree(
        "> a\nb\n",
        &["document", "  block_quote", "    paragraph \"a\\nb\""],
    );
}

#[test]
fn marker_without_space() {
    harness::assert_tree(
        ">a\n",
        &["document", "  block_quote", "    paragraph \"a\""],
    );
}

#[test]
fn nested_quotes() {
    harness::assert_tree(
        "> > a\n",
        &[
            "document",
            "  block_quote",
            "    block_quote",
            "      paragraph \"a\"",
        ],
    );
}

#[test]
fn blank_line_separates_quotes() {
    harness::assert_tree(
        "> a\n\n> b\n",
        &[
            "document",
            "  block_quote",
            "    paragraph \"a\"",
            "  block_quote",
            "    paragraph \"b\"",
        ],
    );
}

#[test]
fn interrupts_a_paragraph() {
    harness::assert_tree(
        "para\n> q\n",
        &[
            "document",
            "  paragraph \"para\"",
            "  block_quote",
            "    paragraph \"q\"",
        ],
    );
}

#[test]
fn up_to_three_spaces_of_indent() {
    harness::assert_tree(
        "   > a\n",
        &["document", "  block_quote", "    paragraph \"a\""],
    );
}

#[test]
fn four_spaces_make_indented_code() {
    harness::assert_tree(
        "    > a\n",
        &["document", "  code_block indented \"> a\\n\""],
    );
}

#[test]
fn contains_other_blocks() {
    harness::assert_tree(
        "> # h\n> ***\n> text\n",
        &[
            "document",
            "  block_quote",
            "    header level=1 \"h\"",
            "    horizontal_rule",
            "    paragraph \"text\"",
        ],
    );
}

#[test]
fn quote_does_not_continue_into_plain_code() {
    harness::assert_tree(
        "> ```\ncode\n",
        &[
            "document",
            "  block_quote",
            "    code_block fenced info=\"\" \"\"",
            "  paragraph \"code\"",
        ],
    );
}
