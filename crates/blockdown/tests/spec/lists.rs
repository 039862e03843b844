use super::harness;

#[test]
fn tight_bullet_list() {
    harness::assert_tree(
        "- x\n- y\n",
        &[
            "document",
            "  list type=bullet tight=true",
            "    item",
            "      paragraph \"x\"",
            "    item",
            "      paragraph \"y\"",
        ],
    );
}

#[test]
fn blank_line_between_items_makes_it_loose() {
    harness::assert_tree(
        "- x\n\n- y\n",
        &[
            "document",
            "  list type=bullet tight=false",
            "    item",
            "      paragraph \"x\"",
            "    item",
            "      paragraph \"y\"",
        ],
    );
}

#[test]
fn trailing_blank_after_the_last_item_keeps_it_tight() {
    harness::assert_tree(
        "- x\n- y\n\n",
        &[
            "document",
            "  list type=bullet tight=true",
            "    item",
            "      paragraph \"x\"",
            "    item",
            "      paragraph \"y\"",
        ],
    );
}

#[test]
fn blank_line_then_another_item_is_loose() {
    harness::assert_tree(
        "- x\n- y\n\n- z\n",
        &[
            "document",
            "  list type=bullet tight=false",
            "    item",
            "      paragraph \"x\"",
            "    item",
            "      paragraph \"y\"",
            "    item",
            "      paragraph \"z\"",
        ],
    );
}

#[test]
fn two_blank_lines_break_out_of_the_list() {
    harness::assert_tree(
        "a\n\n\n- x\n- y\n\n\nb\n",
        &[
            "document",
            "  paragraph \"a\"",
            "  list type=bullet tight=true",
            "    item",
            "      paragraph \"x\"",
            "    item",
            "      paragraph \"y\"",
            "  paragraph \"b\"",
        ],
    );
}

#[test]
fn ordered_list_records_start_and_delimiter() {
    harness::assert_tree(
        "3) a\n4) b\n",
        &[
            "document",
            "  list type=ordered start=3 delim=paren tight=true",
            "    item",
            "      paragraph \"a\"",
            "    item",
            "      paragraph \"b\"",
        ],
    );
}

#[test]
fn changing_the_bullet_starts_a_new_list() {
    harness::assert_tree(
        "- a\n+ b\n",
        &[
            "document",
            "  list type=bullet tight=true",
            "    item",
            "      paragraph \"a\"",
            "  list type=bullet tight=true",
            "    item",
            "      paragraph \"b\"",
        ],
    );
}

#[test]
fn changing_the_delimiter_starts_a_new_list() {
    harness::assert_tree(
        "1. a\n2) b\n",
        &[
            "document",
            "  list type=ordered start=1 delim=period tight=true",
            "    item",
            "      paragraph \"a\"",
            "  list type=ordered start=2 delim=paren tight=true",
            "    item",
            "      paragraph \"b\"",
        ],
    );
}

#[test]
fn nested_list_via_indentation() {
    harness::assert_tree(
        "- a\n  - b\n",
        &[
            "document",
            "  list type=bullet tight=true",
            "    item",
            "      paragraph \"a\"",
            "      list type=bullet tight=true",
            "        item",
            "          paragraph \"b\"",
        ],
    );
}

#[test]
fn empty_item_stays_tight() {
    // an item opened and left empty on the same line does not count as
    // ending with a blank line
    harness::assert_tree(
        "-\n- b\n",
        &[
            "document",
            "  list type=bullet tight=true",
            "    item",
            "    item",
            "      paragraph \"b\"",
        ],
    );
}

#[test]
fn blank_quote_marker_line_keeps_the_list_tight() {
    // the bare `>` line is blank inside the quote, but a block quote never
    // counts as ending with a blank line
    harness::assert_tree(
        "- > q\n  >\n- b\n",
        &[
            "document",
            "  list type=bullet tight=true",
            "    item",
            "      block_quote",
            "        paragraph \"q\"",
            "    item",
            "      paragraph \"b\"",
        ],
    );
}

#[test]
fn header_as_item_content_keeps_the_list_tight() {
    harness::assert_tree(
        "- # h\n- b\n",
        &[
            "document",
            "  list type=bullet tight=true",
            "    item",
            "      header level=1 \"h\"",
            "    item",
            "      paragraph \"b\"",
        ],
    );
}

#[test]
fn blank_line_inside_a_fenced_block_keeps_the_list_tight() {
    harness::assert_tree(
        "- ```\n\n  ```\n- b\n",
        &[
            "document",
            "  list type=bullet tight=true",
            "    item",
            "      code_block fenced info=\"\" \"\\n\"",
            "    item",
            "      paragraph \"b\"",
        ],
    );
}

#[test]
fn item_with_two_paragraphs_is_loose() {
    harness::assert_tree(
        "- a\n\n  b\n",
        &[
            "document",
            "  list type=bullet tight=false",
            "    item",
            "      paragraph \"a\"",
            "      paragraph \"b\"",
        ],
    );
}

#[test]
fn unindented_continuation_closes_the_list() {
    harness::assert_tree(
        "- a\n\nb\n",
        &[
            "document",
            "  list type=bullet tight=true",
            "    item",
            "      paragraph \"a\"",
            "  paragraph \"b\"",
        ],
    );
}

#[test]
fn item_content_may_be_any_block() {
    harness::assert_tree(
        "- # h\n",
        &[
            "document",
            "  list type=bullet tight=true",
            "    item",
            "      header level=1 \"h\"",
        ],
    );
}

#[test]
fn wide_marker_gap_leaves_indented_code() {
    harness::assert_tree(
        "-     code\n",
        &[
            "document",
            "  list type=bullet tight=true",
            "    item",
            "      code_block indented \"code\\n\"",
        ],
    );
}
