use super::harness;

#[test]
fn stars() {
    harness::assert_tree("***\n", &["document", "  horizontal_rule"]);
}

#[test]
fn underscores() {
    harness::assert_tree("___\n", &["document", "  horizontal_rule"]);
}

#[test]
fn spaced_dashes_beat_list_markers() {
    harness::assert_tree("- - -\n", &["document", "  horizontal_rule"]);
}

#[test]
fn more_than_three_with_spaces() {
    harness::assert_tree("**  * ** * ** * **\n", &["document", "  horizontal_rule"]);
}

#[test]
fn mixed_characters_are_a_paragraph() {
    harness::assert_tree("*-*\n", &["document", "  paragraph \"*-*\""]);
}

#[test]
fn two_characters_are_not_enough() {
    harness::assert_tree("--\n", &["document", "  paragraph \"--\""]);
}

#[test]
fn interrupts_a_paragraph() {
    harness::assert_tree(
        "para\n***\n",
        &["document", "  paragraph \"para\"", "  horizontal_rule"],
    );
}

#[test]
fn four_spaces_of_indent_make_code() {
    harness::assert_tree(
        "    ***\n",
        &["document", "  code_block indented \"***\\n\""],
    );
}

#[test]
fn rule_as_item_content_keeps_the_list_tight() {
    harness::assert_tree(
        "- ***\n- b\n",
        &[
            "document",
            "  list type=bullet tight=true",
            "    item",
            "      horizontal_rule",
            "    item",
            "      paragraph \"b\"",
        ],
    );
}

#[test]
fn trailing_spaces_on_a_rule_do_not_loosen_the_list() {
    // the rule line has trailing spaces but is not blank, so the item does
    // not end with a blank line
    harness::assert_tree(
        "- ***  \n- b\n",
        &[
            "document",
            "  list type=bullet tight=true",
            "    item",
            "      horizontal_rule",
            "    item",
            "      paragraph \"b\"",
        ],
    );
}

#[test]
fn dash_rule_with_trailing_spaces_before_a_list() {
    // a spaced dash run is a rule, not a list item, and the list after it
    // stays tight
    harness::assert_tree(
        "- - -  \n- b\n",
        &[
            "document",
            "  horizontal_rule",
            "  list type=bullet tight=true",
            "    item",
            "      paragraph \"b\"",
        ],
    );
}

#[test]
fn breaks_up_a_list() {
    harness::assert_tree(
        "- a\n***\n- b\n",
        &[
            "document",
            "  list type=bullet tight=true",
            "    item",
            "      paragraph \"a\"",
            "  horizontal_rule",
            "  list type=bullet tight=true",
            "    item",
            "      paragraph \"b\"",
        ],
    );
}
