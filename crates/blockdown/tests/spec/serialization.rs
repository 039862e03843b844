use super::harness;

#[test]
fn document_serializes_to_nested_json() {
    let tree = harness::parse("# hi\n\n- a\n");
    let json = serde_json::to_value(&tree).unwrap();

    assert_eq!(json["type"], "document");
    assert_eq!(json["sourcepos"], serde_json::json!([1, 1, 3, 3]));

    let header = &json["children"][0];
    assert_eq!(header["type"], "header");
    assert_eq!(header["level"], 1);
    assert_eq!(header["content"], "hi");
    assert!(header.get("children").is_none());

    let list = &json["children"][1];
    assert_eq!(list["type"], "list");
    assert_eq!(list["list_type"], "bullet");
    assert_eq!(list["tight"], true);
    assert_eq!(list["children"][0]["type"], "item");
    assert_eq!(list["children"][0]["children"][0]["type"], "paragraph");
    assert_eq!(list["children"][0]["children"][0]["content"], "a");
}

#[test]
fn code_blocks_expose_their_payload() {
    let tree = harness::parse("```rust\nfn x() {}\n```\n");
    let json = serde_json::to_value(&tree).unwrap();
    let code = &json["children"][0];
    assert_eq!(code["type"], "code_block");
    assert_eq!(code["fenced"], true);
    assert_eq!(code["fence_char"], "`");
    assert_eq!(code["info"], "rust");
    assert_eq!(code["literal"], "fn x() {}\n");
}
