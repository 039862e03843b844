//! Serialization of a finished tree into a nested JSON-friendly form: one
//! object per node carrying `type`, `sourcepos`, the type-specific payload,
//! and `children` for container blocks.

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

use crate::node::NodeValue;
use crate::{NodeId, Tree};

impl Serialize for Tree {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        NodeRef {
            tree: self,
            id: self.root(),
        }
        .serialize(serializer)
    }
}

struct NodeRef<'a> {
    tree: &'a Tree,
    id: NodeId,
}

struct ChildrenRef<'a> {
    tree: &'a Tree,
    id: NodeId,
}

impl Serialize for NodeRef<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let node = &self.tree[self.id];
        let pos = node.sourcepos;

        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("type", node.value.name())?;
        map.serialize_entry(
            "sourcepos",
            &[pos.start.0, pos.start.1, pos.end.0, pos.end.1],
        )?;

        match &node.value {
            NodeValue::Header(header) => {
                map.serialize_entry("level", &header.level)?;
                map.serialize_entry("content", &node.string_content)?;
            }
            NodeValue::Paragraph => {
                map.serialize_entry("content", &node.string_content)?;
            }
            NodeValue::List(data) | NodeValue::Item(data) => {
                map.serialize_entry("list_type", data.list_type.name())?;
                map.serialize_entry("tight", &data.tight)?;
                match data.list_type {
                    crate::ListType::Bullet => {
                        map.serialize_entry(
                            "bullet_char",
                            &(data.bullet_char as char).to_string(),
                        )?;
                    }
                    crate::ListType::Ordered => {
                        map.serialize_entry("start", &data.start)?;
                        map.serialize_entry("delimiter", data.delimiter.name())?;
                    }
                }
            }
            NodeValue::CodeBlock(code) => {
                map.serialize_entry("fenced", &code.fenced)?;
                if code.fenced {
                    map.serialize_entry(
                        "fence_char",
                        &(code.fence_char as char).to_string(),
                    )?;
                    map.serialize_entry("info", &code.info)?;
                }
                map.serialize_entry("literal", &code.literal)?;
            }
            NodeValue::HtmlBlock(html) => {
                map.serialize_entry("literal", &html.literal)?;
            }
            NodeValue::Document | NodeValue::BlockQuote | NodeValue::HorizontalRule => {}
        }

        if matches!(
            node.value,
            NodeValue::Document | NodeValue::BlockQuote | NodeValue::List(..) | NodeValue::Item(..)
        ) {
            map.serialize_entry(
                "children",
                &ChildrenRef {
                    tree: self.tree,
                    id: self.id,
                },
            )?;
        }

        map.end()
    }
}

impl Serialize for ChildrenRef<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(None)?;
        for child in self.tree.children(self.id) {
            seq.serialize_element(&NodeRef {
                tree: self.tree,
                id: child,
            })?;
        }
        seq.end()
    }
}
