//! Input tree as produced by an external markup parser.
//!
//! The parser dump uses the `type` / `name` / `attribs` / `children` / `data`
//! shape. Only `tag` and `script` nodes are element-like and only `text`
//! nodes carry content; every other kind is kept as [`Node::Unknown`] so the
//! converter can report it.

use std::fmt;

use indexmap::IndexMap;
use serde::de::value::{MapAccessDeserializer, SeqAccessDeserializer};
use serde::de::{MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer};

use crate::error::ConvertResult;

/// Attribute map of an element, in source order.
pub type Attributes = IndexMap<String, String>;

/// A node of the parsed markup tree.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawNode")]
pub enum Node {
    Element(Element),
    Text(Text),
    Unknown(Unknown),
}

/// Which parser kind an element-like node came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Tag,
    /// `<script>` elements, converted like any other tag.
    Script,
}

impl ElementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementKind::Tag => "tag",
            ElementKind::Script => "script",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub kind: ElementKind,
    pub name: String,
    pub attribs: Option<Attributes>,
    pub children: Option<Vec<Node>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    /// Raw text, possibly containing character references.
    pub data: String,
}

/// A node kind the converter does not handle (comments, directives, ...).
#[derive(Debug, Clone, PartialEq)]
pub struct Unknown {
    pub kind: String,
}

impl Node {
    pub fn text(data: impl Into<String>) -> Self {
        Node::Text(Text { data: data.into() })
    }

    pub fn unknown(kind: impl Into<String>) -> Self {
        Node::Unknown(Unknown { kind: kind.into() })
    }

    /// The parser kind string of this node (`tag`, `script`, `text`, ...).
    pub fn kind(&self) -> &str {
        match self {
            Node::Element(el) => el.kind.as_str(),
            Node::Text(_) => "text",
            Node::Unknown(u) => &u.kind,
        }
    }
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            kind: ElementKind::Tag,
            name: name.into(),
            attribs: None,
            children: None,
        }
    }

    pub fn script() -> Self {
        Self {
            kind: ElementKind::Script,
            ..Self::new("script")
        }
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attribs
            .get_or_insert_with(Attributes::new)
            .insert(name.into(), value.into());
        self
    }

    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.get_or_insert_with(Vec::new).push(child.into());
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attribs
            .as_ref()
            .and_then(|a| a.get(name))
            .map(String::as_str)
    }

    /// Children in order; empty when the parser gave none.
    pub fn children(&self) -> &[Node] {
        self.children.as_deref().unwrap_or(&[])
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Node::Element(el)
    }
}

impl From<Text> for Node {
    fn from(text: Text) -> Self {
        Node::Text(text)
    }
}

// ─── Parser dump loading ─────────────────────────────────────────────────────

#[derive(Deserialize)]
struct RawNode {
    #[serde(rename = "type")]
    kind: String,
    name: Option<String>,
    attribs: Option<Attributes>,
    children: Option<Vec<Node>>,
    data: Option<String>,
}

impl From<RawNode> for Node {
    fn from(raw: RawNode) -> Self {
        let element_kind = match raw.kind.as_str() {
            "tag" => Some(ElementKind::Tag),
            "script" => Some(ElementKind::Script),
            _ => None,
        };

        if let Some(kind) = element_kind {
            return Node::Element(Element {
                kind,
                name: raw.name.unwrap_or_default(),
                attribs: raw.attribs,
                children: raw.children,
            });
        }

        if raw.kind == "text" {
            Node::text(raw.data.unwrap_or_default())
        } else {
            Node::Unknown(Unknown { kind: raw.kind })
        }
    }
}

/// A dump holds either a single node or the list of document roots.
///
/// Dispatches on the first token instead of trying each shape in turn, so a
/// malformed node reports the deserializer's own error and position.
struct Dump(Vec<Node>);

impl<'de> Deserialize<'de> for Dump {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(DumpVisitor)
    }
}

struct DumpVisitor;

impl<'de> Visitor<'de> for DumpVisitor {
    type Value = Dump;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a node object or an array of nodes")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, seq: A) -> Result<Dump, A::Error> {
        Vec::<Node>::deserialize(SeqAccessDeserializer::new(seq)).map(Dump)
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Dump, A::Error> {
        Node::deserialize(MapAccessDeserializer::new(map)).map(|node| Dump(vec![node]))
    }
}

/// Load root nodes from a JSON parser dump.
///
/// Nesting depth is unbounded: the recursion limit is lifted and the stack
/// grows on demand while deserializing.
pub fn from_json_str(json: &str) -> ConvertResult<Vec<Node>> {
    let mut deserializer = serde_json::Deserializer::from_str(json);
    deserializer.disable_recursion_limit();
    let Dump(nodes) = Dump::deserialize(serde_stacker::Deserializer::new(&mut deserializer))?;
    deserializer.end()?;
    Ok(nodes)
}

/// Load root nodes from a YAML parser dump.
///
/// YAML input keeps the deserializer's fixed recursion limit of 128 levels,
/// which allows roughly 63 nested elements; deeper dumps should use JSON.
pub fn from_yaml_str(yaml: &str) -> ConvertResult<Vec<Node>> {
    let Dump(nodes) = serde_yaml::from_str(yaml)?;
    Ok(nodes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_tag_with_children() {
        let json = r#"{
            "type": "tag",
            "name": "div",
            "attribs": {"class": "box", "id": "main"},
            "children": [
                {"type": "text", "data": "hi"},
                {"type": "comment", "data": "ignored"}
            ]
        }"#;
        let nodes = from_json_str(json).unwrap();
        assert_eq!(nodes.len(), 1);

        let Node::Element(div) = &nodes[0] else {
            panic!("Expected element");
        };
        assert_eq!(div.kind, ElementKind::Tag);
        assert_eq!(div.name, "div");
        assert_eq!(div.attribute("class"), Some("box"));
        assert_eq!(div.children().len(), 2);
        assert_eq!(div.children()[0], Node::text("hi"));
        assert_eq!(div.children()[1], Node::unknown("comment"));
    }

    #[test]
    fn test_attribute_order_is_preserved() {
        let json = r#"{"type":"tag","name":"a","attribs":{"z":"1","a":"2","m":"3"}}"#;
        let nodes = from_json_str(json).unwrap();
        let Node::Element(a) = &nodes[0] else {
            panic!("Expected element");
        };
        let names: Vec<_> = a.attribs.as_ref().unwrap().keys().cloned().collect();
        assert_eq!(names, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_script_is_element_like() {
        let nodes = from_json_str(r#"[{"type":"script","name":"script","attribs":{}}]"#).unwrap();
        assert!(matches!(
            &nodes[0],
            Node::Element(Element { kind: ElementKind::Script, .. })
        ));
        assert_eq!(nodes[0].kind(), "script");
    }

    #[test]
    fn test_missing_fields_default() {
        let nodes = from_json_str(r#"[{"type":"tag"},{"type":"text"},{"type":"style"}]"#).unwrap();
        assert_eq!(nodes[0], Node::Element(Element::new("")));
        assert_eq!(nodes[1], Node::text(""));
        assert_eq!(nodes[2].kind(), "style");
    }

    #[test]
    fn test_null_attribs_are_absent() {
        let nodes = from_json_str(r#"{"type":"tag","name":"br","attribs":null}"#).unwrap();
        let Node::Element(br) = &nodes[0] else {
            panic!("Expected element");
        };
        assert!(br.attribs.is_none());
        assert!(br.children().is_empty());
    }

    #[test]
    fn test_load_yaml_dump() {
        let yaml = "
- type: tag
  name: p
  attribs:
    title: Hello
  children:
    - type: text
      data: World
";
        let nodes = from_yaml_str(yaml).unwrap();
        let expected: Node = Element::new("p")
            .with_attr("title", "Hello")
            .with_child(Node::text("World"))
            .into();
        assert_eq!(nodes, vec![expected]);
    }

    fn nested_dump(depth: usize) -> String {
        let mut json = String::from(r#"{"type":"text","data":"leaf"}"#);
        for _ in 0..depth {
            json = format!(r#"{{"type":"tag","name":"div","children":[{}]}}"#, json);
        }
        json
    }

    #[test]
    fn test_deeply_nested_json_dump() {
        let nodes = from_json_str(&nested_dump(200)).unwrap();

        let mut depth = 0;
        let mut current = &nodes[0];
        while let Node::Element(el) = current {
            depth += 1;
            current = &el.children()[0];
        }
        assert_eq!(depth, 200);
        assert_eq!(current, &Node::text("leaf"));
    }

    #[test]
    fn test_type_error_keeps_position() {
        let err = from_json_str(r#"[{"type":"tag","name":5}]"#).unwrap_err().to_string();
        assert!(err.contains("invalid type"), "unexpected error: {}", err);
        assert!(err.contains("line 1"), "unexpected error: {}", err);

        let err = from_json_str(r#"{"type":"tag","attribs":{"id":[]}}"#).unwrap_err().to_string();
        assert!(err.contains("invalid type"), "unexpected error: {}", err);
    }

    #[test]
    fn test_trailing_data_is_error() {
        assert!(from_json_str(r#"{"type":"text"} {"type":"text"}"#).is_err());
    }

    #[test]
    fn test_scalar_dump_is_error() {
        let err = from_json_str("42").unwrap_err().to_string();
        assert!(err.contains("a node object or an array of nodes"), "unexpected error: {}", err);
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(from_json_str("{not json").is_err());
        assert!(from_json_str(r#"{"name":"div"}"#).is_err());
    }
}
