//! Output tree for a virtual-DOM renderer.
//!
//! The converter never names a concrete renderer: it builds nodes through a
//! [`NodeFactory`]. [`VDom`] is the in-crate factory producing [`VNode`]s.

use std::marker::PhantomData;

use indexmap::IndexMap;
use serde::Serialize;

/// String-to-string map used for `dataset` and parsed `style` values.
pub type StringMap = IndexMap<String, String>;

/// Properties of an output element, in insertion order.
pub type Properties<H> = IndexMap<String, PropValue<H>>;

/// A single property value.
///
/// `H` is the renderer's opaque hook type (lifecycle callbacks and the like);
/// the converter only moves hook values around.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PropValue<H> {
    Text(String),
    Map(StringMap),
    Hook(H),
}

impl<H> PropValue<H> {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&StringMap> {
        match self {
            PropValue::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_hook(&self) -> Option<&H> {
        match self {
            PropValue::Hook(h) => Some(h),
            _ => None,
        }
    }
}

impl<H> From<String> for PropValue<H> {
    fn from(s: String) -> Self {
        PropValue::Text(s)
    }
}

impl<H> From<&str> for PropValue<H> {
    fn from(s: &str) -> Self {
        PropValue::Text(s.to_string())
    }
}

impl<H> From<StringMap> for PropValue<H> {
    fn from(m: StringMap) -> Self {
        PropValue::Map(m)
    }
}

/// Constructors of the target rendering library.
pub trait NodeFactory {
    /// Opaque hook value carried in element properties.
    type Hook;
    /// The node type the renderer works with.
    type Node;

    fn element(
        &self,
        tag_name: &str,
        properties: Properties<Self::Hook>,
        children: Vec<Self::Node>,
        key: Option<String>,
    ) -> Self::Node;

    fn text(&self, text: String) -> Self::Node;
}

// ─── Default virtual tree ────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum VNode<H> {
    Element(VElement<H>),
    Text(VText),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VElement<H> {
    pub tag_name: String,
    pub properties: Properties<H>,
    pub children: Vec<VNode<H>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VText {
    pub text: String,
}

impl<H> VNode<H> {
    pub fn as_element(&self) -> Option<&VElement<H>> {
        match self {
            VNode::Element(el) => Some(el),
            VNode::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            VNode::Text(t) => Some(&t.text),
            VNode::Element(_) => None,
        }
    }
}

impl<H> VElement<H> {
    pub fn property(&self, name: &str) -> Option<&PropValue<H>> {
        self.properties.get(name)
    }

    /// The `dataset` map. Always present on converted elements unless a
    /// hook replaced it with a non-map value.
    pub fn dataset(&self) -> Option<&StringMap> {
        self.property("dataset").and_then(PropValue::as_map)
    }

    pub fn style(&self) -> Option<&StringMap> {
        self.property("style").and_then(PropValue::as_map)
    }
}

/// Factory building [`VNode`]s.
pub struct VDom<H> {
    _hook: PhantomData<fn() -> H>,
}

impl<H> VDom<H> {
    pub fn new() -> Self {
        Self { _hook: PhantomData }
    }
}

impl<H> Default for VDom<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> NodeFactory for VDom<H> {
    type Hook = H;
    type Node = VNode<H>;

    fn element(
        &self,
        tag_name: &str,
        properties: Properties<H>,
        children: Vec<VNode<H>>,
        key: Option<String>,
    ) -> VNode<H> {
        VNode::Element(VElement {
            tag_name: tag_name.to_string(),
            properties,
            children,
            key,
        })
    }

    fn text(&self, text: String) -> VNode<H> {
        VNode::Text(VText { text })
    }
}
