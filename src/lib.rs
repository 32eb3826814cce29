//! # markup-vdom
//!
//! Converts a parsed markup tree (tag and text nodes from an HTML parser)
//! into a virtual-DOM tree ready for diffing and rendering.
//!
//! ## Features
//! - `class`/`for`/`tabindex` renamed to their DOM property names
//! - `data-*` attributes collected into a camelCased `dataset`
//! - inline `style` parsed into a property map
//! - entity decoding of text and of `title`, `alt` and `placeholder`
//! - caller-supplied key and hook derivation per element
//!
//! ## Example
//! ```ignore
//! use markup_vdom::{Converter, Element, GetKey, Node, PropValue, VDom};
//!
//! let tree: Node = Element::new("li")
//!     .with_attr("id", "item-1")
//!     .with_attr("class", "todo done")
//!     .with_child(Node::text("Buy milk &amp; eggs"))
//!     .into();
//!
//! let get_key: &GetKey<'_, ()> = &|props| {
//!     Ok(props.get("id").and_then(PropValue::as_str).map(str::to_string))
//! };
//!
//! let converter: Converter<VDom<()>> = Converter::default();
//! let vnode = converter.convert(&tree, Some(get_key), None)?;
//! ```

pub mod attributes;
pub mod converter;
pub mod dataset;
pub mod entities;
pub mod error;
pub mod node;
pub mod style;
pub mod vdom;

// --- Core types ---
pub use converter::{ConvertOptions, Converter, GetHooks, GetKey, UnhandledNodePolicy};
pub use error::{CallbackError, CallbackResult, ConvertError, ConvertResult};
pub use node::{Attributes, Element, ElementKind, Node};
pub use vdom::{NodeFactory, PropValue, Properties, StringMap, VDom, VElement, VNode, VText};

/// Convert a single node into a [`VNode`] with the default decoder and
/// options, without key or hook callbacks.
pub fn to_vdom<H>(node: &Node) -> ConvertResult<Option<VNode<H>>> {
    Converter::new(VDom::new()).convert(node, None, None)
}

/// Load a JSON parser dump and convert every root.
pub fn json_to_vdom<H>(json: &str, options: ConvertOptions) -> ConvertResult<Vec<VNode<H>>> {
    let roots = node::from_json_str(json)?;
    Converter::new(VDom::new())
        .with_options(options)
        .convert_all(&roots, None, None)
}
