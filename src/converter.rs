//! Parsed markup tree → virtual tree.

use serde::Deserialize;

use crate::attributes::normalize_attributes;
use crate::entities;
use crate::error::{CallbackResult, ConvertError, ConvertResult};
use crate::node::{Element, Node};
use crate::vdom::{NodeFactory, Properties};

/// Derives a diffing key from an element's properties.
pub type GetKey<'a, H> = dyn Fn(&Properties<H>) -> CallbackResult<Option<String>> + 'a;

/// Derives extra properties (hooks) merged over an element's properties.
pub type GetHooks<'a, H> = dyn Fn(&Properties<H>) -> CallbackResult<Properties<H>> + 'a;

/// What to do with node kinds the converter does not handle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnhandledNodePolicy {
    /// Log a warning and leave the node out of the output.
    #[default]
    Skip,
    /// Fail with [`ConvertError::UnhandledNode`].
    Reject,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConvertOptions {
    pub unhandled: UnhandledNodePolicy,
    /// Deepest element nesting accepted; unbounded when `None`.
    pub max_depth: Option<usize>,
}

pub struct Converter<F> {
    factory: F,
    decode: Box<dyn Fn(&str) -> String>,
    options: ConvertOptions,
}

impl<F: NodeFactory + Default> Default for Converter<F> {
    fn default() -> Self {
        Self::new(F::default())
    }
}

impl<F: NodeFactory> Converter<F> {
    /// Converter using the built-in entity decoder and default options.
    pub fn new(factory: F) -> Self {
        Self {
            factory,
            decode: Box::new(|s: &str| entities::decode(s).into_owned()),
            options: ConvertOptions::default(),
        }
    }

    /// Replace the entity decoder applied to text and to decoded attributes.
    pub fn with_decoder(mut self, decode: impl Fn(&str) -> String + 'static) -> Self {
        self.decode = Box::new(decode);
        self
    }

    pub fn with_options(mut self, options: ConvertOptions) -> Self {
        self.options = options;
        self
    }

    /// Convert one node. Unhandled node kinds yield `Ok(None)` unless the
    /// converter rejects them.
    pub fn convert(
        &self,
        node: &Node,
        get_key: Option<&GetKey<'_, F::Hook>>,
        get_hooks: Option<&GetHooks<'_, F::Hook>>,
    ) -> ConvertResult<Option<F::Node>> {
        self.convert_at(node, get_key, get_hooks, 0)
    }

    /// Convert one element-like node.
    pub fn convert_tag(
        &self,
        tag: &Element,
        get_key: Option<&GetKey<'_, F::Hook>>,
        get_hooks: Option<&GetHooks<'_, F::Hook>>,
    ) -> ConvertResult<F::Node> {
        self.convert_tag_at(tag, get_key, get_hooks, 0)
    }

    /// Convert a list of roots, dropping the ones that produce no output.
    pub fn convert_all(
        &self,
        nodes: &[Node],
        get_key: Option<&GetKey<'_, F::Hook>>,
        get_hooks: Option<&GetHooks<'_, F::Hook>>,
    ) -> ConvertResult<Vec<F::Node>> {
        let converted = self.convert_children(nodes, get_key, get_hooks, 0)?;
        log::debug!("converted {} of {} root nodes", converted.len(), nodes.len());
        Ok(converted)
    }

    fn convert_at(
        &self,
        node: &Node,
        get_key: Option<&GetKey<'_, F::Hook>>,
        get_hooks: Option<&GetHooks<'_, F::Hook>>,
        depth: usize,
    ) -> ConvertResult<Option<F::Node>> {
        match node {
            Node::Element(tag) => self
                .convert_tag_at(tag, get_key, get_hooks, depth)
                .map(Some),
            Node::Text(text) => Ok(Some(self.factory.text((self.decode)(&text.data)))),
            Node::Unknown(unknown) => match self.options.unhandled {
                UnhandledNodePolicy::Skip => {
                    log::warn!("unhandled node type '{}'", unknown.kind);
                    Ok(None)
                }
                UnhandledNodePolicy::Reject => Err(ConvertError::UnhandledNode {
                    kind: unknown.kind.clone(),
                }),
            },
        }
    }

    fn convert_tag_at(
        &self,
        tag: &Element,
        get_key: Option<&GetKey<'_, F::Hook>>,
        get_hooks: Option<&GetHooks<'_, F::Hook>>,
        depth: usize,
    ) -> ConvertResult<F::Node> {
        if let Some(max_depth) = self.options.max_depth {
            if depth > max_depth {
                return Err(ConvertError::MaxNestingDepthExceeded { max_depth });
            }
        }

        let mut properties = normalize_attributes(tag.attribs.as_ref(), self.decode.as_ref());

        let key = match get_key {
            Some(get_key) => get_key(&properties).map_err(|source| ConvertError::KeyCallback {
                tag: tag.name.clone(),
                source,
            })?,
            None => None,
        };

        if let Some(get_hooks) = get_hooks {
            let hooks = get_hooks(&properties).map_err(|source| ConvertError::HooksCallback {
                tag: tag.name.clone(),
                source,
            })?;
            properties.extend(hooks);
        }

        let children = self.convert_children(tag.children(), get_key, get_hooks, depth + 1)?;

        Ok(self.factory.element(&tag.name, properties, children, key))
    }

    fn convert_children(
        &self,
        nodes: &[Node],
        get_key: Option<&GetKey<'_, F::Hook>>,
        get_hooks: Option<&GetHooks<'_, F::Hook>>,
        depth: usize,
    ) -> ConvertResult<Vec<F::Node>> {
        let mut result = Vec::with_capacity(nodes.len());
        for node in nodes {
            if let Some(converted) = self.convert_at(node, get_key, get_hooks, depth)? {
                result.push(converted);
            }
        }
        Ok(result)
    }
}
