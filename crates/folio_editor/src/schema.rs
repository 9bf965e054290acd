//! Node schemas for stored article bodies.
//!
//! A schema says which HTML elements become a node and which attributes
//! survive the trip from HTML into the stored document and back. Variants
//! are built by composition: take a base schema and [`NodeSchema::extend`]
//! it with more attributes.

use scraper::node::Element;
use std::collections::BTreeMap;
use thiserror::Error;

pub type Attrs = BTreeMap<String, Option<String>>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    #[error("Unknown node type: {0}")]
    UnknownNodeType(String),

    #[error("Invalid selector for {node}: {message}")]
    InvalidSelector { node: String, message: String },
}

/// How an attribute is read from an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseRule {
    /// Never read from HTML; the default applies.
    Skip,
    /// Copied from the named HTML attribute.
    Attribute(&'static str),
}

/// How an attribute is written back out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderRule {
    Skip,
    /// Written to the named HTML attribute when set and non-empty.
    Attribute(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeSpec {
    pub default: Option<String>,
    pub parse_html: ParseRule,
    pub render_html: RenderRule,
}

impl AttributeSpec {
    /// An attribute mirrored one-to-one onto the HTML attribute `html_name`.
    pub fn html(html_name: &'static str) -> Self {
        Self {
            default: None,
            parse_html: ParseRule::Attribute(html_name),
            render_html: RenderRule::Attribute(html_name),
        }
    }

    pub fn parse(&self, element: &Element) -> Option<String> {
        let parsed = match self.parse_html {
            ParseRule::Skip => None,
            ParseRule::Attribute(name) => element.attr(name).map(str::to_string),
        };
        parsed.or_else(|| self.default.clone())
    }

    pub fn render(&self, value: Option<&str>) -> Option<(&'static str, String)> {
        match (&self.render_html, value) {
            (RenderRule::Attribute(name), Some(v)) if !v.is_empty() => Some((*name, v.to_string())),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeSchema {
    pub name: String,
    pub tag: String,
    /// CSS selector an element must match to be parsed as this node.
    pub selector: String,
    pub attributes: BTreeMap<String, AttributeSpec>,
}

impl NodeSchema {
    pub fn new(name: impl Into<String>, tag: impl Into<String>, selector: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tag: tag.into(),
            selector: selector.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Adds attributes on top of the ones already declared. A spec for an
    /// existing attribute replaces it.
    pub fn extend<I, K>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = (K, AttributeSpec)>,
        K: Into<String>,
    {
        self.attributes
            .extend(attributes.into_iter().map(|(k, spec)| (k.into(), spec)));
        self
    }

    pub fn parse_attrs(&self, element: &Element) -> Attrs {
        self.attributes
            .iter()
            .map(|(name, spec)| (name.clone(), spec.parse(element)))
            .collect()
    }

    /// HTML attributes to write for a node's attrs, in declaration order.
    pub fn render_attrs(&self, attrs: &Attrs) -> Vec<(&'static str, String)> {
        self.attributes
            .iter()
            .filter_map(|(name, spec)| {
                let value = attrs.get(name).and_then(|v| v.as_deref());
                spec.render(value)
            })
            .collect()
    }
}

/// A plain paragraph; it keeps no attributes.
pub fn paragraph() -> NodeSchema {
    NodeSchema::new("paragraph", "p", "p")
}

/// A paragraph that keeps its inline `style` (line height and the like).
pub fn styled_paragraph() -> NodeSchema {
    paragraph().extend([("style", AttributeSpec::html("style"))])
}

/// A block holding a chart, with the chart itself as JSON in `data-chart`.
pub fn chart_embed() -> NodeSchema {
    NodeSchema::new("chart", "div", "div[data-chart]")
        .extend([("chart", AttributeSpec::html("data-chart"))])
}

/// The set of node schemas an article body is parsed with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    nodes: Vec<NodeSchema>,
}

impl Schema {
    pub fn new(nodes: Vec<NodeSchema>) -> Self {
        Self { nodes }
    }

    pub fn article() -> Self {
        Self::new(vec![styled_paragraph(), chart_embed()])
    }

    pub fn nodes(&self) -> &[NodeSchema] {
        &self.nodes
    }

    pub fn node(&self, name: &str) -> Result<&NodeSchema, SchemaError> {
        self.nodes
            .iter()
            .find(|n| n.name == name)
            .ok_or_else(|| SchemaError::UnknownNodeType(name.to_string()))
    }
}

impl Default for Schema {
    fn default() -> Self {
        Self::article()
    }
}
