use crate::chart::ChartPayload;
use crate::schema::{Attrs, Schema, SchemaError};
use folio_core::html::escape_html;
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};

/// A block of an article body.
///
/// `content` is the element's inner HTML, kept as-is; inline formatting is
/// not modelled here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(default)]
    pub attrs: Attrs,
    #[serde(default)]
    pub content: String,
}

impl Node {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).and_then(|v| v.as_deref())
    }

    /// The chart held by a `chart` node, if it parses.
    pub fn chart(&self) -> Option<ChartPayload> {
        if self.node_type != "chart" {
            return None;
        }
        let raw = self.attr("chart")?;
        match ChartPayload::from_json(raw) {
            Ok(chart) => Some(chart),
            Err(e) => {
                tracing::warn!("Ignoring malformed chart block: {}", e);
                None
            }
        }
    }
}

/// An article body in its stored form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    #[serde(rename = "content", default)]
    pub nodes: Vec<Node>,
}

impl Document {
    /// Parses the top-level elements of an HTML fragment. Elements no node
    /// schema matches are dropped.
    pub fn from_html(schema: &Schema, html: &str) -> Result<Self, SchemaError> {
        let selectors = schema
            .nodes()
            .iter()
            .map(|node| {
                Selector::parse(&node.selector)
                    .map(|selector| (node, selector))
                    .map_err(|e| SchemaError::InvalidSelector {
                        node: node.name.clone(),
                        message: e.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let fragment = Html::parse_fragment(html);
        let mut nodes = Vec::new();
        for element in fragment.root_element().children().filter_map(ElementRef::wrap) {
            match selectors.iter().find(|(_, selector)| selector.matches(&element)) {
                Some((node, _)) => nodes.push(Node {
                    node_type: node.name.clone(),
                    attrs: node.parse_attrs(element.value()),
                    content: element.inner_html(),
                }),
                None => tracing::debug!("Dropping unsupported <{}> block", element.value().name()),
            }
        }
        Ok(Self { nodes })
    }

    pub fn to_html(&self, schema: &Schema) -> Result<String, SchemaError> {
        let mut out = String::new();
        for node in &self.nodes {
            let spec = schema.node(&node.node_type)?;
            out.push('<');
            out.push_str(&spec.tag);
            for (name, value) in spec.render_attrs(&node.attrs) {
                out.push_str(&format!(" {}=\"{}\"", name, escape_html(&value)));
            }
            out.push('>');
            out.push_str(&node.content);
            out.push_str(&format!("</{}>", spec.tag));
        }
        Ok(out)
    }

    pub fn push_chart(&mut self, chart: &ChartPayload) -> serde_json::Result<()> {
        let mut attrs = Attrs::new();
        attrs.insert("chart".to_string(), Some(chart.to_json()?));
        self.nodes.push(Node {
            node_type: "chart".to_string(),
            attrs,
            content: String::new(),
        });
        Ok(())
    }

    pub fn charts(&self) -> Vec<ChartPayload> {
        self.nodes.iter().filter_map(Node::chart).collect()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }
}
