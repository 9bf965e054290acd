pub mod chart;
pub mod document;
pub mod render;
pub mod schema;

pub use chart::{ChartEditor, ChartError, ChartPayload, ChartType, DataPoint};
pub use document::{Document, Node};
pub use render::{plan, RenderPlan, Theme};
pub use schema::{chart_embed, paragraph, styled_paragraph, NodeSchema, Schema, SchemaError};
