//! How an embedded chart is drawn: colours per theme and per series point.

use crate::chart::{ChartPayload, ChartType};
use serde::Serialize;

pub const PALETTE: [&str; 6] = ["#0088FE", "#00C49F", "#FFBB28", "#FF8042", "#8884d8", "#82ca9d"];

pub const NO_DATA: &str = "No data for chart";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeColors {
    pub grid: &'static str,
    pub axis: &'static str,
    pub tooltip_background: &'static str,
    pub tooltip_border: &'static str,
    pub tooltip_text: &'static str,
    pub legend: &'static str,
}

impl Theme {
    pub fn colors(&self) -> ThemeColors {
        match self {
            Theme::Light => ThemeColors {
                grid: "#e5e7eb",
                axis: "#6b7280",
                tooltip_background: "#ffffff",
                tooltip_border: "#e5e7eb",
                tooltip_text: "#1f2937",
                legend: "#374151",
            },
            Theme::Dark => ThemeColors {
                grid: "#374151",
                axis: "#9ca3af",
                tooltip_background: "#1f2937",
                tooltip_border: "#374151",
                tooltip_text: "#f3f4f6",
                legend: "#d1d5db",
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub label: String,
    pub value: f64,
    pub color: String,
    /// Only pie slices carry a label, e.g. `"Equity 60%"`.
    pub slice_label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPlan {
    pub title: Option<String>,
    pub chart_type: ChartType,
    pub colors: ThemeColors,
    pub points: Vec<SeriesPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RenderPlan {
    Empty { message: &'static str },
    Chart(ChartPlan),
}

/// Lays out a chart using [`PALETTE`].
pub fn plan(payload: &ChartPayload, theme: Theme) -> RenderPlan {
    plan_with_palette(payload, theme, &PALETTE)
}

/// Bar, line and area series use the first colour; pie slices cycle
/// through the palette.
pub fn plan_with_palette(payload: &ChartPayload, theme: Theme, palette: &[&str]) -> RenderPlan {
    if payload.data.is_empty() || palette.is_empty() {
        return RenderPlan::Empty { message: NO_DATA };
    }

    let total: f64 = payload.data.iter().map(|p| p.value).sum();
    let points = payload
        .data
        .iter()
        .enumerate()
        .map(|(i, point)| {
            let is_pie = payload.chart_type == ChartType::Pie;
            let color = if is_pie { palette[i % palette.len()] } else { palette[0] };
            SeriesPoint {
                label: point.name.clone(),
                value: point.value,
                color: color.to_string(),
                slice_label: is_pie.then(|| slice_label(&point.name, point.value, total)),
            }
        })
        .collect();

    RenderPlan::Chart(ChartPlan {
        title: Some(payload.title.clone()).filter(|t| !t.is_empty()),
        chart_type: payload.chart_type,
        colors: theme.colors(),
        points,
    })
}

fn slice_label(name: &str, value: f64, total: f64) -> String {
    let percent = if total == 0.0 { 0.0 } else { value / total * 100.0 };
    format!("{} {}%", name, percent.round() as i64)
}
