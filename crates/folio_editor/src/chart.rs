use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    #[default]
    Bar,
    Line,
    Area,
    Pie,
}

impl ChartType {
    pub const ALL: [ChartType; 4] = [ChartType::Bar, ChartType::Line, ChartType::Area, ChartType::Pie];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChartType::Bar => "bar",
            ChartType::Line => "line",
            ChartType::Area => "area",
            ChartType::Pie => "pie",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ChartType::Bar => "Bar Chart",
            ChartType::Line => "Line Chart",
            ChartType::Area => "Area Chart",
            ChartType::Pie => "Pie Chart",
        }
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartType {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChartType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ChartError::UnknownType(s.to_string()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub name: String,
    pub value: f64,
}

impl DataPoint {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    pub fn blank() -> Self {
        Self::default()
    }

    fn has_label(&self) -> bool {
        !self.name.trim().is_empty()
    }
}

/// A chart as stored in an article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPayload {
    pub title: String,
    #[serde(rename = "type")]
    pub chart_type: ChartType,
    pub data: Vec<DataPoint>,
}

impl ChartPayload {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChartError {
    #[error("Please enter a chart title")]
    MissingTitle,

    #[error("Please add at least one data point with a name")]
    NoDataPoints,

    #[error("No data point at row {0}")]
    NoSuchRow(usize),

    #[error("Unsupported chart type: {0}")]
    UnknownType(String),
}

impl From<ChartError> for folio_core::Error {
    fn from(e: ChartError) -> Self {
        folio_core::Error::Validation(e.to_string())
    }
}

/// Parses a number typed into a value cell; anything that is not a finite
/// number counts as 0.
pub fn parse_value(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// State of the "Configure Chart" dialog.
///
/// The row list is never empty: removing the last row leaves a blank one.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartEditor {
    title: String,
    chart_type: ChartType,
    points: Vec<DataPoint>,
    open: bool,
}

impl Default for ChartEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl ChartEditor {
    pub fn new() -> Self {
        Self {
            title: String::new(),
            chart_type: ChartType::default(),
            points: vec![DataPoint::blank()],
            open: true,
        }
    }

    /// Opens the editor on an existing chart.
    pub fn edit(initial: ChartPayload) -> Self {
        let points = if initial.data.is_empty() {
            vec![DataPoint::blank()]
        } else {
            initial.data
        };
        Self {
            title: initial.title,
            chart_type: initial.chart_type,
            points,
            open: true,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn chart_type(&self) -> ChartType {
        self.chart_type
    }

    pub fn set_chart_type(&mut self, chart_type: ChartType) {
        self.chart_type = chart_type;
    }

    pub fn points(&self) -> &[DataPoint] {
        &self.points
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn add_point(&mut self) {
        self.points.push(DataPoint::blank());
    }

    /// Removes a row; an index past the end changes nothing.
    pub fn remove_point(&mut self, index: usize) {
        if index < self.points.len() {
            self.points.remove(index);
        }
        if self.points.is_empty() {
            self.points.push(DataPoint::blank());
        }
    }

    pub fn set_label(&mut self, index: usize, label: impl Into<String>) -> Result<(), ChartError> {
        let point = self.points.get_mut(index).ok_or(ChartError::NoSuchRow(index))?;
        point.name = label.into();
        Ok(())
    }

    pub fn set_value(&mut self, index: usize, raw: &str) -> Result<(), ChartError> {
        let point = self.points.get_mut(index).ok_or(ChartError::NoSuchRow(index))?;
        point.value = parse_value(raw);
        Ok(())
    }

    /// The chart that saving would produce right now.
    pub fn payload(&self) -> Result<ChartPayload, ChartError> {
        if self.title.trim().is_empty() {
            return Err(ChartError::MissingTitle);
        }
        let data: Vec<DataPoint> = self.points.iter().filter(|p| p.has_label()).cloned().collect();
        if data.is_empty() {
            return Err(ChartError::NoDataPoints);
        }
        Ok(ChartPayload {
            title: self.title.clone(),
            chart_type: self.chart_type,
            data,
        })
    }

    /// Validates and hands the chart to `on_save`, then closes the editor.
    ///
    /// On a validation error `on_save` is not called and the editor stays open.
    pub fn save<F>(&mut self, on_save: F) -> Result<(), ChartError>
    where
        F: FnOnce(ChartPayload),
    {
        let payload = self.payload()?;
        on_save(payload);
        self.open = false;
        Ok(())
    }

    pub fn cancel(&mut self) {
        self.open = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_editor_has_one_blank_row() {
        let editor = ChartEditor::new();
        assert_eq!(editor.points(), &[DataPoint::blank()]);
        assert_eq!(editor.chart_type(), ChartType::Bar);
        assert!(editor.is_open());
    }

    #[test]
    fn test_removing_only_row_reseeds_blank() {
        let mut editor = ChartEditor::new();
        editor.set_label(0, "Jan").unwrap();
        editor.set_value(0, "12").unwrap();

        editor.remove_point(0);
        assert_eq!(editor.points(), &[DataPoint::blank()]);

        editor.remove_point(7);
        assert_eq!(editor.points().len(), 1);
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut editor = ChartEditor::new();
        editor.add_point();
        editor.add_point();
        for (i, label) in ["a", "b", "c"].iter().enumerate() {
            editor.set_label(i, *label).unwrap();
        }
        editor.remove_point(1);
        let names: Vec<&str> = editor.points().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["a", "c"]);
    }

    #[test]
    fn test_empty_title_never_calls_save() {
        let mut editor = ChartEditor::new();
        editor.set_label(0, "Q1").unwrap();
        editor.set_title("   ");

        let mut called = false;
        let result = editor.save(|_| called = true);

        assert_eq!(result, Err(ChartError::MissingTitle));
        assert_eq!(result.unwrap_err().to_string(), "Please enter a chart title");
        assert!(!called);
        assert!(editor.is_open());
    }

    #[test]
    fn test_unlabelled_rows_are_rejected() {
        let mut editor = ChartEditor::new();
        editor.set_title("Market share");
        editor.set_value(0, "40").unwrap();

        let mut called = false;
        assert_eq!(editor.save(|_| called = true), Err(ChartError::NoDataPoints));
        assert!(!called);
    }

    #[test]
    fn test_save_filters_blank_rows_and_closes() {
        let mut editor = ChartEditor::new();
        editor.set_title("Market Share 2024");
        editor.set_chart_type(ChartType::Pie);
        editor.set_label(0, "Equity").unwrap();
        editor.set_value(0, "60").unwrap();
        editor.add_point();
        editor.add_point();
        editor.set_label(2, "Debt").unwrap();
        editor.set_value(2, "not a number").unwrap();

        let mut saved = None;
        editor.save(|payload| saved = Some(payload)).unwrap();

        let saved = saved.unwrap();
        assert_eq!(saved.chart_type, ChartType::Pie);
        assert_eq!(saved.data, vec![DataPoint::new("Equity", 60.0), DataPoint::new("Debt", 0.0)]);
        assert!(!editor.is_open());
    }

    #[test]
    fn test_row_index_out_of_range() {
        let mut editor = ChartEditor::new();
        assert_eq!(editor.set_label(3, "x"), Err(ChartError::NoSuchRow(3)));
    }

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value("42.5"), 42.5);
        assert_eq!(parse_value(" 7 "), 7.0);
        assert_eq!(parse_value(""), 0.0);
        assert_eq!(parse_value("abc"), 0.0);
        assert_eq!(parse_value("NaN"), 0.0);
    }

    #[test]
    fn test_payload_json_shape() {
        let payload = ChartPayload {
            title: "Revenue".to_string(),
            chart_type: ChartType::Line,
            data: vec![DataPoint::new("Jan", 1.5)],
        };
        let json = payload.to_json().unwrap();
        assert_eq!(json, r#"{"title":"Revenue","type":"line","data":[{"name":"Jan","value":1.5}]}"#);
        assert_eq!(ChartPayload::from_json(&json).unwrap(), payload);
    }

    #[test]
    fn test_chart_type_from_str() {
        assert_eq!("Area".parse::<ChartType>().unwrap(), ChartType::Area);
        assert!("radar".parse::<ChartType>().is_err());
    }
}
