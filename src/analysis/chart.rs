use crate::datamodel::Record;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Area,
    Bar,
    Pie,
    /// Reserved, no strategy emits it yet
    Line,
}

/// One point of a derived chart dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ChartDatum {
    /// Aggregated category, read through the `name` / `value` keys
    Category { name: String, value: f64 },
    /// Projected row, read through the column names
    Row(Record),
}

/// A chart-ready dataset with its rendering metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSpec {
    pub id: String,
    #[serde(rename = "type")]
    pub chart_type: ChartType,
    pub title: String,
    pub description: String,
    pub data_key_x: String,
    pub data_key_y: String,
    pub data: Vec<ChartDatum>,
}

pub const CATEGORY_KEY: &str = "name";
pub const VALUE_KEY: &str = "value";
