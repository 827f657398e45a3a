use super::datetime::is_date;
use super::parsing::{NumericFormat, is_numeric};
use crate::datamodel::{CellValue, Dataset};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnRole {
    Numeric,
    Date,
    Categorical,
}

/// The role of every column, in dataset order.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnRoles {
    columns: Vec<(String, ColumnRole)>,
}

impl ColumnRoles {
    pub fn new(columns: Vec<(String, ColumnRole)>) -> Self {
        Self { columns }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, ColumnRole)> {
        self.columns.iter().map(|(name, role)| (name.as_str(), *role))
    }

    pub fn role_of(&self, name: &str) -> Option<ColumnRole> {
        self.iter()
            .find(|(column, _)| *column == name)
            .map(|(_, role)| role)
    }

    /// Column names holding `role`, in the order they were classified.
    pub fn with_role(&self, role: ColumnRole) -> Vec<&str> {
        self.iter()
            .filter(|(_, column_role)| *column_role == role)
            .map(|(name, _)| name)
            .collect()
    }

    pub fn numeric(&self) -> Vec<&str> {
        self.with_role(ColumnRole::Numeric)
    }

    pub fn categorical(&self) -> Vec<&str> {
        self.with_role(ColumnRole::Categorical)
    }

    pub fn dates(&self) -> Vec<&str> {
        self.with_role(ColumnRole::Date)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Classifies a column from a sample of its values.
///
/// Missing cells are ignored. A sample without any present value is
/// categorical, it never becomes numeric vacuously.
pub fn classify_values<'a, I>(sample: I, format: &NumericFormat) -> ColumnRole
where
    I: IntoIterator<Item = &'a CellValue>,
{
    let present = sample
        .into_iter()
        .filter(|cell| !cell.is_missing())
        .collect::<Vec<_>>();

    if present.is_empty() {
        return ColumnRole::Categorical;
    }

    // Numeric first, a date parser could accept small integers
    if present.iter().all(|cell| is_numeric(cell, format)) {
        return ColumnRole::Numeric;
    }
    if present.iter().all(|cell| is_date(cell)) {
        return ColumnRole::Date;
    }
    ColumnRole::Categorical
}

/// Looks at the first `sample_size` rows only, whatever the dataset size.
pub fn classify_column(
    dataset: &Dataset,
    index: usize,
    sample_size: usize,
    format: &NumericFormat,
) -> ColumnRole {
    classify_values(dataset.column(index).take(sample_size), format)
}

pub fn classify_columns(dataset: &Dataset, sample_size: usize, format: &NumericFormat) -> ColumnRoles {
    let columns = dataset
        .column_names()
        .iter()
        .enumerate()
        .map(|(index, name)| {
            let role = classify_column(dataset, index, sample_size, format);
            tracing::debug!(column = %name, ?role, "Classified column");
            (name.clone(), role)
        })
        .collect();
    ColumnRoles::new(columns)
}
