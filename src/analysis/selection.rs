use super::options::SelectionPolicy;
use crate::datamodel::Dataset;
use crate::infer::columns::ColumnRoles;

/// Decides which column of a role a strategy works on.
///
/// Only `numeric_columns` has to be provided, the other picks default to
/// classification order.
pub trait ColumnSelector: Send + Sync {
    /// Numeric columns, most relevant first.
    fn numeric_columns<'a>(&self, dataset: &Dataset, roles: &'a ColumnRoles) -> Vec<&'a str>;

    fn primary_numeric<'a>(&self, dataset: &Dataset, roles: &'a ColumnRoles) -> Option<&'a str> {
        self.numeric_columns(dataset, roles).first().copied()
    }

    fn secondary_numeric<'a>(&self, dataset: &Dataset, roles: &'a ColumnRoles) -> Option<&'a str> {
        self.numeric_columns(dataset, roles).get(1).copied()
    }

    fn primary_categorical<'a>(&self, _dataset: &Dataset, roles: &'a ColumnRoles) -> Option<&'a str> {
        roles.categorical().first().copied()
    }

    fn primary_date<'a>(&self, _dataset: &Dataset, roles: &'a ColumnRoles) -> Option<&'a str> {
        roles.dates().first().copied()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FirstColumnSelector;

impl ColumnSelector for FirstColumnSelector {
    fn numeric_columns<'a>(&self, _dataset: &Dataset, roles: &'a ColumnRoles) -> Vec<&'a str> {
        roles.numeric()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HighestVarianceSelector;

/// Population variance of the numeric cells, 0 without any.
pub fn column_variance(dataset: &Dataset, index: usize) -> f64 {
    let values = dataset
        .column(index)
        .filter_map(|cell| cell.as_number())
        .collect::<Vec<_>>();
    if values.is_empty() {
        return 0.0;
    }
    let count = values.len() as f64;
    let mean = values.iter().sum::<f64>() / count;
    let variance = values.iter().map(|value| (value - mean).powi(2)).sum::<f64>() / count;
    if variance.is_finite() { variance } else { 0.0 }
}

impl ColumnSelector for HighestVarianceSelector {
    fn numeric_columns<'a>(&self, dataset: &Dataset, roles: &'a ColumnRoles) -> Vec<&'a str> {
        let mut ranked = roles
            .numeric()
            .into_iter()
            .map(|name| {
                let variance = dataset
                    .column_index(name)
                    .map(|index| column_variance(dataset, index))
                    .unwrap_or(0.0);
                (name, variance)
            })
            .collect::<Vec<_>>();
        // stable, ties keep classification order
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked.into_iter().map(|(name, _)| name).collect()
    }
}

pub fn selector_for(policy: SelectionPolicy) -> Box<dyn ColumnSelector> {
    match policy {
        SelectionPolicy::First => Box::new(FirstColumnSelector),
        SelectionPolicy::HighestVariance => Box::new(HighestVarianceSelector),
    }
}
