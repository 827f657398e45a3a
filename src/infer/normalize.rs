use super::columns::{ColumnRole, ColumnRoles};
use super::parsing::{NumericFormat, parse_numeric_text};
use crate::datamodel::{CellValue, Dataset};

/// Coerces a numeric-looking cell, anything else passes through untouched.
pub fn normalize_cell(cell: &CellValue, format: &NumericFormat) -> CellValue {
    match cell {
        CellValue::Text(text) => match parse_numeric_text(text, format) {
            Some(value) => CellValue::Number(value),
            None => cell.clone(),
        },
        _ => cell.clone(),
    }
}

/// Returns a copy of the dataset where every cell of every numeric
/// column, not only the sampled ones, has been coerced.
pub fn normalize_dataset(dataset: &Dataset, roles: &ColumnRoles, format: &NumericFormat) -> Dataset {
    let numeric_columns = dataset
        .column_names()
        .iter()
        .map(|name| roles.role_of(name) == Some(ColumnRole::Numeric))
        .collect::<Vec<_>>();

    dataset.map_cells(|index, cell| {
        if numeric_columns[index] {
            normalize_cell(cell, format)
        } else {
            cell.clone()
        }
    })
}
