use super::cell::CellValue;
use crate::error::AnalysisError;
use std::collections::HashSet;

/// Column names plus rows of cells, every row as wide as the header.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    column_names: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl Dataset {
    pub fn new(column_names: Vec<String>, rows: Vec<Vec<CellValue>>) -> Result<Self, AnalysisError> {
        let mut seen = HashSet::with_capacity(column_names.len());
        if let Some(duplicate) = column_names.iter().find(|name| !seen.insert(name.as_str())) {
            return Err(AnalysisError::InvalidDataset(format!(
                "Duplicate column name: {}",
                duplicate
            )));
        }

        // Check that all rows have the same length
        let row_length = column_names.len();
        if let Some(index) = rows.iter().position(|row| row.len() != row_length) {
            return Err(AnalysisError::InvalidDataset(format!(
                "Row {} has {} cells, expected {}",
                index + 1,
                rows[index].len(),
                row_length
            )));
        }
        Ok(Self { column_names, rows })
    }

    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.column_names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.column_names.iter().position(|column| column == name)
    }

    /// Every cell of a column, top to bottom.
    pub fn column(&self, index: usize) -> impl Iterator<Item = &CellValue> + '_ {
        self.rows.iter().map(move |row| &row[index])
    }

    /// Builds a new dataset of the same shape, every cell passed through
    /// `transform` together with its column index.
    pub fn map_cells<F>(&self, transform: F) -> Dataset
    where
        F: Fn(usize, &CellValue) -> CellValue,
    {
        let rows = self
            .rows
            .iter()
            .map(|row| {
                row.iter()
                    .enumerate()
                    .map(|(index, cell)| transform(index, cell))
                    .collect()
            })
            .collect();
        Dataset {
            column_names: self.column_names.clone(),
            rows,
        }
    }
}
