use super::TabularParser;
use crate::{
    datamodel::{CellValue, Dataset},
    error::AnalysisError,
    infer::parsing::parse_number_literal,
};
use async_trait::async_trait;
use csv_async::{AsyncReader, AsyncReaderBuilder};
use futures::{StreamExt, io};
use std::collections::HashSet;
use tracing::debug;

/// Delimited text with a header row.
#[derive(Debug, Clone)]
pub struct CsvParser {
    delimiter: u8,
}

impl CsvParser {
    pub fn new(delimiter: u8) -> Self {
        Self { delimiter }
    }

    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }

    pub fn create_reader<R: io::AsyncRead + Unpin + Send>(&self, reader: R) -> AsyncReader<R> {
        AsyncReaderBuilder::new()
            .has_headers(true)
            .delimiter(self.delimiter)
            // Short and long rows are repaired in read_dataset
            .flexible(true)
            .create_reader(reader)
    }
}

impl Default for CsvParser {
    fn default() -> Self {
        Self::new(b',')
    }
}

#[async_trait]
impl TabularParser for CsvParser {
    async fn parse(&self, data: &[u8]) -> Result<Dataset, AnalysisError> {
        read_dataset(self.create_reader(data)).await
    }
}

/// Types a raw field: empty is missing, a bare numeric literal is a number.
pub fn type_field(field: &str) -> CellValue {
    if field.trim().is_empty() {
        return CellValue::Missing;
    }
    match parse_number_literal(field) {
        Some(value) => CellValue::Number(value),
        None => CellValue::Text(field.to_string()),
    }
}

/// Empty header names get a positional name, repeated names a `_n` suffix.
pub fn deduplicate_column_names<'a, I>(headers: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    let mut names = Vec::new();
    for (index, header) in headers.into_iter().enumerate() {
        let base = if header.trim().is_empty() {
            format!("column_{}", index + 1)
        } else {
            header.to_string()
        };
        let mut name = base.clone();
        let mut suffix = 1;
        while seen.contains(&name) {
            name = format!("{}_{}", base, suffix);
            suffix += 1;
        }
        seen.insert(name.clone());
        names.push(name);
    }
    names
}

/// Reads the whole input into a dataset.
///
/// Blank records are skipped, short records are padded with missing
/// cells and extra fields are dropped.
pub async fn read_dataset<R: io::AsyncRead + Unpin + Send>(
    mut csv_reader: AsyncReader<R>,
) -> Result<Dataset, AnalysisError> {
    let headers = csv_reader.headers().await?.clone();
    let column_names = deduplicate_column_names(headers.iter());
    let width = column_names.len();

    let mut rows = Vec::new();
    let mut skipped = 0_usize;
    let mut records = csv_reader.records();

    while let Some(record) = records.next().await {
        let record = record?;
        if record.iter().all(|field| field.trim().is_empty()) {
            skipped += 1;
            continue;
        }
        let mut row = record.iter().take(width).map(type_field).collect::<Vec<_>>();
        row.resize(width, CellValue::Missing);
        rows.push(row);
    }

    debug!(
        columns = width,
        rows = rows.len(),
        skipped,
        "Parsed delimited input"
    );

    Dataset::new(column_names, rows)
}
