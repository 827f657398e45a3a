use crate::{datamodel::Dataset, error::AnalysisError};
use async_trait::async_trait;

pub mod csv;

/// Turns raw bytes into a dataset. Parsing is the only await point of an
/// analysis: it either yields a dataset or a parse error.
#[async_trait]
pub trait TabularParser: Send + Sync {
    async fn parse(&self, data: &[u8]) -> Result<Dataset, AnalysisError>;
}

pub fn get_parser_from_name(name: &str) -> Result<Box<dyn TabularParser>, AnalysisError> {
    match name.to_ascii_lowercase().as_str() {
        "csv" => Ok(Box::new(csv::CsvParser::new(b','))),
        "tsv" => Ok(Box::new(csv::CsvParser::new(b'\t'))),
        "ssv" | "semicolon" => Ok(Box::new(csv::CsvParser::new(b';'))),
        _ => Err(AnalysisError::UnsupportedFormat(name.to_string())),
    }
}
