use thiserror::Error;

/// Failures of a single analysis call.
///
/// Degenerate arithmetic (zero growth base, zero totals) is not an error:
/// the affected insight is left out instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// The source contains zero usable rows after parsing
    #[error("No data found")]
    NoData,

    /// The underlying parser rejected the input
    #[error("Parse error: {0}")]
    Parse(String),

    /// Rows and header disagree, or column names collide
    #[error("Invalid dataset: {0}")]
    InvalidDataset(String),

    #[error("Unsupported input format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl From<csv_async::Error> for AnalysisError {
    fn from(err: csv_async::Error) -> Self {
        AnalysisError::Parse(err.to_string())
    }
}
