use crate::error::AnalysisError;
use crate::infer::parsing::NumericFormat;
use std::str::FromStr;

/// How strategies pick their columns among those of the right role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionPolicy {
    /// Columns in the order they were classified
    #[default]
    First,
    /// Numeric columns with the largest spread first
    HighestVariance,
}

impl FromStr for SelectionPolicy {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "first" => Ok(SelectionPolicy::First),
            "variance" | "highest_variance" => Ok(SelectionPolicy::HighestVariance),
            other => Err(AnalysisError::InvalidConfiguration(format!(
                "Unknown selection policy: {}",
                other
            ))),
        }
    }
}

/// Every tunable of one analysis call.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisOptions {
    /// Rows inspected per column by the classifier
    pub sample_size: usize,
    pub numeric_format: NumericFormat,
    pub max_insights: usize,
    /// Categories kept by the bar chart
    pub comparison_top_n: usize,
    /// Categories kept by the pie chart
    pub distribution_top_n: usize,
    pub selection: SelectionPolicy,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            sample_size: 5,
            numeric_format: NumericFormat::default(),
            max_insights: 7,
            comparison_top_n: 5,
            distribution_top_n: 6,
            selection: SelectionPolicy::First,
        }
    }
}

impl AnalysisOptions {
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.sample_size == 0 {
            return Err(AnalysisError::InvalidConfiguration(
                "Sample size must be at least 1".to_string(),
            ));
        }
        if self.comparison_top_n == 0 || self.distribution_top_n == 0 {
            return Err(AnalysisError::InvalidConfiguration(
                "Chart category limits must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
