use super::chart::ChartSpec;
use super::insight::Insight;
use super::options::AnalysisOptions;
use super::planner::{PlanContext, Planner};
use super::selection::selector_for;
use super::summary::DatasetSummary;
use crate::datamodel::Dataset;
use crate::error::AnalysisError;
use crate::importers::TabularParser;
use crate::infer::columns::classify_columns;
use crate::infer::normalize::normalize_dataset;
use serde::Serialize;
use std::fmt::Write;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub summary: DatasetSummary,
    pub charts: Vec<ChartSpec>,
    pub insights: Vec<Insight>,
}

impl AnalysisResult {
    /// Human readable report, insights with Markdown emphasis.
    pub fn to_markdown(&self) -> String {
        let summary = &self.summary;
        let list = |names: &[String]| {
            if names.is_empty() {
                "none".to_string()
            } else {
                names.join(", ")
            }
        };

        let mut output = String::new();
        // Writing to a String cannot fail.
        let _ = writeln!(output, "# Dataset summary\n");
        let _ = writeln!(output, "- Rows: {}", summary.total_rows);
        let _ = writeln!(output, "- Columns: {}", summary.total_columns);
        let _ = writeln!(output, "- Numeric: {}", list(&summary.numeric_columns));
        let _ = writeln!(output, "- Categorical: {}", list(&summary.categorical_columns));
        let _ = writeln!(output, "- Dates: {}", list(&summary.date_columns));

        if !self.charts.is_empty() {
            let _ = writeln!(output, "\n# Charts\n");
            for chart in &self.charts {
                let _ = writeln!(
                    output,
                    "- {} ({}, {} points): {}",
                    chart.title,
                    chart.id,
                    chart.data.len(),
                    chart.description
                );
            }
        }

        if !self.insights.is_empty() {
            let _ = writeln!(output, "\n# Insights\n");
            for insight in &self.insights {
                let _ = writeln!(output, "- {}", insight.to_markdown());
            }
        }
        output
    }
}

/// Classifies, normalizes and plans charts and insights for a dataset.
pub fn analyze(dataset: &Dataset, options: &AnalysisOptions) -> Result<AnalysisResult, AnalysisError> {
    options.validate()?;
    if dataset.is_empty() {
        return Err(AnalysisError::NoData);
    }

    let roles = classify_columns(dataset, options.sample_size, &options.numeric_format);
    let summary = DatasetSummary::new(dataset, &roles);
    let normalized = normalize_dataset(dataset, &roles, &options.numeric_format);

    let selector = selector_for(options.selection);
    let context = PlanContext {
        dataset: &normalized,
        roles: &roles,
        selector: &*selector,
        options,
    };
    let plan = Planner::default().plan(&context);

    tracing::debug!(
        rows = summary.total_rows,
        columns = summary.total_columns,
        charts = plan.charts.len(),
        insights = plan.insights.len(),
        "Analysis complete"
    );

    Ok(AnalysisResult {
        summary,
        charts: plan.charts,
        insights: plan.insights,
    })
}

/// Parses `data` with `parser` then analyzes the resulting dataset.
pub async fn analyze_bytes(
    parser: &dyn TabularParser,
    data: &[u8],
    options: &AnalysisOptions,
) -> Result<AnalysisResult, AnalysisError> {
    let dataset = parser.parse(data).await?;
    analyze(&dataset, options)
}
