use super::aggregate::{CategoryTotal, grand_total, group_sum, top_n};
use super::chart::{CATEGORY_KEY, ChartDatum, ChartSpec, ChartType, VALUE_KEY};
use super::format::{format_fixed, format_grouped, format_plain};
use super::insight::Insight;
use super::planner::PlanContext;
use crate::datamodel::{CellValue, Record};
use crate::infer::datetime::parse_date_cell;
use std::cmp::Ordering;

/// What one strategy contributes to the analysis.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StrategyOutput {
    pub chart: Option<ChartSpec>,
    pub insight: Option<Insight>,
}

impl StrategyOutput {
    pub fn is_empty(&self) -> bool {
        self.chart.is_none() && self.insight.is_none()
    }
}

/// A self-contained rule turning column roles into a chart and/or an insight.
///
/// A strategy whose columns are not available returns an empty output.
pub trait Strategy: Send + Sync {
    fn name(&self) -> &'static str;
    fn apply(&self, context: &PlanContext<'_>) -> StrategyOutput;
}

/// Groups whose sum overflowed have no plottable value and are left out.
fn category_data(groups: &[CategoryTotal]) -> Vec<ChartDatum> {
    groups
        .iter()
        .filter(|group| group.total.is_finite())
        .map(|group| ChartDatum::Category {
            name: group.name.clone(),
            value: group.total,
        })
        .collect()
}

/// Undated rows go last, the sort is stable otherwise.
fn compare_timestamps(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Area chart of the primary numeric column over the primary date column.
#[derive(Debug, Default)]
pub struct TimeSeriesTrend;

impl TimeSeriesTrend {
    fn growth_insight(numeric_column: &str, first: &CellValue, last: &CellValue) -> Option<Insight> {
        let first = first.as_number()?;
        let last = last.as_number()?;
        if first == 0.0 {
            return None;
        }
        let growth = (last - first) / first * 100.0;
        if !growth.is_finite() {
            return None;
        }
        let direction = if growth > 0.0 { "increase" } else { "decrease" };
        Some(
            Insight::builder()
                .strong("Overall Growth")
                .plain(format!(
                    ": {} shifted from {} to {}, representing a ",
                    numeric_column,
                    format_plain(first),
                    format_plain(last)
                ))
                .strong(format!("{}% {}", format_fixed(growth.abs(), 1), direction))
                .plain(" over the period.")
                .build(),
        )
    }
}

impl Strategy for TimeSeriesTrend {
    fn name(&self) -> &'static str {
        "time_series_trend"
    }

    fn apply(&self, context: &PlanContext<'_>) -> StrategyOutput {
        let (Some(date_column), Some(numeric_column)) =
            (context.primary_date(), context.primary_numeric())
        else {
            return StrategyOutput::default();
        };
        let (Some(date_index), Some(numeric_index)) = (
            context.dataset.column_index(date_column),
            context.dataset.column_index(numeric_column),
        ) else {
            return StrategyOutput::default();
        };

        let mut points = context
            .dataset
            .rows()
            .iter()
            .map(|row| {
                let timestamp = parse_date_cell(&row[date_index]).map(|epoch| epoch.to_unix_seconds());
                (timestamp, &row[date_index], &row[numeric_index])
            })
            .collect::<Vec<_>>();
        points.sort_by(|a, b| compare_timestamps(a.0, b.0));

        let insight = match (points.first(), points.last()) {
            (Some((_, _, first)), Some((_, _, last))) => {
                Self::growth_insight(numeric_column, first, last)
            }
            _ => None,
        };

        let data = points
            .into_iter()
            .map(|(_, date, value)| {
                ChartDatum::Row(
                    Record::new()
                        .with(date_column, date.clone())
                        .with(numeric_column, value.clone()),
                )
            })
            .collect();

        StrategyOutput {
            chart: Some(ChartSpec {
                id: "trend-1".to_string(),
                chart_type: ChartType::Area,
                title: format!("{} Trend Over Time", numeric_column),
                description: format!(
                    "Tracking the movement of {} across the measured time period. \
                     This visualization highlights growth patterns and seasonal volatility.",
                    numeric_column
                ),
                data_key_x: date_column.to_string(),
                data_key_y: numeric_column.to_string(),
                data,
            }),
            insight,
        }
    }
}

/// Bar chart of the largest category totals.
#[derive(Debug, Default)]
pub struct CategoricalComparison;

impl Strategy for CategoricalComparison {
    fn name(&self) -> &'static str {
        "categorical_comparison"
    }

    fn apply(&self, context: &PlanContext<'_>) -> StrategyOutput {
        let (Some(category_column), Some(numeric_column)) =
            (context.primary_categorical(), context.primary_numeric())
        else {
            return StrategyOutput::default();
        };
        let (Some(category_index), Some(numeric_index)) = (
            context.dataset.column_index(category_column),
            context.dataset.column_index(numeric_column),
        ) else {
            return StrategyOutput::default();
        };

        let limit = context.options.comparison_top_n;
        let top = top_n(
            group_sum(context.dataset, category_index, numeric_index),
            limit,
        );

        let insight = top
            .first()
            .filter(|leader| leader.total.is_finite())
            .map(|leader| {
                Insight::builder()
                    .strong("Market Leader")
                    .plain(format!(": The top performing {} is ", category_column))
                    .strong(&leader.name)
                    .plain(", contributing ")
                    .strong(format_grouped(leader.total, 3))
                    .plain(format!(" to the total {}.", numeric_column))
                    .build()
            });

        StrategyOutput {
            chart: Some(ChartSpec {
                id: "bar-comparison".to_string(),
                chart_type: ChartType::Bar,
                title: format!("Top {} {} by {}", limit, category_column, numeric_column),
                description: format!(
                    "A comparative view of the top performing {} groups.",
                    category_column
                ),
                data_key_x: CATEGORY_KEY.to_string(),
                data_key_y: VALUE_KEY.to_string(),
                data: category_data(&top),
            }),
            insight,
        }
    }
}

/// Pie chart of the category breakdown and the leader's share.
///
/// Works on the secondary numeric column when there is one.
#[derive(Debug, Default)]
pub struct DistributionShare;

impl Strategy for DistributionShare {
    fn name(&self) -> &'static str {
        "distribution_share"
    }

    fn apply(&self, context: &PlanContext<'_>) -> StrategyOutput {
        let (Some(category_column), Some(numeric_column)) = (
            context.primary_categorical(),
            context
                .secondary_numeric()
                .or_else(|| context.primary_numeric()),
        ) else {
            return StrategyOutput::default();
        };
        let (Some(category_index), Some(numeric_index)) = (
            context.dataset.column_index(category_column),
            context.dataset.column_index(numeric_column),
        ) else {
            return StrategyOutput::default();
        };

        let groups = group_sum(context.dataset, category_index, numeric_index);
        // share of everything, not only of the kept slices
        let total = grand_total(&groups);
        let top = top_n(groups, context.options.distribution_top_n);

        let insight = top.first().and_then(|leader| {
            if total == 0.0 || !total.is_finite() {
                return None;
            }
            let share = leader.total / total * 100.0;
            if !share.is_finite() {
                return None;
            }
            Some(
                Insight::builder()
                    .strong("Concentration Risk")
                    .plain(format!(": The top segment ({}) accounts for ", leader.name))
                    .strong(format!("{}%", format_fixed(share, 1)))
                    .plain(format!(
                        " of the total {}, indicating high dependency.",
                        numeric_column
                    ))
                    .build(),
            )
        });

        StrategyOutput {
            chart: Some(ChartSpec {
                id: "dist-pie".to_string(),
                chart_type: ChartType::Pie,
                title: format!("{} Distribution", numeric_column),
                description: format!(
                    "Breakdown of {} usage across major {} segments.",
                    numeric_column, category_column
                ),
                data_key_x: CATEGORY_KEY.to_string(),
                data_key_y: VALUE_KEY.to_string(),
                data: category_data(&top),
            }),
            insight,
        }
    }
}

/// Mean of the primary numeric column, no chart.
#[derive(Debug, Default)]
pub struct GlobalAverage;

impl Strategy for GlobalAverage {
    fn name(&self) -> &'static str {
        "global_average"
    }

    fn apply(&self, context: &PlanContext<'_>) -> StrategyOutput {
        let Some(numeric_column) = context.primary_numeric() else {
            return StrategyOutput::default();
        };
        let Some(numeric_index) = context.dataset.column_index(numeric_column) else {
            return StrategyOutput::default();
        };
        let row_count = context.dataset.row_count();
        if row_count == 0 {
            return StrategyOutput::default();
        }

        // missing and non-numeric cells count as zero
        let sum = context
            .dataset
            .column(numeric_index)
            .map(|cell| cell.as_number().unwrap_or(0.0))
            .sum::<f64>();
        let average = sum / row_count as f64;
        if !average.is_finite() {
            return StrategyOutput::default();
        }

        StrategyOutput {
            chart: None,
            insight: Some(
                Insight::builder()
                    .strong("Average Performance")
                    .plain(format!(
                        ": The mean {} across all data points is ",
                        numeric_column
                    ))
                    .strong(format_grouped(average, 1))
                    .plain(".")
                    .build(),
            ),
        }
    }
}
