use super::chart::ChartSpec;
use super::insight::Insight;
use super::options::AnalysisOptions;
use super::selection::ColumnSelector;
use super::strategies::{
    CategoricalComparison, DistributionShare, GlobalAverage, Strategy, TimeSeriesTrend,
};
use crate::datamodel::Dataset;
use crate::infer::columns::ColumnRoles;

/// Everything a strategy may look at.
pub struct PlanContext<'a> {
    /// Normalized dataset
    pub dataset: &'a Dataset,
    pub roles: &'a ColumnRoles,
    pub selector: &'a dyn ColumnSelector,
    pub options: &'a AnalysisOptions,
}

impl<'a> PlanContext<'a> {
    pub fn primary_numeric(&self) -> Option<&'a str> {
        self.selector.primary_numeric(self.dataset, self.roles)
    }

    pub fn secondary_numeric(&self) -> Option<&'a str> {
        self.selector.secondary_numeric(self.dataset, self.roles)
    }

    pub fn primary_categorical(&self) -> Option<&'a str> {
        self.selector.primary_categorical(self.dataset, self.roles)
    }

    pub fn primary_date(&self) -> Option<&'a str> {
        self.selector.primary_date(self.dataset, self.roles)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Plan {
    pub charts: Vec<ChartSpec>,
    pub insights: Vec<Insight>,
}

/// Runs its strategies in a fixed order.
pub struct Planner {
    strategies: Vec<Box<dyn Strategy>>,
}

impl Default for Planner {
    fn default() -> Self {
        Self::new(vec![
            Box::new(TimeSeriesTrend),
            Box::new(CategoricalComparison),
            Box::new(DistributionShare),
            Box::new(GlobalAverage),
        ])
    }
}

impl Planner {
    pub fn new(strategies: Vec<Box<dyn Strategy>>) -> Self {
        Self { strategies }
    }

    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|strategy| strategy.name()).collect()
    }

    /// Insights keep execution order and are cut at `max_insights`.
    pub fn plan(&self, context: &PlanContext<'_>) -> Plan {
        let mut plan = Plan::default();
        for strategy in &self.strategies {
            let output = strategy.apply(context);
            tracing::debug!(
                strategy = strategy.name(),
                chart = output.chart.is_some(),
                insight = output.insight.is_some(),
                "Applied strategy"
            );
            plan.charts.extend(output.chart);
            plan.insights.extend(output.insight);
        }
        plan.insights.truncate(context.options.max_insights);
        plan
    }
}
