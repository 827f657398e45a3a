use crate::datamodel::Dataset;
use crate::infer::columns::ColumnRoles;
use serde::Serialize;

/// Structural overview of a dataset.
///
/// The three role lists partition `column_names`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetSummary {
    pub total_rows: usize,
    pub total_columns: usize,
    pub column_names: Vec<String>,
    pub numeric_columns: Vec<String>,
    pub categorical_columns: Vec<String>,
    pub date_columns: Vec<String>,
}

impl DatasetSummary {
    pub fn new(dataset: &Dataset, roles: &ColumnRoles) -> Self {
        let owned = |names: Vec<&str>| names.into_iter().map(String::from).collect::<Vec<_>>();
        Self {
            total_rows: dataset.row_count(),
            total_columns: dataset.column_count(),
            column_names: dataset.column_names().to_vec(),
            numeric_columns: owned(roles.numeric()),
            categorical_columns: owned(roles.categorical()),
            date_columns: owned(roles.dates()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datamodel::CellValue;
    use crate::infer::columns::ColumnRole;

    #[test]
    fn test_summary() {
        let dataset = Dataset::new(
            vec!["month".to_string(), "region".to_string(), "sales".to_string()],
            vec![vec![
                CellValue::from("2024-01-01"),
                CellValue::from("North"),
                CellValue::Number(1.0),
            ]],
        )
        .unwrap();
        let roles = ColumnRoles::new(vec![
            ("month".to_string(), ColumnRole::Date),
            ("region".to_string(), ColumnRole::Categorical),
            ("sales".to_string(), ColumnRole::Numeric),
        ]);
        let summary = DatasetSummary::new(&dataset, &roles);
        assert_eq!(summary.total_rows, 1);
        assert_eq!(summary.total_columns, 3);
        assert_eq!(summary.numeric_columns, vec!["sales"]);
        assert_eq!(summary.categorical_columns, vec!["region"]);
        assert_eq!(summary.date_columns, vec!["month"]);

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["totalRows"], 1);
        assert_eq!(json["dateColumns"][0], "month");
    }
}
