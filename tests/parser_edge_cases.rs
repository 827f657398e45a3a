use tabinsight::datamodel::CellValue;
use tabinsight::importers::{TabularParser, csv::CsvParser, get_parser_from_name};
use tabinsight::infer::columns::{ColumnRole, classify_values};
use tabinsight::infer::datetime::parse_calendar_date;
use tabinsight::infer::parsing::{NumericFormat, parse_numeric_text};

/// Test edge cases for CSV parsing and type inference
mod parsing_edge_cases {
    use super::*;

    fn cells(values: &[&str]) -> Vec<CellValue> {
        values.iter().map(|value| CellValue::from(*value)).collect()
    }

    #[test]
    fn test_numeric_decorations() {
        let format = NumericFormat::default();
        assert_eq!(parse_numeric_text("$1,200", &format), Some(1200.0));
        assert_eq!(parse_numeric_text("  $950  ", &format), Some(950.0));
        assert_eq!(parse_numeric_text("-1,234.5", &format), Some(-1234.5));
        assert_eq!(parse_numeric_text("1e3", &format), Some(1000.0));

        // Nothing left once decorations are removed
        assert_eq!(parse_numeric_text("$", &format), None);
        assert_eq!(parse_numeric_text(",,", &format), None);

        // Partial numbers are not numbers
        assert_eq!(parse_numeric_text("12 units", &format), None);
        assert_eq!(parse_numeric_text("€12", &format), None);

        // Non-finite values are rejected
        assert_eq!(parse_numeric_text("inf", &format), None);
        assert_eq!(parse_numeric_text("NaN", &format), None);
    }

    #[test]
    fn test_custom_currency_set() {
        let format = NumericFormat {
            currency_symbols: vec!['€', '£'],
            thousands_separators: vec![' '],
        };
        assert_eq!(parse_numeric_text("€12 000", &format), Some(12000.0));
        assert_eq!(parse_numeric_text("$12", &format), None);
    }

    #[test]
    fn test_calendar_dates() {
        for valid in [
            "2024-01-01",
            "2024-02-29",
            "2024-01-15T10:30:00Z",
            "2024-01-15 10:30:00",
            "2024-01-15T10:30:00+01:00",
            "2024/03/05",
            "03/05/2024",
            "2024-W01-1",
            "2024-060",
        ] {
            assert!(parse_calendar_date(valid).is_some(), "{} should parse", valid);
        }
        for invalid in ["2023-02-29", "2024-13-01", "13/01/2024", "Jan", "North", ""] {
            assert!(parse_calendar_date(invalid).is_none(), "{} should not parse", invalid);
        }
    }

    #[test]
    fn test_classification_priority() {
        let format = NumericFormat::default();
        // Numbers win over dates
        assert_eq!(
            classify_values(&[CellValue::Number(2024.0), CellValue::Number(2025.0)], &format),
            ColumnRole::Numeric
        );
        assert_eq!(
            classify_values(&cells(&["2024-01-01", "2024-02-01"]), &format),
            ColumnRole::Date
        );
        // A single non-date makes the column categorical
        assert_eq!(
            classify_values(&cells(&["2024-01-01", "soon"]), &format),
            ColumnRole::Categorical
        );
        // A single non-number makes the column non-numeric
        assert_eq!(
            classify_values(&cells(&["$10", "ten"]), &format),
            ColumnRole::Categorical
        );
        // Missing cells are ignored, an empty sample is categorical
        assert_eq!(
            classify_values(&[CellValue::Missing, CellValue::Number(1.0)], &format),
            ColumnRole::Numeric
        );
        assert_eq!(
            classify_values(&[CellValue::Missing, CellValue::Missing], &format),
            ColumnRole::Categorical
        );
    }

    #[tokio::test]
    async fn test_parser_shapes() {
        let parser = get_parser_from_name("csv").unwrap();
        let dataset = parser
            .parse(b"a,a,\n1,2,3\n\n4\n")
            .await
            .unwrap();
        assert_eq!(dataset.column_names(), &["a", "a_1", "column_3"]);
        assert_eq!(dataset.row_count(), 2);
        assert_eq!(
            dataset.rows()[1],
            vec![CellValue::Number(4.0), CellValue::Missing, CellValue::Missing]
        );
    }

    #[tokio::test]
    async fn test_tab_separated() {
        let dataset = CsvParser::new(b'\t')
            .parse("region\tsales\nNorth\t$1,200\n".as_bytes())
            .await
            .unwrap();
        assert_eq!(dataset.rows()[0][1], CellValue::from("$1,200"));
    }
}
