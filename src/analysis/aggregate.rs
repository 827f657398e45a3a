use crate::datamodel::{CellValue, Dataset};
use indexmap::IndexMap;

/// Label of the group collecting rows without a category.
pub const UNKNOWN_CATEGORY: &str = "Unknown";

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub name: String,
    pub total: f64,
}

fn category_name(cell: &CellValue) -> String {
    match cell {
        CellValue::Missing => UNKNOWN_CATEGORY.to_string(),
        CellValue::Text(text) if text.trim().is_empty() => UNKNOWN_CATEGORY.to_string(),
        other => other.to_string(),
    }
}

/// Sums `value_index` per distinct value of `category_index`.
///
/// Groups come out in the order they are first met. Cells that are not
/// numbers add nothing.
pub fn group_sum(dataset: &Dataset, category_index: usize, value_index: usize) -> Vec<CategoryTotal> {
    let mut totals: IndexMap<String, f64> = IndexMap::new();
    for row in dataset.rows() {
        let value = row[value_index].as_number().unwrap_or(0.0);
        *totals.entry(category_name(&row[category_index])).or_insert(0.0) += value;
    }
    totals
        .into_iter()
        .map(|(name, total)| CategoryTotal { name, total })
        .collect()
}

/// Largest totals first, equal totals keep their encounter order.
pub fn top_n(mut groups: Vec<CategoryTotal>, n: usize) -> Vec<CategoryTotal> {
    groups.sort_by(|a, b| b.total.total_cmp(&a.total));
    groups.truncate(n);
    groups
}

pub fn grand_total(groups: &[CategoryTotal]) -> f64 {
    groups.iter().map(|group| group.total).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> Dataset {
        Dataset::new(
            vec!["region".to_string(), "sales".to_string()],
            vec![
                vec![CellValue::from("North"), CellValue::Number(10.0)],
                vec![CellValue::from("South"), CellValue::Number(30.0)],
                vec![CellValue::from("North"), CellValue::Number(25.0)],
                vec![CellValue::Missing, CellValue::Number(5.0)],
                vec![CellValue::from("East"), CellValue::from("n/a")],
                vec![CellValue::from("West"), CellValue::Number(30.0)],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_group_sum() {
        let groups = group_sum(&dataset(), 0, 1);
        let names = groups.iter().map(|g| g.name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, vec!["North", "South", "Unknown", "East", "West"]);
        assert_eq!(groups[0].total, 35.0);
        assert_eq!(groups[2].total, 5.0);
        assert_eq!(groups[3].total, 0.0);
        assert_eq!(grand_total(&groups), 100.0);
    }

    #[test]
    fn test_top_n_is_stable() {
        let top = top_n(group_sum(&dataset(), 0, 1), 3);
        let names = top.iter().map(|g| g.name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, vec!["North", "South", "West"]);

        let all = top_n(group_sum(&dataset(), 0, 1), 10);
        assert_eq!(all.len(), 5);
        assert!(all.windows(2).all(|pair| pair[0].total >= pair[1].total));
    }

    #[test]
    fn test_group_sum_many_categories() {
        let rows = (0..50_000)
            .map(|i| {
                vec![
                    CellValue::from(format!("id-{}", i % 25_000)),
                    CellValue::Number(1.0),
                ]
            })
            .collect();
        let dataset = Dataset::new(vec!["id".to_string(), "v".to_string()], rows).unwrap();

        let groups = group_sum(&dataset, 0, 1);
        assert_eq!(groups.len(), 25_000);
        assert_eq!(groups[0].name, "id-0");
        assert_eq!(groups[24_999].name, "id-24999");
        assert!(groups.iter().all(|group| group.total == 2.0));
    }

    #[test]
    fn test_numeric_category() {
        let dataset = Dataset::new(
            vec!["year".to_string(), "sales".to_string()],
            vec![vec![CellValue::Number(2024.0), CellValue::Number(1.0)]],
        )
        .unwrap();
        assert_eq!(group_sum(&dataset, 0, 1)[0].name, "2024");
    }
}
