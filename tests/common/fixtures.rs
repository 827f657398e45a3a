/// Monthly revenue, one categorical and one numeric column.
pub const MONTHLY_REVENUE: &str = "name,revenue\nJan,45000\nFeb,52000\nMar,48000\n";

/// Date, region and two numeric columns, rows out of date order.
pub const REGIONAL_SALES: &str = "\
date,region,sales,units
2024-03-01,North,150,30
2024-01-01,South,100,10
2024-02-01,North,200,20
";

/// Prices written with currency symbols and thousands separators.
pub const CURRENCY_PRICES: &str = "\
product,price
\"Widget, large\",\"$1,200\"
Gadget,$950
";

/// Nothing but text.
pub const CATEGORIES_ONLY: &str = "city,country\nOslo,Norway\nLyon,France\n";

/// A header without any record.
pub const HEADER_ONLY: &str = "a,b,c\n";

/// Eight regions, more than any chart keeps.
pub fn many_regions() -> String {
    let mut csv = String::from("region,sales\n");
    for i in 1..=8 {
        csv.push_str(&format!("r{},{}\n", i, i * 10));
    }
    csv
}
