//! Number rendering for insight sentences.

/// Written in place of a number that cannot be shown.
pub const NOT_AVAILABLE: &str = "N/A";

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

/// `1234567.891` with 1 fraction digit gives `1,234,567.9`.
///
/// Half rounds away from zero and trailing zeros are dropped, like an
/// en-US locale formatter.
pub fn format_grouped(value: f64, max_fraction_digits: usize) -> String {
    if !value.is_finite() {
        return NOT_AVAILABLE.to_string();
    }
    let factor = 10_f64.powi(max_fraction_digits as i32);
    let rounded = (value.abs() * factor).round() / factor;
    let fixed = format!("{:.*}", max_fraction_digits, rounded);
    let (integer, fraction) = match fixed.split_once('.') {
        Some((integer, fraction)) => (integer, fraction.trim_end_matches('0')),
        None => (fixed.as_str(), ""),
    };

    let mut output = String::new();
    if value < 0.0 && rounded != 0.0 {
        output.push('-');
    }
    output.push_str(&group_thousands(integer));
    if !fraction.is_empty() {
        output.push('.');
        output.push_str(fraction);
    }
    output
}

/// Fixed number of fraction digits, no grouping.
pub fn format_fixed(value: f64, fraction_digits: usize) -> String {
    if !value.is_finite() {
        return NOT_AVAILABLE.to_string();
    }
    format!("{:.*}", fraction_digits, value)
}

/// Shortest representation: `100` rather than `100.0`.
pub fn format_plain(value: f64) -> String {
    if !value.is_finite() {
        return NOT_AVAILABLE.to_string();
    }
    if value == 0.0 {
        // no "-0"
        return "0".to_string();
    }
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("1"), "1");
        assert_eq!(group_thousands("123"), "123");
        assert_eq!(group_thousands("1234"), "1,234");
        assert_eq!(group_thousands("1234567"), "1,234,567");
    }

    #[test]
    fn test_format_grouped() {
        assert_eq!(format_grouped(52000.0, 3), "52,000");
        assert_eq!(format_grouped(1234567.891, 3), "1,234,567.891");
        assert_eq!(format_grouped(1234.5678, 1), "1,234.6");
        assert_eq!(format_grouped(48333.333333, 1), "48,333.3");
        assert_eq!(format_grouped(999.95, 1), "1,000");
        assert_eq!(format_grouped(-1500.0, 3), "-1,500");
        assert_eq!(format_grouped(-0.01, 1), "0");
        assert_eq!(format_grouped(0.5, 0), "1");
        assert_eq!(format_grouped(f64::NAN, 1), NOT_AVAILABLE);
    }

    #[test]
    fn test_format_fixed() {
        assert_eq!(format_fixed(50.0, 1), "50.0");
        assert_eq!(format_fixed(33.333, 1), "33.3");
        assert_eq!(format_fixed(f64::INFINITY, 1), NOT_AVAILABLE);
    }

    #[test]
    fn test_format_plain() {
        assert_eq!(format_plain(100.0), "100");
        assert_eq!(format_plain(1.5), "1.5");
        assert_eq!(format_plain(-0.0), "0");
        assert_eq!(format_plain(-20.0), "-20");
    }
}
