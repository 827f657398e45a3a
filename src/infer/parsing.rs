use crate::datamodel::CellValue;
use nom::{
    IResult, Parser,
    character::complete::multispace0,
    combinator::eof,
    number::complete::double,
    sequence::{delimited, terminated},
};

/// Characters removed from a value before the numeric test.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericFormat {
    pub currency_symbols: Vec<char>,
    pub thousands_separators: Vec<char>,
}

impl Default for NumericFormat {
    fn default() -> Self {
        Self {
            currency_symbols: vec!['$'],
            thousands_separators: vec![','],
        }
    }
}

impl NumericFormat {
    fn is_stripped(&self, c: char) -> bool {
        self.currency_symbols.contains(&c) || self.thousands_separators.contains(&c)
    }
}

pub fn parse_float(data: &str) -> IResult<&str, f64> {
    // We use the "double" parser from nom, that returns a f64.
    // Surrounding whitespace is accepted, trailing garbage is not.
    terminated(delimited(multispace0, double, multispace0), eof).parse(data)
}

/// A bare numeric literal, as a delimited-text parser would type it.
///
/// `"1,200"` or `"$950"` are not literals, they stay text until the
/// normalizer strips them.
pub fn parse_number_literal(data: &str) -> Option<f64> {
    match parse_float(data) {
        Ok((_, value)) if value.is_finite() => Some(value),
        _ => None,
    }
}

pub fn strip_numeric_decorations(data: &str, format: &NumericFormat) -> String {
    data.chars().filter(|c| !format.is_stripped(*c)).collect()
}

pub fn parse_numeric_text(data: &str, format: &NumericFormat) -> Option<f64> {
    let cleaned = strip_numeric_decorations(data, format);
    if cleaned.trim().is_empty() {
        return None;
    }
    parse_number_literal(&cleaned)
}

pub fn parse_numeric_cell(cell: &CellValue, format: &NumericFormat) -> Option<f64> {
    match cell {
        CellValue::Number(value) if value.is_finite() => Some(*value),
        CellValue::Number(_) | CellValue::Missing => None,
        CellValue::Text(text) => parse_numeric_text(text, format),
    }
}

pub fn is_numeric(cell: &CellValue, format: &NumericFormat) -> bool {
    parse_numeric_cell(cell, format).is_some()
}
