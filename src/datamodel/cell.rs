use serde::{Serialize, Serializer};
use std::fmt;

/// A single raw scalar of a dataset.
///
/// Parsers produce `Number` only for unambiguous numeric literals,
/// everything else stays `Text` until the normalizer decides otherwise.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Missing,
}

impl CellValue {
    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Missing)
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(value) => write!(f, "{}", value),
            CellValue::Text(text) => f.write_str(text),
            CellValue::Missing => Ok(()),
        }
    }
}

// Numbers as JSON numbers, text as strings, missing as null.
impl Serialize for CellValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            CellValue::Number(value) => serializer.serialize_f64(*value),
            CellValue::Text(text) => serializer.serialize_str(text),
            CellValue::Missing => serializer.serialize_none(),
        }
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(CellValue::Number(45000.0).to_string(), "45000");
        assert_eq!(CellValue::Number(1.5).to_string(), "1.5");
        assert_eq!(CellValue::from("Jan").to_string(), "Jan");
        assert_eq!(CellValue::Missing.to_string(), "");
    }

    #[test]
    fn test_serialize() {
        let cells = vec![
            CellValue::Number(12.5),
            CellValue::from("abc"),
            CellValue::Missing,
        ];
        let json = serde_json::to_string(&cells).unwrap();
        assert_eq!(json, r#"[12.5,"abc",null]"#);
    }

    #[test]
    fn test_accessors() {
        assert_eq!(CellValue::Number(3.0).as_number(), Some(3.0));
        assert_eq!(CellValue::from("3").as_number(), None);
        assert_eq!(CellValue::from("x").as_text(), Some("x"));
        assert!(CellValue::Missing.is_missing());
        assert!(!CellValue::from("").is_missing());
    }
}
