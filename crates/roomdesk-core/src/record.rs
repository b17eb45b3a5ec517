//! Record Trait
//!
//! The contract every entity shown on a management page implements.
//! Search, filtering and sorting only ever see a record through `field`.

use std::cmp::Ordering;
use std::fmt;
use std::hash::Hash;

/// A single field value, as seen by search, filter and sort
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Bool(bool),
    Null,
}

impl FieldValue {
    /// Text used for display and substring search
    pub fn as_text(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Number(n) => format_number(*n),
            FieldValue::Bool(b) => b.to_string(),
            FieldValue::Null => String::new(),
        }
    }

    /// Case-insensitive substring match; `needle` must already be lowercase
    pub fn contains(&self, needle: &str) -> bool {
        self.as_text().to_lowercase().contains(needle)
    }

    /// Case-insensitive equality, used by filters
    pub fn equals(&self, expected: &str) -> bool {
        self.as_text().eq_ignore_ascii_case(expected.trim())
    }

    /// Ordering used by column sorting. Nulls sort first, numbers compare
    /// numerically, text compares case-insensitively.
    pub fn sort_cmp(&self, other: &FieldValue) -> Ordering {
        match (self, other) {
            (FieldValue::Number(a), FieldValue::Number(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            (FieldValue::Text(a), FieldValue::Text(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
            (FieldValue::Bool(a), FieldValue::Bool(b)) => a.cmp(b),
            (a, b) => a.rank().cmp(&b.rank()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            FieldValue::Null => 0,
            FieldValue::Bool(_) => 1,
            FieldValue::Number(_) => 2,
            FieldValue::Text(_) => 3,
        }
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<&String> for FieldValue {
    fn from(value: &String) -> Self {
        FieldValue::Text(value.clone())
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        FieldValue::Number(value as f64)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Number(value as f64)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl<T> From<&Option<T>> for FieldValue
where
    T: Clone + Into<FieldValue>,
{
    fn from(value: &Option<T>) -> Self {
        value.clone().map(Into::into).unwrap_or(FieldValue::Null)
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

/// Core trait for every entity listed on a management page
pub trait Record: Clone + 'static {
    /// The type of the record's unique identifier
    type Id: Clone + Eq + Hash + fmt::Debug + fmt::Display + 'static;

    /// REST collection path, relative to the API base URL
    const RESOURCE: &'static str;

    /// Fields matched by the search box
    const SEARCH_FIELDS: &'static [&'static str];

    /// Returns the record's unique identifier
    fn id(&self) -> Self::Id;

    /// Returns a named field, or `None` if the record has no such field
    fn field(&self, name: &str) -> Option<FieldValue>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_display_drops_trailing_zero() {
        assert_eq!(FieldValue::Number(101.0).as_text(), "101");
        assert_eq!(FieldValue::Number(12.5).as_text(), "12.5");
    }

    #[test]
    fn test_contains_is_case_insensitive() {
        let value = FieldValue::from("Building A");
        assert!(value.contains("building"));
        assert!(!value.contains("b-2"));
    }

    #[test]
    fn test_sort_cmp_numbers_numerically() {
        let nine = FieldValue::Number(9.0);
        let ten = FieldValue::Number(10.0);
        assert_eq!(nine.sort_cmp(&ten), Ordering::Less);
        // as text "10" < "9", which is why numbers are not compared as text
        assert_eq!(FieldValue::from("10").sort_cmp(&FieldValue::from("9")), Ordering::Less);
    }

    #[test]
    fn test_null_sorts_first() {
        assert_eq!(FieldValue::Null.sort_cmp(&FieldValue::from("a")), Ordering::Less);
        assert_eq!(FieldValue::from(&None::<String>), FieldValue::Null);
    }
}
