//! Frontend Models
//!
//! Glue between the core record types and the table/form components.

use roomdesk_core::{FormModel, Record};

/// A record that can back a management page
///
/// Signals require `Send + Sync` state; every backend entity is plain data
/// keyed by a server-assigned integer id.
pub trait Entity: FormModel<Id = u32> + Send + Sync {}

impl<T: FormModel<Id = u32> + Send + Sync> Entity for T {}

/// One table column
pub struct Column<T> {
    /// Field name passed to `set_sort`
    pub key: &'static str,
    pub label: &'static str,
    pub sortable: bool,
    pub render: fn(&T) -> String,
}

impl<T> Column<T> {
    pub fn new(key: &'static str, label: &'static str, render: fn(&T) -> String) -> Self {
        Self { key, label, sortable: true, render }
    }

    pub fn unsorted(self) -> Self {
        Self { sortable: false, ..self }
    }
}

// Manual impls: `T` itself need not be Clone
impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Column<T> {}

/// Where a filter's choices come from
#[derive(Clone, Copy)]
pub enum FilterOptions {
    Fixed(&'static [(&'static str, &'static str)]),
    /// Distinct values of the field among the loaded records
    Distinct,
}

#[derive(Clone, Copy)]
pub struct FilterSpec {
    pub field: &'static str,
    pub label: &'static str,
    pub options: FilterOptions,
}

impl FilterSpec {
    pub const fn fixed(field: &'static str, label: &'static str, options: &'static [(&'static str, &'static str)]) -> Self {
        Self { field, label, options: FilterOptions::Fixed(options) }
    }

    pub const fn distinct(field: &'static str, label: &'static str) -> Self {
        Self { field, label, options: FilterOptions::Distinct }
    }

    /// (value, label) choices given the loaded records
    pub fn choices<T: Entity>(&self, records: &[T]) -> Vec<(String, String)> {
        match self.options {
            FilterOptions::Fixed(options) => options.iter().map(|(v, l)| (v.to_string(), l.to_string())).collect(),
            FilterOptions::Distinct => {
                let mut values: Vec<String> = records
                    .iter()
                    .filter_map(|r| r.field(self.field))
                    .map(|v| v.as_text())
                    .filter(|v| !v.is_empty())
                    .collect();
                values.sort();
                values.dedup();
                values.into_iter().map(|v| (v.clone(), v)).collect()
            }
        }
    }
}

pub fn money(amount: f64) -> String {
    format!("{:.2}", amount)
}

pub fn or_dash(value: &Option<String>) -> String {
    value.clone().filter(|v| !v.is_empty()).unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use roomdesk_core::entities::{Room, ROOM_STATUSES};

    fn room(id: u32, building: &str) -> Room {
        Room {
            id,
            room_number: format!("{}", 100 + id),
            building: building.to_string(),
            floor: 1,
            room_type: "single".to_string(),
            status: "available".to_string(),
            monthly_rent: 450.0,
            notes: None,
        }
    }

    #[test]
    fn test_distinct_choices_are_sorted_and_unique() {
        let rooms = vec![room(1, "South"), room(2, "North"), room(3, "South")];
        let choices = FilterSpec::distinct("building", "Building").choices(&rooms);
        assert_eq!(
            choices,
            vec![("North".to_string(), "North".to_string()), ("South".to_string(), "South".to_string())]
        );
    }

    #[test]
    fn test_fixed_choices_ignore_records() {
        let choices = FilterSpec::fixed("status", "Status", ROOM_STATUSES).choices::<Room>(&[]);
        assert_eq!(choices.len(), ROOM_STATUSES.len());
        assert_eq!(choices[0], ("available".to_string(), "Available".to_string()));
    }

    #[test]
    fn test_formatting_helpers() {
        assert_eq!(money(12.5), "12.50");
        assert_eq!(or_dash(&None), "-");
        assert_eq!(or_dash(&Some(String::new())), "-");
        assert_eq!(or_dash(&Some("x".into())), "x");
    }
}
