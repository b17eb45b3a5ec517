//! List Query
//!
//! Search, filter, sort and pagination parameters, and the pure function
//! that derives the visible page from the fetched records.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::record::Record;

/// Page size used when the configuration does not set one
pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Current search/filter/sort/page state of a list
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery {
    pub search_term: String,
    /// field -> expected value; every entry must match
    pub filters: BTreeMap<String, String>,
    /// `None` keeps the server's order
    pub sort_key: Option<String>,
    pub sort_direction: SortDirection,
    /// 1-based
    pub page: usize,
    pub page_size: usize,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl ListQuery {
    pub fn new(page_size: usize) -> Self {
        Self {
            search_term: String::new(),
            filters: BTreeMap::new(),
            sort_key: None,
            sort_direction: SortDirection::Ascending,
            page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn offset(&self) -> usize {
        self.page.max(1).saturating_sub(1).saturating_mul(self.page_size.max(1))
    }
}

/// The derived, visible slice of a record list
#[derive(Debug, Clone, PartialEq)]
pub struct ListView<T> {
    pub rows: Vec<T>,
    /// Records before search and filters
    pub total: usize,
    /// Records after search and filters, before pagination
    pub matched: usize,
    pub page: usize,
    pub page_size: usize,
}

impl<T> ListView<T> {
    /// Number of pages; an empty result still has one (empty) page
    pub fn page_count(&self) -> usize {
        self.matched.div_ceil(self.page_size.max(1)).max(1)
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.page_count()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<T: Record> ListView<T> {
    pub fn ids(&self) -> Vec<T::Id> {
        self.rows.iter().map(Record::id).collect()
    }
}

/// Derive the visible page from `records`.
///
/// Search is a case-insensitive substring match against `T::SEARCH_FIELDS`,
/// filters are conjunctive, sorting is stable, and a page past the end is
/// returned empty rather than rejected.
pub fn apply_query<T: Record>(records: &[T], query: &ListQuery) -> ListView<T> {
    let needle = query.search_term.trim().to_lowercase();

    let mut matched: Vec<&T> = records
        .iter()
        .filter(|record| matches_search(*record, &needle) && matches_filters(*record, &query.filters))
        .collect();

    if let Some(key) = query.sort_key.as_deref() {
        // sort_by is stable; reversing Equal keeps ties in original order
        matched.sort_by(|a, b| {
            let ord = match (a.field(key), b.field(key)) {
                (Some(x), Some(y)) => x.sort_cmp(&y),
                (None, Some(_)) => std::cmp::Ordering::Less,
                (Some(_), None) => std::cmp::Ordering::Greater,
                (None, None) => std::cmp::Ordering::Equal,
            };
            match query.sort_direction {
                SortDirection::Ascending => ord,
                SortDirection::Descending => ord.reverse(),
            }
        });
    }

    let page = query.page.max(1);
    let page_size = query.page_size.max(1);
    let matched_count = matched.len();
    let rows = matched
        .into_iter()
        .skip(query.offset())
        .take(page_size)
        .cloned()
        .collect();

    ListView {
        rows,
        total: records.len(),
        matched: matched_count,
        page,
        page_size,
    }
}

fn matches_search<T: Record>(record: &T, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    T::SEARCH_FIELDS
        .iter()
        .filter_map(|name| record.field(name))
        .any(|value| value.contains(needle))
}

fn matches_filters<T: Record>(record: &T, filters: &BTreeMap<String, String>) -> bool {
    filters
        .iter()
        .all(|(name, expected)| record.field(name).map(|value| value.equals(expected)).unwrap_or(false))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::record::FieldValue;

    #[derive(Debug, Clone, PartialEq)]
    pub(crate) struct Row {
        pub id: u32,
        pub number: String,
        pub building: String,
        pub status: String,
        pub rent: f64,
    }

    impl Record for Row {
        type Id = u32;
        const RESOURCE: &'static str = "rows";
        const SEARCH_FIELDS: &'static [&'static str] = &["number", "building"];

        fn id(&self) -> u32 {
            self.id
        }

        fn field(&self, name: &str) -> Option<FieldValue> {
            match name {
                "id" => Some(self.id.into()),
                "number" => Some((&self.number).into()),
                "building" => Some((&self.building).into()),
                "status" => Some((&self.status).into()),
                "rent" => Some(self.rent.into()),
                _ => None,
            }
        }
    }

    pub(crate) fn row(id: u32, number: &str, building: &str, status: &str, rent: f64) -> Row {
        Row {
            id,
            number: number.to_string(),
            building: building.to_string(),
            status: status.to_string(),
            rent,
        }
    }

    pub(crate) fn sample() -> Vec<Row> {
        vec![
            row(1, "101", "North", "available", 500.0),
            row(2, "201", "North", "occupied", 650.0),
            row(3, "102", "South", "available", 500.0),
            row(4, "301", "south", "maintenance", 800.0),
            row(5, "103", "East", "available", 450.0),
        ]
    }

    #[test]
    fn test_two_records_fit_one_page() {
        let records = vec![row(1, "101", "North", "available", 1.0), row(2, "201", "North", "available", 1.0)];
        let view = apply_query(&records, &ListQuery::new(10));
        assert_eq!(view.page_count(), 1);
        assert_eq!(view.rows.len(), 2);
        assert!(!view.has_next());
    }

    #[test]
    fn test_search_matches_substring() {
        let records = vec![row(1, "101", "North", "available", 1.0), row(2, "201", "North", "available", 1.0)];
        let mut query = ListQuery::new(10);
        query.search_term = "101".to_string();
        let view = apply_query(&records, &query);
        assert_eq!(view.rows.len(), 1);
        assert_eq!(view.rows[0].number, "101");
    }

    #[test]
    fn test_every_search_hit_contains_term_and_clearing_restores_all() {
        let records = sample();
        let mut query = ListQuery::new(10);
        query.search_term = "SOUTH".to_string();
        let view = apply_query(&records, &query);
        assert_eq!(view.matched, 2);
        for r in &view.rows {
            assert!(r.number.to_lowercase().contains("south") || r.building.to_lowercase().contains("south"));
        }

        query.search_term.clear();
        assert_eq!(apply_query(&records, &query).matched, records.len());
    }

    #[test]
    fn test_filters_are_conjunctive() {
        let records = sample();
        let mut query = ListQuery::new(10);
        query.filters.insert("status".into(), "available".into());
        query.filters.insert("building".into(), "north".into());
        let view = apply_query(&records, &query);
        assert_eq!(view.ids(), vec![1]);
    }

    #[test]
    fn test_filter_on_unknown_field_matches_nothing() {
        let mut query = ListQuery::new(10);
        query.filters.insert("colour".into(), "red".into());
        assert!(apply_query(&sample(), &query).is_empty());
    }

    #[test]
    fn test_sort_is_stable_both_directions() {
        let records = sample();
        let mut query = ListQuery::new(10);
        query.sort_key = Some("rent".into());
        let asc = apply_query(&records, &query);
        // 1 and 3 tie at 500 and keep their original order
        assert_eq!(asc.ids(), vec![5, 1, 3, 2, 4]);

        query.sort_direction = SortDirection::Descending;
        let desc = apply_query(&records, &query);
        assert_eq!(desc.ids(), vec![4, 2, 1, 3, 5]);
    }

    #[test]
    fn test_pagination_offsets_and_empty_page() {
        let records = sample();
        let mut query = ListQuery::new(2);
        query.page = 2;
        let view = apply_query(&records, &query);
        assert_eq!(view.ids(), vec![3, 4]);
        assert_eq!(view.page_count(), 3);

        query.page = 7;
        let view = apply_query(&records, &query);
        assert!(view.is_empty());
        assert_eq!(view.matched, 5);
    }
}
