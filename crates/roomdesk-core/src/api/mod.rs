//! REST API Layer
//!
//! `RecordApi` is the seam between the state engine and the network.
//! `HttpApi` talks to the real backend; tests substitute an in-memory fake.

mod envelope;
mod error;
mod http;

#[cfg(test)]
pub(crate) mod fake;

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde_json::Value;

use crate::record::Record;

pub use envelope::{acknowledge, decode_list, decode_record, decode_saved, error_message, field_errors, list_items, Saved};
pub use error::{is_presentable, ApiError, GENERIC_FAILURE};
pub use http::{AuthApi, HttpApi, LoginResponse, RestClient};

/// Server-side narrowing sent with a list fetch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListParams {
    pub search: Option<String>,
    pub filters: BTreeMap<String, String>,
}

impl ListParams {
    /// Query-string pairs; an absent search term is omitted
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(self.filters.len() + 1);
        if let Some(search) = &self.search {
            pairs.push(("search".to_string(), search.clone()));
        }
        pairs.extend(self.filters.iter().map(|(k, v)| (k.clone(), v.clone())));
        pairs
    }
}

/// CRUD operations for one record type
///
/// Futures are not `Send`: in the browser they run on the single UI thread.
#[async_trait(?Send)]
pub trait RecordApi<T: Record> {
    /// List records, optionally narrowed on the server
    async fn list(&self, params: &ListParams) -> Result<Vec<T>, ApiError>;

    /// Fetch a single record
    async fn get(&self, id: &T::Id) -> Result<T, ApiError>;

    /// Create a record from a form payload
    async fn create(&self, body: &Value) -> Result<Saved<T>, ApiError>;

    /// Update an existing record from a form payload
    async fn update(&self, id: &T::Id, body: &Value) -> Result<Saved<T>, ApiError>;

    /// Delete a record
    async fn delete(&self, id: &T::Id) -> Result<(), ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_params_pairs() {
        let mut params = ListParams::default();
        assert!(params.to_pairs().is_empty());

        params.search = Some("101".into());
        params.filters.insert("status".into(), "available".into());
        assert_eq!(
            params.to_pairs(),
            vec![("search".to_string(), "101".to_string()), ("status".to_string(), "available".to_string())]
        );
    }
}
