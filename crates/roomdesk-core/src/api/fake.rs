//! In-memory `RecordApi` used by tests. Records every call so tests can
//! assert that nothing reached the network.

use std::cell::{Cell, RefCell};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::{ApiError, ListParams, RecordApi, Saved};
use crate::record::Record;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List,
    Get(u32),
    Create,
    Update(u32),
    Delete(u32),
}

pub struct FakeApi<T> {
    records: RefCell<Vec<T>>,
    calls: RefCell<Vec<Call>>,
    failures: RefCell<Vec<ApiError>>,
    next_id: Cell<u32>,
}

impl<T> FakeApi<T>
where
    T: Record<Id = u32> + Serialize + DeserializeOwned,
{
    pub fn new(records: Vec<T>) -> Self {
        let next_id = records.iter().map(Record::id).max().unwrap_or(0) + 1;
        Self {
            records: RefCell::new(records),
            calls: RefCell::new(Vec::new()),
            failures: RefCell::new(Vec::new()),
            next_id: Cell::new(next_id),
        }
    }

    /// Make the next call fail with `err`
    pub fn fail_next(&self, err: ApiError) {
        self.failures.borrow_mut().push(err);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn records(&self) -> Vec<T> {
        self.records.borrow().clone()
    }

    fn record_call(&self, call: Call) -> Result<(), ApiError> {
        self.calls.borrow_mut().push(call);
        match self.failures.borrow_mut().pop() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn build(id: u32, body: &Value) -> Result<T, ApiError> {
        let mut body = body.clone();
        if let Value::Object(map) = &mut body {
            map.insert("id".into(), Value::from(id));
        }
        serde_json::from_value(body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[async_trait(?Send)]
impl<T> RecordApi<T> for FakeApi<T>
where
    T: Record<Id = u32> + Serialize + DeserializeOwned,
{
    /// Narrows on `search` and `filters` the way a backend would
    async fn list(&self, params: &ListParams) -> Result<Vec<T>, ApiError> {
        self.record_call(Call::List)?;
        let needle = params.search.as_deref().map(str::to_lowercase);
        Ok(self
            .records()
            .into_iter()
            .filter(|r| match &needle {
                Some(needle) => T::SEARCH_FIELDS.iter().any(|f| r.field(f).is_some_and(|v| v.contains(needle))),
                None => true,
            })
            .filter(|r| params.filters.iter().all(|(f, v)| r.field(f).is_some_and(|value| value.equals(v))))
            .collect())
    }

    async fn get(&self, id: &u32) -> Result<T, ApiError> {
        self.record_call(Call::Get(*id))?;
        self.records
            .borrow()
            .iter()
            .find(|r| r.id() == *id)
            .cloned()
            .ok_or(ApiError::NotFound { message: None })
    }

    async fn create(&self, body: &Value) -> Result<Saved<T>, ApiError> {
        self.record_call(Call::Create)?;
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        let record = Self::build(id, body)?;
        self.records.borrow_mut().push(record.clone());
        Ok(Saved::Record(record))
    }

    async fn update(&self, id: &u32, body: &Value) -> Result<Saved<T>, ApiError> {
        self.record_call(Call::Update(*id))?;
        let record = Self::build(*id, body)?;
        let mut records = self.records.borrow_mut();
        match records.iter_mut().find(|r| r.id() == *id) {
            Some(existing) => *existing = record.clone(),
            None => return Err(ApiError::NotFound { message: None }),
        }
        Ok(Saved::Record(record))
    }

    async fn delete(&self, id: &u32) -> Result<(), ApiError> {
        self.record_call(Call::Delete(*id))?;
        self.records.borrow_mut().retain(|r| r.id() != *id);
        Ok(())
    }
}
