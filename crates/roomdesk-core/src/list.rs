//! List Controller
//!
//! Owns the fetched records, the current query and the selection of one
//! management page.
//!
//! Loads are split into `begin_load` / `finish_load` so a UI can drop the
//! controller borrow while the request is in flight. Every load takes a
//! ticket and only the newest ticket's response is applied. A search or
//! filter change also invalidates the ticket in flight, so a slow fetch
//! started under an old query never overwrites a newer one.
//!
//! Fetches always ask for the full collection. Search and filters narrow
//! the fetched records on the client, so clearing them brings every record
//! back without another request.

use crate::api::{ApiError, ListParams, RecordApi};
use crate::query::{apply_query, ListQuery, ListView, SortDirection};
use crate::record::Record;
use crate::selection::Selection;

/// Identity of one list fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LoadTicket(u64);

#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Idle,
    Loading,
    Loaded,
    /// Last fetch failed; the previous records are still shown
    LoadError(String),
}

#[derive(Debug, Clone)]
pub struct ListController<T: Record> {
    records: Vec<T>,
    query: ListQuery,
    selection: Selection<T::Id>,
    state: LoadState,
    last_error: Option<ApiError>,
    latest_ticket: u64,
    /// Ticket of the fetch whose response will still be applied
    in_flight: Option<u64>,
}

impl<T: Record> ListController<T> {
    pub fn new(page_size: usize) -> Self {
        Self {
            records: Vec::new(),
            query: ListQuery::new(page_size),
            selection: Selection::new(),
            state: LoadState::Idle,
            last_error: None,
            latest_ticket: 0,
            in_flight: None,
        }
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    pub fn selection(&self) -> &Selection<T::Id> {
        &self.selection
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn error(&self) -> Option<&ApiError> {
        self.last_error.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    pub fn find(&self, id: &T::Id) -> Option<&T> {
        self.records.iter().find(|r| &r.id() == id)
    }

    // ========================
    // Loading
    // ========================

    /// Start a fetch. Any fetch started earlier becomes stale.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.latest_ticket += 1;
        self.in_flight = Some(self.latest_ticket);
        self.state = LoadState::Loading;
        LoadTicket(self.latest_ticket)
    }

    /// A query change invalidated the fetch in flight; the caller should
    /// start a new one
    pub fn load_superseded(&self) -> bool {
        self.state == LoadState::Loading && self.in_flight.is_none()
    }

    /// Apply a fetch result. Returns `false` if the ticket is stale and the
    /// result was dropped.
    ///
    /// A failure keeps the last good records.
    pub fn finish_load(&mut self, ticket: LoadTicket, result: Result<Vec<T>, ApiError>) -> bool {
        if self.in_flight != Some(ticket.0) {
            log::debug!("dropping stale {} response (ticket {:?})", T::RESOURCE, ticket);
            return false;
        }
        self.in_flight = None;
        match result {
            Ok(records) => {
                self.records = records;
                let records = &self.records;
                self.selection.retain(|id| records.iter().any(|r| &r.id() == id));
                self.state = LoadState::Loaded;
                self.last_error = None;
            }
            Err(err) => {
                log::warn!("loading {} failed: {}", T::RESOURCE, err);
                self.state = LoadState::LoadError(err.user_message());
                self.last_error = Some(err);
            }
        }
        true
    }

    /// Fetch and apply in one step
    pub async fn load<A>(&mut self, api: &A) -> Result<usize, ApiError>
    where
        A: RecordApi<T> + ?Sized,
    {
        let ticket = self.begin_load();
        let result = api.list(&ListParams::default()).await;
        let outcome = result.as_ref().map(Vec::len).map_err(Clone::clone);
        self.finish_load(ticket, result);
        outcome
    }

    // ========================
    // Query
    // ========================

    /// The visible page
    pub fn view(&self) -> ListView<T> {
        apply_query(&self.records, &self.query)
    }

    pub fn visible_ids(&self) -> Vec<T::Id> {
        self.view().ids()
    }

    /// Change the search term. A change resets to page 1 and clears the
    /// selection. Returns whether anything changed.
    pub fn set_search(&mut self, term: impl Into<String>) -> bool {
        let term = term.into();
        if term == self.query.search_term {
            return false;
        }
        self.query.search_term = term;
        self.reset_result_set();
        true
    }

    /// Set a filter; an empty value removes it. Same reset rule as search.
    pub fn set_filter(&mut self, field: &str, value: impl Into<String>) -> bool {
        let value = value.into();
        let changed = if value.trim().is_empty() {
            self.query.filters.remove(field).is_some()
        } else {
            self.query.filters.insert(field.to_string(), value.clone()) != Some(value)
        };
        if changed {
            self.reset_result_set();
        }
        changed
    }

    pub fn clear_filters(&mut self) -> bool {
        if self.query.filters.is_empty() && self.query.search_term.is_empty() {
            return false;
        }
        self.query.filters.clear();
        self.query.search_term.clear();
        self.reset_result_set();
        true
    }

    fn reset_result_set(&mut self) {
        self.query.page = 1;
        self.selection.clear();
        if self.in_flight.take().is_some() {
            log::debug!("{} query changed during a fetch", T::RESOURCE);
        }
    }

    /// Sort by `key`; the same key again flips the direction
    pub fn set_sort(&mut self, key: &str) {
        if self.query.sort_key.as_deref() == Some(key) {
            self.query.sort_direction = self.query.sort_direction.toggled();
        } else {
            self.query.sort_key = Some(key.to_string());
            self.query.sort_direction = SortDirection::Ascending;
        }
    }

    pub fn set_page(&mut self, page: usize) {
        self.query.page = page.max(1);
    }

    pub fn next_page(&mut self) {
        if self.view().has_next() {
            self.query.page += 1;
        }
    }

    pub fn previous_page(&mut self) {
        self.set_page(self.query.page.saturating_sub(1));
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.query.page_size = page_size.max(1);
        self.query.page = 1;
    }

    // ========================
    // Selection
    // ========================

    pub fn toggle_select(&mut self, id: T::Id) -> bool {
        self.selection.toggle(id)
    }

    /// Check or uncheck exactly the rows on the visible page
    pub fn toggle_select_all(&mut self) {
        let visible = self.visible_ids();
        self.selection.toggle_all(&visible);
    }

    pub fn all_visible_selected(&self) -> bool {
        self.selection.all_selected(&self.visible_ids())
    }

    pub fn selected_ids(&self) -> Vec<T::Id> {
        // keep list order so bulk actions are deterministic
        self.records
            .iter()
            .map(Record::id)
            .filter(|id| self.selection.contains(id))
            .collect()
    }

    // ========================
    // Local patching
    // ========================

    pub fn apply_created(&mut self, record: T) {
        self.records.push(record);
    }

    /// Replace the record with the same id, or append it if unknown
    pub fn apply_updated(&mut self, record: T) {
        let id = record.id();
        match self.records.iter_mut().find(|r| r.id() == id) {
            Some(existing) => *existing = record,
            None => self.records.push(record),
        }
    }

    pub fn apply_removed(&mut self, id: &T::Id) {
        self.records.retain(|r| &r.id() != id);
        self.selection.remove(id);
    }

    /// Delete `ids` through `api` and drop the removed records locally.
    /// Stops at the first failure and reports it with the ids removed so far.
    pub async fn remove_records<A>(&mut self, api: &A, ids: &[T::Id]) -> (Vec<T::Id>, Option<ApiError>)
    where
        A: RecordApi<T> + ?Sized,
    {
        let (removed, error) = delete_each(api, ids).await;
        for id in &removed {
            self.apply_removed(id);
        }
        (removed, error)
    }
}

/// One delete request per id, in order, stopping at the first failure.
/// Usable without holding a `ListController` borrow across the awaits.
pub async fn delete_each<T, A>(api: &A, ids: &[T::Id]) -> (Vec<T::Id>, Option<ApiError>)
where
    T: Record,
    A: RecordApi<T> + ?Sized,
{
    let mut removed = Vec::with_capacity(ids.len());
    for id in ids {
        match api.delete(id).await {
            Ok(()) => removed.push(id.clone()),
            Err(err) => {
                log::warn!("deleting {} {} failed: {}", T::RESOURCE, id, err);
                return (removed, Some(err));
            }
        }
    }
    (removed, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::{Call, FakeApi};
    use crate::entities::Room;

    fn rooms() -> Vec<Room> {
        (1..=25)
            .map(|i| Room::sample(i, &format!("{}", 100 + i), if i % 2 == 0 { "North" } else { "South" }))
            .collect()
    }

    async fn loaded(records: Vec<Room>, page_size: usize) -> ListController<Room> {
        let api = FakeApi::new(records);
        let mut list = ListController::new(page_size);
        list.load(&api).await.expect("load");
        list
    }

    #[tokio::test]
    async fn test_load_populates_and_sets_state() {
        let list = loaded(rooms(), 10).await;
        assert_eq!(list.records().len(), 25);
        assert_eq!(list.state(), &LoadState::Loaded);
        assert_eq!(list.view().page_count(), 3);
    }

    #[tokio::test]
    async fn test_failed_load_keeps_last_good_records() {
        let api = FakeApi::new(rooms());
        let mut list = ListController::new(10);
        list.load(&api).await.unwrap();

        api.fail_next(ApiError::Network("connection reset".into()));
        assert!(list.load(&api).await.is_err());
        assert_eq!(list.records().len(), 25);
        assert!(matches!(list.state(), LoadState::LoadError(msg) if !msg.contains("connection reset")));
        assert!(list.error().is_some());
    }

    #[test]
    fn test_stale_response_is_dropped() {
        let mut list: ListController<Room> = ListController::new(10);
        let first = list.begin_load();
        let second = list.begin_load();

        assert!(list.finish_load(second, Ok(vec![Room::sample(2, "201", "North")])));
        assert!(!list.finish_load(first, Ok(vec![Room::sample(1, "101", "North")])));
        assert_eq!(list.records()[0].room_number, "201");
        assert_eq!(list.state(), &LoadState::Loaded);
    }

    #[tokio::test]
    async fn test_search_and_filter_reset_page_and_selection() {
        let mut list = loaded(rooms(), 10).await;
        list.set_page(3);
        list.toggle_select_all();
        assert!(!list.selection().is_empty());

        assert!(list.set_search("12"));
        assert_eq!(list.query().page, 1);
        assert!(list.selection().is_empty());

        list.set_page(2);
        list.toggle_select(1);
        assert!(list.set_filter("building", "North"));
        assert_eq!(list.query().page, 1);
        assert!(list.selection().is_empty());

        list.toggle_select(2);
        assert!(list.set_filter("building", ""));
        assert!(list.selection().is_empty());
    }

    #[tokio::test]
    async fn test_unchanged_search_keeps_state() {
        let mut list = loaded(rooms(), 10).await;
        list.set_page(2);
        assert!(!list.set_search(""));
        assert!(!list.set_filter("status", ""));
        assert_eq!(list.query().page, 2);
    }

    #[tokio::test]
    async fn test_clear_filters_clears_a_lone_search_term() {
        let mut list = loaded(rooms(), 10).await;
        list.set_search("12");
        assert!(list.query().filters.is_empty());

        assert!(list.clear_filters());
        assert_eq!(list.query().search_term, "");
        assert_eq!(list.view().matched, 25);
        assert!(!list.clear_filters());
    }

    #[tokio::test]
    async fn test_toggle_select_all_targets_visible_page() {
        let mut list = loaded(rooms(), 10).await;
        list.set_page(3);
        list.toggle_select_all();
        assert_eq!(list.selection().len(), 5);
        assert!(list.all_visible_selected());

        list.toggle_select_all();
        assert_eq!(list.selection().len(), 0);
    }

    #[tokio::test]
    async fn test_sort_toggles_direction() {
        let mut list = loaded(rooms(), 30).await;
        list.set_sort("room_number");
        assert_eq!(list.view().rows[0].room_number, "101");
        list.set_sort("room_number");
        assert_eq!(list.query().sort_direction, SortDirection::Descending);
        assert_eq!(list.view().rows[0].room_number, "125");
    }

    #[tokio::test]
    async fn test_next_page_stops_at_last() {
        let mut list = loaded(rooms(), 10).await;
        list.next_page();
        list.next_page();
        list.next_page();
        assert_eq!(list.query().page, 3);
        list.previous_page();
        assert_eq!(list.query().page, 2);
    }

    #[test]
    fn test_query_change_invalidates_fetch_in_flight() {
        let mut list: ListController<Room> = ListController::new(10);
        let before = list.begin_load();
        assert!(list.set_search("201"));
        assert!(list.load_superseded());

        assert!(!list.finish_load(before, Ok(vec![Room::sample(1, "101", "North")])));
        assert!(list.records().is_empty());
        assert!(list.is_loading());

        let after = list.begin_load();
        assert!(!list.load_superseded());
        assert!(list.finish_load(after, Ok(vec![Room::sample(2, "201", "North")])));
        assert_eq!(list.view().matched, 1);
        assert!(!list.load_superseded());
    }

    #[tokio::test]
    async fn test_clearing_search_after_reload_restores_every_record() {
        let api = FakeApi::new(rooms());
        let mut list = ListController::new(10);
        list.load(&api).await.unwrap();

        list.set_search("11");
        list.load(&api).await.unwrap();
        assert_eq!(list.records().len(), 25);
        assert_eq!(list.view().matched, 10);

        list.set_search("");
        assert_eq!(list.view().matched, 25);

        list.set_filter("building", "North");
        list.load(&api).await.unwrap();
        list.clear_filters();
        assert_eq!(list.view().matched, 25);
    }

    #[tokio::test]
    async fn test_local_patching() {
        let mut list = loaded(rooms(), 10).await;
        list.toggle_select(3);

        let mut changed = list.find(&3).cloned().unwrap();
        changed.building = "West".into();
        list.apply_updated(changed);
        assert_eq!(list.find(&3).unwrap().building, "West");

        list.apply_removed(&3);
        assert!(list.find(&3).is_none());
        assert!(list.selection().is_empty());

        list.apply_created(Room::sample(99, "999", "East"));
        assert_eq!(list.records().len(), 25);
    }

    #[tokio::test]
    async fn test_remove_records_stops_at_failure() {
        let api = FakeApi::new(rooms());
        let mut list = ListController::new(10);
        list.load(&api).await.unwrap();

        let (removed, err) = list.remove_records(&api, &[1, 2]).await;
        assert_eq!(removed, vec![1, 2]);
        assert!(err.is_none());

        api.fail_next(ApiError::from_status(409, r#"{"message": "Room has tenants"}"#));
        let (removed, err) = list.remove_records(&api, &[4, 5]).await;
        assert!(removed.is_empty());
        assert_eq!(err.map(|e| e.user_message()).as_deref(), Some("Room has tenants"));
        assert_eq!(api.calls().iter().filter(|c| matches!(c, Call::Delete(_))).count(), 3);
        assert_eq!(list.records().len(), 23);
    }
}
