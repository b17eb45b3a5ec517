//! Admin Page State Machine
//!
//! Composite of list, form and confirm gate for one management page.
//!
//! ```text
//! Idle -> Loading -> Loaded | LoadError
//! Loaded -> Editing -> Submitting -> Loaded | Editing (with error)
//! Loaded -> Confirming -> Deleting -> Loaded
//!                      \-> Loaded (cancelled)
//! ```

use thiserror::Error;

use crate::api::{ApiError, ListParams, RecordApi, Saved};
use crate::confirm::{ConfirmGate, ConfirmPrompt, Confirmer, PendingDelete};
use crate::form::{FormController, FormError, FormMode, FormModel, SubmitRequest};
use crate::list::{ListController, LoadTicket};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagePhase {
    Idle,
    Loading,
    Loaded,
    LoadError,
    Editing { failed: bool },
    Submitting,
    Confirming,
    Deleting,
    Unmounted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageEvent {
    Load,
    LoadSucceeded,
    LoadFailed,
    FilterChanged,
    OpenForm,
    CancelForm,
    Submit,
    SubmitSucceeded,
    SubmitFailed,
    RequestDelete,
    ConfirmAccepted,
    ConfirmRejected,
    DeleteFinished,
    Unmount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{event:?} is not valid while {phase:?}")]
pub struct TransitionError {
    pub phase: PagePhase,
    pub event: PageEvent,
}

impl PagePhase {
    /// Next phase for `event`, or an error if the event does not apply
    pub fn transition(self, event: PageEvent) -> Result<PagePhase, TransitionError> {
        use PageEvent as E;
        use PagePhase as P;

        let next = match (self, event) {
            (_, E::Unmount) => P::Unmounted,
            (P::Unmounted, _) => return Err(TransitionError { phase: self, event }),

            (P::Idle | P::Loaded | P::LoadError | P::Loading, E::Load) => P::Loading,
            (P::Loading, E::LoadSucceeded) => P::Loaded,
            (P::Loading, E::LoadFailed) => P::LoadError,
            (P::Loading | P::Loaded | P::LoadError, E::FilterChanged) => self,

            (P::Loaded, E::OpenForm) => P::Editing { failed: false },
            (P::Editing { .. }, E::CancelForm) => P::Loaded,
            (P::Editing { .. }, E::Submit) => P::Submitting,
            (P::Submitting, E::SubmitSucceeded) => P::Loaded,
            (P::Submitting, E::SubmitFailed) => P::Editing { failed: true },

            (P::Loaded, E::RequestDelete) => P::Confirming,
            (P::Confirming, E::ConfirmAccepted) => P::Deleting,
            (P::Confirming, E::ConfirmRejected) => P::Loaded,
            (P::Deleting, E::DeleteFinished) => P::Loaded,

            _ => return Err(TransitionError { phase: self, event }),
        };
        Ok(next)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PageError {
    #[error(transparent)]
    Transition(#[from] TransitionError),
    #[error(transparent)]
    Form(#[from] FormError),
    #[error("no records selected")]
    NothingSelected,
    #[error("record not found")]
    UnknownRecord,
}

/// What the page should do after a submission was applied
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The saved record was merged into the list
    Merged,
    /// The server did not return the record; the list needs a reload
    NeedsReload(Option<String>),
}

#[derive(Debug, Clone)]
pub struct AdminPage<T: FormModel> {
    noun: &'static str,
    phase: PagePhase,
    list: ListController<T>,
    form: FormController<T>,
    gate: ConfirmGate<PendingDelete<T::Id>>,
    /// Page-level message from the last failed mutation
    banner: Option<String>,
}

impl<T: FormModel> AdminPage<T> {
    pub fn new(noun: &'static str, page_size: usize) -> Self {
        Self {
            noun,
            phase: PagePhase::Idle,
            list: ListController::new(page_size),
            form: FormController::new(),
            gate: ConfirmGate::new(),
            banner: None,
        }
    }

    pub fn noun(&self) -> &'static str {
        self.noun
    }

    pub fn phase(&self) -> PagePhase {
        self.phase
    }

    pub fn list(&self) -> &ListController<T> {
        &self.list
    }

    pub fn form(&self) -> &FormController<T> {
        &self.form
    }

    pub fn gate(&self) -> &ConfirmGate<PendingDelete<T::Id>> {
        &self.gate
    }

    /// Banner text: the last mutation failure, else the last load failure
    pub fn banner(&self) -> Option<String> {
        self.banner
            .clone()
            .or_else(|| self.list.error().map(ApiError::user_message))
    }

    pub fn dismiss_banner(&mut self) {
        self.banner = None;
    }

    fn advance(&mut self, event: PageEvent) -> Result<(), TransitionError> {
        self.phase = self.phase.transition(event)?;
        Ok(())
    }

    // ========================
    // Loading and query
    // ========================

    pub fn begin_load(&mut self) -> Result<LoadTicket, TransitionError> {
        self.advance(PageEvent::Load)?;
        Ok(self.list.begin_load())
    }

    /// Apply a fetch result; stale results are ignored
    pub fn finish_load(&mut self, ticket: LoadTicket, result: Result<Vec<T>, ApiError>) -> bool {
        let succeeded = result.is_ok();
        if !self.list.finish_load(ticket, result) {
            return false;
        }
        let event = if succeeded { PageEvent::LoadSucceeded } else { PageEvent::LoadFailed };
        if let Err(err) = self.advance(event) {
            log::debug!("{} load finished outside Loading: {}", self.noun, err);
        }
        true
    }

    pub async fn load<A: RecordApi<T> + ?Sized>(&mut self, api: &A) -> Result<(), PageError> {
        let ticket = self.begin_load()?;
        let result = api.list(&ListParams::default()).await;
        self.finish_load(ticket, result);
        Ok(())
    }

    pub fn set_search(&mut self, term: impl Into<String>) -> bool {
        let changed = self.list.set_search(term);
        if changed {
            self.note_filter_change();
        }
        changed
    }

    pub fn set_filter(&mut self, field: &str, value: impl Into<String>) -> bool {
        let changed = self.list.set_filter(field, value);
        if changed {
            self.note_filter_change();
        }
        changed
    }

    pub fn clear_filters(&mut self) -> bool {
        let changed = self.list.clear_filters();
        if changed {
            self.note_filter_change();
        }
        changed
    }

    fn note_filter_change(&mut self) {
        // the view is re-derived in any phase; only the phase check can fail
        if let Err(err) = self.advance(PageEvent::FilterChanged) {
            log::debug!("{}: {}", self.noun, err);
        }
    }

    pub fn set_sort(&mut self, key: &str) {
        self.list.set_sort(key);
    }

    pub fn set_page(&mut self, page: usize) {
        self.list.set_page(page);
    }

    pub fn next_page(&mut self) {
        self.list.next_page();
    }

    pub fn previous_page(&mut self) {
        self.list.previous_page();
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.list.set_page_size(page_size);
    }

    pub fn toggle_select(&mut self, id: T::Id) -> bool {
        self.list.toggle_select(id)
    }

    pub fn toggle_select_all(&mut self) {
        self.list.toggle_select_all();
    }

    // ========================
    // Create / edit
    // ========================

    pub fn open_create(&mut self) -> Result<(), TransitionError> {
        self.advance(PageEvent::OpenForm)?;
        self.form.open_create();
        Ok(())
    }

    pub fn open_edit(&mut self, id: &T::Id) -> Result<(), PageError> {
        let record = self.list.find(id).cloned().ok_or(PageError::UnknownRecord)?;
        self.advance(PageEvent::OpenForm)?;
        self.form.open_edit(&record);
        Ok(())
    }

    pub fn set_field(&mut self, name: &str, value: impl Into<String>) {
        self.form.set_field(name, value);
    }

    pub fn cancel_form(&mut self) -> Result<(), TransitionError> {
        self.advance(PageEvent::CancelForm)?;
        self.form.cancel();
        Ok(())
    }

    /// Validate and move to Submitting. An invalid draft stays in Editing
    /// and nothing is sent.
    pub fn begin_submit(&mut self) -> Result<SubmitRequest<T::Id>, PageError> {
        // checked up front so a bad phase never flips the form to submitting
        self.phase.transition(PageEvent::Submit)?;
        let request = self.form.begin_submit()?;
        self.advance(PageEvent::Submit)?;
        Ok(request)
    }

    pub fn finish_submit(&mut self, result: Result<Saved<T>, ApiError>) -> Result<SubmitOutcome, PageError> {
        let mode = self.form.mode().cloned();
        match self.form.finish_submit(result) {
            Ok(saved) => {
                self.advance(PageEvent::SubmitSucceeded)?;
                self.banner = None;
                Ok(match (saved, mode) {
                    (Saved::Record(record), Some(FormMode::Edit(_))) => {
                        self.list.apply_updated(record);
                        SubmitOutcome::Merged
                    }
                    (Saved::Record(record), _) => {
                        self.list.apply_created(record);
                        SubmitOutcome::Merged
                    }
                    (Saved::Acknowledged(message), _) => SubmitOutcome::NeedsReload(message),
                })
            }
            Err(err) => {
                self.advance(PageEvent::SubmitFailed)?;
                Err(err.into())
            }
        }
    }

    pub async fn submit<A: RecordApi<T> + ?Sized>(&mut self, api: &A) -> Result<SubmitOutcome, PageError> {
        let request = self.begin_submit()?;
        let result = match &request.mode {
            FormMode::Create => api.create(&request.body).await,
            FormMode::Edit(id) => api.update(id, &request.body).await,
        };
        self.finish_submit(result)
    }

    // ========================
    // Delete
    // ========================

    /// Ask to delete one record
    pub fn request_delete(&mut self, id: T::Id) -> Result<(), TransitionError> {
        self.advance(PageEvent::RequestDelete)?;
        self.gate.request(ConfirmPrompt::delete(self.noun, 1), PendingDelete::One(id));
        Ok(())
    }

    /// Ask to delete every selected record
    pub fn request_delete_selected(&mut self) -> Result<(), PageError> {
        let ids = self.list.selected_ids();
        if ids.is_empty() {
            return Err(PageError::NothingSelected);
        }
        self.advance(PageEvent::RequestDelete)?;
        self.gate.request(ConfirmPrompt::delete(self.noun, ids.len()), PendingDelete::Many(ids));
        Ok(())
    }

    /// The user declined; nothing is sent
    pub fn reject_delete(&mut self) -> Result<(), TransitionError> {
        self.advance(PageEvent::ConfirmRejected)?;
        self.gate.reject();
        Ok(())
    }

    /// The user affirmed; returns the ids to delete
    pub fn affirm_delete(&mut self) -> Result<Vec<T::Id>, TransitionError> {
        self.phase.transition(PageEvent::ConfirmAccepted)?;
        match self.gate.affirm() {
            Some(pending) => {
                self.advance(PageEvent::ConfirmAccepted)?;
                Ok(pending.ids())
            }
            None => Err(TransitionError { phase: self.phase, event: PageEvent::ConfirmAccepted }),
        }
    }

    /// Resolve the pending delete with a synchronous dialog. `None` means
    /// the user declined.
    pub fn confirm_with<C: Confirmer + ?Sized>(&mut self, confirmer: &C) -> Result<Option<Vec<T::Id>>, TransitionError> {
        let affirmed = match self.gate.prompt() {
            Some(prompt) => confirmer.confirm(prompt),
            None => return Err(TransitionError { phase: self.phase, event: PageEvent::ConfirmAccepted }),
        };
        if affirmed {
            self.affirm_delete().map(Some)
        } else {
            self.reject_delete().map(|_| None)
        }
    }

    /// Apply the outcome of the deletes issued after `affirm_delete`
    pub fn finish_delete(&mut self, removed: &[T::Id], error: Option<ApiError>) {
        for id in removed {
            self.list.apply_removed(id);
        }
        self.banner = error.map(|e| e.user_message());
        if let Err(err) = self.advance(PageEvent::DeleteFinished) {
            log::debug!("{}: {}", self.noun, err);
        }
    }

    /// Affirmed deletes, one request per id
    pub async fn delete_affirmed<A: RecordApi<T> + ?Sized>(&mut self, api: &A, ids: &[T::Id]) -> usize {
        let (removed, error) = self.list.remove_records(api, ids).await;
        self.finish_delete(&removed, error);
        removed.len()
    }

    pub fn unmount(&mut self) {
        self.phase = PagePhase::Unmounted;
        self.form.cancel();
        self.gate.reject();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::{Call, FakeApi};
    use crate::confirm::FixedAnswer;
    use crate::entities::Room;

    async fn loaded_page(api: &FakeApi<Room>) -> AdminPage<Room> {
        let mut page = AdminPage::new("room", 10);
        page.load(api).await.unwrap();
        assert_eq!(page.phase(), PagePhase::Loaded);
        page
    }

    fn two_rooms() -> Vec<Room> {
        vec![Room::sample(1, "101", "North"), Room::sample(2, "201", "North")]
    }

    #[test]
    fn test_transition_table() {
        let phase = PagePhase::Idle.transition(PageEvent::Load).unwrap();
        assert_eq!(phase, PagePhase::Loading);
        assert_eq!(phase.transition(PageEvent::LoadFailed).unwrap(), PagePhase::LoadError);
        assert!(PagePhase::Idle.transition(PageEvent::OpenForm).is_err());
        assert!(PagePhase::Submitting.transition(PageEvent::Submit).is_err());
        assert_eq!(PagePhase::Confirming.transition(PageEvent::Unmount).unwrap(), PagePhase::Unmounted);
        assert!(PagePhase::Unmounted.transition(PageEvent::Load).is_err());
    }

    #[tokio::test]
    async fn test_rejected_delete_sends_nothing() {
        let api = FakeApi::new(two_rooms());
        let mut page = loaded_page(&api).await;

        page.request_delete(1).unwrap();
        assert_eq!(page.phase(), PagePhase::Confirming);
        page.reject_delete().unwrap();

        assert_eq!(page.phase(), PagePhase::Loaded);
        assert_eq!(page.list().records().len(), 2);
        assert_eq!(api.calls(), vec![Call::List]);
    }

    #[tokio::test]
    async fn test_native_dialog_decline_sends_nothing() {
        let api = FakeApi::new(two_rooms());
        let mut page = loaded_page(&api).await;

        page.request_delete(2).unwrap();
        assert_eq!(page.confirm_with(&FixedAnswer(false)).unwrap(), None);
        assert_eq!(api.calls(), vec![Call::List]);
    }

    #[tokio::test]
    async fn test_affirmed_delete_removes_record() {
        let api = FakeApi::new(two_rooms());
        let mut page = loaded_page(&api).await;

        page.request_delete(2).unwrap();
        let ids = page.confirm_with(&FixedAnswer(true)).unwrap().unwrap();
        assert_eq!(page.phase(), PagePhase::Deleting);
        assert_eq!(page.delete_affirmed(&api, &ids).await, 1);

        assert_eq!(page.phase(), PagePhase::Loaded);
        assert_eq!(page.list().records().len(), 1);
        assert_eq!(api.calls(), vec![Call::List, Call::Delete(2)]);
    }

    #[tokio::test]
    async fn test_delete_selected_requires_selection() {
        let api = FakeApi::new(two_rooms());
        let mut page = loaded_page(&api).await;
        assert_eq!(page.request_delete_selected(), Err(PageError::NothingSelected));

        page.toggle_select_all();
        page.request_delete_selected().unwrap();
        assert_eq!(page.gate().prompt().unwrap().title, "Delete 2 rooms");
        let ids = page.affirm_delete().unwrap();
        page.delete_affirmed(&api, &ids).await;
        assert!(page.list().records().is_empty());
        assert!(page.list().selection().is_empty());
    }

    #[tokio::test]
    async fn test_failed_delete_shows_banner() {
        let api = FakeApi::new(two_rooms());
        let mut page = loaded_page(&api).await;
        api.fail_next(ApiError::from_status(500, ""));

        page.request_delete(1).unwrap();
        let ids = page.affirm_delete().unwrap();
        assert_eq!(page.delete_affirmed(&api, &ids).await, 0);
        assert_eq!(page.phase(), PagePhase::Loaded);
        assert_eq!(page.banner().as_deref(), Some(crate::api::GENERIC_FAILURE));
        assert_eq!(page.list().records().len(), 2);
    }

    #[tokio::test]
    async fn test_submit_conflict_returns_to_editing() {
        let api = FakeApi::new(two_rooms());
        let mut page = loaded_page(&api).await;
        page.open_create().unwrap();
        page.set_field("room_number", "101");
        page.set_field("building", "North");
        page.set_field("floor", "1");
        page.set_field("monthly_rent", "400");

        api.fail_next(ApiError::from_status(409, r#"{"message": "Room number already exists"}"#));
        assert!(page.submit(&api).await.is_err());
        assert_eq!(page.phase(), PagePhase::Editing { failed: true });
        assert!(page.form().is_open());
        assert_eq!(page.form().message(), Some("Room number already exists"));

        // retry from the same draft
        let outcome = page.submit(&api).await.unwrap();
        assert_eq!(outcome, SubmitOutcome::Merged);
        assert_eq!(page.phase(), PagePhase::Loaded);
        assert_eq!(page.list().records().len(), 3);
    }

    #[tokio::test]
    async fn test_invalid_submit_stays_editing_without_request() {
        let api = FakeApi::new(two_rooms());
        let mut page = loaded_page(&api).await;
        page.open_create().unwrap();

        assert!(matches!(page.submit(&api).await, Err(PageError::Form(FormError::Invalid(_)))));
        assert_eq!(page.phase(), PagePhase::Editing { failed: false });
        assert_eq!(api.calls(), vec![Call::List]);
    }

    #[tokio::test]
    async fn test_edit_merges_update() {
        let api = FakeApi::new(two_rooms());
        let mut page = loaded_page(&api).await;
        page.open_edit(&1).unwrap();
        page.set_field("building", "East");
        page.submit(&api).await.unwrap();

        assert_eq!(page.list().find(&1).unwrap().building, "East");
        assert_eq!(page.list().records().len(), 2);
    }

    #[tokio::test]
    async fn test_search_during_load_waits_for_next_fetch() {
        let api = FakeApi::new(two_rooms());
        let mut page = AdminPage::new("room", 10);
        let ticket = page.begin_load().unwrap();
        page.set_search("201");

        assert!(!page.finish_load(ticket, Ok(vec![Room::sample(1, "101", "North")])));
        assert_eq!(page.phase(), PagePhase::Loading);
        assert!(page.list().load_superseded());

        page.load(&api).await.unwrap();
        assert_eq!(page.phase(), PagePhase::Loaded);
        assert_eq!(page.list().view().matched, 1);
        page.clear_filters();
        assert_eq!(page.list().view().matched, 2);
    }

    #[tokio::test]
    async fn test_cancel_then_reopen_is_blank() {
        let api = FakeApi::new(two_rooms());
        let mut page = loaded_page(&api).await;
        page.open_create().unwrap();
        page.set_field("room_number", "555");
        page.cancel_form().unwrap();
        page.open_create().unwrap();
        assert_eq!(page.form().draft().unwrap().get("room_number"), "");
    }

    #[tokio::test]
    async fn test_filter_change_while_loaded_resets() {
        let api = FakeApi::new(two_rooms());
        let mut page = loaded_page(&api).await;
        page.toggle_select(1);
        assert!(page.set_search("201"));
        assert_eq!(page.phase(), PagePhase::Loaded);
        assert!(page.list().selection().is_empty());
        assert_eq!(page.list().view().rows.len(), 1);
    }

    #[tokio::test]
    async fn test_load_error_then_manual_retry() {
        let api = FakeApi::new(two_rooms());
        let mut page: AdminPage<Room> = AdminPage::new("room", 10);
        api.fail_next(ApiError::Network("down".into()));
        page.load(&api).await.unwrap();
        assert_eq!(page.phase(), PagePhase::LoadError);
        assert!(page.banner().is_some());

        page.load(&api).await.unwrap();
        assert_eq!(page.phase(), PagePhase::Loaded);
        assert!(page.banner().is_none());
    }
}
