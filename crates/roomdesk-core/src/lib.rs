//! RoomDesk Core
//!
//! Framework-agnostic state engine behind every management page:
//! - record: the contract every listed entity implements
//! - query / selection / list: search, filter, sort, pagination and checked rows
//! - form: drafts, validation and the submit lifecycle
//! - confirm: confirmation before destructive actions
//! - page: the composite page state machine
//! - api: error taxonomy, envelope normalization and the REST client
//! - session: authenticated user and token persistence

pub mod api;
pub mod config;
pub mod confirm;
pub mod entities;
pub mod form;
pub mod list;
pub mod page;
pub mod query;
pub mod record;
pub mod selection;
pub mod session;

pub use api::{ApiError, AuthApi, HttpApi, ListParams, RecordApi, RestClient, Saved};
pub use config::{AppConfig, ConfigError};
pub use confirm::{ConfirmGate, ConfirmPrompt, Confirmer, PendingDelete};
pub use form::{FieldErrors, FieldKind, FieldSpec, FormController, FormDraft, FormError, FormMode, FormModel, FormSchema};
pub use list::{delete_each, ListController, LoadState, LoadTicket};
pub use page::{AdminPage, PageError, PageEvent, PagePhase, SubmitOutcome, TransitionError};
pub use query::{apply_query, ListQuery, ListView, SortDirection};
pub use record::{FieldValue, Record};
pub use selection::Selection;
pub use session::{Access, MemoryStore, Role, Session, SessionStore, UserProfile};
