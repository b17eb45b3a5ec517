//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::routes::Route;

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Page currently shown
    pub route: Route,
    /// Route requested before a login redirect
    pub after_login: Option<Route>,
    /// One-line notice shown above the page (e.g. "Session expired")
    pub notice: Option<String>,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

pub fn navigate(store: &AppStore, route: Route) {
    log::debug!("navigate to {:?}", route);
    store.notice().set(None);
    store.route().set(route);
}

/// Send the user to the login page, remembering where they were going
pub fn redirect_to_login(store: &AppStore, wanted: Route) {
    if wanted.requires_auth() {
        store.after_login().set(Some(wanted));
    }
    store.route().set(Route::Login);
}

/// Leave the login page for the remembered route (rooms by default)
pub fn resume_after_login(store: &AppStore) {
    let next = store.after_login().write().take().unwrap_or(Route::Rooms);
    navigate(store, next);
}
