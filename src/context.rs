//! Application Context
//!
//! Shared state provided via Leptos Context API.

use leptos::prelude::*;
use leptos::task::spawn_local;

use roomdesk_core::api::LoginResponse;
use roomdesk_core::{ApiError, AppConfig, AuthApi, HttpApi, Record, RestClient, Session};

use crate::storage::LocalStore;
use crate::store::{redirect_to_login, AppStore, AppStateStoreFields};

/// App-wide session and configuration provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Signed-in user and token
    pub session: RwSignal<Session>,
    config: StoredValue<AppConfig>,
    store: AppStore,
}

impl AppContext {
    pub fn new(config: AppConfig, session: Session, store: AppStore) -> Self {
        Self {
            session: RwSignal::new(session),
            config: StoredValue::new(config),
            store,
        }
    }

    pub fn page_size(&self) -> usize {
        self.config.with_value(|c| c.default_page_size)
    }

    /// REST client carrying the current token
    fn rest(&self) -> RestClient {
        let base = self.config.with_value(|c| c.api_base_url.clone());
        let token = self.session.with_untracked(|s| s.token().map(str::to_string));
        RestClient::new(base, token)
    }

    pub fn records<T: Record>(&self) -> HttpApi<T> {
        HttpApi::new(self.rest())
    }

    pub fn auth(&self) -> AuthApi {
        AuthApi::new(self.rest())
    }

    pub fn sign_in(&self, response: LoginResponse) {
        self.session.write().sign_in(&LocalStore, response.token, response.user);
    }

    /// Log out locally and tell the server; the server call is best effort
    pub fn sign_out(&self) {
        let auth = self.auth();
        self.session.write().sign_out(&LocalStore);
        redirect_to_login(&self.store, crate::routes::Route::Login);
        spawn_local(async move {
            if let Err(e) = auth.logout().await {
                log::debug!("logout request failed: {}", e);
            }
        });
    }

    /// Verify a restored session against `auth/me`
    pub fn verify_session(&self) {
        if !self.session.with_untracked(Session::is_authenticated) {
            return;
        }
        let auth = self.auth();
        let ctx = *self;
        spawn_local(async move {
            let result = auth.me().await;
            let expired = matches!(result, Err(ApiError::Unauthorized));
            ctx.session.write().apply_profile_check(&LocalStore, result);
            if expired {
                ctx.expired();
            }
        });
    }

    /// Route a failed request: a rejected token ends the session
    pub fn check<T>(&self, result: &Result<T, ApiError>) {
        if let Err(err) = result {
            self.check_error(err);
        }
    }

    pub fn check_error(&self, err: &ApiError) {
        if !err.is_unauthorized() {
            return;
        }
        if self.session.with_untracked(Session::is_authenticated) {
            self.session.write().sign_out(&LocalStore);
        }
        self.expired();
    }

    fn expired(&self) {
        let current = self.store.route().get_untracked();
        redirect_to_login(&self.store, current);
        self.store.notice().set(Some("Your session has expired. Please sign in again.".to_string()));
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
