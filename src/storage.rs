//! Browser Storage
//!
//! `SessionStore` over `window.localStorage`. Storage failures (private
//! mode, quota) are logged and otherwise ignored.

use roomdesk_core::session::SESSION_KEY;
use roomdesk_core::SessionStore;

#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStore;

impl LocalStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

impl SessionStore for LocalStore {
    fn load(&self) -> Option<String> {
        Self::storage()?.get_item(SESSION_KEY).ok().flatten()
    }

    fn save(&self, value: &str) {
        let saved = Self::storage().map(|s| s.set_item(SESSION_KEY, value).is_ok());
        if saved != Some(true) {
            log::warn!("localStorage unavailable; session will not survive a reload");
        }
    }

    fn clear(&self) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(SESSION_KEY);
        }
    }
}
