//! Session
//!
//! The signed-in user and bearer token. Constructed explicitly at boot
//! from a `SessionStore` and cleared on logout; nothing else is persisted
//! client-side.

use std::cell::RefCell;

use serde::{Deserialize, Serialize};

use crate::api::ApiError;

/// Permission tiers, lowest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    Staff,
    Admin,
    SuperAdmin,
}

impl Role {
    pub fn label(&self) -> &'static str {
        match self {
            Role::Staff => "Staff",
            Role::Admin => "Admin",
            Role::SuperAdmin => "Super admin",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: u32,
    pub username: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub full_name: Option<String>,
}

impl UserProfile {
    pub fn display_name(&self) -> &str {
        self.full_name.as_deref().unwrap_or(&self.username)
    }
}

/// Key/value persistence for the session (browser localStorage in the app)
pub trait SessionStore {
    fn load(&self) -> Option<String>;
    fn save(&self, value: &str);
    fn clear(&self);
}

/// Process-local store for tests and non-browser targets
#[derive(Debug, Default)]
pub struct MemoryStore {
    value: RefCell<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn load(&self) -> Option<String> {
        self.value.borrow().clone()
    }

    fn save(&self, value: &str) {
        *self.value.borrow_mut() = Some(value.to_string());
    }

    fn clear(&self) {
        *self.value.borrow_mut() = None;
    }
}

/// Storage key used by `SessionStore` implementations
pub const SESSION_KEY: &str = "roomdesk.session";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct StoredSession {
    token: String,
    user: UserProfile,
}

/// Outcome of an access check for a page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Granted,
    RedirectToLogin,
    Forbidden,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    token: Option<String>,
    user: Option<UserProfile>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Rebuild the session saved by a previous visit. Unreadable data is
    /// cleared and yields an anonymous session.
    pub fn restore(store: &dyn SessionStore) -> Self {
        let Some(raw) = store.load() else {
            return Self::anonymous();
        };
        match serde_json::from_str::<StoredSession>(&raw) {
            Ok(stored) if !stored.token.is_empty() => Self { token: Some(stored.token), user: Some(stored.user) },
            _ => {
                log::warn!("discarding unreadable stored session");
                store.clear();
                Self::anonymous()
            }
        }
    }

    pub fn sign_in(&mut self, store: &dyn SessionStore, token: String, user: UserProfile) {
        let stored = StoredSession { token, user };
        match serde_json::to_string(&stored) {
            Ok(raw) => store.save(&raw),
            Err(e) => log::warn!("session not persisted: {}", e),
        }
        log::info!("signed in as {}", stored.user.username);
        self.token = Some(stored.token);
        self.user = Some(stored.user);
    }

    pub fn sign_out(&mut self, store: &dyn SessionStore) {
        store.clear();
        self.token = None;
        self.user = None;
    }

    /// Apply the boot-time `auth/me` check. A rejected token signs out;
    /// other failures keep the cached user.
    pub fn apply_profile_check(&mut self, store: &dyn SessionStore, result: Result<UserProfile, ApiError>) {
        match result {
            Ok(user) => {
                if let Some(token) = self.token.clone() {
                    self.sign_in(store, token, user);
                }
            }
            Err(ApiError::Unauthorized) => {
                log::info!("stored session rejected by server");
                self.sign_out(store);
            }
            Err(err) => log::warn!("could not verify session: {}", err),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|u| u.role)
    }

    /// Check a page that needs a signed-in user with at least `required`
    pub fn access(&self, required: Option<Role>) -> Access {
        if !self.is_authenticated() {
            return Access::RedirectToLogin;
        }
        match (required, self.role()) {
            (None, _) => Access::Granted,
            (Some(required), Some(role)) if role >= required => Access::Granted,
            _ => Access::Forbidden,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Role) -> UserProfile {
        UserProfile { id: 1, username: "desk".into(), role, full_name: None }
    }

    #[test]
    fn test_restore_round_trip() {
        let store = MemoryStore::new();
        let mut session = Session::anonymous();
        session.sign_in(&store, "tok".into(), user(Role::Admin));

        let restored = Session::restore(&store);
        assert_eq!(restored, session);
        assert_eq!(restored.token(), Some("tok"));
    }

    #[test]
    fn test_corrupt_storage_is_cleared() {
        let store = MemoryStore::new();
        store.save("{not json");
        assert!(!Session::restore(&store).is_authenticated());
        assert!(store.load().is_none());
    }

    #[test]
    fn test_sign_out_clears_storage() {
        let store = MemoryStore::new();
        let mut session = Session::anonymous();
        session.sign_in(&store, "tok".into(), user(Role::Staff));
        session.sign_out(&store);
        assert!(store.load().is_none());
        assert_eq!(session.access(None), Access::RedirectToLogin);
    }

    #[test]
    fn test_super_admin_gate() {
        let store = MemoryStore::new();
        let mut session = Session::anonymous();
        assert_eq!(session.access(Some(Role::SuperAdmin)), Access::RedirectToLogin);

        session.sign_in(&store, "tok".into(), user(Role::Admin));
        assert_eq!(session.access(None), Access::Granted);
        assert_eq!(session.access(Some(Role::SuperAdmin)), Access::Forbidden);

        session.sign_in(&store, "tok".into(), user(Role::SuperAdmin));
        assert_eq!(session.access(Some(Role::SuperAdmin)), Access::Granted);
    }

    #[test]
    fn test_profile_check() {
        let store = MemoryStore::new();
        let mut session = Session::anonymous();
        session.sign_in(&store, "tok".into(), user(Role::Staff));

        session.apply_profile_check(&store, Err(ApiError::Network("offline".into())));
        assert!(session.is_authenticated());

        session.apply_profile_check(&store, Ok(user(Role::SuperAdmin)));
        assert_eq!(session.role(), Some(Role::SuperAdmin));
        assert_eq!(Session::restore(&store).role(), Some(Role::SuperAdmin));

        session.apply_profile_check(&store, Err(ApiError::Unauthorized));
        assert!(!session.is_authenticated());
        assert!(store.load().is_none());
    }

    #[test]
    fn test_role_wire_format() {
        let parsed: UserProfile = serde_json::from_str(r#"{"id": 2, "username": "root", "role": "super_admin"}"#).unwrap();
        assert_eq!(parsed.role, Role::SuperAdmin);
    }
}
