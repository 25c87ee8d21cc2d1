//! Session lifecycle: hydrate from per-tab storage, persist on login, clear
//! on logout, password reset, or any 401.

use std::cell::RefCell;
use std::collections::HashMap;

use leptos::prelude::*;
use tracing::{info, warn};

use crate::api::ApiClient;
use crate::config::AppConfig;
use crate::models::{Session, User};

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";

/// Minimal key/value storage the session is persisted into.
pub trait StorageBackend {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// The browser's `sessionStorage`, which lives as long as the tab.
pub struct BrowserStorage(web_sys::Storage);

impl BrowserStorage {
    pub fn session() -> Option<Self> {
        web_sys::window()?.session_storage().ok().flatten().map(Self)
    }
}

impl StorageBackend for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.0.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if self.0.set_item(key, value).is_err() {
            warn!(key, "failed to write session storage");
        }
    }

    fn remove(&self, key: &str) {
        let _ = self.0.remove_item(key);
    }
}

#[derive(Default)]
pub struct MemoryStorage(RefCell<HashMap<String, String>>);

impl StorageBackend for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.0.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.0.borrow_mut().insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.0.borrow_mut().remove(key);
    }
}

/// Reads and writes a [`Session`] as the `token` and `user` storage keys.
pub struct SessionStore<S> {
    backend: S,
}

impl<S: StorageBackend> SessionStore<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    /// A stored token is required; a missing or corrupt user record degrades
    /// to an empty user rather than discarding the token.
    pub fn load(&self) -> Option<Session> {
        let token = self.backend.get(TOKEN_KEY).filter(|t| !t.trim().is_empty())?;
        let user = self
            .backend
            .get(USER_KEY)
            .and_then(|raw| serde_json::from_str::<User>(&raw).ok())
            .unwrap_or_default();
        Some(Session { token, user })
    }

    pub fn save(&self, session: &Session) {
        self.backend.set(TOKEN_KEY, &session.token);
        match serde_json::to_string(&session.user) {
            Ok(json) => self.backend.set(USER_KEY, &json),
            Err(e) => warn!("failed to serialize user: {}", e),
        }
    }

    pub fn clear(&self) {
        self.backend.remove(TOKEN_KEY);
        self.backend.remove(USER_KEY);
    }
}

fn browser_store() -> Option<SessionStore<BrowserStorage>> {
    BrowserStorage::session().map(SessionStore::new)
}

/// Reactive session handle provided at the root of the component tree.
///
/// Route guards read it on every render, so clearing it is enough to send
/// the user back to the login page.
#[derive(Clone, Copy)]
pub struct SessionContext {
    session: RwSignal<Option<Session>>,
    config: StoredValue<AppConfig>,
}

impl SessionContext {
    /// Restore whatever the tab already holds.
    pub fn hydrate(config: AppConfig) -> Self {
        let restored = browser_store().and_then(|store| store.load());
        if restored.is_some() {
            info!("restored session from storage");
        }
        Self {
            session: RwSignal::new(restored),
            config: StoredValue::new(config),
        }
    }

    /// Tracked read of the current session.
    pub fn current(&self) -> Option<Session> {
        self.session.get()
    }

    pub fn user(&self) -> Option<User> {
        self.session.with(|s| s.as_ref().map(|s| s.user.clone()))
    }

    pub fn is_admin(&self) -> bool {
        self.session
            .with(|s| s.as_ref().map(|s| s.user.is_admin()).unwrap_or(false))
    }

    pub fn token(&self) -> Option<String> {
        self.session
            .with_untracked(|s| s.as_ref().map(|s| s.token.clone()))
            .filter(|t| !t.trim().is_empty())
    }

    pub fn config(&self) -> AppConfig {
        self.config.get_value()
    }

    /// API client carrying the current token, if any.
    pub fn client(&self) -> ApiClient {
        ApiClient::new(self.config.with_value(|c| c.api_url.clone())).with_token(self.token())
    }

    pub fn sign_in(&self, session: Session) {
        if let Some(store) = browser_store() {
            store.save(&session);
        }
        self.session.set(Some(session));
    }

    pub fn sign_out(&self) {
        if let Some(store) = browser_store() {
            store.clear();
        }
        self.session.set(None);
        info!("session cleared");
    }

    /// The backend no longer accepts the token. No-op when already signed out.
    pub fn expire(&self) {
        if self.session.with_untracked(Option::is_none) {
            return;
        }
        warn!("session expired");
        self.sign_out();
    }
}

pub fn use_session() -> SessionContext {
    expect_context::<SessionContext>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    fn sample_session() -> Session {
        Session {
            token: "header.payload.sig".into(),
            user: User {
                id: Some("4".into()),
                name: "Meera".into(),
                email: "meera@example.org".into(),
                role: Some(Role::Admin),
            },
        }
    }

    #[test]
    fn test_empty_storage_is_anonymous() {
        let store = SessionStore::new(MemoryStorage::default());
        assert!(store.load().is_none());
    }

    #[test]
    fn test_save_then_load() {
        let store = SessionStore::new(MemoryStorage::default());
        store.save(&sample_session());
        assert_eq!(store.load(), Some(sample_session()));
    }

    #[test]
    fn test_clear_returns_to_anonymous() {
        let store = SessionStore::new(MemoryStorage::default());
        store.save(&sample_session());
        store.clear();
        assert!(store.load().is_none());
    }

    #[test]
    fn test_token_without_user_still_authenticated() {
        let backend = MemoryStorage::default();
        backend.set(TOKEN_KEY, "abc");
        backend.set(USER_KEY, "{not json");
        let session = SessionStore::new(backend).load().unwrap();
        assert_eq!(session.token, "abc");
        assert_eq!(session.user, User::default());
    }

    #[test]
    fn test_blank_token_ignored() {
        let backend = MemoryStorage::default();
        backend.set(TOKEN_KEY, "   ");
        assert!(SessionStore::new(backend).load().is_none());
    }
}
