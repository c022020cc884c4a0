//! Session
//!
//! The signed-in state handed to the HTTP layer, persisted through an
//! injected token store.

use std::cell::RefCell;
use std::rc::Rc;

use crate::models::SessionToken;

/// Key under which the access token is persisted
pub const TOKEN_STORAGE_KEY: &str = "access_token";

/// Persistence adapter for the access token
pub trait TokenStore {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str);
    fn clear(&self);
}

/// Token store kept in memory only (tests, private browsing fallback)
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStore {
    token: Rc<RefCell<Option<String>>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        let store = Self::new();
        store.save(token);
        store
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    fn save(&self, token: &str) {
        *self.token.borrow_mut() = Some(token.to_string());
    }

    fn clear(&self) {
        self.token.borrow_mut().take();
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session<S> {
    store: S,
    token: Option<String>,
}

impl<S: TokenStore> Session<S> {
    /// Session as persisted by `store` (signed out if nothing stored)
    pub fn restore(store: S) -> Self {
        let token = store.load().filter(|t| !t.is_empty());
        Self { store, token }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// `Authorization` header value
    pub fn authorization(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    pub fn sign_in(&mut self, token: &SessionToken) {
        self.store.save(&token.access_token);
        self.token = Some(token.access_token.clone());
        log::info!("session started");
    }

    pub fn sign_out(&mut self) {
        self.store.clear();
        if self.token.take().is_some() {
            log::info!("session cleared");
        }
    }
}
