//! Session Store
//!
//! Holds the bearer token and the current user snapshot for the lifetime of
//! the application process, and publishes login-state changes.
//!
//! The session is an explicit context object: clone the handle into every
//! service or task that needs it. All clones share the same storage.
//!
//! ```rust
//! use instaclone::egui_app::session::Session;
//! use instaclone::shared::User;
//!
//! let session = Session::in_memory();
//! session.save_token("Bearer abc");
//! session.save_user(&User { id: Some(1), username: "kari".into(), ..Default::default() }).unwrap();
//! assert!(session.is_logged_in());
//!
//! session.log_out();
//! assert!(session.get_user().is_none());
//! ```

use crate::shared::error::SharedError;
use crate::shared::models::User;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use tokio::sync::watch;

/// Storage key of the bearer token
pub const TOKEN_KEY: &str = "auth-token";
/// Storage key of the JSON user snapshot
pub const USER_KEY: &str = "auth-user";

/// Key/value storage backing a session
pub trait SessionStorage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: String);
    fn remove(&self, key: &str);
    fn clear(&self);
}

/// Process-scoped storage; nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.read().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: String) {
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(key.to_string(), value);
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut entries) = self.entries.write() {
            entries.remove(key);
        }
    }

    fn clear(&self) {
        if let Ok(mut entries) = self.entries.write() {
            entries.clear();
        }
    }
}

struct SessionInner {
    /// `None` for a headless session
    storage: Option<Box<dyn SessionStorage>>,
    logged_in: watch::Sender<bool>,
    /// Bumped on every logout; the UI resets all view state when it changes
    generation: AtomicU64,
}

/// Cheaply cloneable session handle
#[derive(Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("headless", &self.is_headless())
            .field("logged_in", &self.is_logged_in())
            .finish()
    }
}

impl Session {
    pub fn new(storage: Box<dyn SessionStorage>) -> Self {
        Self::build(Some(storage))
    }

    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryStorage::default()))
    }

    /// A session without storage. Every read reports "no session" and every
    /// write is dropped.
    pub fn headless() -> Self {
        Self::build(None)
    }

    fn build(storage: Option<Box<dyn SessionStorage>>) -> Self {
        let logged_in = storage
            .as_ref()
            .map(|s| s.get(USER_KEY).is_some())
            .unwrap_or(false);
        let (tx, _rx) = watch::channel(logged_in);
        Self {
            inner: Arc::new(SessionInner {
                storage,
                logged_in: tx,
                generation: AtomicU64::new(0),
            }),
        }
    }

    pub fn is_headless(&self) -> bool {
        self.inner.storage.is_none()
    }

    pub fn save_token(&self, token: &str) {
        if let Some(storage) = &self.inner.storage {
            storage.set(TOKEN_KEY, token.to_string());
        }
    }

    /// Stored token, if any. An empty token counts as none.
    pub fn get_token(&self) -> Option<String> {
        self.inner
            .storage
            .as_ref()?
            .get(TOKEN_KEY)
            .filter(|t| !t.is_empty())
    }

    /// Value for the `Authorization` header
    pub fn authorization_header(&self) -> Option<String> {
        let token = self.get_token()?;
        if token.starts_with("Bearer ") {
            Some(token)
        } else {
            Some(format!("Bearer {}", token))
        }
    }

    pub fn save_user(&self, user: &User) -> Result<(), SharedError> {
        let Some(storage) = &self.inner.storage else {
            return Ok(());
        };
        storage.set(USER_KEY, serde_json::to_string(user)?);
        self.inner.logged_in.send_replace(true);
        tracing::info!("[SESSION] Stored user {}", user.username);
        Ok(())
    }

    /// Stored user snapshot. A corrupt snapshot counts as none.
    pub fn get_user(&self) -> Option<User> {
        let raw = self.inner.storage.as_ref()?.get(USER_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!("[SESSION] Discarding unreadable user snapshot: {}", e);
                None
            }
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.get_user().is_some()
    }

    /// Login-state signal; the current value is readable immediately.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.inner.logged_in.subscribe()
    }

    /// Logout counter used to detect that a reset is due
    pub fn generation(&self) -> u64 {
        self.inner.generation.load(Ordering::SeqCst)
    }

    /// Drop stored state without signalling a reset (failed sign-in).
    pub fn discard(&self) {
        if let Some(storage) = &self.inner.storage {
            storage.remove(TOKEN_KEY);
            storage.remove(USER_KEY);
        }
    }

    /// Clear everything and request a full reset of in-memory view state.
    pub fn log_out(&self) {
        if let Some(storage) = &self.inner.storage {
            storage.clear();
        }
        self.inner.generation.fetch_add(1, Ordering::SeqCst);
        self.inner.logged_in.send_replace(false);
        tracing::info!("[SESSION] Logged out");
    }
}
