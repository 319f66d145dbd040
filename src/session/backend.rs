// ============================
// session-guard/src/session/backend.rs
// ============================
//! Session storage abstraction with an in-memory implementation.
use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;

use crate::error::AppError;

/// Cookie attributes the session identifier was issued with.
///
/// Kept by the backend so destruction can expire the cookie with the
/// same attributes it was originally set with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieParams {
    pub path: String,
    pub domain: Option<String>,
    pub secure: bool,
    pub http_only: bool,
}

impl Default for CookieParams {
    fn default() -> Self {
        Self {
            path: "/".to_string(),
            domain: None,
            secure: true,
            http_only: true,
        }
    }
}

impl CookieParams {
    /// Build a `Set-Cookie` value that expires the named cookie.
    pub fn expired(&self, name: &str) -> String {
        let mut cookie = format!("{name}=; Max-Age=0; Path={}", self.path);
        if let Some(domain) = &self.domain {
            cookie.push_str("; Domain=");
            cookie.push_str(domain);
        }
        if self.secure {
            cookie.push_str("; Secure");
        }
        if self.http_only {
            cookie.push_str("; HttpOnly");
        }
        cookie
    }
}

/// Trait for server-side session backends.
///
/// One handle corresponds to one in-flight request. The backend owns all
/// persistence and per-session serialization; this crate layers no locking
/// of its own on top. Idle expiry is backend configuration, not modelled
/// here.
pub trait SessionBackend {
    /// Open the underlying session slot, creating it if needed.
    fn open(&mut self) -> Result<(), AppError>;

    /// Whether a session is active for this handle.
    fn is_active(&self) -> bool;

    /// Read a value.
    fn read(&self, key: &str) -> Option<Value>;

    /// Write a value, overwriting any prior one.
    fn write(&mut self, key: &str, value: Value);

    /// Remove a key, returning its value. Atomic with respect to the
    /// backend's per-session serialization; backs `flash`.
    fn remove(&mut self, key: &str) -> Option<Value>;

    /// Whether a key is present.
    fn contains(&self, key: &str) -> bool;

    /// Drop all stored values.
    fn clear(&mut self);

    /// Attributes the session cookie was issued with.
    fn cookie_params(&self) -> CookieParams;

    /// Release the storage slot. Returns whether anything was released.
    fn close(&mut self) -> bool;
}

/// In-memory implementation of [`SessionBackend`].
///
/// The slot is shared between clones, modelling successive requests
/// hitting the same server-side session; the activity flag is per handle,
/// since "session started" is a request-scoped notion.
#[derive(Clone)]
pub struct MemoryBackend {
    slot: Arc<Mutex<HashMap<String, Value>>>,
    params: CookieParams,
    active: bool,
    interactive: bool,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::with_params(CookieParams::default())
    }

    pub fn with_params(params: CookieParams) -> Self {
        Self {
            slot: Arc::new(Mutex::new(HashMap::new())),
            params,
            active: false,
            interactive: true,
        }
    }

    /// A handle for non-interactive contexts (batch jobs, CLI tools).
    /// Sessions are a request-scoped concept, so it never reports active.
    pub fn detached() -> Self {
        Self {
            interactive: false,
            ..Self::new()
        }
    }

    /// A fresh handle onto the same slot, as the next request would get.
    pub fn reopen(&self) -> Self {
        Self {
            slot: Arc::clone(&self.slot),
            params: self.params.clone(),
            active: false,
            interactive: self.interactive,
        }
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionBackend for MemoryBackend {
    fn open(&mut self) -> Result<(), AppError> {
        if self.interactive {
            self.active = true;
        }
        Ok(())
    }

    fn is_active(&self) -> bool {
        self.interactive && self.active
    }

    fn read(&self, key: &str) -> Option<Value> {
        self.slot.lock().get(key).cloned()
    }

    fn write(&mut self, key: &str, value: Value) {
        self.slot.lock().insert(key.to_string(), value);
    }

    fn remove(&mut self, key: &str) -> Option<Value> {
        self.slot.lock().remove(key)
    }

    fn contains(&self, key: &str) -> bool {
        self.slot.lock().contains_key(key)
    }

    fn clear(&mut self) {
        self.slot.lock().clear();
    }

    fn cookie_params(&self) -> CookieParams {
        self.params.clone()
    }

    fn close(&mut self) -> bool {
        let was_active = self.active;
        self.active = false;
        was_active
    }
}
