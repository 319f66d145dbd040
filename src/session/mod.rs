// ============================
// session-guard/src/session/mod.rs
// ============================
//! Fingerprint-bound session store.
pub mod backend;
pub mod fingerprint;

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::AppError;
use backend::SessionBackend;
use fingerprint::{constant_time_eq, TransportIdentity};

/// Reserved key holding the session fingerprint digest.
pub const FINGERPRINT_KEY: &str = "fingerprint";
/// Reserved key holding the current CSRF token.
pub const XSRF_KEY: &str = "xsrf";

/// Key/value session state for one in-flight request, bound to the client
/// environment that created it.
///
/// The first `start()` records a keyed fingerprint of the request's
/// transport identity; every later `start()` on the same session recomputes
/// it and destroys the session on mismatch. Not intended for concurrent
/// mutation within a request; cross-request serialization is the backend's
/// job.
pub struct SessionStore<B: SessionBackend> {
    backend: B,
    identity: TransportIdentity,
    name: String,
    secret: String,
}

impl<B: SessionBackend> SessionStore<B> {
    /// Create a store over `backend` for the request described by `identity`.
    ///
    /// `name` is the session cookie name and `secret` the server-held
    /// fingerprint key, both normally taken from [`crate::Settings`].
    pub fn new(
        backend: B,
        identity: TransportIdentity,
        name: impl Into<String>,
        secret: impl Into<String>,
    ) -> Self {
        Self {
            backend,
            identity,
            name: name.into(),
            secret: secret.into(),
        }
    }

    /// Start the session and enforce the fingerprint binding.
    ///
    /// Idempotent: an already-active session returns `Ok(true)` untouched.
    /// Otherwise the backend slot is opened and the request fingerprint is
    /// recorded on first use, or compared in constant time against the
    /// stored one. A mismatch destroys the session and yields `Ok(false)`;
    /// the caller decides whether that means re-authentication.
    pub fn start(&mut self) -> Result<bool, AppError> {
        if self.exists() {
            return Ok(true);
        }
        self.backend.open()?;
        let computed = fingerprint::compute(&self.secret, &self.identity);
        match self.backend.read(FINGERPRINT_KEY) {
            None => {
                self.backend
                    .write(FINGERPRINT_KEY, Value::String(computed));
                debug!(session = %self.name, "session fingerprint bound");
                Ok(true)
            }
            Some(stored) => {
                if constant_time_eq(stored.as_str().unwrap_or(""), &computed) {
                    Ok(true)
                } else {
                    warn!(
                        session = %self.name,
                        user_agent = %self.identity.user_agent,
                        "session fingerprint mismatch, destroying session"
                    );
                    self.destroy();
                    Ok(false)
                }
            }
        }
    }

    /// Whether a session is currently active.
    ///
    /// Always false in non-interactive contexts (detached backends).
    pub fn exists(&self) -> bool {
        self.backend.is_active()
    }

    /// Get a value, or `default` if the key is absent.
    pub fn get(&self, key: &str, default: Value) -> Value {
        self.backend.read(key).unwrap_or(default)
    }

    /// Store a value, overwriting any prior one.
    pub fn put(&mut self, key: &str, value: impl Into<Value>) {
        self.backend.write(key, value.into());
    }

    /// Whether a key is present.
    pub fn has(&self, key: &str) -> bool {
        self.backend.contains(key)
    }

    /// Remove a key; no-op when absent.
    pub fn delete(&mut self, key: &str) {
        self.backend.remove(key);
    }

    /// Read-then-delete in one step.
    ///
    /// Returns the stored value (or `default`) and removes the key, so a
    /// flashed value is visible to at most one reader.
    pub fn flash(&mut self, key: &str, default: Value) -> Value {
        self.backend.remove(key).unwrap_or(default)
    }

    /// Destroy the session.
    ///
    /// Clears all data, expires the session cookie with the attributes it
    /// was issued with, and releases the storage slot. Safe to call on a
    /// session that was never started.
    pub fn destroy(&mut self) -> bool {
        self.backend.clear();
        let expired = self.backend.cookie_params().expired(&self.name);
        debug!(session = %self.name, set_cookie = %expired, "session destroyed");
        self.backend.close()
    }

    /// The underlying backend handle.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The `Set-Cookie` value that invalidates this session's cookie.
    ///
    /// Exposed for the host layer, which owns actual header transmission.
    pub fn expired_cookie(&self) -> String {
        self.backend.cookie_params().expired(&self.name)
    }
}
