// ============================
// session-guard/src/csrf.rs
// ============================
//! CSRF token lifecycle over a session store.
use std::fmt;

use serde_json::Value;
use tracing::debug;

use crate::session::{backend::SessionBackend, SessionStore, XSRF_KEY};
use crate::session::fingerprint::constant_time_eq;
use crate::token::generate_secure_token;

/// Per-session anti-forgery guard.
///
/// Exactly one token is valid per session: the one currently stored under
/// the session's reserved key. Issuance always replaces the stored token
/// wholesale; there is no multi-valid-token window.
pub struct CsrfGuard<'a, B: SessionBackend> {
    session: &'a mut SessionStore<B>,
    field_name: String,
}

/// A hidden form field carrying the current token.
///
/// Plain data for templating; `Display` renders the literal markup for
/// hosts that want it verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HiddenField {
    pub name: String,
    pub value: String,
}

impl fmt::Display for HiddenField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<input type=\"hidden\" name=\"{}\" value=\"{}\" />",
            self.name, self.value
        )
    }
}

impl<'a, B: SessionBackend> CsrfGuard<'a, B> {
    /// Guard the given session, naming the form field per configuration.
    pub fn new(session: &'a mut SessionStore<B>, field_name: impl Into<String>) -> Self {
        Self {
            session,
            field_name: field_name.into(),
        }
    }

    /// The currently valid token, generating and persisting one if absent.
    pub fn token(&mut self) -> String {
        self.issue(false)
    }

    /// Issue a token.
    ///
    /// With `force_new` the stored token is rotated unconditionally,
    /// invalidating any outstanding forms; otherwise an existing token is
    /// returned as-is and one is generated only when none is stored.
    pub fn issue(&mut self, force_new: bool) -> String {
        if !force_new {
            if let Value::String(existing) = self.session.get(XSRF_KEY, Value::Null) {
                return existing;
            }
        }
        let token = generate_secure_token();
        self.session.put(XSRF_KEY, token.clone());
        debug!(field = %self.field_name, rotated = force_new, "csrf token issued");
        token
    }

    /// Validate a client-submitted token. Fail closed.
    ///
    /// False when the submission is empty, when the session holds no
    /// token, or when the constant-time comparison fails. Never an error:
    /// stale forms are an expected outcome callers branch on.
    pub fn validate(&self, submitted: &str) -> bool {
        if submitted.is_empty() {
            return false;
        }
        match self.session.get(XSRF_KEY, Value::Null) {
            Value::String(stored) if !stored.is_empty() => constant_time_eq(submitted, &stored),
            _ => false,
        }
    }

    /// The hidden form field for the current token.
    pub fn hidden_field(&mut self) -> HiddenField {
        HiddenField {
            name: self.field_name.clone(),
            value: self.token(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_field_markup() {
        let field = HiddenField {
            name: "csrf_token".to_string(),
            value: "abc123".to_string(),
        };
        assert_eq!(
            field.to_string(),
            "<input type=\"hidden\" name=\"csrf_token\" value=\"abc123\" />"
        );
    }
}
