// ============================
// session-guard/src/session/fingerprint.rs
// ============================
//! Session fingerprint computation.
//!
//! The fingerprint binds a session to the client environment that created
//! it: a leaked session identifier replayed from a different environment
//! fails the comparison and the session is destroyed. Input is the
//! user-agent plus accept-language pair; two independent signals keep the
//! false-hijack rate down while still catching cookie theft across
//! dissimilar clients.
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Client-presented transport identity headers for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportIdentity {
    /// User-Agent header value
    pub user_agent: String,
    /// Accept-Language header value, when the client sent one
    pub accept_language: Option<String>,
}

impl TransportIdentity {
    pub fn new(user_agent: impl Into<String>, accept_language: Option<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
            accept_language,
        }
    }
}

/// Compute the keyed fingerprint digest for a request identity.
///
/// HMAC-SHA256 over `user_agent|accept_language`, keyed with the
/// deployment secret, base64 URL-safe encoded.
pub fn compute(secret: &str, identity: &TransportIdentity) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts keys of any size");
    mac.update(identity.user_agent.as_bytes());
    mac.update(b"|");
    mac.update(identity.accept_language.as_deref().unwrap_or("").as_bytes());
    URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes())
}

/// Constant-time string equality.
///
/// Running time is independent of where the inputs first differ.
pub fn constant_time_eq(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_deterministic() {
        let identity = TransportIdentity::new("UA-1", Some("en-GB".to_string()));
        assert_eq!(compute("secret", &identity), compute("secret", &identity));
    }

    #[test]
    fn test_fingerprint_varies_with_identity_and_key() {
        let a = TransportIdentity::new("UA-1", Some("en-GB".to_string()));
        let b = TransportIdentity::new("UA-2", Some("en-GB".to_string()));
        let c = TransportIdentity::new("UA-1", None);
        assert_ne!(compute("secret", &a), compute("secret", &b));
        assert_ne!(compute("secret", &a), compute("secret", &c));
        assert_ne!(compute("secret", &a), compute("other", &a));
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq("abc", "abc"));
        assert!(!constant_time_eq("abc", "abd"));
        assert!(!constant_time_eq("abc", "abcd"));
        assert!(constant_time_eq("", ""));
    }
}
