// =========================
// tests/session_tests.rs
// =========================
//! Unit tests for the session store and fingerprint binding
use serde_json::{json, Value};
use session_guard::{CookieParams, MemoryBackend, SessionStore, TransportIdentity};

const SECRET: &str = "server-held-deployment-secret";

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn identity(user_agent: &str) -> TransportIdentity {
    TransportIdentity::new(user_agent, Some("en-GB".to_string()))
}

fn started_store(backend: MemoryBackend, user_agent: &str) -> SessionStore<MemoryBackend> {
    let mut store = SessionStore::new(backend, identity(user_agent), "session", SECRET);
    assert!(store.start().unwrap());
    store
}

#[test]
fn test_start_is_idempotent() {
    let mut store = started_store(MemoryBackend::new(), "UA-1");
    assert!(store.exists());
    // Second start on an active session is a no-op
    assert!(store.start().unwrap());
    assert!(store.exists());
}

#[test]
fn test_round_trip_and_delete() {
    let mut store = started_store(MemoryBackend::new(), "UA-1");

    store.put("user_id", 42);
    assert_eq!(store.get("user_id", Value::Null), json!(42));
    assert_eq!(store.get("user_id", json!("fallback")), json!(42));
    assert!(store.has("user_id"));

    store.delete("user_id");
    assert!(!store.has("user_id"));
    assert_eq!(store.get("user_id", json!("fallback")), json!("fallback"));

    // Deleting an absent key is a no-op
    store.delete("user_id");
}

#[test]
fn test_put_overwrites() {
    let mut store = started_store(MemoryBackend::new(), "UA-1");
    store.put("theme", "light");
    store.put("theme", "dark");
    assert_eq!(store.get("theme", Value::Null), json!("dark"));
}

#[test]
fn test_flash_visible_to_at_most_one_reader() {
    let mut store = started_store(MemoryBackend::new(), "UA-1");

    store.put("notice", "saved");
    assert_eq!(store.flash("notice", json!("none")), json!("saved"));
    assert_eq!(store.flash("notice", json!("none")), json!("none"));

    // Absent key flashes straight to the default
    assert_eq!(store.flash("missing", json!("d")), json!("d"));
}

#[test]
fn test_fingerprint_binding_survives_same_identity() {
    let mut first = started_store(MemoryBackend::new(), "UA-1");
    first.put("user_id", 7);

    // Next request, same client environment
    let mut next = SessionStore::new(
        first.backend().reopen(),
        identity("UA-1"),
        "session",
        SECRET,
    );
    assert!(next.start().unwrap());
    assert!(next.exists());
    assert_eq!(next.get("user_id", Value::Null), json!(7));
}

#[test]
fn test_hijacked_session_is_destroyed() {
    init_tracing();
    let mut victim = started_store(MemoryBackend::new(), "UA-1");
    victim.put("user_id", 7);

    // Same session slot replayed with a different transport identity
    let mut attacker = SessionStore::new(
        victim.backend().reopen(),
        identity("UA-2"),
        "session",
        SECRET,
    );
    assert!(!attacker.start().unwrap());
    assert!(!attacker.exists());
    assert_eq!(attacker.get("user_id", Value::Null), Value::Null);
}

#[test]
fn test_destroy_clears_everything() {
    let mut store = started_store(MemoryBackend::new(), "UA-1");
    store.put("user_id", 7);

    assert!(store.destroy());
    assert!(!store.exists());
    assert!(!store.has("user_id"));
}

#[test]
fn test_destroy_safe_before_start() {
    let mut store = SessionStore::new(MemoryBackend::new(), identity("UA-1"), "session", SECRET);
    // Nothing to release yet
    assert!(!store.destroy());
    assert!(!store.exists());
}

#[test]
fn test_detached_context_has_no_sessions() {
    let mut store =
        SessionStore::new(MemoryBackend::detached(), identity("cli"), "session", SECRET);
    assert!(!store.exists());
    assert!(store.start().unwrap());
    // Still request-scoped: batch contexts never report an active session
    assert!(!store.exists());
}

#[test]
fn test_expired_cookie_uses_original_attributes() {
    let params = CookieParams {
        path: "/app".to_string(),
        domain: Some("example.test".to_string()),
        secure: true,
        http_only: true,
    };
    let store = SessionStore::new(
        MemoryBackend::with_params(params),
        identity("UA-1"),
        "fwc_session",
        SECRET,
    );
    assert_eq!(
        store.expired_cookie(),
        "fwc_session=; Max-Age=0; Path=/app; Domain=example.test; Secure; HttpOnly"
    );
}
