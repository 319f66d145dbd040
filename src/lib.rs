// ============================
// session-guard/src/lib.rs
// ============================
//! Session integrity, CSRF protection and credential hashing.
//!
//! This crate is the security core consumed by a request-handling layer:
//! a fingerprint-bound session store over an abstract backend, a CSRF token
//! lifecycle built on top of it, and a one-way credential hasher. The
//! database and response-envelope modules define the collaborator interfaces
//! the same host layer talks to.

pub mod config;
pub mod csrf;
pub mod db;
pub mod error;
pub mod password;
pub mod response;
pub mod session;
pub mod token;

pub use config::{load_settings, HasherSettings, Settings};
pub use csrf::{CsrfGuard, HiddenField};
pub use error::AppError;
pub use password::{CredentialHasher, HashAlgorithm, MAX_SECRET_LENGTH};
pub use response::{ActionError, Envelope};
pub use session::backend::{CookieParams, MemoryBackend, SessionBackend};
pub use session::fingerprint::TransportIdentity;
pub use session::SessionStore;
pub use token::generate_secure_token;
