// ============================
// session-guard/src/error.rs
// ============================
//! Central error type for the security core.
use thiserror::Error;

/// Library error taxonomy.
///
/// Session hijack detection and CSRF validation failure are deliberately
/// absent: both are expected runtime outcomes and surface as `false` from
/// [`crate::SessionStore::start`] and [`crate::CsrfGuard::validate`].
#[derive(Error, Debug)]
pub enum AppError {
    /// Hasher input violates emptiness/length constraints. A caller bug.
    #[error("invalid secret: {0}")]
    InvalidSecret(String),

    /// Hasher cost/memory/parallelism parameters cannot be represented.
    #[error("invalid hasher configuration: {0}")]
    HasherConfig(String),

    /// Algorithm-level failure while producing a hash.
    #[error("password hashing error: {0}")]
    Hash(#[from] password_hash::Error),

    /// Underlying session or database backend unreachable. Propagated as-is;
    /// retry policy belongs to the caller.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("configuration error: {0}")]
    Config(#[from] figment::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
