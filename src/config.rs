// ============================
// session-guard/src/config.rs
// ============================
//! Configuration management.
use anyhow::Result;
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;

use crate::password::HashAlgorithm;

/// Library settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Name of the session cookie
    pub session_name: String,
    /// Server-held secret keying the session fingerprint HMAC.
    /// Must be distinct per deployment; the default is unusable on purpose.
    pub fingerprint_secret: String,
    /// Form field name carrying the CSRF token
    pub csrf_field: String,
    /// Credential hasher parameters
    pub hasher: HasherSettings,
}

/// Credential hasher parameters
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HasherSettings {
    /// One-way hash family
    pub algorithm: HashAlgorithm,
    /// Work factor: argon2 iteration count, or scrypt log2(N)
    pub cost: u32,
    /// Memory cost in KiB (argon2 only)
    pub memory_cost: Option<u32>,
    /// Degree of parallelism
    pub parallelism: Option<u32>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            session_name: "session".to_string(),
            fingerprint_secret: String::new(),
            csrf_field: "csrf_token".to_string(),
            hasher: HasherSettings::default(),
        }
    }
}

impl Default for HasherSettings {
    fn default() -> Self {
        Self {
            algorithm: HashAlgorithm::Argon2id,
            cost: 2,
            memory_cost: Some(19 * 1024), // 19 MiB, OWASP minimum for argon2id
            parallelism: Some(1),
        }
    }
}

/// Load settings from various sources
pub fn load_settings() -> Result<Settings> {
    // Config file first, then environment variables
    let settings = Figment::new()
        .merge(Toml::file("session-guard.toml"))
        .merge(Env::prefixed("SESSION_GUARD_").split("__"))
        .extract()?;

    Ok(settings)
}
