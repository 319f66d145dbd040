// ============================
// session-guard/src/password.rs
// ============================
//! Credential hashing and verification.
//!
//! Output is PHC-string format: the algorithm id, its parameters and the
//! salt are embedded in the hash itself, so verification needs no external
//! state and old hashes stay verifiable after a cost or algorithm change.
use argon2::Argon2;
use scrypt::Scrypt;
use password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use rand::rngs::OsRng;
use serde::Deserialize;
use zeroize::Zeroize;

use crate::config::HasherSettings;
use crate::error::AppError;

/// Maximum accepted secret length in bytes
pub const MAX_SECRET_LENGTH: usize = 1024;

/// Supported one-way hash families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    Argon2id,
    Scrypt,
}

/// One-way hasher for user secrets.
///
/// Parameters are fixed at construction. The struct holds no mutable
/// state and is safe to share across threads.
pub struct CredentialHasher {
    algorithm: HashAlgorithm,
    argon2: Argon2<'static>,
    scrypt_params: scrypt::Params,
}

impl CredentialHasher {
    /// Build a hasher from settings, validating parameters up front.
    pub fn new(settings: &HasherSettings) -> Result<Self, AppError> {
        let argon2 = match settings.algorithm {
            HashAlgorithm::Argon2id => {
                let params = argon2::Params::new(
                    settings.memory_cost.unwrap_or(argon2::Params::DEFAULT_M_COST),
                    settings.cost,
                    settings.parallelism.unwrap_or(argon2::Params::DEFAULT_P_COST),
                    None,
                )
                .map_err(|e| AppError::HasherConfig(e.to_string()))?;
                Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params)
            }
            HashAlgorithm::Scrypt => Argon2::default(),
        };
        let scrypt_params = match settings.algorithm {
            HashAlgorithm::Scrypt => {
                let log_n = u8::try_from(settings.cost)
                    .map_err(|_| AppError::HasherConfig("scrypt cost exceeds u8".to_string()))?;
                scrypt::Params::new(
                    log_n,
                    8,
                    settings.parallelism.unwrap_or(1),
                    scrypt::Params::RECOMMENDED_LEN,
                )
                .map_err(|e| AppError::HasherConfig(e.to_string()))?
            }
            HashAlgorithm::Argon2id => scrypt::Params::recommended(),
        };

        Ok(Self {
            algorithm: settings.algorithm,
            argon2,
            scrypt_params,
        })
    }

    /// Hash a secret with a fresh random salt.
    ///
    /// Repeated calls on the same input produce different hashes.
    pub fn hash(&self, secret: &str) -> Result<String, AppError> {
        check_secret(secret)?;
        let salt = SaltString::generate(&mut OsRng);
        let hash = match self.algorithm {
            HashAlgorithm::Argon2id => self
                .argon2
                .hash_password(secret.as_bytes(), &salt)?
                .to_string(),
            HashAlgorithm::Scrypt => Scrypt
                .hash_password_customized(
                    secret.as_bytes(),
                    None,
                    None,
                    self.scrypt_params,
                    &salt,
                )?
                .to_string(),
        };
        Ok(hash)
    }

    /// Hash a secret and zeroize the plaintext.
    pub fn hash_secure(&self, secret: &mut String) -> Result<String, AppError> {
        let hash = self.hash(secret)?;
        secret.zeroize();
        Ok(hash)
    }

    /// Verify a secret against a stored hash.
    ///
    /// The algorithm and parameters come from the hash itself, so any hash
    /// this crate ever produced verifies regardless of current settings.
    /// Garbage hashes and mismatches both return false, never an error.
    /// Digest comparison is the verifiers' own constant-time check.
    pub fn verify(&self, secret: &str, hash: &str) -> bool {
        let parsed = match PasswordHash::new(hash) {
            Ok(h) => h,
            Err(_) => return false,
        };
        let argon2 = Argon2::default();
        let verifiers: [&dyn PasswordVerifier; 2] = [&argon2, &Scrypt];
        parsed.verify_password(&verifiers, secret).is_ok()
    }
}

fn check_secret(secret: &str) -> Result<(), AppError> {
    if secret.is_empty() {
        return Err(AppError::InvalidSecret("secret is empty".to_string()));
    }
    if secret.len() > MAX_SECRET_LENGTH {
        return Err(AppError::InvalidSecret(format!(
            "secret exceeds {MAX_SECRET_LENGTH} bytes"
        )));
    }
    Ok(())
}
