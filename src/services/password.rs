//! Salted one-way password hashing.
//!
//! Argon2id with a fresh random salt per hash. The salt and cost parameters are
//! embedded in the PHC output, so verification needs only the stored string.

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{
        PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString, rand_core::OsRng,
    },
};
use thiserror::Error;
use tokio::task;

use crate::config::SecurityConfig;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("Invalid Argon2 params: {0}")]
    InvalidParams(String),

    #[error("Failed to hash password: {0}")]
    Hash(String),

    #[error("Stored password hash is malformed: {0}")]
    MalformedHash(String),

    #[error("Password task failed: {0}")]
    Task(String),
}

#[derive(Clone)]
pub struct PasswordHasher {
    params: Params,
}

impl PasswordHasher {
    pub fn new(config: &SecurityConfig) -> Result<Self, PasswordError> {
        let params = Params::new(
            config.argon2_memory_cost_kib,
            config.argon2_time_cost,
            config.argon2_parallelism,
            None,
        )
        .map_err(|e| PasswordError::InvalidParams(e.to_string()))?;

        Ok(Self { params })
    }

    /// Hashes on the blocking pool; Argon2 would stall the runtime otherwise.
    pub async fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let params = self.params.clone();
        let password = password.to_string();

        task::spawn_blocking(move || hash_with_params(&password, params))
            .await
            .map_err(|e| PasswordError::Task(e.to_string()))?
    }

    /// `Ok(false)` on mismatch. A hash that does not parse is an error.
    pub async fn verify(&self, password: &str, password_hash: &str) -> Result<bool, PasswordError> {
        let password = password.to_string();
        let password_hash = password_hash.to_string();

        task::spawn_blocking(move || verify_hash(&password, &password_hash))
            .await
            .map_err(|e| PasswordError::Task(e.to_string()))?
    }
}

fn hash_with_params(password: &str, params: Params) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError::Hash(e.to_string()))?;

    Ok(hash.to_string())
}

fn verify_hash(password: &str, password_hash: &str) -> Result<bool, PasswordError> {
    let parsed =
        PasswordHash::new(password_hash).map_err(|e| PasswordError::MalformedHash(e.to_string()))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
