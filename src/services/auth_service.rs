//! Domain service for registration, login and bearer-token authentication.

use thiserror::Error;

use crate::db::StoreError;
use crate::domain::UserId;
use crate::models::User;
use crate::services::password::PasswordError;
use crate::services::token::{IssuedToken, TokenError};

/// Errors specific to authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown username or wrong password. Deliberately indistinguishable.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Registration failed: {0}")]
    RegistrationFailed(String),

    #[error("Invalid token: {0}")]
    InvalidToken(#[from] TokenError),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<PasswordError> for AuthError {
    fn from(err: PasswordError) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Identity attached to a request that passed the auth gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: UserId,
    pub username: String,
}

/// Domain service trait for authentication.
#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Hashes the password and stores a new user.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::RegistrationFailed`] for a taken username or any
    /// store failure.
    async fn register(&self, username: &str, password: &str) -> Result<User, AuthError>;

    /// Verifies credentials and issues an access token.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] if the user does not exist or
    /// the password does not match.
    async fn login(&self, username: &str, password: &str) -> Result<IssuedToken, AuthError>;

    /// Verifies a bearer token without touching the store.
    fn authenticate(&self, token: &str) -> Result<AuthUser, AuthError>;
}
