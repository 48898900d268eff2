//! `SeaORM` implementation of the `AuthService` trait.

use async_trait::async_trait;
use tracing::{info, warn};

use crate::db::{Store, StoreError};
use crate::models::User;
use crate::services::auth_service::{AuthError, AuthService, AuthUser};
use crate::services::password::PasswordHasher;
use crate::services::token::{IssuedToken, TokenService};

pub struct SeaOrmAuthService {
    store: Store,
    hasher: PasswordHasher,
    tokens: TokenService,
}

impl SeaOrmAuthService {
    #[must_use]
    pub const fn new(store: Store, hasher: PasswordHasher, tokens: TokenService) -> Self {
        Self {
            store,
            hasher,
            tokens,
        }
    }
}

#[async_trait]
impl AuthService for SeaOrmAuthService {
    async fn register(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let password_hash = self.hasher.hash(password).await?;

        match self.store.create_user(username, &password_hash).await {
            Ok(user) => {
                info!(user_id = %user.id, "Registered user {}", user.username);
                Ok(user)
            }
            Err(StoreError::Conflict(cause)) => {
                warn!(username, "Registration rejected, username taken: {cause}");
                Err(AuthError::RegistrationFailed("username taken".to_string()))
            }
            Err(err) => {
                warn!(username, "Registration failed: {err}");
                Err(AuthError::RegistrationFailed(err.to_string()))
            }
        }
    }

    async fn login(&self, username: &str, password: &str) -> Result<IssuedToken, AuthError> {
        let Some(credentials) = self.store.get_user_credentials(username).await? else {
            return Err(AuthError::InvalidCredentials);
        };

        if !self
            .hasher
            .verify(password, &credentials.password_hash)
            .await?
        {
            return Err(AuthError::InvalidCredentials);
        }

        let issued = self
            .tokens
            .issue(&credentials.user)
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        info!(user_id = %credentials.user.id, "Issued access token");
        Ok(issued)
    }

    fn authenticate(&self, token: &str) -> Result<AuthUser, AuthError> {
        let claims = self.tokens.verify(token)?;
        Ok(AuthUser {
            id: claims.user_id()?,
            username: claims.username,
        })
    }
}
