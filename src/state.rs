use anyhow::Context;
use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::db::Store;
use crate::services::{
    AuthService, MovieService, PasswordHasher, SeaOrmAuthService, SeaOrmMovieService,
    SigningSecret, TokenService,
};

/// Process-wide services, built once at startup and shared read-only.
#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub store: Store,

    pub auth: Arc<dyn AuthService>,

    pub movies: Arc<dyn MovieService>,
}

impl SharedState {
    /// Tokens signed with `secret` are the only ones this state accepts.
    pub async fn with_secret(config: Config, secret: SigningSecret) -> anyhow::Result<Self> {
        let store = Store::from_config(&config.database)
            .await
            .context("Failed to initialize database")?;

        let hasher =
            PasswordHasher::new(&config.security).context("Invalid [security] argon2 settings")?;
        let tokens = TokenService::new(
            &secret,
            Duration::from_secs(config.auth.token_ttl_seconds),
        );

        let auth: Arc<dyn AuthService> =
            Arc::new(SeaOrmAuthService::new(store.clone(), hasher, tokens));
        let movies: Arc<dyn MovieService> = Arc::new(SeaOrmMovieService::new(store.clone()));

        Ok(Self {
            config: Arc::new(config),
            store,
            auth,
            movies,
        })
    }
}
