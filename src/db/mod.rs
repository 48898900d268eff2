use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, SqlErr, Statement,
};
use std::fmt;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::config::{DatabaseConfig, redact_database_url};
use crate::domain::MovieId;
use crate::models::{Movie, MovieDraft, User};

pub mod migrator;
pub mod repositories;

pub use repositories::user::Credentials;

/// Failure kinds surfaced by the store layer.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Internal(String),
}

impl StoreError {
    pub fn not_found(entity: &str, id: impl fmt::Display) -> Self {
        Self::NotFound(format!("{entity} {id}"))
    }
}

impl From<DbErr> for StoreError {
    fn from(err: DbErr) -> Self {
        if let Some(SqlErr::UniqueConstraintViolation(msg)) = err.sql_err() {
            return Self::Conflict(msg);
        }

        match err {
            DbErr::RecordNotFound(msg) => Self::NotFound(msg),
            other => Self::Internal(other.to_string()),
        }
    }
}

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> anyhow::Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn from_config(config: &DatabaseConfig) -> anyhow::Result<Self> {
        Self::with_pool_options(&config.url, config.max_connections, config.min_connections).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> anyhow::Result<Self> {
        use sea_orm_migration::MigratorTrait;

        let in_memory = db_url.contains(":memory:");

        if !in_memory && let Some(path_str) = db_url.strip_prefix("sqlite:") {
            let path_str = path_str.trim_start_matches("//");
            let path_str = path_str.split('?').next().unwrap_or(path_str);
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        // Each in-memory connection would otherwise be its own database.
        let (max_connections, min_connections) = if in_memory {
            (1, 1)
        } else {
            (max_connections, min_connections)
        };

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            url = %redact_database_url(db_url),
            "Database connected & migrations applied (pool: {}-{})",
            min_connections,
            max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<(), StoreError> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn movie_repo(&self) -> repositories::movie::MovieRepository {
        repositories::movie::MovieRepository::new(self.conn.clone())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    pub async fn list_movies(&self) -> Result<Vec<Movie>, StoreError> {
        self.movie_repo().list_all().await
    }

    pub async fn get_movie(&self, id: MovieId) -> Result<Option<Movie>, StoreError> {
        self.movie_repo().get(id).await
    }

    pub async fn create_movie(&self, draft: &MovieDraft) -> Result<Movie, StoreError> {
        self.movie_repo().create(draft).await
    }

    pub async fn update_movie(&self, id: MovieId, draft: &MovieDraft) -> Result<Movie, StoreError> {
        self.movie_repo().update(id, draft).await
    }

    pub async fn delete_movie(&self, id: MovieId) -> Result<Movie, StoreError> {
        self.movie_repo().delete(id).await
    }

    pub async fn create_user(&self, username: &str, password_hash: &str) -> Result<User, StoreError> {
        self.user_repo().create(username, password_hash).await
    }

    pub async fn get_user_credentials(
        &self,
        username: &str,
    ) -> Result<Option<Credentials>, StoreError> {
        self.user_repo().get_credentials(username).await
    }

    pub async fn count_users(&self) -> Result<u64, StoreError> {
        self.user_repo().count().await
    }
}
