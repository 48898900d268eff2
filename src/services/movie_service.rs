//! Domain service for the movie catalogue.

use thiserror::Error;

use crate::db::StoreError;
use crate::domain::MovieId;
use crate::models::{Movie, MovieDraft};

#[derive(Debug, Error)]
pub enum MovieError {
    #[error("Movie {0} not found")]
    NotFound(MovieId),

    #[error("Database error: {0}")]
    Database(String),
}

impl MovieError {
    pub(crate) fn from_store(id: MovieId, err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => Self::NotFound(id),
            other => Self::Database(other.to_string()),
        }
    }
}

impl From<StoreError> for MovieError {
    fn from(err: StoreError) -> Self {
        Self::Database(err.to_string())
    }
}

#[async_trait::async_trait]
pub trait MovieService: Send + Sync {
    /// All movies ordered by id.
    async fn list(&self) -> Result<Vec<Movie>, MovieError>;

    /// # Errors
    ///
    /// Returns [`MovieError::NotFound`] if no movie has this id.
    async fn get(&self, id: MovieId) -> Result<Movie, MovieError>;

    async fn create(&self, draft: MovieDraft) -> Result<Movie, MovieError>;

    /// Replaces every field of an existing movie.
    ///
    /// # Errors
    ///
    /// Returns [`MovieError::NotFound`] if no movie has this id.
    async fn update(&self, id: MovieId, draft: MovieDraft) -> Result<Movie, MovieError>;

    /// Removes a movie and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`MovieError::NotFound`] if no movie has this id.
    async fn delete(&self, id: MovieId) -> Result<Movie, MovieError>;
}
