//! `SeaORM` implementation of the `MovieService` trait.

use async_trait::async_trait;

use crate::db::Store;
use crate::domain::MovieId;
use crate::models::{Movie, MovieDraft};
use crate::services::movie_service::{MovieError, MovieService};

pub struct SeaOrmMovieService {
    store: Store,
}

impl SeaOrmMovieService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl MovieService for SeaOrmMovieService {
    async fn list(&self) -> Result<Vec<Movie>, MovieError> {
        Ok(self.store.list_movies().await?)
    }

    async fn get(&self, id: MovieId) -> Result<Movie, MovieError> {
        self.store
            .get_movie(id)
            .await?
            .ok_or(MovieError::NotFound(id))
    }

    async fn create(&self, draft: MovieDraft) -> Result<Movie, MovieError> {
        Ok(self.store.create_movie(&draft).await?)
    }

    async fn update(&self, id: MovieId, draft: MovieDraft) -> Result<Movie, MovieError> {
        self.store
            .update_movie(id, &draft)
            .await
            .map_err(|e| MovieError::from_store(id, e))
    }

    async fn delete(&self, id: MovieId) -> Result<Movie, MovieError> {
        self.store
            .delete_movie(id)
            .await
            .map_err(|e| MovieError::from_store(id, e))
    }
}
