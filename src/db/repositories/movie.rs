use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use tracing::info;

use crate::db::StoreError;
use crate::domain::MovieId;
use crate::entities::{movies, prelude::*};
use crate::models::{Movie, MovieDraft};

/// Repository for movie CRUD operations
pub struct MovieRepository {
    conn: DatabaseConnection,
}

impl MovieRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list_all(&self) -> Result<Vec<Movie>, StoreError> {
        let rows = Movies::find()
            .order_by_asc(movies::Column::Id)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(Movie::from).collect())
    }

    pub async fn get(&self, id: MovieId) -> Result<Option<Movie>, StoreError> {
        let row = Movies::find_by_id(id.value()).one(&self.conn).await?;
        Ok(row.map(Movie::from))
    }

    pub async fn create(&self, draft: &MovieDraft) -> Result<Movie, StoreError> {
        let active = movies::ActiveModel {
            title: Set(draft.title.clone()),
            director: Set(draft.director.clone()),
            rating: Set(draft.rating),
            ..Default::default()
        };

        let model = active.insert(&self.conn).await?;
        info!(movie_id = model.id, "Created movie '{}'", model.title);
        Ok(Movie::from(model))
    }

    pub async fn update(&self, id: MovieId, draft: &MovieDraft) -> Result<Movie, StoreError> {
        let existing = Movies::find_by_id(id.value())
            .one(&self.conn)
            .await?
            .ok_or_else(|| StoreError::not_found("Movie", id))?;

        let mut active: movies::ActiveModel = existing.into();
        active.title = Set(draft.title.clone());
        active.director = Set(draft.director.clone());
        active.rating = Set(draft.rating);

        let model = active.update(&self.conn).await?;
        Ok(Movie::from(model))
    }

    /// Returns the row as it was before deletion.
    pub async fn delete(&self, id: MovieId) -> Result<Movie, StoreError> {
        let existing = Movies::find_by_id(id.value())
            .one(&self.conn)
            .await?
            .ok_or_else(|| StoreError::not_found("Movie", id))?;

        let result = Movies::delete_by_id(id.value()).exec(&self.conn).await?;
        if result.rows_affected == 0 {
            return Err(StoreError::not_found("Movie", id));
        }

        info!(movie_id = existing.id, "Deleted movie '{}'", existing.title);
        Ok(Movie::from(existing))
    }
}
