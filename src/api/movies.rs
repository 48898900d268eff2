use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;

use super::validation::{Validated, validate_movie_id};
use super::{ApiError, AppState, MovieRequest};
use crate::config::MissingResourcePolicy;
use crate::models::Movie;
use crate::services::MovieError;

/// Applies the configured missing-resource policy to a single-movie result.
fn resolve(
    policy: MissingResourcePolicy,
    result: Result<Movie, MovieError>,
) -> Result<Json<Option<Movie>>, ApiError> {
    match result {
        Ok(movie) => Ok(Json(Some(movie))),
        Err(MovieError::NotFound(_)) if policy == MissingResourcePolicy::Null => Ok(Json(None)),
        Err(err) => Err(err.into()),
    }
}

pub async fn list_movies(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Movie>>, ApiError> {
    let movies = state.movies().list().await?;
    Ok(Json(movies))
}

pub async fn get_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Option<Movie>>, ApiError> {
    let id = validate_movie_id(&id)?;
    resolve(state.missing_resource(), state.movies().get(id).await)
}

pub async fn create_movie(
    State(state): State<Arc<AppState>>,
    Validated(payload): Validated<MovieRequest>,
) -> Result<Json<Movie>, ApiError> {
    let movie = state.movies().create(payload.into_draft()).await?;
    Ok(Json(movie))
}

pub async fn update_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Validated(payload): Validated<MovieRequest>,
) -> Result<Json<Option<Movie>>, ApiError> {
    let id = validate_movie_id(&id)?;
    let result = state.movies().update(id, payload.into_draft()).await;
    resolve(state.missing_resource(), result)
}

pub async fn delete_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Option<Movie>>, ApiError> {
    let id = validate_movie_id(&id)?;
    resolve(state.missing_resource(), state.movies().delete(id).await)
}
