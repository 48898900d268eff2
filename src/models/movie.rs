use serde::{Deserialize, Serialize};

use crate::domain::MovieId;
use crate::entities::movies;

/// A stored movie as exposed by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    pub director: String,
    pub rating: f64,
}

impl From<movies::Model> for Movie {
    fn from(model: movies::Model) -> Self {
        Self {
            id: MovieId::new(model.id),
            title: model.title,
            director: model.director,
            rating: model.rating,
        }
    }
}

/// Field values for creating or replacing a movie. Already validated.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieDraft {
    pub title: String,
    pub director: String,
    pub rating: f64,
}
