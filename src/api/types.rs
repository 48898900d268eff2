use serde::{Deserialize, Serialize};
use validator::Validate;

use super::validation::not_blank;
use crate::models::MovieDraft;

/// Body of `POST /movies` and `PUT /movies/{id}`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct MovieRequest {
    #[validate(
        required(message = "title is required"),
        custom(function = "not_blank")
    )]
    pub title: Option<String>,

    #[validate(
        required(message = "director is required"),
        custom(function = "not_blank")
    )]
    pub director: Option<String>,

    #[validate(
        required(message = "rating is required"),
        range(min = 0.0, max = 10.0, message = "rating must be between 0 and 10")
    )]
    pub rating: Option<f64>,
}

impl MovieRequest {
    /// Only meaningful after validation has passed. Strings are kept as sent.
    #[must_use]
    pub fn into_draft(self) -> MovieDraft {
        MovieDraft {
            title: self.title.unwrap_or_default(),
            director: self.director.unwrap_or_default(),
            rating: self.rating.unwrap_or_default(),
        }
    }
}

/// Body of `POST /register` and `POST /login`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CredentialsRequest {
    #[validate(
        required(message = "username is required"),
        custom(function = "not_blank"),
        length(max = 64, message = "username must be 64 characters or less")
    )]
    pub username: Option<String>,

    #[validate(
        required(message = "password is required"),
        custom(function = "not_blank")
    )]
    pub password: Option<String>,
}

impl CredentialsRequest {
    #[must_use]
    pub fn username(&self) -> &str {
        self.username.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_in: u64,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub uptime_seconds: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(json: serde_json::Value) -> MovieRequest {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_valid_movie() {
        let req = movie(serde_json::json!({
            "title": "Heat",
            "director": "Michael Mann",
            "rating": 8.3
        }));
        assert!(req.validate().is_ok());
        assert_eq!(req.into_draft().title, "Heat");
    }

    #[test]
    fn test_draft_keeps_surrounding_whitespace() {
        let req = movie(serde_json::json!({
            "title": "  Heat ",
            "director": " Michael Mann",
            "rating": 8.3
        }));
        assert!(req.validate().is_ok());

        let draft = req.into_draft();
        assert_eq!(draft.title, "  Heat ");
        assert_eq!(draft.director, " Michael Mann");
    }

    #[test]
    fn test_rating_bounds_are_inclusive() {
        for rating in [0.0, 10.0] {
            let req = movie(serde_json::json!({"title": "a", "director": "b", "rating": rating}));
            assert!(req.validate().is_ok(), "rating {rating} should pass");
        }
        for rating in [-0.1, 10.01, 42.0] {
            let req = movie(serde_json::json!({"title": "a", "director": "b", "rating": rating}));
            let errors = req.validate().unwrap_err();
            assert!(errors.field_errors().contains_key("rating"));
        }
    }

    #[test]
    fn test_missing_and_blank_fields() {
        let req = movie(serde_json::json!({"title": "  "}));
        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("title"));
        assert!(fields.contains_key("director"));
        assert!(fields.contains_key("rating"));
    }

    #[test]
    fn test_credentials_validation() {
        let ok: CredentialsRequest =
            serde_json::from_value(serde_json::json!({"username": " neo ", "password": "x"}))
                .unwrap();
        assert!(ok.validate().is_ok());
        assert_eq!(ok.username(), " neo ");

        let missing: CredentialsRequest =
            serde_json::from_value(serde_json::json!({"username": ""})).unwrap();
        let errors = missing.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("username"));
        assert!(errors.field_errors().contains_key("password"));
    }

    #[test]
    fn test_login_response_is_camel_case() {
        let json = serde_json::to_value(LoginResponse {
            access_token: "t".to_string(),
            token_type: "Bearer",
            expires_in: 3600,
        })
        .unwrap();
        assert_eq!(json["accessToken"], "t");
        assert_eq!(json["expiresIn"], 3600);
    }
}
