use axum::{
    body::{Body, to_bytes},
    extract::{FromRequestParts, Request},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::num::{IntErrorKind, ParseIntError};
use validator::{Validate, ValidationError};

use super::ApiError;
use crate::domain::MovieId;

const MAX_BODY_BYTES: usize = 1024 * 1024;

pub fn validate_movie_id(raw: &str) -> Result<MovieId, ApiError> {
    let id: i32 = raw.trim().parse().map_err(|e: ParseIntError| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => ApiError::validation(
            "id",
            format!("Invalid movie ID: {raw}. ID is out of range"),
        ),
        _ => ApiError::validation("id", format!("Invalid movie ID: {raw}. ID must be an integer")),
    })?;

    if id <= 0 {
        return Err(ApiError::validation(
            "id",
            format!("Invalid movie ID: {id}. ID must be a positive integer"),
        ));
    }

    Ok(MovieId::new(id))
}

/// Rejects empty and whitespace-only strings.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message(Cow::Borrowed("must not be empty")));
    }
    Ok(())
}

/// A request body that passed the validation stage.
#[derive(Debug, Clone)]
pub struct Validated<T>(pub T);

impl<T, S> FromRequestParts<S> for Validated<T>
where
    T: Clone + Send + Sync + 'static,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Validated<T>>()
            .cloned()
            .ok_or_else(|| ApiError::internal("route is missing its validation stage"))
    }
}

/// Pipeline stage: parses the JSON body into `T`, runs its validation rules
/// and stores the result for [`Validated<T>`]. An empty body is read as `{}`
/// so that missing fields are reported individually.
pub async fn validate_json<T>(request: Request, next: Next) -> Result<Response, ApiError>
where
    T: DeserializeOwned + Validate + Clone + Send + Sync + 'static,
{
    let (mut parts, body) = request.into_parts();

    let bytes = to_bytes(body, MAX_BODY_BYTES)
        .await
        .map_err(|e| ApiError::BadRequest(format!("Unreadable request body: {e}")))?;

    let raw: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
        b"{}"
    } else {
        &bytes
    };

    let value: T = serde_json::from_slice(raw)
        .map_err(|e| ApiError::validation("body", format!("Malformed JSON body: {e}")))?;

    value.validate()?;

    parts.extensions.insert(Validated(value));
    let request = Request::from_parts(parts, Body::from(bytes));
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_movie_id() {
        assert_eq!(validate_movie_id("1").unwrap(), MovieId::new(1));
        assert_eq!(validate_movie_id("12345").unwrap(), MovieId::new(12345));
        assert!(validate_movie_id("0").is_err());
        assert!(validate_movie_id("-1").is_err());
        assert!(validate_movie_id("abc").is_err());
        assert!(validate_movie_id("").is_err());
    }

    #[test]
    fn test_overflowing_movie_id_is_out_of_range() {
        let Err(ApiError::Validation(errors)) = validate_movie_id("99999999999") else {
            panic!("expected a validation error");
        };
        assert_eq!(errors[0].field, "id");
        assert!(errors[0].message.contains("out of range"));

        let Err(ApiError::Validation(errors)) = validate_movie_id("abc") else {
            panic!("expected a validation error");
        };
        assert!(errors[0].message.contains("must be an integer"));
    }

    #[test]
    fn test_not_blank() {
        assert!(not_blank("Blade Runner").is_ok());
        assert!(not_blank("").is_err());
        assert!(not_blank("   ").is_err());
    }
}
