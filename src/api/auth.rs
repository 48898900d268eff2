use axum::{
    Json,
    extract::{Request, State},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use super::validation::Validated;
use super::{ApiError, AppState, CredentialsRequest, LoginResponse};
use crate::models::User;

// ============================================================================
// Middleware
// ============================================================================

enum BearerToken {
    Missing,
    Malformed,
    Present(String),
}

fn extract_bearer_token(headers: &HeaderMap) -> BearerToken {
    let Some(header) = headers.get(AUTHORIZATION) else {
        return BearerToken::Missing;
    };

    let Ok(value) = header.to_str() else {
        return BearerToken::Malformed;
    };

    match value.trim().split_once(' ') {
        Some((scheme, token)) if scheme.eq_ignore_ascii_case("Bearer") && !token.trim().is_empty() => {
            BearerToken::Present(token.trim().to_string())
        }
        _ => BearerToken::Malformed,
    }
}

/// Auth gate: 401 without an `Authorization` header, 403 for a token that is
/// malformed, tampered with or expired. On success the caller's
/// [`AuthUser`](crate::services::AuthUser) is added to the request extensions.
pub async fn auth_gate(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = match extract_bearer_token(request.headers()) {
        BearerToken::Missing => {
            return Err(ApiError::Unauthorized(
                "Authorization header required".to_string(),
            ));
        }
        BearerToken::Malformed => {
            return Err(ApiError::Forbidden("Invalid or expired token".to_string()));
        }
        BearerToken::Present(token) => token,
    };

    let user = state.auth().authenticate(&token)?;

    tracing::Span::current().record("user_id", user.id.value());
    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /register
pub async fn register(
    State(state): State<Arc<AppState>>,
    Validated(payload): Validated<CredentialsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user: User = state
        .auth()
        .register(payload.username(), payload.password())
        .await?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// POST /login
/// Unknown user and wrong password produce the same 403.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Validated(payload): Validated<CredentialsRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let issued = state
        .auth()
        .login(payload.username(), payload.password())
        .await?;

    Ok(Json(LoginResponse {
        access_token: issued.token,
        token_type: "Bearer",
        expires_in: issued.expires_in,
    }))
}
