#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
};
use http_body_util::BodyExt;
use movie_vault::config::Config;
use movie_vault::services::SigningSecret;
use serde_json::Value;
use tower::ServiceExt;

pub fn test_config() -> Config {
    let mut config = Config::default();
    config.database.url = "sqlite::memory:".to_string();
    config.observability.metrics_enabled = false;
    config.security.argon2_memory_cost_kib = 1024;
    config.security.argon2_time_cost = 1;
    config
}

pub async fn spawn_app_with(config: Config) -> Router {
    let state = movie_vault::api::create_app_state(config, None)
        .await
        .expect("Failed to create app state");
    movie_vault::api::router(state)
}

pub async fn spawn_app() -> Router {
    spawn_app_with(test_config()).await
}

/// Each call gets its own in-memory database.
pub async fn spawn_app_with_secret(secret: SigningSecret) -> Router {
    let state = movie_vault::api::create_app_state_with_secret(test_config(), secret, None)
        .await
        .expect("Failed to create app state");
    movie_vault::api::router(state)
}

pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    app.clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap()
}

pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn register(app: &Router, username: &str, password: &str) -> Response {
    send(
        app,
        "POST",
        "/register",
        None,
        Some(serde_json::json!({"username": username, "password": password})),
    )
    .await
}

/// Registers `username` and returns a fresh access token.
pub async fn login_token(app: &Router, username: &str, password: &str) -> String {
    let response = register(app, username, password).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = send(
        app,
        "POST",
        "/login",
        None,
        Some(serde_json::json!({"username": username, "password": password})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    body_json(response).await["accessToken"]
        .as_str()
        .expect("accessToken missing")
        .to_string()
}
