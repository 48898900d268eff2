mod common;

use axum::http::StatusCode;
use common::{body_json, body_text, login_token, send, spawn_app, spawn_app_with, test_config};
use movie_vault::config::MissingResourcePolicy;
use serde_json::json;

fn heat() -> serde_json::Value {
    json!({"title": "Heat", "director": "Michael Mann", "rating": 8.3})
}

#[tokio::test]
async fn test_welcome() {
    let app = spawn_app().await;

    let response = send(&app, "GET", "/", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "Welcome to the Movies API!");
}

#[tokio::test]
async fn test_create_then_get() {
    let app = spawn_app().await;
    let token = login_token(&app, "critic", "popcorn").await;

    let response = send(&app, "POST", "/movies", Some(&token), Some(heat())).await;
    assert_eq!(response.status(), StatusCode::OK);
    let created = body_json(response).await;
    assert_eq!(created["title"], "Heat");
    assert_eq!(created["director"], "Michael Mann");
    assert_eq!(created["rating"], 8.3);

    let id = created["id"].as_i64().unwrap();
    let response = send(&app, "GET", &format!("/movies/{id}"), Some(&token), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, created);
}

#[tokio::test]
async fn test_list_is_ordered_by_id() {
    let app = spawn_app().await;
    let token = login_token(&app, "critic", "popcorn").await;

    for title in ["Alien", "Brazil", "Casablanca"] {
        let body = json!({"title": title, "director": "Someone", "rating": 7});
        let response = send(&app, "POST", "/movies", Some(&token), Some(body)).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = send(&app, "GET", "/movies", Some(&token), None).await;
    let list = body_json(response).await;
    let titles: Vec<&str> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Alien", "Brazil", "Casablanca"]);
}

#[tokio::test]
async fn test_rating_out_of_range_persists_nothing() {
    let app = spawn_app().await;
    let token = login_token(&app, "critic", "popcorn").await;

    for rating in [-1.0, 10.5] {
        let body = json!({"title": "Heat", "director": "Michael Mann", "rating": rating});
        let response = send(&app, "POST", "/movies", Some(&token), Some(body)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = body_json(response).await;
        assert_eq!(json["errors"][0]["field"], "rating");
    }

    let response = send(&app, "GET", "/movies", Some(&token), None).await;
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn test_malformed_json_is_400() {
    let app = spawn_app().await;
    let token = login_token(&app, "critic", "popcorn").await;

    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/movies")
        .header("Authorization", format!("Bearer {token}"))
        .header("Content-Type", "application/json")
        .body(axum::body::Body::from("{\"title\": "))
        .unwrap();
    let response = tower::ServiceExt::oneshot(app, request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["errors"][0]["field"], "body");
}

#[tokio::test]
async fn test_invalid_body_is_rejected_before_auth() {
    let app = spawn_app().await;

    let body = json!({"title": "", "director": "Nobody", "rating": 3});
    let response = send(&app, "POST", "/movies", None, Some(body)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = send(&app, "POST", "/movies", None, Some(heat())).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_update_movie() {
    let app = spawn_app().await;
    let token = login_token(&app, "critic", "popcorn").await;

    let created = body_json(send(&app, "POST", "/movies", Some(&token), Some(heat())).await).await;
    let id = created["id"].as_i64().unwrap();

    let body = json!({"title": "Heat (1995)", "director": "Michael Mann", "rating": 9});
    let response = send(&app, "PUT", &format!("/movies/{id}"), Some(&token), Some(body)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let updated = body_json(response).await;
    assert_eq!(updated["id"], id);
    assert_eq!(updated["title"], "Heat (1995)");
    assert_eq!(updated["rating"], 9.0);

    let bad = json!({"title": "Heat", "director": "Michael Mann", "rating": 11});
    let response = send(&app, "PUT", &format!("/movies/{id}"), Some(&token), Some(bad)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_then_get_is_404() {
    let app = spawn_app().await;
    let token = login_token(&app, "critic", "popcorn").await;

    let created = body_json(send(&app, "POST", "/movies", Some(&token), Some(heat())).await).await;
    let uri = format!("/movies/{}", created["id"]);

    let response = send(&app, "DELETE", &uri, Some(&token), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, created);

    let response = send(&app, "GET", &uri, Some(&token), None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(&app, "DELETE", &uri, Some(&token), None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_null_policy_returns_null_for_missing() {
    let mut config = test_config();
    config.api.missing_resource = MissingResourcePolicy::Null;
    let app = spawn_app_with(config).await;
    let token = login_token(&app, "critic", "popcorn").await;

    let created = body_json(send(&app, "POST", "/movies", Some(&token), Some(heat())).await).await;
    let uri = format!("/movies/{}", created["id"]);
    send(&app, "DELETE", &uri, Some(&token), None).await;

    let response = send(&app, "GET", &uri, Some(&token), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, serde_json::Value::Null);

    let response = send(&app, "PUT", &uri, Some(&token), Some(heat())).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, serde_json::Value::Null);
}

#[tokio::test]
async fn test_non_positive_id_is_400() {
    let app = spawn_app().await;
    let token = login_token(&app, "critic", "popcorn").await;

    for uri in ["/movies/0", "/movies/-4", "/movies/abc"] {
        let response = send(&app, "GET", uri, Some(&token), None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");

        let json = body_json(response).await;
        assert_eq!(json["errors"][0]["field"], "id");
    }
}

#[tokio::test]
async fn test_open_reads_allow_anonymous_get() {
    let mut config = test_config();
    config.auth.protect_reads = false;
    let app = spawn_app_with(config).await;

    let response = send(&app, "GET", "/movies", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(&app, "GET", "/movies/1", None, None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Writes stay guarded.
    let response = send(&app, "POST", "/movies", None, Some(heat())).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_open_writes() {
    let mut config = test_config();
    config.auth.protect_writes = false;
    let app = spawn_app_with(config).await;

    let response = send(&app, "POST", "/movies", None, Some(heat())).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_health() {
    let app = spawn_app().await;

    let response = send(&app, "GET", "/health", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let app = spawn_app().await;

    let response = send(&app, "GET", "/api-docs", None, None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await, json!({"error": "Not found"}));
}

#[tokio::test]
async fn test_metrics_route_follows_config() {
    let app = spawn_app().await;
    let response = send(&app, "GET", "/metrics", None, None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let mut config = test_config();
    config.observability.metrics_enabled = true;
    let app = spawn_app_with(config).await;
    let response = send(&app, "GET", "/metrics", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_strings_are_stored_as_sent() {
    let app = spawn_app().await;
    let token = login_token(&app, "critic", "popcorn").await;

    let body = json!({"title": "  Heat ", "director": " Michael Mann", "rating": 8.3});
    let created = body_json(send(&app, "POST", "/movies", Some(&token), Some(body)).await).await;

    let uri = format!("/movies/{}", created["id"]);
    let fetched = body_json(send(&app, "GET", &uri, Some(&token), None).await).await;
    assert_eq!(fetched["title"], "  Heat ");
    assert_eq!(fetched["director"], " Michael Mann");
}

#[tokio::test]
async fn test_update_missing_movie_is_404() {
    let app = spawn_app().await;
    let token = login_token(&app, "critic", "popcorn").await;

    let response = send(&app, "PUT", "/movies/4242", Some(&token), Some(heat())).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "Movie 4242 not found");
}

#[tokio::test]
async fn test_update_and_delete_require_token() {
    let app = spawn_app().await;
    let token = login_token(&app, "critic", "popcorn").await;

    let created = body_json(send(&app, "POST", "/movies", Some(&token), Some(heat())).await).await;
    let uri = format!("/movies/{}", created["id"]);

    let response = send(&app, "PUT", &uri, None, Some(heat())).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = send(&app, "DELETE", &uri, None, None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Neither call touched the record.
    let response = send(&app, "GET", &uri, Some(&token), None).await;
    assert_eq!(body_json(response).await, created);
}

#[tokio::test]
async fn test_out_of_range_id_is_400() {
    let app = spawn_app().await;
    let token = login_token(&app, "critic", "popcorn").await;

    let response = send(&app, "GET", "/movies/99999999999", Some(&token), None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert!(
        json["errors"][0]["message"]
            .as_str()
            .unwrap()
            .contains("out of range")
    );
}
