use axum::{
    Router,
    http::HeaderValue,
    middleware,
    routing::{delete, get, post, put},
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::{Config, MissingResourcePolicy};
use crate::services::{AuthService, MovieService, SigningSecret};
use crate::state::SharedState;

pub mod auth;
mod error;
mod movies;
mod observability;
pub mod pipeline;
mod system;
mod types;
pub mod validation;

pub use error::{ApiError, FieldError, panic_response};
pub use pipeline::{Pipeline, StageKind};
pub use types::*;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub start_time: std::time::Instant,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.shared.config
    }

    #[must_use]
    pub fn store(&self) -> &crate::db::Store {
        &self.shared.store
    }

    #[must_use]
    pub fn auth(&self) -> &Arc<dyn AuthService> {
        &self.shared.auth
    }

    #[must_use]
    pub fn movies(&self) -> &Arc<dyn MovieService> {
        &self.shared.movies
    }

    #[must_use]
    pub fn missing_resource(&self) -> MissingResourcePolicy {
        self.shared.config.api.missing_resource
    }
}

#[must_use]
pub fn app_state(shared: Arc<SharedState>, prometheus_handle: Option<PrometheusHandle>) -> Arc<AppState> {
    Arc::new(AppState {
        shared,
        start_time: std::time::Instant::now(),
        prometheus_handle,
    })
}

/// Builds the state with a freshly generated signing secret.
pub async fn create_app_state(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    create_app_state_with_secret(config, SigningSecret::generate(), prometheus_handle).await
}

pub async fn create_app_state_with_secret(
    config: Config,
    secret: SigningSecret,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::with_secret(config, secret).await?);
    Ok(app_state(shared, prometheus_handle))
}

pub fn router(state: Arc<AppState>) -> Router {
    let config = state.config();
    let protect_reads = config.auth.protect_reads;
    let protect_writes = config.auth.protect_writes;
    let cors_origins = config.server.cors_allowed_origins.clone();
    let metrics_enabled = config.observability.metrics_enabled;

    let mut routes = Router::new()
        .route("/", get(system::welcome))
        .route(
            "/register",
            Pipeline::new(&state)
                .validate::<CredentialsRequest>()
                .handle(post(auth::register)),
        )
        .route(
            "/login",
            Pipeline::new(&state)
                .validate::<CredentialsRequest>()
                .handle(post(auth::login)),
        )
        .route(
            "/movies",
            Pipeline::new(&state)
                .authenticate_if(protect_reads)
                .handle(get(movies::list_movies)),
        )
        .route(
            "/movies",
            Pipeline::new(&state)
                .validate::<MovieRequest>()
                .authenticate_if(protect_writes)
                .handle(post(movies::create_movie)),
        )
        .route(
            "/movies/{id}",
            Pipeline::new(&state)
                .authenticate_if(protect_reads)
                .handle(get(movies::get_movie)),
        )
        .route(
            "/movies/{id}",
            Pipeline::new(&state)
                .validate::<MovieRequest>()
                .authenticate_if(protect_writes)
                .handle(put(movies::update_movie)),
        )
        .route(
            "/movies/{id}",
            Pipeline::new(&state)
                .authenticate_if(protect_writes)
                .handle(delete(movies::delete_movie)),
        )
        .route("/health", get(system::health));

    if metrics_enabled {
        routes = routes.route("/metrics", get(observability::get_metrics));
    }

    let cors_layer = if cors_origins.iter().any(|origin| origin == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    // Layers listed last run first: the trace span encloses the request span
    // that the auth gate annotates.
    routes
        .fallback(system::not_found)
        .with_state(state)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(middleware::from_fn(observability::logging_middleware))
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
pub(crate) async fn test_state() -> Arc<AppState> {
    let mut config = Config::default();
    config.database.url = "sqlite::memory:".to_string();
    config.security.argon2_memory_cost_kib = 1024;
    config.security.argon2_time_cost = 1;

    match create_app_state(config, None).await {
        Ok(state) => state,
        Err(e) => panic!("failed to build test state: {e:#}"),
    }
}
