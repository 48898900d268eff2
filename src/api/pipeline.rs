//! Per-route stage composition.
//!
//! A [`Pipeline`] collects the stages a route passes through before its
//! handler runs. Stages run in the order they are listed, so
//!
//! ```ignore
//! Pipeline::new(&state)
//!     .validate::<MovieRequest>()
//!     .authenticate()
//!     .handle(post(create_movie))
//! ```
//!
//! rejects a malformed body with 400 before the token is looked at.

use axum::{middleware, routing::MethodRouter};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use validator::Validate;

use super::AppState;
use super::auth::auth_gate;
use super::validation::validate_json;

type Routes = MethodRouter<Arc<AppState>>;
type Stage = Box<dyn FnOnce(Routes) -> Routes>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageKind {
    Validate,
    Authenticate,
}

pub struct Pipeline {
    state: Arc<AppState>,
    stages: Vec<(StageKind, Stage)>,
}

impl Pipeline {
    #[must_use]
    pub fn new(state: &Arc<AppState>) -> Self {
        Self {
            state: Arc::clone(state),
            stages: Vec::new(),
        }
    }

    /// Parse and validate the JSON body as `T`; the handler reads it through
    /// [`Validated<T>`](super::validation::Validated).
    #[must_use]
    pub fn validate<T>(mut self) -> Self
    where
        T: DeserializeOwned + Validate + Clone + Send + Sync + 'static,
    {
        self.stages.push((
            StageKind::Validate,
            Box::new(|routes: Routes| routes.route_layer(middleware::from_fn(validate_json::<T>))),
        ));
        self
    }

    /// Require a valid bearer token.
    #[must_use]
    pub fn authenticate(mut self) -> Self {
        let state = Arc::clone(&self.state);
        self.stages.push((
            StageKind::Authenticate,
            Box::new(move |routes: Routes| {
                routes.route_layer(middleware::from_fn_with_state(state, auth_gate))
            }),
        ));
        self
    }

    #[must_use]
    pub fn authenticate_if(self, enabled: bool) -> Self {
        if enabled { self.authenticate() } else { self }
    }

    #[must_use]
    pub fn stages(&self) -> Vec<StageKind> {
        self.stages.iter().map(|(kind, _)| *kind).collect()
    }

    /// Wraps `routes` so the first listed stage ends up outermost.
    pub fn handle(self, routes: Routes) -> Routes {
        self.stages
            .into_iter()
            .rev()
            .fold(routes, |routes, (_, stage)| stage(routes))
    }
}
