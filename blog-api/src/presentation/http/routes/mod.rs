use axum::Router;
use axum::routing::get;

use crate::presentation::AppState;
use crate::presentation::http::handlers::health::{healthz, readyz};

pub(crate) mod posts;
pub(crate) mod users;

pub(crate) fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .nest("/users", users::router(state.clone()))
        .nest("/posts", posts::router(state.clone()))
        .with_state(state)
}
