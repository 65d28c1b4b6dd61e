use axum::Router;
use axum::middleware;
use axum::routing::{get, post, put};

use crate::presentation::AppState;
use crate::presentation::http::handlers::posts::{
    create_comment, create_post, get_post, list_posts, upsert_user_activity,
};
use crate::presentation::http::middleware::auth::jwt_auth_middleware;

// Every post route needs a caller: the like flag in listings is per viewer.
pub(crate) fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(list_posts).post(create_post))
        .route("/{id}", get(get_post))
        .route("/{id}/comment", post(create_comment))
        .route("/{id}/user-activity", put(upsert_user_activity))
        .layer(middleware::from_fn_with_state(state, jwt_auth_middleware))
}
