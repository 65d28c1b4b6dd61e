use axum::Router;
use axum::middleware;
use axum::routing::post;

use crate::presentation::AppState;
use crate::presentation::http::handlers::users::{login, refresh, sign_up};
use crate::presentation::http::middleware::auth::jwt_auth_middleware;

pub(crate) fn router(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/sign-up", post(sign_up))
        .route("/login", post(login));

    let protected = Router::new()
        .route("/refresh", post(refresh))
        .layer(middleware::from_fn_with_state(state, jwt_auth_middleware));

    public.merge(protected)
}
