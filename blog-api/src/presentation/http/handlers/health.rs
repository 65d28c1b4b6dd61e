use anyhow::anyhow;
use axum::{extract::State, http::StatusCode};

use crate::infrastructure::database;
use crate::presentation::AppState;
use crate::presentation::http::app_error::{AppError, AppResult};

#[utoipa::path(
    get,
    path = "/healthz",
    tag = "health",
    responses(
        (status = 200, description = "Process is alive")
    )
)]
pub(crate) async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[utoipa::path(
    get,
    path = "/readyz",
    tag = "health",
    responses(
        (status = 200, description = "Database reachable"),
        (status = 500, description = "Database unreachable")
    )
)]
pub(crate) async fn readyz(State(state): State<AppState>) -> AppResult<StatusCode> {
    database::ping(&state.pool)
        .await
        .map_err(|err| AppError::Internal(anyhow!("database ping failed: {err}")))?;
    Ok(StatusCode::OK)
}
