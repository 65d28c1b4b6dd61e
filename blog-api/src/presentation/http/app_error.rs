use crate::domain::error::DomainError;
use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid request payload: {0}")]
    Json(#[from] JsonRejection),

    #[error("invalid path parameter: {0}")]
    Path(#[from] PathRejection),

    #[error("invalid query: {0}")]
    Query(#[from] QueryRejection),

    #[error("unauthorized")]
    Unauthorized,

    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

pub(crate) type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, msg) = match self {
            AppError::Domain(err) => domain_status(err),
            AppError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            AppError::Json(err) => (StatusCode::BAD_REQUEST, err.body_text()),
            AppError::Path(err) => (StatusCode::BAD_REQUEST, err.body_text()),
            AppError::Query(err) => (StatusCode::BAD_REQUEST, err.body_text()),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized".to_string()),
            AppError::Internal(err) => {
                error!(error = %err, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: msg })).into_response()
    }
}

fn domain_status(err: DomainError) -> (StatusCode, String) {
    match &err {
        DomainError::Validation { .. } => (StatusCode::BAD_REQUEST, err.to_string()),
        // one message for both, so responses don't reveal which emails are registered
        DomainError::EmailNotFound | DomainError::InvalidCredential => (
            StatusCode::UNAUTHORIZED,
            DomainError::InvalidCredential.to_string(),
        ),
        DomainError::RefreshExpired | DomainError::RefreshInvalid | DomainError::UserNotFound => {
            (StatusCode::UNAUTHORIZED, err.to_string())
        }
        DomainError::NotFound(_) => (StatusCode::NOT_FOUND, err.to_string()),
        DomainError::AlreadyExists(_) | DomainError::NeverLiked => {
            (StatusCode::CONFLICT, err.to_string())
        }
        DomainError::Unexpected(detail) => {
            error!(error = %detail, "unexpected domain error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal error".to_string(),
            )
        }
    }
}
