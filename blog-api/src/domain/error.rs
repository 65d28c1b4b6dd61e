use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum DomainError {
    #[error("validation failed for '{field}': {message}")]
    Validation {
        field: &'static str,
        message: &'static str,
    },

    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("resource already exists: {0}")]
    AlreadyExists(String),

    #[error("email not found")]
    EmailNotFound,

    #[error("email or password is invalid")]
    InvalidCredential,

    #[error("refresh token has expired")]
    RefreshExpired,

    #[error("refresh token is invalid")]
    RefreshInvalid,

    #[error("user not found")]
    UserNotFound,

    #[error("never liked this post")]
    NeverLiked,

    #[error("unexpected domain error: {0}")]
    Unexpected(String),
}
