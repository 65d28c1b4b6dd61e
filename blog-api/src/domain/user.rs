use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

use super::error::DomainError;

const MAX_USERNAME_CHARS: usize = 64;
const MAX_PASSWORD_CHARS: usize = 128;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct SignUpRequest {
    pub(crate) email: String,
    pub(crate) username: String,
    pub(crate) password: String,
}

impl SignUpRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        let email = normalize_email(&self.email)?;
        let username = normalize_username(&self.username)?;
        let password_len = self.password.chars().count();
        if password_len == 0 || password_len > MAX_PASSWORD_CHARS {
            return Err(DomainError::Validation {
                field: "password",
                message: "must be 1..128 chars",
            });
        }
        Ok(Self {
            email,
            username,
            password: self.password,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct LoginRequest {
    pub(crate) email: String,
    pub(crate) password: String,
}

impl LoginRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        let email = normalize_email(&self.email)?;

        // Same bound as sign-up, checked before any lookup so the outcome
        // does not depend on whether the email is registered.
        let password_len = self.password.chars().count();
        if password_len == 0 || password_len > MAX_PASSWORD_CHARS {
            return Err(DomainError::Validation {
                field: "password",
                message: "must be 1..128 chars",
            });
        }
        Ok(Self {
            email,
            password: self.password,
        })
    }
}

#[derive(Debug, Clone)]
pub(crate) struct User {
    pub(crate) id: i64,
    pub(crate) username: String,
    pub(crate) email: String,
    pub(crate) created_at: DateTime<Utc>,
}

impl User {
    pub(crate) fn new(
        id: i64,
        username: impl Into<String>,
        email: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if id <= 0 {
            return Err(DomainError::Validation {
                field: "id",
                message: "must be > 0",
            });
        }
        let username = normalize_username(&username.into())?;
        let email = normalize_email(&email.into())?;

        Ok(Self {
            id,
            username,
            email,
            created_at,
        })
    }
}

/// Persisted opaque refresh token. Only the row whose `expired_at` is still in
/// the future counts as the user's active token.
#[derive(Debug, Clone)]
pub(crate) struct RefreshToken {
    pub(crate) token: String,
    pub(crate) expired_at: DateTime<Utc>,
}

impl RefreshToken {
    pub(crate) fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.expired_at >= now
    }
}

fn normalize_username(username: &str) -> Result<String, DomainError> {
    let username = username.trim();
    if username.is_empty() || username.chars().count() > MAX_USERNAME_CHARS {
        return Err(DomainError::Validation {
            field: "username",
            message: "must be 1..64 chars",
        });
    }
    Ok(username.to_string())
}

fn normalize_email(email: &str) -> Result<String, DomainError> {
    let email = email.trim().to_lowercase();
    if !email.validate_email() {
        return Err(DomainError::Validation {
            field: "email",
            message: "must be a valid email",
        });
    }
    Ok(email)
}
