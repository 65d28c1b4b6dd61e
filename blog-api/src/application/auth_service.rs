use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::{info, warn};

use crate::data::user_repository::{NewRefreshToken, NewUser, UserRepository};
use crate::domain::error::DomainError;
use crate::domain::user::{LoginRequest, SignUpRequest, User};
use crate::infrastructure::jwt::{JwtService, TokenError};
use crate::infrastructure::password::{PasswordError, PasswordHasher};

#[derive(Debug, Clone)]
pub(crate) struct LoginTokens {
    pub(crate) access_token: String,
    pub(crate) refresh_token: String,
}

pub(crate) struct AuthService<R: UserRepository> {
    repo: R,
    jwt: Arc<JwtService>,
    hasher: PasswordHasher,
    refresh_ttl: Duration,
}

impl<R: UserRepository> AuthService<R> {
    pub(crate) fn new(
        repo: R,
        jwt: Arc<JwtService>,
        hasher: PasswordHasher,
        refresh_ttl_seconds: i64,
    ) -> Self {
        Self {
            repo,
            jwt,
            hasher,
            refresh_ttl: Duration::seconds(refresh_ttl_seconds),
        }
    }

    /// Registers a new account. No tokens are issued; the caller logs in next.
    pub(crate) async fn sign_up(&self, req: SignUpRequest) -> Result<User, DomainError> {
        let req = req.validate()?;

        if self
            .repo
            .find_by_email_or_username(&req.email, &req.username)
            .await?
            .is_some()
        {
            return Err(DomainError::AlreadyExists("username or email".to_string()));
        }

        let password_hash = self.hasher.hash(&req.password).map_err(map_password_error)?;

        let user = self
            .repo
            .create_user(NewUser {
                created_by: req.email.clone(),
                username: req.username,
                email: req.email,
                password_hash,
            })
            .await?;

        info!(user_id = user.id, created_at = %user.created_at, "user signed up");
        Ok(user)
    }

    pub(crate) async fn login(&self, req: LoginRequest) -> Result<LoginTokens, DomainError> {
        let req = req.validate()?;

        let Some(creds) = self.repo.find_by_email(&req.email).await? else {
            self.hasher.verify_decoy(&req.password);
            return Err(DomainError::EmailNotFound);
        };

        let matches = self
            .hasher
            .verify(&creds.password_hash, &req.password)
            .map_err(map_password_error)?;
        if !matches {
            warn!(user_id = creds.user.id, "login rejected: wrong password");
            return Err(DomainError::InvalidCredential);
        }

        let user = creds.user;
        let access_token = self
            .jwt
            .issue_access(user.id, &user.username, &user.email)
            .map_err(map_token_error)?;

        let now = Utc::now();
        if let Some(existing) = self.repo.find_active_refresh_token(user.id, now).await?
            && existing.is_active_at(now)
            && !existing.token.is_empty()
        {
            info!(user_id = user.id, "login: reusing active refresh token");
            return Ok(LoginTokens {
                access_token,
                refresh_token: existing.token,
            });
        }

        let candidate = self.jwt.issue_refresh().map_err(map_token_error)?;
        let stored = self
            .repo
            .insert_refresh_token_if_absent(
                NewRefreshToken {
                    user_id: user.id,
                    token: candidate,
                    expired_at: now + self.refresh_ttl,
                    created_by: user.id.to_string(),
                },
                now,
            )
            .await?;

        info!(user_id = user.id, expired_at = %stored.expired_at, "login: refresh token issued");
        Ok(LoginTokens {
            access_token,
            refresh_token: stored.token,
        })
    }

    /// Exchanges the caller's stored refresh token for a fresh access token.
    /// The refresh token itself is not rotated.
    pub(crate) async fn validate_refresh_token(
        &self,
        user_id: i64,
        presented: &str,
    ) -> Result<String, DomainError> {
        let now = Utc::now();
        let stored = self
            .repo
            .find_active_refresh_token(user_id, now)
            .await?
            .filter(|token| token.is_active_at(now) && !token.token.is_empty());

        let Some(stored) = stored else {
            warn!(user_id, "refresh rejected: no active refresh token");
            return Err(DomainError::RefreshExpired);
        };

        if stored.token != presented {
            warn!(user_id, "refresh rejected: token mismatch");
            return Err(DomainError::RefreshInvalid);
        }

        let user = self
            .repo
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound)?;

        self.jwt
            .issue_access(user.id, &user.username, &user.email)
            .map_err(map_token_error)
    }
}

fn map_password_error(err: PasswordError) -> DomainError {
    match err {
        PasswordError::TooLong { .. } => DomainError::Validation {
            field: "password",
            message: "is too long",
        },
        PasswordError::Hash(msg) => DomainError::Unexpected(msg),
    }
}

fn map_token_error(err: TokenError) -> DomainError {
    DomainError::Unexpected(err.to_string())
}
