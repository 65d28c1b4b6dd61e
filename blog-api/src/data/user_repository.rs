use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::error::DomainError;
use crate::domain::user::{RefreshToken, User};

#[derive(Debug, Clone)]
pub(crate) struct UserCredentials {
    pub(crate) user: User,
    pub(crate) password_hash: String,
}

#[derive(Debug, Clone)]
pub(crate) struct NewUser {
    pub(crate) username: String,
    pub(crate) email: String,
    pub(crate) password_hash: String,
    pub(crate) created_by: String,
}

#[derive(Debug, Clone)]
pub(crate) struct NewRefreshToken {
    pub(crate) user_id: i64,
    pub(crate) token: String,
    pub(crate) expired_at: DateTime<Utc>,
    pub(crate) created_by: String,
}

/// Credential store: users and their refresh tokens.
#[async_trait]
pub(crate) trait UserRepository: Send + Sync {
    async fn create_user(&self, input: NewUser) -> Result<User, DomainError>;

    /// Any user whose email or username matches.
    async fn find_by_email_or_username(
        &self,
        email: &str,
        username: &str,
    ) -> Result<Option<User>, DomainError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<UserCredentials>, DomainError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError>;

    async fn find_active_refresh_token(
        &self,
        user_id: i64,
        now: DateTime<Utc>,
    ) -> Result<Option<RefreshToken>, DomainError>;

    /// Stores `input` unless the user already holds a token that is still
    /// active at `now`. Returns whichever token is stored afterwards.
    async fn insert_refresh_token_if_absent(
        &self,
        input: NewRefreshToken,
        now: DateTime<Utc>,
    ) -> Result<RefreshToken, DomainError>;
}
