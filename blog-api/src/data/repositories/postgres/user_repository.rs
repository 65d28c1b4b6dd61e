use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use super::map_db_error;
use crate::data::user_repository::{NewRefreshToken, NewUser, UserCredentials, UserRepository};
use crate::domain::error::DomainError;
use crate::domain::user::{RefreshToken, User};

#[derive(Debug, Clone)]
pub(crate) struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct UserRow {
    id: i64,
    username: String,
    email: String,
    created_at: DateTime<Utc>,
}

#[derive(FromRow)]
struct UserCredentialsRow {
    id: i64,
    username: String,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

#[derive(FromRow)]
struct RefreshTokenRow {
    refresh_token: String,
    expired_at: DateTime<Utc>,
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create_user(&self, input: NewUser) -> Result<User, DomainError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (email, username, password_hash, created_by, updated_by)
            VALUES ($1, $2, $3, $4, $4)
            RETURNING id, username, email, created_at
            "#,
        )
        .bind(&input.email)
        .bind(&input.username)
        .bind(&input.password_hash)
        .bind(&input.created_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| map_db_error(err, "user"))?;

        map_user_row(row)
    }

    async fn find_by_email_or_username(
        &self,
        email: &str,
        username: &str,
    ) -> Result<Option<User>, DomainError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, email, created_at
            FROM users
            WHERE email = $1 OR username = $2
            LIMIT 1
            "#,
        )
        .bind(email)
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| map_db_error(err, "user"))?;

        row.map(map_user_row).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserCredentials>, DomainError> {
        let row = sqlx::query_as::<_, UserCredentialsRow>(
            r#"
            SELECT
            id,
            username,
            email,
            password_hash,
            created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| map_db_error(err, "user"))?;

        let Some(r) = row else {
            return Ok(None);
        };
        let user = User::new(r.id, r.username, r.email, r.created_at)
            .map_err(|err| DomainError::Unexpected(err.to_string()))?;

        Ok(Some(UserCredentials {
            user,
            password_hash: r.password_hash,
        }))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, email, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| map_db_error(err, "user"))?;

        row.map(map_user_row).transpose()
    }

    async fn find_active_refresh_token(
        &self,
        user_id: i64,
        now: DateTime<Utc>,
    ) -> Result<Option<RefreshToken>, DomainError> {
        let row = sqlx::query_as::<_, RefreshTokenRow>(
            r#"
            SELECT refresh_token, expired_at
            FROM refresh_tokens
            WHERE user_id = $1 AND expired_at >= $2
            "#,
        )
        .bind(user_id)
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| map_db_error(err, "refresh token"))?;

        Ok(row.map(RefreshToken::from))
    }

    async fn insert_refresh_token_if_absent(
        &self,
        input: NewRefreshToken,
        now: DateTime<Utc>,
    ) -> Result<RefreshToken, DomainError> {
        // A still-active row wins over the candidate; an expired one is overwritten.
        let row = sqlx::query_as::<_, RefreshTokenRow>(
            r#"
            INSERT INTO refresh_tokens
                (user_id, refresh_token, expired_at, created_at, updated_at, created_by, updated_by)
            VALUES ($1, $2, $3, $4, $4, $5, $5)
            ON CONFLICT (user_id) DO UPDATE SET
                refresh_token = CASE WHEN refresh_tokens.expired_at < $4
                    THEN EXCLUDED.refresh_token ELSE refresh_tokens.refresh_token END,
                expired_at = CASE WHEN refresh_tokens.expired_at < $4
                    THEN EXCLUDED.expired_at ELSE refresh_tokens.expired_at END,
                updated_at = CASE WHEN refresh_tokens.expired_at < $4
                    THEN EXCLUDED.updated_at ELSE refresh_tokens.updated_at END,
                updated_by = CASE WHEN refresh_tokens.expired_at < $4
                    THEN EXCLUDED.updated_by ELSE refresh_tokens.updated_by END
            RETURNING refresh_token, expired_at
            "#,
        )
        .bind(input.user_id)
        .bind(&input.token)
        .bind(input.expired_at)
        .bind(now)
        .bind(&input.created_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| map_db_error(err, "user"))?;

        Ok(RefreshToken::from(row))
    }
}

impl From<RefreshTokenRow> for RefreshToken {
    fn from(row: RefreshTokenRow) -> Self {
        Self {
            token: row.refresh_token,
            expired_at: row.expired_at,
        }
    }
}

fn map_user_row(row: UserRow) -> Result<User, DomainError> {
    User::new(row.id, row.username, row.email, row.created_at)
        .map_err(|err| DomainError::Unexpected(err.to_string()))
}
