use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use super::map_db_error;
use crate::data::activity_repository::{ActivityChange, ActivityRepository};
use crate::domain::activity::UserActivity;
use crate::domain::error::DomainError;

#[derive(Debug, Clone)]
pub(crate) struct PostgresActivityRepository {
    pool: PgPool,
}

impl PostgresActivityRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct UserActivityRow {
    id: i64,
    post_id: i64,
    user_id: i64,
    is_liked: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<UserActivityRow> for UserActivity {
    fn from(row: UserActivityRow) -> Self {
        Self {
            id: row.id,
            post_id: row.post_id,
            user_id: row.user_id,
            is_liked: row.is_liked,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl ActivityRepository for PostgresActivityRepository {
    async fn upsert_activity(&self, change: ActivityChange) -> Result<UserActivity, DomainError> {
        let row = sqlx::query_as::<_, UserActivityRow>(
            r#"
            INSERT INTO user_activities
                (post_id, user_id, is_liked, created_at, updated_at, created_by, updated_by)
            VALUES ($1, $2, $3, $4, $4, $5, $5)
            ON CONFLICT (post_id, user_id) DO UPDATE SET
                is_liked = EXCLUDED.is_liked,
                updated_at = EXCLUDED.updated_at,
                updated_by = EXCLUDED.updated_by
            RETURNING id, post_id, user_id, is_liked, created_at, updated_at
            "#,
        )
        .bind(change.post_id)
        .bind(change.user_id)
        .bind(change.is_liked)
        .bind(change.at)
        .bind(&change.actor)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| map_db_error(err, &format!("post id: {}", change.post_id)))?;

        Ok(row.into())
    }

    async fn update_activity(
        &self,
        change: ActivityChange,
    ) -> Result<Option<UserActivity>, DomainError> {
        let row = sqlx::query_as::<_, UserActivityRow>(
            r#"
            UPDATE user_activities
            SET is_liked = $3, updated_at = $4, updated_by = $5
            WHERE post_id = $1 AND user_id = $2
            RETURNING id, post_id, user_id, is_liked, created_at, updated_at
            "#,
        )
        .bind(change.post_id)
        .bind(change.user_id)
        .bind(change.is_liked)
        .bind(change.at)
        .bind(&change.actor)
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| map_db_error(err, &format!("post id: {}", change.post_id)))?;

        Ok(row.map(UserActivity::from))
    }
}
