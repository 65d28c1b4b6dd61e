use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::activity::UserActivity;
use crate::domain::error::DomainError;

#[derive(Debug, Clone)]
pub(crate) struct ActivityChange {
    pub(crate) post_id: i64,
    pub(crate) user_id: i64,
    pub(crate) is_liked: bool,
    pub(crate) at: DateTime<Utc>,
    pub(crate) actor: String,
}

#[async_trait]
pub(crate) trait ActivityRepository: Send + Sync {
    /// Inserts the row or overwrites `is_liked` on the existing one, atomically.
    async fn upsert_activity(&self, change: ActivityChange) -> Result<UserActivity, DomainError>;

    /// Updates an existing row only; `None` when the pair has no row yet.
    async fn update_activity(
        &self,
        change: ActivityChange,
    ) -> Result<Option<UserActivity>, DomainError>;
}
