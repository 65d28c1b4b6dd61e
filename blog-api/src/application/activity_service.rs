use chrono::Utc;
use tracing::info;

use crate::data::activity_repository::{ActivityChange, ActivityRepository};
use crate::domain::activity::UserActivity;
use crate::domain::error::DomainError;
use crate::domain::post::validate_positive_id;

pub(crate) struct ActivityService<R: ActivityRepository> {
    repo: R,
}

impl<R: ActivityRepository> ActivityService<R> {
    pub(crate) fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Records a like or unlike of `post_id` by `user_id`.
    ///
    /// The first action on a pair must be a like; after that the row flips
    /// freely in both directions. Both branches are single atomic statements.
    pub(crate) async fn upsert_user_activity(
        &self,
        post_id: i64,
        user_id: i64,
        is_liked: bool,
    ) -> Result<UserActivity, DomainError> {
        validate_positive_id("post_id", post_id)?;
        validate_positive_id("user_id", user_id)?;

        let change = ActivityChange {
            post_id,
            user_id,
            is_liked,
            at: Utc::now(),
            actor: user_id.to_string(),
        };

        let activity = if is_liked {
            self.repo.upsert_activity(change).await?
        } else {
            self.repo
                .update_activity(change)
                .await?
                .ok_or(DomainError::NeverLiked)?
        };

        info!(post_id, user_id, is_liked, "user activity recorded");
        Ok(activity)
    }
}

#[cfg(test)]
mod tests {
    use super::ActivityService;
    use crate::data::in_memory::InMemoryStore;
    use crate::domain::error::DomainError;

    #[tokio::test]
    async fn first_like_creates_row() {
        let store = InMemoryStore::new();
        let service = ActivityService::new(store.clone());

        let activity = service
            .upsert_user_activity(5, 1, true)
            .await
            .expect("like must succeed");

        assert!(activity.is_liked);
        assert_eq!(store.activity(5, 1), Some(activity));
        assert_eq!(store.activity_rows(), 1);
    }

    #[tokio::test]
    async fn first_unlike_without_row_is_never_liked() {
        let store = InMemoryStore::new();
        let service = ActivityService::new(store.clone());

        let err = service
            .upsert_user_activity(5, 1, false)
            .await
            .expect_err("unlike must fail");

        assert!(matches!(err, DomainError::NeverLiked));
        assert_eq!(store.activity_rows(), 0);
    }

    #[tokio::test]
    async fn existing_row_toggles_both_ways_without_new_rows() {
        let store = InMemoryStore::new();
        let service = ActivityService::new(store.clone());

        let liked = service.upsert_user_activity(5, 1, true).await.expect("like");
        let unliked = service
            .upsert_user_activity(5, 1, false)
            .await
            .expect("unlike");
        assert_eq!(unliked.id, liked.id);
        assert!(!unliked.is_liked);

        let unliked_again = service
            .upsert_user_activity(5, 1, false)
            .await
            .expect("repeat unlike on existing row");
        assert!(!unliked_again.is_liked);

        let relike = service.upsert_user_activity(5, 1, true).await.expect("relike");
        assert_eq!(relike.id, liked.id);
        assert!(relike.is_liked);
        assert_eq!(store.activity_rows(), 1);
    }

    #[tokio::test]
    async fn rows_are_scoped_per_user_and_post() {
        let store = InMemoryStore::new();
        let service = ActivityService::new(store.clone());

        service.upsert_user_activity(5, 1, true).await.expect("like");

        let other_user = service
            .upsert_user_activity(5, 2, false)
            .await
            .expect_err("other user never liked");
        assert!(matches!(other_user, DomainError::NeverLiked));

        let other_post = service
            .upsert_user_activity(6, 1, false)
            .await
            .expect_err("other post never liked");
        assert!(matches!(other_post, DomainError::NeverLiked));
    }

    #[tokio::test]
    async fn non_positive_ids_are_rejected() {
        let service = ActivityService::new(InMemoryStore::new());

        let err = service
            .upsert_user_activity(0, 1, true)
            .await
            .expect_err("post id must be positive");
        assert!(matches!(err, DomainError::Validation { field: "post_id", .. }));
    }
}
