use chrono::{DateTime, Utc};

/// Like state of one user on one post. At most one row exists per
/// `(post_id, user_id)`; "unlike" keeps the row and flips `is_liked`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct UserActivity {
    pub(crate) id: i64,
    pub(crate) post_id: i64,
    pub(crate) user_id: i64,
    pub(crate) is_liked: bool,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}
