use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::DomainError;

const MAX_TITLE_CHARS: usize = 255;
const MAX_HASHTAG_CHARS: usize = 64;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Post {
    pub(crate) id: i64,
    pub(crate) user_id: i64,
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) hashtags: Vec<String>,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

/// A post as seen by a particular reader: joined with the author's username
/// and the reader's own like state.
#[derive(Debug, Clone)]
pub(crate) struct PostDetail {
    pub(crate) id: i64,
    pub(crate) user_id: i64,
    pub(crate) username: String,
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) hashtags: Vec<String>,
    pub(crate) is_liked: bool,
}

#[derive(Debug, Clone)]
pub(crate) struct Comment {
    pub(crate) id: i64,
    pub(crate) post_id: i64,
    pub(crate) user_id: i64,
    pub(crate) username: String,
    pub(crate) content: String,
    pub(crate) created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct CreatePostRequest {
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) hashtags: Vec<String>,
}

impl CreatePostRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        Ok(Self {
            title: normalize_title(&self.title)?,
            content: normalize_content("content", &self.content)?,
            hashtags: normalize_hashtags(self.hashtags)?,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct CreateCommentRequest {
    pub(crate) content: String,
}

impl CreateCommentRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        Ok(Self {
            content: normalize_content("comment_content", &self.content)?,
        })
    }
}

impl Post {
    pub(crate) fn new(
        id: i64,
        user_id: i64,
        title: impl Into<String>,
        content: impl Into<String>,
        hashtags: Vec<String>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        validate_positive_id("id", id)?;
        validate_positive_id("user_id", user_id)?;
        let title = normalize_title(&title.into())?;
        let content = normalize_content("content", &content.into())?;

        if updated_at < created_at {
            return Err(DomainError::Validation {
                field: "updated_at",
                message: "must be >= created_at",
            });
        }

        Ok(Self {
            id,
            user_id,
            title,
            content,
            hashtags,
            created_at,
            updated_at,
        })
    }
}

pub(crate) fn validate_positive_id(field: &'static str, value: i64) -> Result<(), DomainError> {
    if value <= 0 {
        return Err(DomainError::Validation {
            field,
            message: "must be > 0",
        });
    }
    Ok(())
}

fn normalize_title(title: &str) -> Result<String, DomainError> {
    let title = title.trim();
    if title.is_empty() || title.chars().count() > MAX_TITLE_CHARS {
        return Err(DomainError::Validation {
            field: "title",
            message: "must be 1..255 chars",
        });
    }
    Ok(title.to_string())
}

fn normalize_content(field: &'static str, content: &str) -> Result<String, DomainError> {
    let content = content.trim();
    if content.is_empty() {
        return Err(DomainError::Validation {
            field,
            message: "must not be empty",
        });
    }
    Ok(content.to_string())
}

fn normalize_hashtags(hashtags: Vec<String>) -> Result<Vec<String>, DomainError> {
    let mut normalized = Vec::with_capacity(hashtags.len());
    for tag in hashtags {
        let tag = tag.trim();
        if tag.is_empty() {
            continue;
        }
        if tag.chars().count() > MAX_HASHTAG_CHARS || tag.contains(',') {
            return Err(DomainError::Validation {
                field: "hashtags",
                message: "each tag must be 1..64 chars without commas",
            });
        }
        normalized.push(tag.to_string());
    }
    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::{CreateCommentRequest, CreatePostRequest, DomainError, Post};

    #[test]
    fn create_post_request_validate_rejects_empty_title() {
        let req = CreatePostRequest {
            title: "   ".to_string(),
            content: "valid content".to_string(),
            hashtags: Vec::new(),
        };

        let err = req.validate().expect_err("title must be rejected");
        assert_validation_field(err, "title");
    }

    #[test]
    fn create_post_request_drops_blank_hashtags() {
        let req = CreatePostRequest {
            title: "  title  ".to_string(),
            content: "  content  ".to_string(),
            hashtags: vec![" rust ".to_string(), "  ".to_string(), "axum".to_string()],
        };

        let validated = req.validate().expect("must validate");
        assert_eq!(validated.title, "title");
        assert_eq!(validated.content, "content");
        assert_eq!(validated.hashtags, vec!["rust", "axum"]);
    }

    #[test]
    fn create_post_request_rejects_hashtag_with_comma() {
        let req = CreatePostRequest {
            title: "title".to_string(),
            content: "content".to_string(),
            hashtags: vec!["a,b".to_string()],
        };

        let err = req.validate().expect_err("comma must be rejected");
        assert_validation_field(err, "hashtags");
    }

    #[test]
    fn create_comment_request_rejects_blank_content() {
        let req = CreateCommentRequest {
            content: " \n ".to_string(),
        };

        let err = req.validate().expect_err("blank comment must be rejected");
        assert_validation_field(err, "comment_content");
    }

    #[test]
    fn post_new_rejects_non_positive_user_id() {
        let now = Utc::now();
        let err = Post::new(1, 0, "Title", "Content", Vec::new(), now, now)
            .expect_err("user_id must be > 0");
        assert_validation_field(err, "user_id");
    }

    #[test]
    fn post_new_rejects_updated_before_created() {
        let updated_at = Utc::now();
        let created_at = updated_at + Duration::seconds(1);

        let err = Post::new(1, 10, "Title", "Content", Vec::new(), created_at, updated_at)
            .expect_err("updated_at < created_at must fail");
        assert_validation_field(err, "updated_at");
    }

    fn assert_validation_field(err: DomainError, expected_field: &'static str) {
        match err {
            DomainError::Validation { field, .. } => assert_eq!(field, expected_field),
            _ => panic!("expected DomainError::Validation"),
        }
    }
}
