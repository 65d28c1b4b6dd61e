use async_trait::async_trait;

use crate::domain::error::DomainError;
use crate::domain::post::{Comment, Post, PostDetail};

#[derive(Debug, Clone)]
pub(crate) struct NewPost {
    pub(crate) user_id: i64,
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) hashtags: Vec<String>,
}

#[derive(Debug, Clone)]
pub(crate) struct NewComment {
    pub(crate) post_id: i64,
    pub(crate) user_id: i64,
    pub(crate) content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Pagination {
    pub(crate) limit: i64,
    pub(crate) offset: i64,
}

#[async_trait]
pub(crate) trait PostRepository: Send + Sync {
    async fn create_post(&self, input: NewPost) -> Result<Post, DomainError>;
    async fn get_post_detail(
        &self,
        post_id: i64,
        viewer_id: i64,
    ) -> Result<Option<PostDetail>, DomainError>;
    async fn list_posts(
        &self,
        viewer_id: i64,
        pagination: Pagination,
    ) -> Result<Vec<PostDetail>, DomainError>;
    async fn count_likes(&self, post_id: i64) -> Result<i64, DomainError>;
    async fn list_comments(&self, post_id: i64) -> Result<Vec<Comment>, DomainError>;
    async fn create_comment(&self, input: NewComment) -> Result<Comment, DomainError>;
}
