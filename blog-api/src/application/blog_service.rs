use crate::data::post_repository::{NewComment, NewPost, Pagination, PostRepository};
use crate::domain::error::DomainError;
use crate::domain::post::{
    Comment, CreateCommentRequest, CreatePostRequest, Post, PostDetail, validate_positive_id,
};

pub(crate) const DEFAULT_PAGE_SIZE: u32 = 10;
pub(crate) const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone)]
pub(crate) struct ListPostsResult {
    pub(crate) posts: Vec<PostDetail>,
    pub(crate) pagination: Pagination,
}

#[derive(Debug, Clone)]
pub(crate) struct PostView {
    pub(crate) detail: PostDetail,
    pub(crate) like_count: i64,
    pub(crate) comments: Vec<Comment>,
}

pub(crate) struct BlogService<R: PostRepository> {
    repo: R,
}

impl<R: PostRepository> BlogService<R> {
    pub(crate) fn new(repo: R) -> Self {
        Self { repo }
    }

    pub(crate) async fn create_post(
        &self,
        user_id: i64,
        req: CreatePostRequest,
    ) -> Result<Post, DomainError> {
        let req = req.validate()?;

        let new_post = NewPost {
            user_id,
            title: req.title,
            content: req.content,
            hashtags: req.hashtags,
        };
        self.repo.create_post(new_post).await
    }

    pub(crate) async fn get_post(&self, viewer_id: i64, post_id: i64) -> Result<PostView, DomainError> {
        validate_positive_id("post_id", post_id)?;

        let detail = self
            .repo
            .get_post_detail(post_id, viewer_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("post id: {post_id}")))?;
        let like_count = self.repo.count_likes(post_id).await?;
        let comments = self.repo.list_comments(post_id).await?;

        Ok(PostView {
            detail,
            like_count,
            comments,
        })
    }

    /// `page_index` is 1-based.
    pub(crate) async fn list_posts(
        &self,
        viewer_id: i64,
        page_size: u32,
        page_index: u32,
    ) -> Result<ListPostsResult, DomainError> {
        if page_size == 0 || page_size > MAX_PAGE_SIZE {
            return Err(DomainError::Validation {
                field: "page-size",
                message: "must be 1..100",
            });
        }
        if page_index == 0 {
            return Err(DomainError::Validation {
                field: "page-index",
                message: "must be >= 1",
            });
        }

        let limit = i64::from(page_size);
        let pagination = Pagination {
            limit,
            offset: limit * (i64::from(page_index) - 1),
        };
        let posts = self.repo.list_posts(viewer_id, pagination).await?;

        Ok(ListPostsResult { posts, pagination })
    }

    pub(crate) async fn create_comment(
        &self,
        user_id: i64,
        post_id: i64,
        req: CreateCommentRequest,
    ) -> Result<Comment, DomainError> {
        validate_positive_id("post_id", post_id)?;
        let req = req.validate()?;

        self.repo
            .create_comment(NewComment {
                post_id,
                user_id,
                content: req.content,
            })
            .await
    }
}
