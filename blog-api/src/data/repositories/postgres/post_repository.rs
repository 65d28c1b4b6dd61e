use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use super::map_db_error;
use crate::data::post_repository::{NewComment, NewPost, Pagination, PostRepository};
use crate::domain::error::DomainError;
use crate::domain::post::{Comment, Post, PostDetail};

#[derive(Debug, Clone)]
pub(crate) struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct PostRow {
    id: i64,
    user_id: i64,
    post_title: String,
    post_content: String,
    post_hashtags: Vec<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(FromRow)]
struct PostDetailRow {
    id: i64,
    user_id: i64,
    username: String,
    post_title: String,
    post_content: String,
    post_hashtags: Vec<String>,
    is_liked: bool,
}

#[derive(FromRow)]
struct CommentRow {
    id: i64,
    post_id: i64,
    user_id: i64,
    username: String,
    comment_content: String,
    created_at: DateTime<Utc>,
}

impl From<PostDetailRow> for PostDetail {
    fn from(row: PostDetailRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            username: row.username,
            title: row.post_title,
            content: row.post_content,
            hashtags: row.post_hashtags,
            is_liked: row.is_liked,
        }
    }
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        Self {
            id: row.id,
            post_id: row.post_id,
            user_id: row.user_id,
            username: row.username,
            content: row.comment_content,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create_post(&self, input: NewPost) -> Result<Post, DomainError> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            INSERT INTO posts (user_id, post_title, post_content, post_hashtags, created_by, updated_by)
            VALUES ($1, $2, $3, $4, $5, $5)
            RETURNING id, user_id, post_title, post_content, post_hashtags, created_at, updated_at
            "#,
        )
        .bind(input.user_id)
        .bind(&input.title)
        .bind(&input.content)
        .bind(&input.hashtags)
        .bind(input.user_id.to_string())
        .fetch_one(&self.pool)
        .await
        .map_err(|err| map_db_error(err, "user"))?;

        Post::new(
            row.id,
            row.user_id,
            row.post_title,
            row.post_content,
            row.post_hashtags,
            row.created_at,
            row.updated_at,
        )
        .map_err(|err| DomainError::Unexpected(err.to_string()))
    }

    async fn get_post_detail(
        &self,
        post_id: i64,
        viewer_id: i64,
    ) -> Result<Option<PostDetail>, DomainError> {
        let row = sqlx::query_as::<_, PostDetailRow>(
            r#"
            SELECT
            p.id,
            p.user_id,
            u.username,
            p.post_title,
            p.post_content,
            p.post_hashtags,
            COALESCE(ua.is_liked, FALSE) AS is_liked
            FROM posts p
            JOIN users u ON u.id = p.user_id
            LEFT JOIN user_activities ua ON ua.post_id = p.id AND ua.user_id = $2
            WHERE p.id = $1
            "#,
        )
        .bind(post_id)
        .bind(viewer_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| map_db_error(err, "post"))?;

        Ok(row.map(PostDetail::from))
    }

    async fn list_posts(
        &self,
        viewer_id: i64,
        pagination: Pagination,
    ) -> Result<Vec<PostDetail>, DomainError> {
        let rows = sqlx::query_as::<_, PostDetailRow>(
            r#"
            SELECT
            p.id,
            p.user_id,
            u.username,
            p.post_title,
            p.post_content,
            p.post_hashtags,
            COALESCE(ua.is_liked, FALSE) AS is_liked
            FROM posts p
            JOIN users u ON u.id = p.user_id
            LEFT JOIN user_activities ua ON ua.post_id = p.id AND ua.user_id = $1
            ORDER BY p.updated_at DESC, p.id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(viewer_id)
        .bind(pagination.limit)
        .bind(pagination.offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|err| map_db_error(err, "post"))?;

        Ok(rows.into_iter().map(PostDetail::from).collect())
    }

    async fn count_likes(&self, post_id: i64) -> Result<i64, DomainError> {
        sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(id)
            FROM user_activities
            WHERE post_id = $1 AND is_liked = TRUE
            "#,
        )
        .bind(post_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| map_db_error(err, "post"))
    }

    async fn list_comments(&self, post_id: i64) -> Result<Vec<Comment>, DomainError> {
        let rows = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT c.id, c.post_id, c.user_id, u.username, c.comment_content, c.created_at
            FROM comments c
            JOIN users u ON u.id = c.user_id
            WHERE c.post_id = $1
            ORDER BY c.created_at, c.id
            "#,
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|err| map_db_error(err, "post"))?;

        Ok(rows.into_iter().map(Comment::from).collect())
    }

    async fn create_comment(&self, input: NewComment) -> Result<Comment, DomainError> {
        let row = sqlx::query_as::<_, CommentRow>(
            r#"
            WITH inserted AS (
                INSERT INTO comments (post_id, user_id, comment_content, created_by, updated_by)
                VALUES ($1, $2, $3, $4, $4)
                RETURNING id, post_id, user_id, comment_content, created_at
            )
            SELECT i.id, i.post_id, i.user_id, u.username, i.comment_content, i.created_at
            FROM inserted i
            JOIN users u ON u.id = i.user_id
            "#,
        )
        .bind(input.post_id)
        .bind(input.user_id)
        .bind(&input.content)
        .bind(input.user_id.to_string())
        .fetch_one(&self.pool)
        .await
        .map_err(|err| map_db_error(err, &format!("post id: {}", input.post_id)))?;

        Ok(row.into())
    }
}
