use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::application::blog_service::{DEFAULT_PAGE_SIZE, ListPostsResult, PostView};
use crate::domain::post::{Comment, CreateCommentRequest, CreatePostRequest, Post, PostDetail};
use crate::presentation::AppState;
use crate::presentation::http::app_error::AppResult;
use crate::presentation::http::handlers::users::MessageDto;
use crate::presentation::http::middleware::auth::AuthenticatedUser;

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreatePostDto {
    #[validate(length(min = 1, max = 255))]
    pub(crate) post_title: String,
    #[validate(length(min = 1))]
    pub(crate) post_content: String,
    #[serde(default)]
    pub(crate) post_hashtags: Vec<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateCommentDto {
    #[validate(length(min = 1))]
    pub(crate) comment_content: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UserActivityDto {
    pub(crate) is_liked: bool,
}

#[derive(Debug, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub(crate) struct PaginationQuery {
    /// Items per page (1..=100)
    #[serde(rename = "page-size")]
    #[validate(range(min = 1, max = 100))]
    pub(crate) page_size: Option<u32>,
    /// 1-based page number
    #[serde(rename = "page-index")]
    #[validate(range(min = 1))]
    pub(crate) page_index: Option<u32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct PostDto {
    pub(crate) id: i64,
    pub(crate) user_id: i64,
    pub(crate) post_title: String,
    pub(crate) post_content: String,
    pub(crate) post_hashtags: Vec<String>,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct PostDetailDto {
    pub(crate) id: i64,
    pub(crate) user_id: i64,
    pub(crate) username: String,
    pub(crate) post_title: String,
    pub(crate) post_content: String,
    pub(crate) post_hashtags: Vec<String>,
    #[serde(rename = "isLiked")]
    pub(crate) is_liked: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct CommentDto {
    pub(crate) id: i64,
    pub(crate) post_id: i64,
    pub(crate) user_id: i64,
    pub(crate) username: String,
    pub(crate) comment_content: String,
    pub(crate) created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct PaginationDto {
    pub(crate) limit: i64,
    pub(crate) offset: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct ListPostsResponseDto {
    pub(crate) data: Vec<PostDetailDto>,
    pub(crate) pagination: PaginationDto,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct GetPostResponseDto {
    pub(crate) post_detail: PostDetailDto,
    pub(crate) like_count: i64,
    pub(crate) comments: Vec<CommentDto>,
}

impl From<Post> for PostDto {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            user_id: post.user_id,
            post_title: post.title,
            post_content: post.content,
            post_hashtags: post.hashtags,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

impl From<PostDetail> for PostDetailDto {
    fn from(detail: PostDetail) -> Self {
        Self {
            id: detail.id,
            user_id: detail.user_id,
            username: detail.username,
            post_title: detail.title,
            post_content: detail.content,
            post_hashtags: detail.hashtags,
            is_liked: detail.is_liked,
        }
    }
}

impl From<Comment> for CommentDto {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            post_id: comment.post_id,
            user_id: comment.user_id,
            username: comment.username,
            comment_content: comment.content,
            created_at: comment.created_at,
        }
    }
}

impl From<ListPostsResult> for ListPostsResponseDto {
    fn from(result: ListPostsResult) -> Self {
        Self {
            data: result.posts.into_iter().map(PostDetailDto::from).collect(),
            pagination: PaginationDto {
                limit: result.pagination.limit,
                offset: result.pagination.offset,
            },
        }
    }
}

impl From<PostView> for GetPostResponseDto {
    fn from(view: PostView) -> Self {
        Self {
            post_detail: view.detail.into(),
            like_count: view.like_count,
            comments: view.comments.into_iter().map(CommentDto::from).collect(),
        }
    }
}

#[utoipa::path(
    post,
    path = "/posts",
    tag = "posts",
    security(
        ("bearer_auth" = [])
    ),
    request_body = CreatePostDto,
    responses(
        (status = 201, description = "Post created", body = PostDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn create_post(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    payload: Result<Json<CreatePostDto>, JsonRejection>,
) -> AppResult<(StatusCode, Json<PostDto>)> {
    let Json(dto) = payload?;
    dto.validate()?;
    let req = CreatePostRequest {
        title: dto.post_title,
        content: dto.post_content,
        hashtags: dto.post_hashtags,
    };

    let post = state.blog_service.create_post(auth.user_id, req).await?;
    info!(post_id = post.id, user_id = auth.user_id, username = %auth.username, "post created");
    Ok((StatusCode::CREATED, Json(PostDto::from(post))))
}

#[utoipa::path(
    get,
    path = "/posts",
    tag = "posts",
    security(
        ("bearer_auth" = [])
    ),
    params(PaginationQuery),
    responses(
        (status = 200, description = "Posts listed, newest first", body = ListPostsResponseDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn list_posts(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    query: Result<Query<PaginationQuery>, QueryRejection>,
) -> AppResult<(StatusCode, Json<ListPostsResponseDto>)> {
    let Query(query) = query?;
    query.validate()?;
    let page_size = query.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
    let page_index = query.page_index.unwrap_or(1);

    let result = state
        .blog_service
        .list_posts(auth.user_id, page_size, page_index)
        .await?;

    Ok((StatusCode::OK, Json(ListPostsResponseDto::from(result))))
}

#[utoipa::path(
    get,
    path = "/posts/{id}",
    tag = "posts",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("id" = i64, Path, description = "Post id")
    ),
    responses(
        (status = 200, description = "Post with like count and comments", body = GetPostResponseDto),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Post not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn get_post(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    id: Result<Path<i64>, PathRejection>,
) -> AppResult<(StatusCode, Json<GetPostResponseDto>)> {
    let Path(id) = id?;
    let view = state.blog_service.get_post(auth.user_id, id).await?;

    Ok((StatusCode::OK, Json(GetPostResponseDto::from(view))))
}

#[utoipa::path(
    post,
    path = "/posts/{id}/comment",
    tag = "posts",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("id" = i64, Path, description = "Post id")
    ),
    request_body = CreateCommentDto,
    responses(
        (status = 201, description = "Comment created", body = CommentDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Post not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn create_comment(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<CreateCommentDto>, JsonRejection>,
) -> AppResult<(StatusCode, Json<CommentDto>)> {
    let Path(id) = id?;
    let Json(dto) = payload?;
    dto.validate()?;

    let comment = state
        .blog_service
        .create_comment(
            auth.user_id,
            id,
            CreateCommentRequest {
                content: dto.comment_content,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(CommentDto::from(comment))))
}

#[utoipa::path(
    put,
    path = "/posts/{id}/user-activity",
    tag = "posts",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("id" = i64, Path, description = "Post id")
    ),
    request_body = UserActivityDto,
    responses(
        (status = 200, description = "Like state stored", body = MessageDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Post not found"),
        (status = 409, description = "Unlike of a post that was never liked"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn upsert_user_activity(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UserActivityDto>, JsonRejection>,
) -> AppResult<(StatusCode, Json<MessageDto>)> {
    let Path(id) = id?;
    let Json(dto) = payload?;

    let activity = state
        .activity_service
        .upsert_user_activity(id, auth.user_id, dto.is_liked)
        .await?;

    let message = if activity.is_liked {
        "Like success"
    } else {
        "Unlike success"
    };
    Ok((
        StatusCode::OK,
        Json(MessageDto {
            message: message.to_string(),
        }),
    ))
}
