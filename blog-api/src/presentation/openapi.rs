use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::presentation::http::handlers::posts::{
    CommentDto, CreateCommentDto, CreatePostDto, GetPostResponseDto, ListPostsResponseDto,
    PaginationDto, PostDetailDto, PostDto, UserActivityDto,
};
use crate::presentation::http::handlers::users::{
    LoginDto, LoginResponseDto, MessageDto, RefreshDto, RefreshResponseDto, SignUpDto,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::http::handlers::health::healthz,
        crate::presentation::http::handlers::health::readyz,
        crate::presentation::http::handlers::users::sign_up,
        crate::presentation::http::handlers::users::login,
        crate::presentation::http::handlers::users::refresh,
        crate::presentation::http::handlers::posts::create_post,
        crate::presentation::http::handlers::posts::list_posts,
        crate::presentation::http::handlers::posts::get_post,
        crate::presentation::http::handlers::posts::create_comment,
        crate::presentation::http::handlers::posts::upsert_user_activity
    ),
    components(
        schemas(
            SignUpDto,
            LoginDto,
            RefreshDto,
            MessageDto,
            LoginResponseDto,
            RefreshResponseDto,
            CreatePostDto,
            CreateCommentDto,
            UserActivityDto,
            PostDto,
            PostDetailDto,
            CommentDto,
            PaginationDto,
            ListPostsResponseDto,
            GetPostResponseDto
        )
    ),
    tags(
        (name = "health", description = "Liveness and readiness probes"),
        (name = "users", description = "Sign-up, login and token refresh"),
        (name = "posts", description = "Posts, comments and likes")
    ),
    modifiers(&SecurityAddon)
)]
pub(crate) struct ApiDoc;

pub(crate) struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let mut components = openapi.components.take().unwrap_or_default();
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
        openapi.components = Some(components);
    }
}
