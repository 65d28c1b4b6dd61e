use sqlx::PgPool;
use std::sync::Arc;

use crate::application::activity_service::ActivityService;
use crate::application::auth_service::AuthService;
use crate::application::blog_service::BlogService;
use crate::data::repositories::postgres::activity_repository::PostgresActivityRepository;
use crate::data::repositories::postgres::post_repository::PostgresPostRepository;
use crate::data::repositories::postgres::user_repository::PostgresUserRepository;
use crate::infrastructure::jwt::JwtService;
use crate::infrastructure::password::PasswordHasher;

pub(crate) mod http;
pub(crate) mod openapi;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) pool: PgPool,
    pub(crate) auth_service: Arc<AuthService<PostgresUserRepository>>,
    pub(crate) blog_service: Arc<BlogService<PostgresPostRepository>>,
    pub(crate) activity_service: Arc<ActivityService<PostgresActivityRepository>>,
    pub(crate) jwt: Arc<JwtService>,
}

impl AppState {
    pub(crate) fn new(
        pool: PgPool,
        jwt: Arc<JwtService>,
        hasher: PasswordHasher,
        refresh_token_ttl_seconds: i64,
    ) -> Self {
        let auth_service = AuthService::new(
            PostgresUserRepository::new(pool.clone()),
            jwt.clone(),
            hasher,
            refresh_token_ttl_seconds,
        );
        let blog_service = BlogService::new(PostgresPostRepository::new(pool.clone()));
        let activity_service =
            ActivityService::new(PostgresActivityRepository::new(pool.clone()));

        Self {
            pool,
            auth_service: Arc::new(auth_service),
            blog_service: Arc::new(blog_service),
            activity_service: Arc::new(activity_service),
            jwt,
        }
    }
}
