use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::user::{LoginRequest, SignUpRequest};
use crate::presentation::AppState;
use crate::presentation::http::app_error::AppResult;
use crate::presentation::http::middleware::auth::AuthenticatedUser;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct SignUpDto {
    #[validate(length(min = 1))]
    pub(crate) email: String,
    #[validate(length(min = 1, max = 64))]
    pub(crate) username: String,
    #[validate(length(min = 1, max = 128))]
    pub(crate) password: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct LoginDto {
    #[validate(length(min = 1))]
    pub(crate) email: String,
    #[validate(length(min = 1, max = 128))]
    pub(crate) password: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct RefreshDto {
    #[validate(length(min = 1))]
    pub(crate) token: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct MessageDto {
    pub(crate) message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct LoginResponseDto {
    pub(crate) access_token: String,
    pub(crate) refresh_token: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct RefreshResponseDto {
    pub(crate) access_token: String,
}

#[utoipa::path(
    post,
    path = "/users/sign-up",
    tag = "users",
    request_body = SignUpDto,
    responses(
        (status = 200, description = "Signed up", body = MessageDto),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email or username already taken"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn sign_up(
    State(state): State<AppState>,
    payload: Result<Json<SignUpDto>, JsonRejection>,
) -> AppResult<(StatusCode, Json<MessageDto>)> {
    let Json(dto) = payload?;
    dto.validate()?;

    let req = SignUpRequest {
        email: dto.email,
        username: dto.username,
        password: dto.password,
    };
    state.auth_service.sign_up(req).await?;

    Ok((
        StatusCode::OK,
        Json(MessageDto {
            message: "Sign up success".to_string(),
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/users/login",
    tag = "users",
    request_body = LoginDto,
    responses(
        (status = 200, description = "Login successful", body = LoginResponseDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid email or password"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginDto>, JsonRejection>,
) -> AppResult<(StatusCode, Json<LoginResponseDto>)> {
    let Json(dto) = payload?;
    dto.validate()?;

    let req = LoginRequest {
        email: dto.email,
        password: dto.password,
    };
    let tokens = state.auth_service.login(req).await?;

    Ok((
        StatusCode::OK,
        Json(LoginResponseDto {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/users/refresh",
    tag = "users",
    security(
        ("bearer_auth" = [])
    ),
    request_body = RefreshDto,
    responses(
        (status = 200, description = "New access token", body = RefreshResponseDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Missing/invalid access token, or refresh token expired/invalid"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn refresh(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    payload: Result<Json<RefreshDto>, JsonRejection>,
) -> AppResult<(StatusCode, Json<RefreshResponseDto>)> {
    let Json(dto) = payload?;
    dto.validate()?;

    let access_token = state
        .auth_service
        .validate_refresh_token(auth.user_id, &dto.token)
        .await?;
    debug!(user_id = auth.user_id, email = %auth.email, "access token refreshed");

    Ok((StatusCode::OK, Json(RefreshResponseDto { access_token })))
}
