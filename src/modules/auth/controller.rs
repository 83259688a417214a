use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::instrument;

use bookswap_core::AppError;
use bookswap_models::{
    ChangePasswordRequest, ErrorResponse, LoginRequest, RegisterRequest, TokenResponse, UserRead,
};

use super::service::AuthService;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::{ValidatedForm, ValidatedJson};

/// Register a new user
#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered successfully", body = UserRead),
        (status = 400, description = "Username already taken or malformed body", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<UserRead>), AppError> {
    let user = AuthService::register(state.store.as_ref(), dto).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Exchange a username and password for a bearer token
///
/// The body is an OAuth2 password grant form.
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body(content = LoginRequest, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 400, description = "Malformed form body", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn login(
    State(state): State<AppState>,
    ValidatedForm(dto): ValidatedForm<LoginRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let token = AuthService::login(state.store.as_ref(), dto, &state.jwt_config).await?;
    Ok(Json(token))
}

/// Get the authenticated user
#[utoipa::path(
    get,
    path = "/auth/me",
    responses(
        (status = 200, description = "Current user", body = UserRead),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Authentication"
)]
pub async fn me(AuthUser(user): AuthUser) -> Json<UserRead> {
    Json(user.to_read())
}

/// List all users
#[utoipa::path(
    get,
    path = "/auth/users",
    responses(
        (status = 200, description = "All users", body = Vec<UserRead>),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Authentication"
)]
#[instrument(skip(state, _auth_user))]
pub async fn list_users(
    State(state): State<AppState>,
    _auth_user: AuthUser,
) -> Result<Json<Vec<UserRead>>, AppError> {
    let users = AuthService::list_users(state.store.as_ref()).await?;
    Ok(Json(users))
}

/// Change the authenticated user's password
#[utoipa::path(
    post,
    path = "/auth/change-password",
    request_body = ChangePasswordRequest,
    responses(
        (status = 204, description = "Password changed"),
        (status = 400, description = "Old password is incorrect", body = ErrorResponse),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Authentication"
)]
#[instrument(skip(state, auth_user, dto), fields(user_id = auth_user.0.id))]
pub async fn change_password(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<ChangePasswordRequest>,
) -> Result<StatusCode, AppError> {
    AuthService::change_password(state.store.as_ref(), auth_user.user(), dto).await?;
    Ok(StatusCode::NO_CONTENT)
}
