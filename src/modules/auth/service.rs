use tracing::instrument;

use bookswap_auth::{create_access_token, verify_token};
use bookswap_config::JwtConfig;
use bookswap_core::{AppError, hash_password, verify_password};
use bookswap_db::Store;
use bookswap_models::{
    ChangePasswordRequest, LoginRequest, NewUser, RegisterRequest, TokenResponse, User, UserRead,
};

pub struct AuthService;

impl AuthService {
    #[instrument(skip(store, dto), fields(username = %dto.username))]
    pub async fn register(store: &dyn Store, dto: RegisterRequest) -> Result<UserRead, AppError> {
        if store.find_user_by_username(&dto.username).await?.is_some() {
            return Err(AppError::username_taken(&dto.username));
        }

        let hashed_password = hash_password(&dto.password)?;
        let user = store
            .create_user(NewUser {
                username: dto.username,
                hashed_password,
                bio: None,
                preferences: None,
            })
            .await?;

        tracing::info!(user_id = user.id, "User registered");
        Ok(user.to_read())
    }

    #[instrument(skip(store, dto, jwt_config), fields(username = %dto.username))]
    pub async fn login(
        store: &dyn Store,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<TokenResponse, AppError> {
        let user = store
            .find_user_by_username(&dto.username)
            .await?
            .ok_or_else(|| AppError::invalid_credentials("Invalid username or password"))?;

        if !verify_password(&dto.password, &user.hashed_password)? {
            return Err(AppError::invalid_credentials("Invalid username or password"));
        }

        let access_token = create_access_token(&user.username, jwt_config)?;
        Ok(TokenResponse::bearer(access_token))
    }

    /// Maps a bearer token to the user it was issued for.
    pub async fn resolve_identity(
        store: &dyn Store,
        token: &str,
        jwt_config: &JwtConfig,
    ) -> Result<User, AppError> {
        let claims = verify_token(token, jwt_config)
            .map_err(|_| AppError::unauthenticated("Could not validate credentials"))?;

        store
            .find_user_by_username(&claims.sub)
            .await?
            .ok_or_else(|| AppError::unauthenticated("Could not validate credentials"))
    }

    /// The old password must match; a mismatch is reported as 400 and leaves
    /// the stored hash untouched.
    #[instrument(skip(store, user, dto), fields(user_id = user.id))]
    pub async fn change_password(
        store: &dyn Store,
        user: &User,
        dto: ChangePasswordRequest,
    ) -> Result<(), AppError> {
        if !verify_password(&dto.old_password, &user.hashed_password)? {
            return Err(AppError::invalid_credentials("Old password is incorrect")
                .with_status(axum::http::StatusCode::BAD_REQUEST));
        }

        let hashed_password = hash_password(&dto.new_password)?;
        store.update_password(user.id, &hashed_password).await?;

        tracing::info!("Password changed");
        Ok(())
    }

    pub async fn list_users(store: &dyn Store) -> Result<Vec<UserRead>, AppError> {
        let users = store.list_users().await?;
        Ok(users.iter().map(User::to_read).collect())
    }
}
