use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};

use bookswap_core::AppError;
use bookswap_models::User;

use crate::modules::auth::service::AuthService;
use crate::state::AppState;

/// Extractor that resolves the bearer token into the stored user.
///
/// A missing header, an invalid or expired token, and a token whose subject
/// no longer exists are all rejected with 401.
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

impl AuthUser {
    pub fn user(&self) -> &User {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| AppError::unauthenticated("Missing or malformed bearer token"))?;

        let user = AuthService::resolve_identity(
            state.store.as_ref(),
            bearer.token(),
            &state.jwt_config,
        )
        .await?;

        Ok(AuthUser(user))
    }
}
