//! Administrative commands run outside the HTTP server.

pub mod seeder;

use validator::Validate;

use bookswap_db::Store;
use bookswap_models::{RegisterRequest, UserRead};

use crate::modules::auth::service::AuthService;

/// Creates a user account with the same rules as `/auth/register`.
pub async fn create_user(
    store: &dyn Store,
    username: &str,
    password: &str,
) -> anyhow::Result<UserRead> {
    let dto = RegisterRequest {
        username: username.to_string(),
        password: password.to_string(),
    };
    dto.validate()?;

    let user = AuthService::register(store, dto)
        .await
        .map_err(|e| e.error)?;
    Ok(user)
}
