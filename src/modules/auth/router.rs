use axum::{
    Router,
    routing::{get, post},
};

use super::controller::{change_password, list_users, login, me, register};
use crate::state::AppState;

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/me", get(me))
        .route("/auth/users", get(list_users))
        .route("/auth/change-password", post(change_password))
}
