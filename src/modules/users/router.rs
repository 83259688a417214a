use axum::{
    Router,
    routing::{get, post},
};

use super::controller::{create_user, get_user};
use crate::state::AppState;

pub fn init_users_router() -> Router<AppState> {
    Router::new()
        .route("/users", post(create_user))
        .route("/users/", post(create_user))
        .route("/users/{id}", get(get_user))
}
