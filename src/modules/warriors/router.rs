use axum::{
    Router,
    routing::{delete, get, post},
};

use super::controller::{
    create_warrior, delete_warrior, get_warrior, list_warriors, update_warrior,
};
use crate::state::AppState;

pub fn init_warriors_router() -> Router<AppState> {
    Router::new()
        .route("/warriors_list", get(list_warriors))
        .route("/warrior", post(create_warrior))
        .route("/warrior/{id}", get(get_warrior).put(update_warrior))
        .route("/warrior/delete/{id}", delete(delete_warrior))
}
