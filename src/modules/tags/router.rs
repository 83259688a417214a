use axum::{
    Router,
    routing::{get, post},
};

use super::controller::{attach_tag, create_tag, list_tags};
use crate::state::AppState;

pub fn init_tags_router() -> Router<AppState> {
    Router::new()
        .route("/tags", get(list_tags).post(create_tag))
        .route("/tags/", get(list_tags).post(create_tag))
        .route("/books/{id}/tags/{tag_id}", post(attach_tag))
}
