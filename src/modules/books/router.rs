use axum::{Router, routing::get};

use super::controller::{create_book, get_book, list_books};
use crate::state::AppState;

pub fn init_books_router() -> Router<AppState> {
    Router::new()
        .route("/books", get(list_books).post(create_book))
        .route("/books/", get(list_books).post(create_book))
        .route("/books/{id}", get(get_book))
}
