use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::instrument;

use bookswap_core::AppError;
use bookswap_models::{BookId, BookRead, CreateBookDto, ErrorResponse};

use super::service::BookService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Create a book owned by an existing user
#[utoipa::path(
    post,
    path = "/books/",
    request_body = CreateBookDto,
    responses(
        (status = 201, description = "Book created", body = BookRead),
        (status = 404, description = "Owner not found", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Books"
)]
#[instrument(skip(state))]
pub async fn create_book(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateBookDto>,
) -> Result<(StatusCode, Json<BookRead>), AppError> {
    let book = BookService::create_book(state.store.as_ref(), dto).await?;
    Ok((StatusCode::CREATED, Json(book)))
}

/// List all books with their owners and tags
#[utoipa::path(
    get,
    path = "/books/",
    responses(
        (status = 200, description = "Books ordered by id", body = Vec<BookRead>)
    ),
    tag = "Books"
)]
pub async fn list_books(State(state): State<AppState>) -> Result<Json<Vec<BookRead>>, AppError> {
    let books = BookService::list_books(state.store.as_ref()).await?;
    Ok(Json(books))
}

/// Get a book by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    params(
        ("id" = i64, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book found", body = BookRead),
        (status = 404, description = "Book not found", body = ErrorResponse)
    ),
    tag = "Books"
)]
#[instrument(skip(state))]
pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<BookId>,
) -> Result<Json<BookRead>, AppError> {
    let book = BookService::get_book(state.store.as_ref(), id).await?;
    Ok(Json(book))
}
