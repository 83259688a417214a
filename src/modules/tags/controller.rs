use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::instrument;

use bookswap_core::AppError;
use bookswap_models::{BookId, CreateTagDto, ErrorResponse, Tag, TagId};

use super::service::TagService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Create a tag
#[utoipa::path(
    post,
    path = "/tags/",
    request_body = CreateTagDto,
    responses(
        (status = 201, description = "Tag created", body = Tag),
        (status = 400, description = "Tag name already exists", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Tags"
)]
#[instrument(skip(state))]
pub async fn create_tag(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateTagDto>,
) -> Result<(StatusCode, Json<Tag>), AppError> {
    let tag = TagService::create_tag(state.store.as_ref(), dto).await?;
    Ok((StatusCode::CREATED, Json(tag)))
}

/// List all tags
#[utoipa::path(
    get,
    path = "/tags/",
    responses(
        (status = 200, description = "Tags ordered by id", body = Vec<Tag>)
    ),
    tag = "Tags"
)]
pub async fn list_tags(State(state): State<AppState>) -> Result<Json<Vec<Tag>>, AppError> {
    let tags = TagService::list_tags(state.store.as_ref()).await?;
    Ok(Json(tags))
}

/// Attach a tag to a book
///
/// Attaching a tag that is already attached succeeds and changes nothing.
#[utoipa::path(
    post,
    path = "/books/{id}/tags/{tag_id}",
    params(
        ("id" = i64, Path, description = "Book ID"),
        ("tag_id" = i64, Path, description = "Tag ID")
    ),
    responses(
        (status = 204, description = "Tag attached"),
        (status = 404, description = "Book or tag not found", body = ErrorResponse)
    ),
    tag = "Tags"
)]
#[instrument(skip(state))]
pub async fn attach_tag(
    State(state): State<AppState>,
    Path((book_id, tag_id)): Path<(BookId, TagId)>,
) -> Result<StatusCode, AppError> {
    TagService::attach_tag(state.store.as_ref(), book_id, tag_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
