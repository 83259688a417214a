use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::instrument;

use bookswap_core::AppError;
use bookswap_models::{
    CreateExchangeDto, ErrorResponse, ExchangeRequest, ExchangeRequestId, ExchangeRequestRead,
    RequestStatus, UpdateExchangeStatusDto,
};

use super::service::ExchangeService;
use crate::state::AppState;
use crate::validator::{ValidatedJson, ValidatedQueryOrJson};

/// Request an exchange of a book
#[utoipa::path(
    post,
    path = "/exchange/",
    request_body = CreateExchangeDto,
    responses(
        (status = 201, description = "Exchange request created with status pending", body = ExchangeRequest),
        (status = 400, description = "Requester owns the book", body = ErrorResponse),
        (status = 404, description = "Book or requester not found", body = ErrorResponse)
    ),
    tag = "Exchanges"
)]
#[instrument(skip(state))]
pub async fn create_exchange(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateExchangeDto>,
) -> Result<(StatusCode, Json<ExchangeRequest>), AppError> {
    let request = ExchangeService::request_exchange(state.store.as_ref(), dto).await?;
    Ok((StatusCode::CREATED, Json(request)))
}

/// List all exchange requests
#[utoipa::path(
    get,
    path = "/exchange/",
    responses(
        (status = 200, description = "Exchange requests with book, requester and owner", body = Vec<ExchangeRequestRead>)
    ),
    tag = "Exchanges"
)]
pub async fn list_exchanges(
    State(state): State<AppState>,
) -> Result<Json<Vec<ExchangeRequestRead>>, AppError> {
    let requests = ExchangeService::list_exchanges(state.store.as_ref()).await?;
    Ok(Json(requests))
}

/// Accept or reject a pending exchange request
#[utoipa::path(
    patch,
    path = "/exchange/{id}/status",
    params(
        ("id" = i64, Path, description = "Exchange request ID"),
        ("status" = Option<RequestStatus>, Query, description = "New status; when absent it is read from the JSON body")
    ),
    request_body = UpdateExchangeStatusDto,
    responses(
        (status = 200, description = "Status updated", body = ExchangeRequest),
        (status = 400, description = "Transition not allowed from the current status", body = ErrorResponse),
        (status = 404, description = "Exchange request not found", body = ErrorResponse)
    ),
    tag = "Exchanges"
)]
#[instrument(skip(state))]
pub async fn update_exchange_status(
    State(state): State<AppState>,
    Path(id): Path<ExchangeRequestId>,
    ValidatedQueryOrJson(dto): ValidatedQueryOrJson<UpdateExchangeStatusDto>,
) -> Result<Json<ExchangeRequest>, AppError> {
    let request = ExchangeService::update_status(state.store.as_ref(), id, dto.status).await?;
    Ok(Json(request))
}
