use axum::Json;
use axum::extract::{Path, State};
use tracing::instrument;

use bookswap_models::{
    ErrorResponse, StatusMessageResponse, Warrior, WarriorCreatedResponse, WarriorId,
};

use super::service::WarriorService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// List all warriors
#[utoipa::path(
    get,
    path = "/warriors_list",
    responses(
        (status = 200, description = "All warriors in insertion order", body = Vec<Warrior>)
    ),
    tag = "Warriors"
)]
pub async fn list_warriors(State(state): State<AppState>) -> Json<Vec<Warrior>> {
    Json(WarriorService::list(state.warriors.as_ref()))
}

/// Get the warriors with an ID
#[utoipa::path(
    get,
    path = "/warrior/{id}",
    params(
        ("id" = i64, Path, description = "Warrior ID")
    ),
    responses(
        (status = 200, description = "Warriors with this ID, empty if none", body = Vec<Warrior>)
    ),
    tag = "Warriors"
)]
pub async fn get_warrior(
    State(state): State<AppState>,
    Path(id): Path<WarriorId>,
) -> Json<Vec<Warrior>> {
    Json(WarriorService::get(state.warriors.as_ref(), id))
}

/// Add a warrior
#[utoipa::path(
    post,
    path = "/warrior",
    request_body = Warrior,
    responses(
        (status = 200, description = "Warrior added", body = WarriorCreatedResponse),
        (status = 400, description = "Malformed body", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Warriors"
)]
#[instrument(skip(state, warrior), fields(warrior_id = warrior.id))]
pub async fn create_warrior(
    State(state): State<AppState>,
    ValidatedJson(warrior): ValidatedJson<Warrior>,
) -> Json<WarriorCreatedResponse> {
    let data = WarriorService::create(state.warriors.as_ref(), warrior);
    Json(WarriorCreatedResponse { status: 200, data })
}

/// Replace a warrior and return the updated list
#[utoipa::path(
    put,
    path = "/warrior/{id}",
    params(
        ("id" = i64, Path, description = "Warrior ID")
    ),
    request_body = Warrior,
    responses(
        (status = 200, description = "Current list; unchanged if the ID is unknown", body = Vec<Warrior>),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Warriors"
)]
#[instrument(skip(state, warrior))]
pub async fn update_warrior(
    State(state): State<AppState>,
    Path(id): Path<WarriorId>,
    ValidatedJson(warrior): ValidatedJson<Warrior>,
) -> Json<Vec<Warrior>> {
    Json(WarriorService::replace(state.warriors.as_ref(), id, warrior))
}

/// Delete a warrior
#[utoipa::path(
    delete,
    path = "/warrior/delete/{id}",
    params(
        ("id" = i64, Path, description = "Warrior ID")
    ),
    responses(
        (status = 200, description = "Deleted, or nothing to delete", body = StatusMessageResponse)
    ),
    tag = "Warriors"
)]
#[instrument(skip(state))]
pub async fn delete_warrior(
    State(state): State<AppState>,
    Path(id): Path<WarriorId>,
) -> Json<StatusMessageResponse> {
    WarriorService::delete(state.warriors.as_ref(), id);
    Json(StatusMessageResponse {
        status: 201,
        message: "deleted".to_string(),
    })
}
