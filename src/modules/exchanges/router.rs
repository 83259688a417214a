use axum::{
    Router,
    routing::{get, patch},
};

use super::controller::{create_exchange, list_exchanges, update_exchange_status};
use crate::state::AppState;

pub fn init_exchanges_router() -> Router<AppState> {
    Router::new()
        .route("/exchange", get(list_exchanges).post(create_exchange))
        .route("/exchange/", get(list_exchanges).post(create_exchange))
        .route("/exchange/{id}/status", patch(update_exchange_status))
}
