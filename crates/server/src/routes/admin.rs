use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use service::observability::encode_metrics;
use service::reload::{reload_now, ReloadTrigger};

use crate::errors::ApiError;
use crate::state::AppState;

#[derive(Serialize, Debug)]
pub struct ReloadOutput {
    pub message: &'static str,
    pub count: usize,
}

/// Manual reload: same load-then-replace as the background timer, synchronous.
pub async fn reload(State(state): State<AppState>) -> Result<Json<ReloadOutput>, ApiError> {
    let count = reload_now(&state.store, ReloadTrigger::Manual)
        .await
        .map_err(|_| ApiError::ReloadFailed)?;
    Ok(Json(ReloadOutput { message: "quotes reloaded successfully", count }))
}

pub async fn metrics() -> (StatusCode, String) {
    match encode_metrics() {
        Ok(body) => (StatusCode::OK, body),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e),
    }
}
