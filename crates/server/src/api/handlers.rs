use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;
use steamcharts_core::{HomeState, SanitizedConfig};

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

pub async fn get_config(State(state): State<Arc<AppState>>) -> Json<SanitizedConfig> {
    Json(state.sanitized_config())
}

/// GET /api/v1/home
///
/// Last published home view state.
pub async fn get_home(State(state): State<Arc<AppState>>) -> Json<HomeState> {
    Json(state.home().state())
}
