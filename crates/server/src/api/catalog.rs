//! Catalog API handlers.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use steamcharts_core::SyncError;
use tracing::{error, warn};

use super::error_response;
use crate::state::AppState;

// ============================================================================
// Response types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct CatalogStatusResponse {
    pub game_count: u64,
    pub empty: bool,
}

#[derive(Debug, Serialize)]
pub struct RepopulateResponse {
    pub inserted: usize,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/v1/catalog/status
pub async fn get_status(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CatalogStatusResponse>, impl IntoResponse> {
    match state.sync().game_count() {
        Ok(game_count) => Ok(Json(CatalogStatusResponse {
            game_count,
            empty: game_count == 0,
        })),
        Err(e) => {
            error!("Failed to count games: {}", e);
            Err(error_response(StatusCode::INTERNAL_SERVER_ERROR, e))
        }
    }
}

/// POST /api/v1/catalog/repopulate
///
/// Reload the whole catalog from the Steam app list. A failed fetch keeps
/// the current catalog.
pub async fn repopulate(
    State(state): State<Arc<AppState>>,
) -> Result<Json<RepopulateResponse>, impl IntoResponse> {
    match state.sync().repopulate_catalog().await {
        Ok(inserted) => Ok(Json(RepopulateResponse { inserted })),
        Err(SyncError::Storage(e)) => {
            error!("Catalog repopulation failed: {}", e);
            Err(error_response(StatusCode::INTERNAL_SERVER_ERROR, e))
        }
        Err(e) => {
            warn!("Catalog repopulation failed: {}", e);
            Err(error_response(StatusCode::BAD_GATEWAY, e))
        }
    }
}
