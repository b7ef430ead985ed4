//! Game API handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use steamcharts_core::{Game, GameUiState};
use tracing::error;

use super::error_response;
use crate::state::AppState;

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct TopQueryParams {
    #[serde(default)]
    pub limit: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQueryParams {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Serialize)]
pub struct GameListResponse {
    pub games: Vec<Game>,
    pub total: usize,
}

impl From<Vec<Game>> for GameListResponse {
    fn from(games: Vec<Game>) -> Self {
        Self {
            total: games.len(),
            games,
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/v1/games/top
///
/// Games with the most current players.
pub async fn top_games(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TopQueryParams>,
) -> Result<Json<GameListResponse>, impl IntoResponse> {
    let limit = params.limit.unwrap_or_else(|| state.top_limit());

    match state.sync().top_games(limit) {
        Ok(games) => Ok(Json(games.into())),
        Err(e) => {
            error!("Failed to list top games: {}", e);
            Err(error_response(StatusCode::INTERNAL_SERVER_ERROR, e))
        }
    }
}

/// GET /api/v1/games/search
///
/// Substring search on normalized names.
pub async fn search_games(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQueryParams>,
) -> Result<Json<GameListResponse>, impl IntoResponse> {
    match state.sync().search(&params.q) {
        Ok(games) => Ok(Json(games.into())),
        Err(e) => {
            error!("Game search failed for {:?}: {}", params.q, e);
            Err(error_response(StatusCode::INTERNAL_SERVER_ERROR, e))
        }
    }
}

/// GET /api/v1/games/{id}
///
/// Detail state of a game as currently stored.
pub async fn get_game(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<GameUiState>, impl IntoResponse> {
    match state.detail_controller().load(&id) {
        Ok(ui_state) => Ok(Json(ui_state)),
        Err(e) => {
            error!("Failed to load game {}: {}", id, e);
            Err(error_response(StatusCode::INTERNAL_SERVER_ERROR, e))
        }
    }
}

/// POST /api/v1/games/{id}/refresh
///
/// Enrich the game from Steam and return its detail state. Steam failures
/// come back as `{"state":"error"}` with status 200.
pub async fn refresh_game(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<GameUiState>, impl IntoResponse> {
    match state.detail_controller().refresh(&id).await {
        Ok(ui_state) => Ok(Json(ui_state)),
        Err(e) => {
            error!("Failed to refresh game {}: {}", id, e);
            Err(error_response(StatusCode::INTERNAL_SERVER_ERROR, e))
        }
    }
}
