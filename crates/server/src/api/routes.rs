use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::{catalog, games, handlers};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        // Health and config
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config))
        .route("/home", get(handlers::get_home))
        // Catalog
        .route("/catalog/status", get(catalog::get_status))
        .route("/catalog/repopulate", post(catalog::repopulate))
        // Games
        .route("/games/top", get(games::top_games))
        .route("/games/search", get(games::search_games))
        .route("/games/{id}", get(games::get_game))
        .route("/games/{id}/refresh", post(games::refresh_game))
        .with_state(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
}
