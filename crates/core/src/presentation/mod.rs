//! Presentation state for catalog views.
//!
//! Controllers own a `watch` channel with the current view state and drive
//! it through the sync layer. Observers subscribe and always see either a
//! full snapshot or none at all.

mod detail;
mod home;

pub use detail::GameDetailController;
pub use home::{HomeController, HomeState};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::{
    CatalogError, Game, DEFAULT_HEADER_IMAGE, DEFAULT_PRICE, DEFAULT_SHORT_DESCRIPTION,
};

/// Errors a controller hands back instead of publishing.
#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("Catalog storage failed: {0}")]
    Storage(#[from] CatalogError),
}

/// Everything the detail view shows for one game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub app_id: String,
    pub title: String,
    pub player_count: u32,
    pub header_image: String,
    pub price_us: String,
    pub discount: u8,
    pub short_description: String,
    pub review_score: i32,
}

impl GameSnapshot {
    /// Snapshot for an id the catalog does not know.
    pub fn placeholder(app_id: &str) -> Self {
        Self {
            app_id: app_id.to_string(),
            title: String::new(),
            player_count: 0,
            header_image: DEFAULT_HEADER_IMAGE.to_string(),
            price_us: DEFAULT_PRICE.to_string(),
            discount: 0,
            short_description: DEFAULT_SHORT_DESCRIPTION.to_string(),
            review_score: 0,
        }
    }
}

impl From<Game> for GameSnapshot {
    fn from(game: Game) -> Self {
        Self {
            app_id: game.game_id,
            title: game.game_name,
            player_count: game.player_count,
            header_image: game.header_image,
            price_us: game.price_us,
            discount: game.discount,
            short_description: game.short_description,
            review_score: game.review_score,
        }
    }
}

/// State of the selected game's detail view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum GameUiState {
    Loading,
    Success(GameSnapshot),
    Error,
}

impl GameUiState {
    pub fn is_loading(&self) -> bool {
        matches!(self, GameUiState::Loading)
    }

    pub fn snapshot(&self) -> Option<&GameSnapshot> {
        match self {
            GameUiState::Success(snapshot) => Some(snapshot),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ui_state_serialization() {
        assert_eq!(
            serde_json::to_value(GameUiState::Loading).unwrap(),
            serde_json::json!({"state": "loading"})
        );
        assert_eq!(
            serde_json::to_value(GameUiState::Error).unwrap(),
            serde_json::json!({"state": "error"})
        );

        let json = serde_json::to_value(GameUiState::Success(GameSnapshot::placeholder("7")))
            .unwrap();
        assert_eq!(json["state"], "success");
        assert_eq!(json["app_id"], "7");
        assert_eq!(json["price_us"], "$0.0");
    }

    #[test]
    fn test_snapshot_from_game() {
        let mut game = Game::new("570", "Dota 2");
        game.player_count = 5;
        game.review_score = 8;

        let snapshot = GameSnapshot::from(game);
        assert_eq!(snapshot.app_id, "570");
        assert_eq!(snapshot.title, "Dota 2");
        assert_eq!(snapshot.player_count, 5);
        assert_eq!(snapshot.review_score, 8);
        assert_eq!(snapshot.header_image, "No URL");
    }
}
