//! Detail view controller for a single selected game.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, warn};

use super::{ControllerError, GameSnapshot, GameUiState};
use crate::sync::{CatalogSync, SyncError};

/// Drives [`GameUiState`] for one selected game.
///
/// `load` shows what the catalog has; `refresh` enriches the game from
/// Steam first. Remote failures become [`GameUiState::Error`]; storage
/// failures are returned and leave the published state at `Loading`.
pub struct GameDetailController {
    sync: Arc<CatalogSync>,
    state: watch::Sender<GameUiState>,
}

impl GameDetailController {
    pub fn new(sync: Arc<CatalogSync>) -> Self {
        let (state, _) = watch::channel(GameUiState::Loading);
        Self { sync, state }
    }

    pub fn subscribe(&self) -> watch::Receiver<GameUiState> {
        self.state.subscribe()
    }

    /// Currently published state.
    pub fn state(&self) -> GameUiState {
        self.state.borrow().clone()
    }

    /// Publish a snapshot of the stored row.
    pub fn load(&self, game_id: &str) -> Result<GameUiState, ControllerError> {
        self.publish(GameUiState::Loading);
        let snapshot = self.read_snapshot(game_id)?;
        Ok(self.publish(GameUiState::Success(snapshot)))
    }

    /// Enrich the game from Steam, then publish the re-read row.
    pub async fn refresh(&self, game_id: &str) -> Result<GameUiState, ControllerError> {
        self.publish(GameUiState::Loading);

        match self.sync.enrich(game_id).await {
            Ok(report) if report.all_failed() => {
                warn!("Refresh of game {} failed on every leg", game_id);
                return Ok(self.publish(GameUiState::Error));
            }
            Ok(_) => {}
            Err(SyncError::Storage(e)) => return Err(e.into()),
            Err(e) => {
                warn!("Refresh of game {} failed: {}", game_id, e);
                return Ok(self.publish(GameUiState::Error));
            }
        }

        let snapshot = self.read_snapshot(game_id)?;
        Ok(self.publish(GameUiState::Success(snapshot)))
    }

    fn read_snapshot(&self, game_id: &str) -> Result<GameSnapshot, ControllerError> {
        Ok(match self.sync.get_game(game_id)? {
            Some(game) => GameSnapshot::from(game),
            None => {
                debug!("Game {} not in catalog, showing placeholder", game_id);
                GameSnapshot::placeholder(game_id)
            }
        })
    }

    fn publish(&self, state: GameUiState) -> GameUiState {
        self.state.send_replace(state.clone());
        state
    }
}
