//! Home view controller: bootstraps the catalog and lists the top games.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;
use tracing::{info, warn};

use super::ControllerError;
use crate::catalog::Game;
use crate::sync::{CatalogSync, SyncError};

/// State of the home view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HomeState {
    pub loading: bool,
    pub top_games: Vec<Game>,
}

impl Default for HomeState {
    fn default() -> Self {
        Self {
            loading: true,
            top_games: Vec::new(),
        }
    }
}

pub struct HomeController {
    sync: Arc<CatalogSync>,
    top_limit: u32,
    state: watch::Sender<HomeState>,
}

impl HomeController {
    pub fn new(sync: Arc<CatalogSync>, top_limit: u32) -> Self {
        let (state, _) = watch::channel(HomeState::default());
        Self {
            sync,
            top_limit,
            state,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<HomeState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> HomeState {
        self.state.borrow().clone()
    }

    /// Populate an empty catalog, then publish the top games.
    ///
    /// A failed Steam fetch is logged and the list is built from whatever
    /// the store holds.
    pub async fn initialize(&self) -> Result<HomeState, ControllerError> {
        self.state.send_modify(|state| state.loading = true);

        let top_games = match self.load_top_games().await {
            Ok(top_games) => top_games,
            Err(e) => {
                self.state.send_modify(|state| state.loading = false);
                return Err(e);
            }
        };

        let state = HomeState {
            loading: false,
            top_games,
        };
        self.state.send_replace(state.clone());
        Ok(state)
    }

    async fn load_top_games(&self) -> Result<Vec<Game>, ControllerError> {
        match self.sync.ensure_catalog().await {
            Ok(true) => info!("Catalog bootstrapped from Steam"),
            Ok(false) => {}
            Err(SyncError::Storage(e)) => return Err(e.into()),
            Err(e) => warn!("Catalog bootstrap failed: {}", e),
        }

        Ok(self.sync.top_games(self.top_limit)?)
    }
}
