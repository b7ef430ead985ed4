use std::sync::Arc;

use steamcharts_core::{CatalogSync, Config, GameDetailController, HomeController, SanitizedConfig};

/// Shared application state
pub struct AppState {
    config: Config,
    sync: Arc<CatalogSync>,
    home: Arc<HomeController>,
}

impl AppState {
    pub fn new(config: Config, sync: Arc<CatalogSync>) -> Self {
        let home = Arc::new(HomeController::new(
            Arc::clone(&sync),
            config.sync.top_limit,
        ));
        Self { config, sync, home }
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn sync(&self) -> &Arc<CatalogSync> {
        &self.sync
    }

    pub fn home(&self) -> &Arc<HomeController> {
        &self.home
    }

    pub fn top_limit(&self) -> u32 {
        self.config.sync.top_limit
    }

    /// Detail controller for one request's selected game.
    pub fn detail_controller(&self) -> GameDetailController {
        GameDetailController::new(Arc::clone(&self.sync))
    }
}
