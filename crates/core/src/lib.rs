pub mod catalog;
pub mod config;
pub mod presentation;
pub mod steam;
pub mod sync;
pub mod testing;

pub use catalog::{CatalogError, Game, GameStore, SqliteGameStore, StorePatch};
pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, EnrichPolicy,
    SanitizedConfig,
};
pub use presentation::{
    ControllerError, GameDetailController, GameSnapshot, GameUiState, HomeController, HomeState,
};
pub use steam::{SteamApi, SteamApiError, SteamClient};
pub use sync::{CatalogSync, EnrichLeg, EnrichReport, SyncError};
