//! Testing utilities and mock implementations.
//!
//! The mocks stand in for the Steam services so the sync layer, the
//! presentation controllers and the HTTP API can be exercised without
//! network access.
//!
//! # Example
//!
//! ```rust,ignore
//! use steamcharts_core::testing::{fixtures, MockSteamApi};
//!
//! let steam = MockSteamApi::new();
//! steam.set_catalog(vec![fixtures::catalog_entry(570, "Dota 2")]).await;
//! steam.set_player_count("570", 700_000, 1).await;
//! ```

mod mock_steam;

pub use mock_steam::{MockSteamApi, RecordedSteamCall, SteamEndpoint};

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::catalog::Game;
    use crate::steam::{AppDetails, CatalogEntry, PriceOverview};

    /// An app list entry.
    pub fn catalog_entry(app_id: u32, name: &str) -> CatalogEntry {
        CatalogEntry {
            app_id,
            name: name.to_string(),
        }
    }

    /// Store details with a predictable image URL and description.
    ///
    /// `price` is `(final_formatted, discount_percent)`; `None` models a
    /// free-to-play title.
    pub fn app_details(name: &str, price: Option<(&str, u8)>) -> AppDetails {
        AppDetails {
            name: name.to_string(),
            header_image: format!("https://cdn.example/{}/header.jpg", name),
            price: price.map(|(final_formatted, discount_percent)| PriceOverview {
                currency: "USD".to_string(),
                final_formatted: final_formatted.to_string(),
                discount_percent,
            }),
            short_description: format!("About {}", name),
        }
    }

    /// A catalog row with the given player count.
    pub fn game(game_id: &str, name: &str, player_count: u32) -> Game {
        let mut game = Game::new(game_id, name);
        game.player_count = player_count;
        game
    }
}
