//! Mapping from Steam responses to catalog writes.
//!
//! Every placeholder the catalog falls back to is chosen here, so the
//! network code and the store never invent values.

use crate::catalog::{Game, StorePatch, NO_PRICE};
use crate::steam::{AppDetails, CatalogEntry, PlayerCount};

/// Catalog rows for the remote app list; nameless entries are dropped.
pub fn games_from_catalog(entries: Vec<CatalogEntry>) -> Vec<Game> {
    entries
        .into_iter()
        .filter(|entry| !entry.name.is_empty())
        .map(|entry| Game::new(entry.app_id.to_string(), entry.name))
        .collect()
}

/// Player count worth writing, if Steam reported one.
pub fn player_count_update(count: &PlayerCount) -> Option<u32> {
    count.is_ok().then_some(count.player_count)
}

/// Store metadata patch for a details response.
///
/// A missing price block means the title cannot be bought, which is stored
/// as [`NO_PRICE`] with no discount. Empty image or description strings keep
/// whatever the row already has.
pub fn store_patch_from_details(details: &AppDetails) -> StorePatch {
    let (price_us, discount) = match &details.price {
        Some(price) if !price.final_formatted.is_empty() => {
            (price.final_formatted.clone(), price.discount_percent.min(100))
        }
        _ => (NO_PRICE.to_string(), 0),
    };

    StorePatch {
        header_image: non_empty(&details.header_image),
        price_us,
        discount,
        short_description: non_empty(&details.short_description),
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::steam::PriceOverview;

    fn details(price: Option<PriceOverview>) -> AppDetails {
        AppDetails {
            name: "Portal 2".to_string(),
            header_image: "https://cdn/620.jpg".to_string(),
            price,
            short_description: "Sequel.".to_string(),
        }
    }

    #[test]
    fn test_games_from_catalog_filters_and_normalizes() {
        let games = games_from_catalog(vec![
            CatalogEntry {
                app_id: 1,
                name: "Test Game".to_string(),
            },
            CatalogEntry {
                app_id: 2,
                name: String::new(),
            },
        ]);

        assert_eq!(games.len(), 1);
        assert_eq!(games[0].game_id, "1");
        assert_eq!(games[0].search_name, "test game");
        assert_eq!(games[0].price_us, "$0.0");
    }

    #[test]
    fn test_player_count_update_requires_ok_result() {
        assert_eq!(
            player_count_update(&PlayerCount {
                player_count: 123,
                result: 1
            }),
            Some(123)
        );
        assert_eq!(
            player_count_update(&PlayerCount {
                player_count: 0,
                result: 42
            }),
            None
        );
    }

    #[test]
    fn test_patch_with_price() {
        let patch = store_patch_from_details(&details(Some(PriceOverview {
            currency: "USD".to_string(),
            final_formatted: "$1.99".to_string(),
            discount_percent: 80,
        })));

        assert_eq!(
            patch,
            StorePatch {
                header_image: Some("https://cdn/620.jpg".to_string()),
                price_us: "$1.99".to_string(),
                discount: 80,
                short_description: Some("Sequel.".to_string()),
            }
        );
    }

    #[test]
    fn test_patch_without_price_uses_no_price() {
        let patch = store_patch_from_details(&details(None));
        assert_eq!(patch.price_us, NO_PRICE);
        assert_eq!(patch.discount, 0);
    }

    #[test]
    fn test_patch_clamps_discount_and_skips_blank_strings() {
        let mut d = details(Some(PriceOverview {
            currency: "USD".to_string(),
            final_formatted: "$0.00".to_string(),
            discount_percent: 150,
        }));
        d.header_image = String::new();
        d.short_description = "  ".to_string();

        let patch = store_patch_from_details(&d);
        assert_eq!(patch.discount, 100);
        assert_eq!(patch.header_image, None);
        assert_eq!(patch.short_description, None);
    }
}
