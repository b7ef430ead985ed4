//! Game catalog - the local cache of the Steam app list.
//!
//! Rows are created in bulk from the remote catalog and then enriched in
//! place, one field group at a time, with player counts, store metadata and
//! review scores.

mod migrations;
mod normalize;
mod sqlite;
mod types;

pub use migrations::{schema_version, SCHEMA_VERSION};
pub use normalize::{normalize_search_name, search_pattern};
pub use sqlite::SqliteGameStore;
pub use types::*;

use chrono::{DateTime, Utc};

/// Trait for game catalog storage.
///
/// Update operations return whether a row matched; updating an unknown id is
/// not an error.
pub trait GameStore: Send + Sync {
    /// Insert games, replacing any existing row with the same id.
    fn upsert_all(&self, games: &[Game]) -> Result<(), CatalogError>;

    /// Replace the whole catalog with `games` in a single transaction.
    fn replace_all(&self, games: &[Game]) -> Result<(), CatalogError>;

    /// Remove every game.
    fn clear(&self) -> Result<(), CatalogError>;

    /// All games, in no particular order.
    fn get_all(&self) -> Result<Vec<Game>, CatalogError>;

    fn get_by_id(&self, game_id: &str) -> Result<Option<Game>, CatalogError>;

    fn count(&self) -> Result<u64, CatalogError>;

    fn update_player_count(&self, game_id: &str, player_count: u32) -> Result<bool, CatalogError>;

    /// Apply store metadata and advance `last_updated` (it never moves back).
    fn update_enrichment(
        &self,
        game_id: &str,
        patch: &StorePatch,
        updated_at: DateTime<Utc>,
    ) -> Result<bool, CatalogError>;

    fn update_review_score(&self, game_id: &str, review_score: i32) -> Result<bool, CatalogError>;

    /// Games whose search key matches a LIKE pattern (see [`search_pattern`]).
    fn search(&self, pattern: &str) -> Result<Vec<Game>, CatalogError>;

    /// Up to `limit` games with the most players, ties ordered by id.
    fn top_n(&self, limit: u32) -> Result<Vec<Game>, CatalogError>;
}
