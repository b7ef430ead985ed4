//! Types for the local game catalog.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::normalize::normalize_search_name;

/// Header image placeholder until the store details have been fetched.
pub const DEFAULT_HEADER_IMAGE: &str = "No URL";
/// Price placeholder until the store details have been fetched.
pub const DEFAULT_PRICE: &str = "$0.0";
/// Description placeholder until the store details have been fetched.
pub const DEFAULT_SHORT_DESCRIPTION: &str = "None";
/// Price shown when the store lists the title without a purchasable price
/// (free-to-play, unreleased, delisted).
pub const NO_PRICE: &str = "N/A";

/// A cached Steam game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    /// Steam app id, kept as text.
    pub game_id: String,
    /// Display name.
    pub game_name: String,
    /// Normalized name used for searching.
    pub search_name: String,
    /// Current players, as of the last refresh.
    pub player_count: u32,
    pub header_image: String,
    /// Formatted final price in USD.
    pub price_us: String,
    /// Discount percentage (0-100).
    pub discount: u8,
    pub short_description: String,
    pub review_score: i32,
    /// Last enrichment write, or creation time before the first one.
    pub last_updated: DateTime<Utc>,
}

impl Game {
    /// A fresh record with every enrichment field at its placeholder.
    pub fn new(game_id: impl Into<String>, game_name: impl Into<String>) -> Self {
        let game_name = game_name.into();
        Self {
            game_id: game_id.into(),
            search_name: normalize_search_name(&game_name),
            game_name,
            player_count: 0,
            header_image: DEFAULT_HEADER_IMAGE.to_string(),
            price_us: DEFAULT_PRICE.to_string(),
            discount: 0,
            short_description: DEFAULT_SHORT_DESCRIPTION.to_string(),
            review_score: 0,
            last_updated: now_millis(),
        }
    }
}

/// Store metadata update for one game.
///
/// `None` keeps the stored value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StorePatch {
    pub header_image: Option<String>,
    pub price_us: String,
    pub discount: u8,
    pub short_description: Option<String>,
}

/// Current time truncated to the millisecond precision the store keeps.
pub fn now_millis() -> DateTime<Utc> {
    let now = Utc::now();
    DateTime::from_timestamp_millis(now.timestamp_millis()).unwrap_or(now)
}

/// Errors for catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<rusqlite::Error> for CatalogError {
    fn from(e: rusqlite::Error) -> Self {
        CatalogError::Database(e.to_string())
    }
}
