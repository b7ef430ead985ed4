//! Types for Steam responses, as handed to the rest of the crate.

use serde::{Deserialize, Serialize};

/// `result` value Steam uses for a successful player count lookup.
pub const PLAYER_COUNT_RESULT_OK: i32 = 1;

/// Current player count for an app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerCount {
    pub player_count: u32,
    /// Steam result code; only [`PLAYER_COUNT_RESULT_OK`] carries a count.
    pub result: i32,
}

impl PlayerCount {
    pub fn is_ok(&self) -> bool {
        self.result == PLAYER_COUNT_RESULT_OK
    }
}

/// One entry of the Steam app list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub app_id: u32,
    pub name: String,
}

/// Store page details for an app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppDetails {
    pub name: String,
    pub header_image: String,
    /// Absent when the title has no purchasable price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<PriceOverview>,
    pub short_description: String,
}

/// Price block of the store details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceOverview {
    pub currency: String,
    /// Display price after discount, e.g. "$9.99".
    pub final_formatted: String,
    pub discount_percent: u8,
}

/// Aggregate review data for an app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewSummary {
    pub review_score: i32,
}
