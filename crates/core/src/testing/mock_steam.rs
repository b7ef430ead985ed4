//! Mock Steam API for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::steam::{
    AppDetails, CatalogEntry, PlayerCount, ReviewSummary, SteamApi, SteamApiError,
};

/// Result code Steam returns for an app it has no player count for.
const UNKNOWN_APP_RESULT: i32 = 42;

/// The four Steam endpoints, used to target error injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SteamEndpoint {
    PlayerCount,
    Catalog,
    AppDetails,
    Reviews,
}

/// A recorded Steam call for test assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedSteamCall {
    FetchPlayerCount { app_id: String, api_key: String },
    FetchCatalog,
    FetchAppDetails { app_id: String },
    FetchReviewSummary { app_id: String },
}

/// Mock implementation of the SteamApi trait.
///
/// Provides controllable behavior for testing:
/// - Return configurable catalog, player counts, details and reviews
/// - Track calls for assertions
/// - Fail the next call to a given endpoint
///
/// Unknown apps behave like Steam: a player count with a non-OK result, no
/// store details, and a zero review score.
#[derive(Debug)]
pub struct MockSteamApi {
    catalog: Arc<RwLock<Vec<CatalogEntry>>>,
    player_counts: Arc<RwLock<HashMap<String, PlayerCount>>>,
    details: Arc<RwLock<HashMap<String, AppDetails>>>,
    reviews: Arc<RwLock<HashMap<String, ReviewSummary>>>,
    calls: Arc<RwLock<Vec<RecordedSteamCall>>>,
    /// Errors returned by the next call to each endpoint.
    next_errors: Arc<RwLock<HashMap<SteamEndpoint, SteamApiError>>>,
}

impl Default for MockSteamApi {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSteamApi {
    /// Create a new mock with no data.
    pub fn new() -> Self {
        Self {
            catalog: Arc::new(RwLock::new(Vec::new())),
            player_counts: Arc::new(RwLock::new(HashMap::new())),
            details: Arc::new(RwLock::new(HashMap::new())),
            reviews: Arc::new(RwLock::new(HashMap::new())),
            calls: Arc::new(RwLock::new(Vec::new())),
            next_errors: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    // =========================================================================
    // Data Configuration
    // =========================================================================

    /// Set the app list returned by `fetch_catalog`.
    pub async fn set_catalog(&self, entries: Vec<CatalogEntry>) {
        *self.catalog.write().await = entries;
    }

    pub async fn set_player_count(&self, app_id: &str, player_count: u32, result: i32) {
        self.player_counts
            .write()
            .await
            .insert(app_id.to_string(), PlayerCount { player_count, result });
    }

    pub async fn set_app_details(&self, app_id: &str, details: AppDetails) {
        self.details
            .write()
            .await
            .insert(app_id.to_string(), details);
    }

    pub async fn set_review_score(&self, app_id: &str, review_score: i32) {
        self.reviews
            .write()
            .await
            .insert(app_id.to_string(), ReviewSummary { review_score });
    }

    // =========================================================================
    // Call Recording
    // =========================================================================

    /// Get all recorded calls.
    pub async fn recorded_calls(&self) -> Vec<RecordedSteamCall> {
        self.calls.read().await.clone()
    }

    /// Get the number of calls performed.
    pub async fn call_count(&self) -> usize {
        self.calls.read().await.len()
    }

    async fn record(&self, call: RecordedSteamCall) {
        self.calls.write().await.push(call);
    }

    // =========================================================================
    // Error Injection
    // =========================================================================

    /// Configure the next call to `endpoint` to fail with the given error.
    pub async fn set_next_error(&self, endpoint: SteamEndpoint, error: SteamApiError) {
        self.next_errors.write().await.insert(endpoint, error);
    }

    async fn take_error(&self, endpoint: SteamEndpoint) -> Option<SteamApiError> {
        self.next_errors.write().await.remove(&endpoint)
    }
}

#[async_trait]
impl SteamApi for MockSteamApi {
    async fn fetch_player_count(
        &self,
        app_id: &str,
        api_key: &str,
    ) -> Result<PlayerCount, SteamApiError> {
        self.record(RecordedSteamCall::FetchPlayerCount {
            app_id: app_id.to_string(),
            api_key: api_key.to_string(),
        })
        .await;

        if let Some(err) = self.take_error(SteamEndpoint::PlayerCount).await {
            return Err(err);
        }

        Ok(self
            .player_counts
            .read()
            .await
            .get(app_id)
            .copied()
            .unwrap_or(PlayerCount {
                player_count: 0,
                result: UNKNOWN_APP_RESULT,
            }))
    }

    async fn fetch_catalog(&self) -> Result<Vec<CatalogEntry>, SteamApiError> {
        self.record(RecordedSteamCall::FetchCatalog).await;

        if let Some(err) = self.take_error(SteamEndpoint::Catalog).await {
            return Err(err);
        }

        Ok(self.catalog.read().await.clone())
    }

    async fn fetch_app_details(&self, app_id: &str) -> Result<Option<AppDetails>, SteamApiError> {
        self.record(RecordedSteamCall::FetchAppDetails {
            app_id: app_id.to_string(),
        })
        .await;

        if let Some(err) = self.take_error(SteamEndpoint::AppDetails).await {
            return Err(err);
        }

        Ok(self.details.read().await.get(app_id).cloned())
    }

    async fn fetch_review_summary(&self, app_id: &str) -> Result<ReviewSummary, SteamApiError> {
        self.record(RecordedSteamCall::FetchReviewSummary {
            app_id: app_id.to_string(),
        })
        .await;

        if let Some(err) = self.take_error(SteamEndpoint::Reviews).await {
            return Err(err);
        }

        Ok(self
            .reviews
            .read()
            .await
            .get(app_id)
            .copied()
            .unwrap_or(ReviewSummary { review_score: 0 }))
    }
}
