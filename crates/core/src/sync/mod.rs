//! Catalog synchronization - keeps the local game store in line with Steam.
//!
//! Two write paths exist: a full catalog repopulation from the Steam app
//! list, and per-game enrichment through three independent legs (player
//! count, store details, review score). Each leg fetches first and writes
//! only what it fetched, so a failing leg never touches the row.

pub mod mapping;

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::catalog::{
    normalize_search_name, now_millis, search_pattern, CatalogError, Game, GameStore,
};
use crate::config::EnrichPolicy;
use crate::steam::{RemoteFailureKind, SteamApi, SteamApiError};

/// Errors from synchronization operations.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Local store failure; never retried or swallowed.
    #[error("Catalog storage failed: {0}")]
    Storage(#[from] CatalogError),

    /// A Steam request failed.
    #[error("Steam request failed: {0}")]
    Remote(#[from] SteamApiError),

    /// An enrichment leg failed and the remaining legs were skipped.
    #[error("Enrichment leg '{leg}' failed: {source}")]
    LegFailed {
        leg: EnrichLeg,
        #[source]
        source: SteamApiError,
    },
}

impl SyncError {
    /// Remote failure kind, or `None` for local storage errors.
    pub fn remote_failure(&self) -> Option<RemoteFailureKind> {
        match self {
            SyncError::Storage(_) => None,
            SyncError::Remote(e) | SyncError::LegFailed { source: e, .. } => Some(e.kind()),
        }
    }
}

/// One of the three enrichment legs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnrichLeg {
    PlayerCount,
    StoreDetails,
    ReviewScore,
}

impl fmt::Display for EnrichLeg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EnrichLeg::PlayerCount => "player_count",
            EnrichLeg::StoreDetails => "store_details",
            EnrichLeg::ReviewScore => "review_score",
        };
        f.write_str(name)
    }
}

/// What a single leg did after a successful fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegOutcome {
    /// The row was updated.
    Written,
    /// Nothing to write: Steam had no data, or the row does not exist.
    Skipped,
}

/// A leg whose remote call failed.
#[derive(Debug)]
pub struct LegFailure {
    pub leg: EnrichLeg,
    pub error: SteamApiError,
}

/// Result of enriching one game.
#[derive(Debug)]
pub struct EnrichReport {
    pub game_id: String,
    pub written: Vec<EnrichLeg>,
    pub skipped: Vec<EnrichLeg>,
    pub failed: Vec<LegFailure>,
}

impl EnrichReport {
    fn new(game_id: &str) -> Self {
        Self {
            game_id: game_id.to_string(),
            written: Vec::new(),
            skipped: Vec::new(),
            failed: Vec::new(),
        }
    }

    /// Every attempted leg failed remotely.
    pub fn all_failed(&self) -> bool {
        !self.failed.is_empty() && self.written.is_empty() && self.skipped.is_empty()
    }

    fn record(
        &mut self,
        leg: EnrichLeg,
        outcome: Result<LegOutcome, SyncError>,
    ) -> Result<(), SyncError> {
        match outcome {
            Ok(LegOutcome::Written) => self.written.push(leg),
            Ok(LegOutcome::Skipped) => self.skipped.push(leg),
            Err(SyncError::Remote(error)) => {
                warn!(
                    "Enrichment leg {} failed for game {}: {}",
                    leg, self.game_id, error
                );
                self.failed.push(LegFailure { leg, error });
            }
            Err(other) => return Err(other),
        }
        Ok(())
    }
}

/// Synchronizes the local catalog with Steam.
pub struct CatalogSync {
    store: Arc<dyn GameStore>,
    steam: Arc<dyn SteamApi>,
    api_key: String,
    policy: EnrichPolicy,
}

impl CatalogSync {
    pub fn new(
        store: Arc<dyn GameStore>,
        steam: Arc<dyn SteamApi>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            store,
            steam,
            api_key: api_key.into(),
            policy: EnrichPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: EnrichPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> EnrichPolicy {
        self.policy
    }

    pub fn is_catalog_empty(&self) -> Result<bool, CatalogError> {
        Ok(self.store.count()? == 0)
    }

    /// Reload the whole catalog from the Steam app list.
    ///
    /// The list is fetched before anything is written and then swapped in
    /// with one transaction, so a failed fetch leaves the current catalog
    /// as it was. Returns the number of games stored.
    pub async fn repopulate_catalog(&self) -> Result<usize, SyncError> {
        info!("Fetching Steam app list");
        let entries = self.steam.fetch_catalog().await?;
        let fetched = entries.len();

        let games = mapping::games_from_catalog(entries);
        if games.is_empty() {
            warn!("Steam app list had no named entries, catalog left empty");
        }

        self.store.replace_all(&games)?;

        info!(
            "Catalog repopulated: {} games stored ({} entries fetched)",
            games.len(),
            fetched
        );
        Ok(games.len())
    }

    /// Repopulate only when the catalog is empty. Returns whether it ran.
    pub async fn ensure_catalog(&self) -> Result<bool, SyncError> {
        if !self.is_catalog_empty()? {
            debug!("Catalog already populated");
            return Ok(false);
        }

        self.repopulate_catalog().await?;
        Ok(true)
    }

    pub async fn refresh_player_count(&self, game_id: &str) -> Result<LegOutcome, SyncError> {
        let count = self
            .steam
            .fetch_player_count(game_id, &self.api_key)
            .await?;

        let Some(player_count) = mapping::player_count_update(&count) else {
            debug!(
                "No player count for game {} (result {})",
                game_id, count.result
            );
            return Ok(LegOutcome::Skipped);
        };

        let written = self.store.update_player_count(game_id, player_count)?;
        Ok(outcome(written))
    }

    pub async fn refresh_store_details(&self, game_id: &str) -> Result<LegOutcome, SyncError> {
        let Some(details) = self.steam.fetch_app_details(game_id).await? else {
            debug!("No store details for game {}", game_id);
            return Ok(LegOutcome::Skipped);
        };

        let patch = mapping::store_patch_from_details(&details);
        let written = self
            .store
            .update_enrichment(game_id, &patch, now_millis())?;
        Ok(outcome(written))
    }

    pub async fn refresh_review_score(&self, game_id: &str) -> Result<LegOutcome, SyncError> {
        let summary = self.steam.fetch_review_summary(game_id).await?;

        let written = self
            .store
            .update_review_score(game_id, summary.review_score)?;
        Ok(outcome(written))
    }

    /// Run the three enrichment legs for one game under the configured policy.
    ///
    /// `BestEffort` runs all legs concurrently and reports remote failures in
    /// the [`EnrichReport`]. `AbortOnFirstFailure` runs them in order and
    /// returns [`SyncError::LegFailed`] for the first remote failure. Storage
    /// errors are returned under both policies.
    pub async fn enrich(&self, game_id: &str) -> Result<EnrichReport, SyncError> {
        let report = match self.policy {
            EnrichPolicy::BestEffort => self.enrich_best_effort(game_id).await?,
            EnrichPolicy::AbortOnFirstFailure => self.enrich_in_order(game_id).await?,
        };

        info!(
            "Enriched game {}: written={:?} skipped={:?} failed={}",
            game_id,
            report.written,
            report.skipped,
            report.failed.len()
        );
        Ok(report)
    }

    async fn enrich_best_effort(&self, game_id: &str) -> Result<EnrichReport, SyncError> {
        let (players, details, reviews) = futures::join!(
            self.refresh_player_count(game_id),
            self.refresh_store_details(game_id),
            self.refresh_review_score(game_id),
        );

        let mut report = EnrichReport::new(game_id);
        report.record(EnrichLeg::PlayerCount, players)?;
        report.record(EnrichLeg::StoreDetails, details)?;
        report.record(EnrichLeg::ReviewScore, reviews)?;
        Ok(report)
    }

    async fn enrich_in_order(&self, game_id: &str) -> Result<EnrichReport, SyncError> {
        let mut report = EnrichReport::new(game_id);

        for leg in [
            EnrichLeg::PlayerCount,
            EnrichLeg::StoreDetails,
            EnrichLeg::ReviewScore,
        ] {
            let result = match leg {
                EnrichLeg::PlayerCount => self.refresh_player_count(game_id).await,
                EnrichLeg::StoreDetails => self.refresh_store_details(game_id).await,
                EnrichLeg::ReviewScore => self.refresh_review_score(game_id).await,
            };

            match result {
                Ok(LegOutcome::Written) => report.written.push(leg),
                Ok(LegOutcome::Skipped) => report.skipped.push(leg),
                Err(SyncError::Remote(source)) => {
                    warn!(
                        "Enrichment of game {} stopped at leg {}: {}",
                        game_id, leg, source
                    );
                    return Err(SyncError::LegFailed { leg, source });
                }
                Err(other) => return Err(other),
            }
        }

        Ok(report)
    }

    pub fn get_game(&self, game_id: &str) -> Result<Option<Game>, CatalogError> {
        self.store.get_by_id(game_id)
    }

    /// Games whose normalized name contains the normalized `query`.
    ///
    /// A query with nothing searchable left after normalization matches no
    /// game.
    pub fn search(&self, query: &str) -> Result<Vec<Game>, CatalogError> {
        if !query.is_empty() && normalize_search_name(query).is_empty() {
            debug!("Search query {:?} has no searchable characters", query);
            return Ok(Vec::new());
        }
        self.store.search(&search_pattern(query))
    }

    pub fn top_games(&self, limit: u32) -> Result<Vec<Game>, CatalogError> {
        self.store.top_n(limit)
    }

    pub fn game_count(&self) -> Result<u64, CatalogError> {
        self.store.count()
    }
}

fn outcome(written: bool) -> LegOutcome {
    if written {
        LegOutcome::Written
    } else {
        LegOutcome::Skipped
    }
}
