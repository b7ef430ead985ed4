//! Steam Web API and storefront gateway.
//!
//! Two read-only request groups: the Web API (player counts, app list) and
//! the storefront (app details, review summaries). Calls are stateless; there
//! is no retry and no response caching.

mod client;
mod types;

pub use client::SteamClient;
pub use types::*;

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur when talking to Steam.
#[derive(Debug, Error)]
pub enum SteamApiError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Steam answered with a non-success status.
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

/// The two remote failure kinds callers distinguish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteFailureKind {
    /// Network unreachable, timeout, or non-success status.
    Transport,
    /// The body could not be read as the expected shape.
    Malformed,
}

impl SteamApiError {
    pub fn kind(&self) -> RemoteFailureKind {
        match self {
            SteamApiError::HttpError(e) if e.is_decode() => RemoteFailureKind::Malformed,
            SteamApiError::HttpError(_) | SteamApiError::ApiError { .. } => {
                RemoteFailureKind::Transport
            }
            SteamApiError::ParseError(_) => RemoteFailureKind::Malformed,
        }
    }
}

/// Trait for Steam clients.
#[async_trait]
pub trait SteamApi: Send + Sync {
    /// Current player count for an app.
    async fn fetch_player_count(
        &self,
        app_id: &str,
        api_key: &str,
    ) -> Result<PlayerCount, SteamApiError>;

    /// The full app catalog in one response.
    async fn fetch_catalog(&self) -> Result<Vec<CatalogEntry>, SteamApiError>;

    /// Store page details; `None` when the store has no data for the app.
    async fn fetch_app_details(&self, app_id: &str) -> Result<Option<AppDetails>, SteamApiError>;

    /// Aggregate review score.
    async fn fetch_review_summary(&self, app_id: &str) -> Result<ReviewSummary, SteamApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        let status = SteamApiError::ApiError {
            status: 503,
            message: "unavailable".to_string(),
        };
        assert_eq!(status.kind(), RemoteFailureKind::Transport);

        let parse = SteamApiError::ParseError("missing field".to_string());
        assert_eq!(parse.kind(), RemoteFailureKind::Malformed);
    }

    #[test]
    fn test_error_display() {
        let err = SteamApiError::ApiError {
            status: 403,
            message: "Forbidden".to_string(),
        };
        assert_eq!(err.to_string(), "API error: 403 - Forbidden");
    }
}
