//! Steam HTTP client.
//!
//! The Web API host serves player counts and the app list; the storefront
//! host serves app details and review summaries. Neither needs a session.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use super::types::{AppDetails, CatalogEntry, PlayerCount, PriceOverview, ReviewSummary};
use super::{SteamApi, SteamApiError};
use crate::config::SteamConfig;

/// Steam API client.
pub struct SteamClient {
    client: Client,
    api_base_url: String,
    store_base_url: String,
}

impl SteamClient {
    /// Create a new Steam client.
    pub fn new(config: &SteamConfig) -> Result<Self, SteamApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(u64::from(config.timeout_secs)))
            .build()?;

        Ok(Self {
            client,
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            store_base_url: config.store_base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        what: &str,
    ) -> Result<T, SteamApiError> {
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SteamApiError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        response.json().await.map_err(|e| {
            SteamApiError::ParseError(format!("Failed to parse {} response: {}", what, e))
        })
    }
}

#[async_trait]
impl SteamApi for SteamClient {
    async fn fetch_player_count(
        &self,
        app_id: &str,
        api_key: &str,
    ) -> Result<PlayerCount, SteamApiError> {
        let url = format!(
            "{}/ISteamUserStats/GetNumberOfCurrentPlayers/v1/",
            self.api_base_url
        );

        debug!("Steam player count: app_id={}", app_id);

        let request = self
            .client
            .get(&url)
            .query(&[("appid", app_id), ("key", api_key)]);
        let body: PlayerCountResponse = self.get_json(request, "player count").await?;

        Ok(body.into())
    }

    async fn fetch_catalog(&self) -> Result<Vec<CatalogEntry>, SteamApiError> {
        let url = format!("{}/ISteamApps/GetAppList/v1/", self.api_base_url);

        debug!("Steam app list");

        let body: AppListResponse = self.get_json(self.client.get(&url), "app list").await?;
        let entries: Vec<CatalogEntry> = body.into();

        debug!("Steam app list returned {} entries", entries.len());
        Ok(entries)
    }

    async fn fetch_app_details(&self, app_id: &str) -> Result<Option<AppDetails>, SteamApiError> {
        let url = format!("{}/api/appdetails", self.store_base_url);

        debug!("Steam app details: app_id={}", app_id);

        let request = self.client.get(&url).query(&[("appids", app_id)]);
        let body: HashMap<String, AppDetailsEnvelope> =
            self.get_json(request, "app details").await?;

        Ok(app_details_from_body(app_id, body))
    }

    async fn fetch_review_summary(&self, app_id: &str) -> Result<ReviewSummary, SteamApiError> {
        let url = format!("{}/appreviews/{}", self.store_base_url, app_id);

        debug!("Steam review summary: app_id={}", app_id);

        let request = self.client.get(&url).query(&[("json", "1")]);
        let body: ReviewResponse = self.get_json(request, "review summary").await?;

        Ok(body.into())
    }
}

// ============================================================================
// Steam Response Types (private)
// ============================================================================

#[derive(Debug, Deserialize)]
struct PlayerCountResponse {
    response: PlayerCountBody,
}

#[derive(Debug, Deserialize)]
struct PlayerCountBody {
    // Missing when `result` reports an unknown app.
    #[serde(default)]
    player_count: u32,
    result: i32,
}

#[derive(Debug, Deserialize)]
struct AppListResponse {
    applist: AppList,
}

#[derive(Debug, Deserialize)]
struct AppList {
    apps: AppListApps,
}

#[derive(Debug, Deserialize)]
struct AppListApps {
    #[serde(default)]
    app: Vec<AppListEntry>,
}

#[derive(Debug, Deserialize)]
struct AppListEntry {
    appid: u32,
    #[serde(default)]
    name: String,
}

#[derive(Debug, Deserialize)]
struct AppDetailsEnvelope {
    success: bool,
    #[serde(default)]
    data: Option<AppDetailsData>,
}

#[derive(Debug, Deserialize)]
struct AppDetailsData {
    #[serde(default)]
    name: String,
    #[serde(default)]
    header_image: String,
    #[serde(default)]
    price_overview: Option<PriceOverviewData>,
    #[serde(default)]
    short_description: String,
}

#[derive(Debug, Deserialize)]
struct PriceOverviewData {
    #[serde(default)]
    currency: String,
    final_formatted: String,
    #[serde(default)]
    discount_percent: u8,
}

#[derive(Debug, Deserialize)]
struct ReviewResponse {
    query_summary: ReviewQuerySummary,
}

#[derive(Debug, Deserialize)]
struct ReviewQuerySummary {
    review_score: i32,
}

// ============================================================================
// Conversions
// ============================================================================

impl From<PlayerCountResponse> for PlayerCount {
    fn from(r: PlayerCountResponse) -> Self {
        Self {
            player_count: r.response.player_count,
            result: r.response.result,
        }
    }
}

impl From<AppListResponse> for Vec<CatalogEntry> {
    fn from(r: AppListResponse) -> Self {
        r.applist
            .apps
            .app
            .into_iter()
            .map(|a| CatalogEntry {
                app_id: a.appid,
                name: a.name,
            })
            .collect()
    }
}

impl From<PriceOverviewData> for PriceOverview {
    fn from(p: PriceOverviewData) -> Self {
        Self {
            currency: p.currency,
            final_formatted: p.final_formatted,
            discount_percent: p.discount_percent,
        }
    }
}

impl From<ReviewResponse> for ReviewSummary {
    fn from(r: ReviewResponse) -> Self {
        Self {
            review_score: r.query_summary.review_score,
        }
    }
}

/// The details body is keyed by app id; an unsuccessful entry has no data.
fn app_details_from_body(
    app_id: &str,
    mut body: HashMap<String, AppDetailsEnvelope>,
) -> Option<AppDetails> {
    let envelope = body.remove(app_id)?;
    if !envelope.success {
        return None;
    }

    envelope.data.map(|d| AppDetails {
        name: d.name,
        header_image: d.header_image,
        price: d.price_overview.map(PriceOverview::from),
        short_description: d.short_description,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_count_conversion() {
        let body: PlayerCountResponse =
            serde_json::from_str(r#"{"response":{"player_count":123,"result":1}}"#).unwrap();

        let count: PlayerCount = body.into();
        assert_eq!(
            count,
            PlayerCount {
                player_count: 123,
                result: 1
            }
        );
        assert!(count.is_ok());
    }

    #[test]
    fn test_player_count_without_count_field() {
        let body: PlayerCountResponse =
            serde_json::from_str(r#"{"response":{"result":42}}"#).unwrap();

        let count: PlayerCount = body.into();
        assert_eq!(count.player_count, 0);
        assert!(!count.is_ok());
    }

    #[test]
    fn test_app_list_conversion() {
        let body: AppListResponse = serde_json::from_str(
            r#"{"applist":{"apps":{"app":[{"appid":570,"name":"Dota 2"},{"appid":1,"name":""}]}}}"#,
        )
        .unwrap();

        let entries: Vec<CatalogEntry> = body.into();
        assert_eq!(
            entries,
            vec![
                CatalogEntry {
                    app_id: 570,
                    name: "Dota 2".to_string()
                },
                CatalogEntry {
                    app_id: 1,
                    name: String::new()
                },
            ]
        );
    }

    #[test]
    fn test_app_list_missing_applist_is_parse_error() {
        let result: Result<AppListResponse, _> = serde_json::from_str(r#"{"apps":[]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_app_details_with_price() {
        let body: HashMap<String, AppDetailsEnvelope> = serde_json::from_str(
            r#"{"620":{"success":true,"data":{
                "name":"Portal 2",
                "steam_appid":620,
                "header_image":"https://cdn/620/header.jpg",
                "short_description":"Sequel.",
                "price_overview":{"currency":"USD","initial":999,"final":199,
                    "discount_percent":80,"initial_formatted":"$9.99","final_formatted":"$1.99"}
            }}}"#,
        )
        .unwrap();

        let details = app_details_from_body("620", body).unwrap();
        assert_eq!(details.name, "Portal 2");
        assert_eq!(details.header_image, "https://cdn/620/header.jpg");
        assert_eq!(details.short_description, "Sequel.");
        let price = details.price.unwrap();
        assert_eq!(price.currency, "USD");
        assert_eq!(price.final_formatted, "$1.99");
        assert_eq!(price.discount_percent, 80);
    }

    #[test]
    fn test_app_details_free_to_play_has_no_price() {
        let body: HashMap<String, AppDetailsEnvelope> = serde_json::from_str(
            r#"{"570":{"success":true,"data":{
                "name":"Dota 2","header_image":"https://cdn/570.jpg","short_description":"MOBA"
            }}}"#,
        )
        .unwrap();

        let details = app_details_from_body("570", body).unwrap();
        assert!(details.price.is_none());
    }

    #[test]
    fn test_app_details_unsuccessful_or_missing_key() {
        let body: HashMap<String, AppDetailsEnvelope> =
            serde_json::from_str(r#"{"999":{"success":false}}"#).unwrap();
        assert!(app_details_from_body("999", body).is_none());

        let body: HashMap<String, AppDetailsEnvelope> =
            serde_json::from_str(r#"{"1":{"success":true,"data":{"name":"x"}}}"#).unwrap();
        assert!(app_details_from_body("2", body).is_none());
    }

    #[test]
    fn test_review_conversion() {
        let body: ReviewResponse = serde_json::from_str(
            r#"{"success":1,"query_summary":{"num_reviews":20,"review_score":8,"review_score_desc":"Very Positive"}}"#,
        )
        .unwrap();

        let summary: ReviewSummary = body.into();
        assert_eq!(summary.review_score, 8);
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let mut config = SteamConfig::with_api_key("key");
        config.api_base_url = "http://localhost:1234/".to_string();
        config.store_base_url = "http://localhost:5678//".to_string();

        let client = SteamClient::new(&config).unwrap();
        assert_eq!(client.api_base_url, "http://localhost:1234");
        assert_eq!(client.store_base_url, "http://localhost:5678");
    }
}
