//! Common test utilities for API testing with mocks.
//!
//! Builds an in-process router backed by a temporary SQLite catalog and a
//! [`MockSteamApi`], so requests run without network access.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use steamcharts_core::config::{DatabaseConfig, ServerConfig, SteamConfig, SyncConfig};
use steamcharts_core::testing::MockSteamApi;
use steamcharts_core::{
    CatalogSync, Config, EnrichPolicy, GameStore, SqliteGameStore, SteamApi,
};
use steamcharts_server::state::AppState;

/// Re-export fixtures for test convenience
pub use steamcharts_core::testing::fixtures;

pub const TEST_API_KEY: &str = "test-api-key";

/// Test fixture with a controllable Steam mock.
///
/// ```rust,ignore
/// let fixture = TestFixture::new().await;
/// fixture.steam.set_catalog(vec![fixtures::catalog_entry(570, "Dota 2")]).await;
///
/// let response = fixture.post("/api/v1/catalog/repopulate").await;
/// assert_eq!(response.body["inserted"], 1);
/// ```
pub struct TestFixture {
    pub router: Router,
    pub state: Arc<AppState>,
    /// Mock Steam gateway - configure responses and inject failures
    pub steam: Arc<MockSteamApi>,
    /// Direct access to the catalog backing the router
    pub store: Arc<SqliteGameStore>,
    /// Holds the test database
    pub temp_dir: TempDir,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestFixture {
    pub async fn new() -> Self {
        Self::with_config(TestConfig::default()).await
    }

    pub async fn with_config(test_config: TestConfig) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.db");

        let steam = Arc::new(MockSteamApi::new());
        let store =
            Arc::new(SqliteGameStore::new(&db_path).expect("Failed to create game catalog"));

        let config = Config {
            steam: SteamConfig::with_api_key(TEST_API_KEY),
            server: ServerConfig {
                host: std::net::IpAddr::V4(std::net::Ipv4Addr::LOCALHOST),
                port: 0, // Not used for in-process testing
            },
            database: DatabaseConfig { path: db_path },
            sync: SyncConfig {
                enrich_policy: test_config.enrich_policy,
                bootstrap_on_start: false,
                top_limit: test_config.top_limit,
            },
        };

        let sync = Arc::new(
            CatalogSync::new(
                Arc::clone(&store) as Arc<dyn GameStore>,
                Arc::clone(&steam) as Arc<dyn SteamApi>,
                TEST_API_KEY,
            )
            .with_policy(test_config.enrich_policy),
        );

        let state = Arc::new(AppState::new(config, sync));
        let router = steamcharts_server::api::create_router(Arc::clone(&state));

        Self {
            router,
            state,
            steam,
            store,
            temp_dir,
        }
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path).await
    }

    /// Send a POST request without a body.
    pub async fn post(&self, path: &str) -> TestResponse {
        self.request("POST", path).await
    }

    async fn request(&self, method: &str, path: &str) -> TestResponse {
        let request = Request::builder()
            .method(method)
            .uri(path)
            .body(Body::empty())
            .unwrap();

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body }
    }
}

/// Configuration for test fixture.
#[derive(Debug, Clone)]
pub struct TestConfig {
    pub enrich_policy: EnrichPolicy,
    pub top_limit: u32,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            enrich_policy: EnrichPolicy::BestEffort,
            top_limit: 5,
        }
    }
}

impl TestConfig {
    pub fn abort_on_first_failure() -> Self {
        Self {
            enrich_policy: EnrichPolicy::AbortOnFirstFailure,
            ..Default::default()
        }
    }
}
