use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::PathBuf;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub steam: SteamConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub sync: SyncConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::from([0, 0, 0, 0])
}

fn default_port() -> u16 {
    8080
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

fn default_db_path() -> PathBuf {
    PathBuf::from("steamcharts.db")
}

/// Steam Web API and storefront configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SteamConfig {
    /// Steam Web API key, used by the player count endpoint.
    pub api_key: String,
    /// Web API base URL (default: https://api.steampowered.com)
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Storefront base URL (default: https://store.steampowered.com)
    #[serde(default = "default_store_base_url")]
    pub store_base_url: String,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

impl SteamConfig {
    /// Config pointing at the public Steam hosts with the given key.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base_url: default_api_base_url(),
            store_base_url: default_store_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_api_base_url() -> String {
    "https://api.steampowered.com".to_string()
}

fn default_store_base_url() -> String {
    "https://store.steampowered.com".to_string()
}

fn default_timeout() -> u32 {
    30
}

/// How the three enrichment legs react to a failing leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnrichPolicy {
    /// Every leg is attempted; failures are reported, not propagated.
    #[default]
    BestEffort,
    /// Legs run in order and the first remote failure stops the rest.
    AbortOnFirstFailure,
}

/// Catalog synchronization configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SyncConfig {
    #[serde(default)]
    pub enrich_policy: EnrichPolicy,
    /// Populate the catalog at startup when the local store is empty.
    #[serde(default = "default_bootstrap_on_start")]
    pub bootstrap_on_start: bool,
    /// Number of games on the top players list.
    #[serde(default = "default_top_limit")]
    pub top_limit: u32,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            enrich_policy: EnrichPolicy::default(),
            bootstrap_on_start: default_bootstrap_on_start(),
            top_limit: default_top_limit(),
        }
    }
}

fn default_bootstrap_on_start() -> bool {
    true
}

fn default_top_limit() -> u32 {
    5
}

/// Sanitized config for API responses (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub steam: SanitizedSteamConfig,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub sync: SyncConfig,
}

/// Sanitized Steam config (API key hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedSteamConfig {
    pub api_base_url: String,
    pub store_base_url: String,
    pub api_key_configured: bool,
    pub timeout_secs: u32,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            steam: SanitizedSteamConfig {
                api_base_url: config.steam.api_base_url.clone(),
                store_base_url: config.steam.store_base_url.clone(),
                api_key_configured: !config.steam.api_key.is_empty(),
                timeout_secs: config.steam.timeout_secs,
            },
            server: config.server.clone(),
            database: config.database.clone(),
            sync: config.sync.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal_config() {
        let toml = r#"
[steam]
api_key = "abc"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host.to_string(), "0.0.0.0");
        assert_eq!(config.database.path.to_str().unwrap(), "steamcharts.db");
        assert_eq!(config.steam.api_base_url, "https://api.steampowered.com");
        assert_eq!(config.steam.store_base_url, "https://store.steampowered.com");
        assert_eq!(config.steam.timeout_secs, 30);
        assert_eq!(config.sync.enrich_policy, EnrichPolicy::BestEffort);
        assert!(config.sync.bootstrap_on_start);
        assert_eq!(config.sync.top_limit, 5);
    }

    #[test]
    fn test_deserialize_missing_steam_fails() {
        let toml = r#"
[server]
port = 8080
"#;
        let result: Result<Config, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn test_deserialize_custom_sections() {
        let toml = r#"
[steam]
api_key = "abc"
api_base_url = "http://localhost:9001"
store_base_url = "http://localhost:9002"

[database]
path = "/data/games.sqlite"

[sync]
enrich_policy = "abort_on_first_failure"
bootstrap_on_start = false
top_limit = 10
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.steam.api_base_url, "http://localhost:9001");
        assert_eq!(config.steam.store_base_url, "http://localhost:9002");
        assert_eq!(config.database.path.to_str().unwrap(), "/data/games.sqlite");
        assert_eq!(config.sync.enrich_policy, EnrichPolicy::AbortOnFirstFailure);
        assert!(!config.sync.bootstrap_on_start);
        assert_eq!(config.sync.top_limit, 10);
    }

    #[test]
    fn test_sanitized_config_hides_api_key() {
        let config = Config {
            steam: SteamConfig::with_api_key("super-secret"),
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            sync: SyncConfig::default(),
        };

        let sanitized = SanitizedConfig::from(&config);
        assert!(sanitized.steam.api_key_configured);

        let json = serde_json::to_string(&sanitized).unwrap();
        assert!(!json.contains("super-secret"));
        assert!(json.contains("\"best_effort\""));
    }
}
