use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Steam API key is present (the player count endpoint rejects anonymous calls)
/// - Steam request timeout is not 0
/// - Server port is not 0
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.steam.api_key.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "steam.api_key cannot be empty".to_string(),
        ));
    }

    if config.steam.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "steam.timeout_secs cannot be 0".to_string(),
        ));
    }

    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    Ok(())
}
