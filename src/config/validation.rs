use crate::config::types::{AggregationConfig, Config, ServerConfig, SiteConfig};
use crate::ConfigError;
use std::net::SocketAddr;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_server_config(&config.server)?;
    validate_aggregation_config(&config.aggregation)?;
    Ok(())
}

/// Validates the upstream site configuration
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base_url: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base_url must use HTTP or HTTPS, got: {}",
            url.scheme()
        )));
    }

    // Links are joined onto the origin by string concatenation
    if url.path() != "/" || url.query().is_some() || url.fragment().is_some() {
        return Err(ConfigError::InvalidUrl(format!(
            "base_url must be a bare origin, got '{}'",
            config.base_url
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    if config.timeout_secs < 1 || config.timeout_secs > 120 {
        return Err(ConfigError::Validation(format!(
            "timeout_secs must be between 1 and 120, got {}",
            config.timeout_secs
        )));
    }

    Ok(())
}

/// Validates the server configuration
fn validate_server_config(config: &ServerConfig) -> Result<(), ConfigError> {
    config.bind.parse::<SocketAddr>().map_err(|e| {
        ConfigError::Validation(format!("Invalid bind address '{}': {}", config.bind, e))
    })?;

    Ok(())
}

/// Validates the aggregation configuration
fn validate_aggregation_config(config: &AggregationConfig) -> Result<(), ConfigError> {
    if config.max_concurrent_fetches < 1 || config.max_concurrent_fetches > 32 {
        return Err(ConfigError::Validation(format!(
            "max_concurrent_fetches must be between 1 and 32, got {}",
            config.max_concurrent_fetches
        )));
    }

    Ok(())
}
