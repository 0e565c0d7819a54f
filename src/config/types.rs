use serde::Deserialize;

/// Default upstream catalog origin
pub const DEFAULT_BASE_URL: &str = "https://partasala.is";

/// Desktop browser string; the site rejects some default client agents
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Main configuration structure
///
/// Every section and key is optional; missing values fall back to the
/// defaults used against the live site.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    pub server: ServerConfig,
    pub aggregation: AggregationConfig,
}

/// Upstream site and HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Origin of the catalog site, without a trailing slash
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// User-Agent header sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Overall per-request timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 10,
        }
    }
}

/// HTTP API server configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to listen on
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Per-brand fan-out used by the all-vehicles and search operations
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AggregationConfig {
    /// Maximum brand pages fetched at once; 1 fetches them one after another
    #[serde(rename = "max-concurrent-fetches")]
    pub max_concurrent_fetches: usize,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            max_concurrent_fetches: 1,
        }
    }
}
