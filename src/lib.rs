//! Partasala API: a scraper for the partasala.is vehicle catalog
//!
//! This crate fetches catalog pages from partasala.is, extracts brands,
//! vehicles and images from the HTML, and re-exposes them as a small JSON API.

pub mod api;
pub mod config;
pub mod crawler;
pub mod models;
pub mod shape;
pub mod url;

use thiserror::Error;

/// Main error type for catalog operations
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Missing search query parameter \"{0}\"")]
    MissingParameter(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ScrapeError {
    /// Returns true if the error was caused by the caller rather than upstream
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::MissingParameter(_))
    }
}

/// Errors raised while fetching a page from the upstream site
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("failed to fetch {url}: {source}")]
    Network { url: String, source: reqwest::Error },

    #[error("status code error: {code} {status}")]
    HttpStatus {
        url: String,
        code: u16,
        status: String,
    },

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for catalog operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Result type alias for fetch operations
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{Aggregate, Catalog, Fetcher, SkippedBrand};
pub use models::{Brand, Image, MatchType, VehicleDetail, VehicleSummary};
pub use shape::{PageShape, PartasalaShape};
pub use crate::url::normalize_url;
