//! Configuration module
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! The file is optional; [`Config::default`] targets the live catalog site.
//!
//! # Example
//!
//! ```no_run
//! use partasala_api::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("partasala.toml")).unwrap();
//! println!("Request timeout: {}s", config.site.timeout_secs);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    AggregationConfig, Config, ServerConfig, SiteConfig, DEFAULT_BASE_URL, DEFAULT_USER_AGENT,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
