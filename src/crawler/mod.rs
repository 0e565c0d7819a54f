//! Crawler module for fetching and extracting catalog pages
//!
//! This module contains the scraping core:
//! - HTTP fetching with error classification
//! - Catalog operations built on top of a [`PageShape`](crate::shape::PageShape)
//! - Best-effort aggregation across brand pages

mod catalog;
mod fetcher;

pub use catalog::{Aggregate, Catalog, SkippedBrand};
pub use fetcher::{build_http_client, Fetcher};
