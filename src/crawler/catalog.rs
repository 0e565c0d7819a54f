//! Catalog operations - fetch a page, apply the page shape, return records
//!
//! Single-page operations (brands, one brand's vehicles, one vehicle) fail
//! when their fetch fails. The multi-page operations (all vehicles, search)
//! fail only if the brand index cannot be fetched; a brand whose listing
//! cannot be fetched is recorded in [`Aggregate::skipped`] and left out.

use crate::config::Config;
use crate::crawler::Fetcher;
use crate::models::{Brand, MatchType, VehicleDetail, VehicleSummary};
use crate::shape::{PageShape, PartasalaShape};
use crate::url::{brand_page_url, vehicle_page_url};
use crate::{Result, ScrapeError};
use futures::stream::{self, StreamExt};
use serde::Serialize;
use std::sync::Arc;

/// A brand left out of a multi-brand result
#[derive(Debug, Clone, Serialize)]
pub struct SkippedBrand {
    pub slug: String,
    pub error: String,
}

/// Vehicles gathered across brands, plus the brands that could not be fetched
#[derive(Debug, Clone, Default, Serialize)]
pub struct Aggregate {
    pub vehicles: Vec<VehicleSummary>,
    pub skipped: Vec<SkippedBrand>,
}

/// Entry point for every catalog operation
///
/// Carries the fetcher settings and the page shape explicitly; nothing is
/// cached between calls, so every operation reflects the live site.
#[derive(Clone)]
pub struct Catalog {
    fetcher: Fetcher,
    shape: Arc<dyn PageShape>,
    max_concurrent_fetches: usize,
}

impl Catalog {
    /// Creates a catalog over the given fetcher and page shape
    pub fn new(fetcher: Fetcher, shape: Arc<dyn PageShape>) -> Self {
        Self {
            fetcher,
            shape,
            max_concurrent_fetches: 1,
        }
    }

    /// Creates a catalog for the partasala.is layout from configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let fetcher = Fetcher::new(&config.site)?;

        Ok(Self::new(fetcher, Arc::new(PartasalaShape))
            .with_max_concurrent_fetches(config.aggregation.max_concurrent_fetches))
    }

    /// Sets how many brand listings multi-brand operations fetch at once
    pub fn with_max_concurrent_fetches(mut self, limit: usize) -> Self {
        self.max_concurrent_fetches = limit.max(1);
        self
    }

    /// Origin of the catalog site
    pub fn base_url(&self) -> &str {
        self.fetcher.base_url()
    }

    /// Lists every brand, sorted by name
    pub async fn brands(&self) -> Result<Vec<Brand>> {
        let doc = self.fetcher.fetch_document(self.base_url()).await?;
        let brands = self.shape.brands(&doc, self.base_url());

        tracing::debug!("Found {} brands", brands.len());
        Ok(brands)
    }

    /// Lists the vehicles on one brand's page, in page order
    pub async fn brand_vehicles(&self, brand_slug: &str) -> Result<Vec<VehicleSummary>> {
        let url = brand_page_url(self.base_url(), brand_slug);
        let doc = self.fetcher.fetch_document(&url).await?;
        let vehicles = self.shape.vehicles(&doc, self.base_url(), brand_slug);

        tracing::debug!("Found {} vehicles for brand {}", vehicles.len(), brand_slug);
        Ok(vehicles)
    }

    /// Fetches the detail page of one vehicle
    pub async fn vehicle_detail(&self, vehicle_slug: &str) -> Result<VehicleDetail> {
        let url = vehicle_page_url(self.base_url(), vehicle_slug);
        let doc = self.fetcher.fetch_document(&url).await?;

        Ok(self.shape.detail(&doc, self.base_url(), vehicle_slug, &url))
    }

    /// Lists the vehicles of every brand, in brand order
    ///
    /// # Returns
    ///
    /// * `Ok(Aggregate)` - Vehicles of every brand that could be fetched
    /// * `Err(ScrapeError)` - The brand index itself could not be fetched
    pub async fn all_vehicles(&self) -> Result<Aggregate> {
        let brands = self.brands().await?;
        let aggregate = self.collect_per_brand(brands, |_, vehicles| vehicles).await;

        tracing::info!(
            "Collected {} vehicles ({} brands skipped)",
            aggregate.vehicles.len(),
            aggregate.skipped.len()
        );
        Ok(aggregate)
    }

    /// Searches vehicles by brand name or vehicle name
    ///
    /// Matching is a case-insensitive substring test. When the query matches
    /// a brand's name every vehicle of that brand is returned tagged
    /// [`MatchType::Brand`]; otherwise only the brand's vehicles whose own
    /// name matches are returned, tagged [`MatchType::CarName`].
    ///
    /// # Returns
    ///
    /// * `Ok(Aggregate)` - Matching vehicles, in brand order
    /// * `Err(ScrapeError::MissingParameter)` - The query is blank; nothing is fetched
    /// * `Err(ScrapeError::Fetch)` - The brand index could not be fetched
    pub async fn search(&self, query: &str) -> Result<Aggregate> {
        if query.trim().is_empty() {
            return Err(ScrapeError::MissingParameter("q".to_string()));
        }

        let needle = query.to_lowercase();
        let brands = self.brands().await?;

        let aggregate = self
            .collect_per_brand(brands, |brand, vehicles| {
                if brand.name.to_lowercase().contains(&needle) {
                    vehicles
                        .into_iter()
                        .map(|v| v.tagged(MatchType::Brand))
                        .collect()
                } else {
                    vehicles
                        .into_iter()
                        .filter(|v| v.name.to_lowercase().contains(&needle))
                        .map(|v| v.tagged(MatchType::CarName))
                        .collect()
                }
            })
            .await;

        tracing::info!(
            "Search '{}' matched {} vehicles ({} brands skipped)",
            query,
            aggregate.vehicles.len(),
            aggregate.skipped.len()
        );
        Ok(aggregate)
    }

    /// Fetches each brand's listing and folds the results in brand order
    ///
    /// Up to `max_concurrent_fetches` listings are in flight at once;
    /// `buffered` yields them back in input order regardless of which
    /// finishes first.
    async fn collect_per_brand<F>(&self, brands: Vec<Brand>, select: F) -> Aggregate
    where
        F: Fn(&Brand, Vec<VehicleSummary>) -> Vec<VehicleSummary>,
    {
        let fetched: Vec<(Brand, Result<Vec<VehicleSummary>>)> = stream::iter(brands)
            .map(|brand| async move {
                let result = self.brand_vehicles(&brand.slug).await;
                (brand, result)
            })
            .buffered(self.max_concurrent_fetches)
            .collect()
            .await;

        fetched
            .into_iter()
            .fold(Aggregate::default(), |mut aggregate, (brand, result)| {
                match result {
                    Ok(vehicles) => aggregate.vehicles.extend(select(&brand, vehicles)),
                    Err(e) => {
                        tracing::warn!("Skipping brand {}: {}", brand.slug, e);
                        aggregate.skipped.push(SkippedBrand {
                            slug: brand.slug,
                            error: e.to_string(),
                        });
                    }
                }
                aggregate
            })
    }
}
