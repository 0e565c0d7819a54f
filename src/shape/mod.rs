//! Page shapes: the site-specific extraction rules
//!
//! A [`PageShape`] knows how a catalog site lays out its brand index, brand
//! listings and vehicle pages. All three operations are pure functions over a
//! parsed document, so the rules can be tested against fixture HTML and
//! swapped without touching the fetching code.

mod images;
mod partasala;

pub use images::{collect_images, full_resolution_url};
pub use partasala::{extract_brands, extract_detail, extract_vehicles, PartasalaShape};

use crate::models::{Brand, VehicleDetail, VehicleSummary};
use scraper::Html;

/// Extraction rules for one catalog site layout
pub trait PageShape: Send + Sync {
    /// Extracts the brand index from the site's front page
    ///
    /// # Arguments
    ///
    /// * `doc` - The parsed front page
    /// * `base_url` - Origin used to make links absolute
    fn brands(&self, doc: &Html, base_url: &str) -> Vec<Brand>;

    /// Extracts the vehicles listed on a brand page, in page order
    ///
    /// # Arguments
    ///
    /// * `doc` - The parsed brand page
    /// * `base_url` - Origin used to make links absolute
    /// * `brand_slug` - Slug of the brand the page was fetched for
    fn vehicles(&self, doc: &Html, base_url: &str, brand_slug: &str) -> Vec<VehicleSummary>;

    /// Extracts a vehicle's detail page
    ///
    /// # Arguments
    ///
    /// * `doc` - The parsed vehicle page
    /// * `base_url` - Origin used to make links absolute
    /// * `slug` - Slug the page was fetched for
    /// * `page_url` - Absolute URL the page was fetched from
    fn detail(&self, doc: &Html, base_url: &str, slug: &str, page_url: &str) -> VehicleDetail;
}
