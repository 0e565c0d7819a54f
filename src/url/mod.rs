//! URL handling for catalog links
//!
//! This module turns raw `href`/`src` attribute values into absolute URLs,
//! derives slugs from catalog links, and builds the upstream page URLs.

mod normalize;
mod slug;

// Re-export main functions
pub use normalize::normalize_url;
pub use slug::slug_from_href;

/// Path prefix of brand (category) pages on the catalog site
pub const BRAND_PATH: &str = "/bilaflokkur/";

/// Path prefix of vehicle detail pages on the catalog site
pub const VEHICLE_PATH: &str = "/bilaskra/";

/// Builds the listing URL for a brand
///
/// # Examples
///
/// ```
/// use partasala_api::url::brand_page_url;
///
/// assert_eq!(
///     brand_page_url("https://partasala.is", "audi"),
///     "https://partasala.is/bilaflokkur/audi/"
/// );
/// ```
pub fn brand_page_url(base_url: &str, brand_slug: &str) -> String {
    format!("{}{}{}/", base_url, BRAND_PATH, brand_slug)
}

/// Builds the detail page URL for a vehicle
pub fn vehicle_page_url(base_url: &str, vehicle_slug: &str) -> String {
    format!("{}{}{}/", base_url, VEHICLE_PATH, vehicle_slug)
}
