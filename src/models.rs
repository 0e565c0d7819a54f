//! Catalog records extracted from partasala.is pages
//!
//! Every record is built fresh from a fetched page and never mutated afterwards.

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::fmt;

/// A vehicle category on the catalog site (usually a manufacturer)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Brand {
    /// Display name taken from the link text
    pub name: String,

    /// Last path segment of the brand link, unique within a listing
    pub slug: String,

    /// Absolute URL of the brand page
    pub url: String,
}

/// Why a vehicle was included in a search result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    /// The query matched the owning brand's name
    Brand,
    /// The query matched the vehicle's own name
    CarName,
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Brand => write!(f, "brand"),
            Self::CarName => write!(f, "car_name"),
        }
    }
}

/// A vehicle as listed on a brand page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VehicleSummary {
    pub name: String,

    /// Unique within one brand listing
    pub slug: String,

    pub url: String,

    /// Listing image, if the link wraps one
    pub thumbnail: Option<String>,

    /// Slug of the brand whose page listed this vehicle
    pub brand: String,

    /// Only set on search results
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_type: Option<MatchType>,
}

impl VehicleSummary {
    /// Tags this vehicle with the reason it matched a search
    pub fn tagged(self, match_type: MatchType) -> Self {
        Self {
            match_type: Some(match_type),
            ..self
        }
    }
}

/// An uploaded image with its resized variant
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Image {
    /// Full-resolution URL (size suffix stripped)
    pub url: String,

    /// URL as it appeared on the page
    pub thumbnail: String,
}

/// Everything the vehicle page exposes about a single vehicle
///
/// Note that `brand` holds the display name scraped from the page, whereas
/// [`VehicleSummary::brand`] holds the slug the listing was fetched with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VehicleDetail {
    pub name: String,
    pub slug: String,
    pub url: String,
    pub brand: Option<String>,
    pub description: Option<String>,
    pub images: Vec<Image>,
}

impl VehicleDetail {
    /// Number of distinct images found on the page
    pub fn image_count(&self) -> usize {
        self.images.len()
    }
}

impl Serialize for VehicleDetail {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("VehicleDetail", 7)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("slug", &self.slug)?;
        state.serialize_field("url", &self.url)?;
        state.serialize_field("brand", &self.brand)?;
        state.serialize_field("description", &self.description)?;
        state.serialize_field("image_count", &self.image_count())?;
        state.serialize_field("images", &self.images)?;
        state.end()
    }
}
