//! Route handlers
//!
//! Each handler runs one catalog operation and wraps the result in an
//! envelope. Per-brand failures inside `/cars` and `/search` are logged by
//! the catalog and do not change the response status.

use super::envelope::{ApiError, Envelope};
use crate::crawler::Catalog;
use crate::models::{Brand, VehicleDetail, VehicleSummary};
use crate::ScrapeError;
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

pub type ApiResult<T> = std::result::Result<Json<Envelope<T>>, ApiError>;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

/// `GET /` - describes the available endpoints
pub async fn index() -> Json<Value> {
    Json(json!({
        "name": "Partasala.is Scraper API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "/brands": {
                "method": "GET",
                "description": "Get list of all car brands",
                "response": "Array of brand objects with name and URL"
            },
            "/brands/<brand_slug>": {
                "method": "GET",
                "description": "Get list of cars for a specific brand",
                "parameters": {
                    "brand_slug": "Brand identifier (e.g., audi, bmw, toyota)"
                },
                "response": "Array of car objects with name, URL, and thumbnail"
            },
            "/cars": {
                "method": "GET",
                "description": "Get all available cars across all brands",
                "response": "Array of all car objects with name, URL, and thumbnail"
            },
            "/cars/<car_slug>": {
                "method": "GET",
                "description": "Get details and images for a specific car",
                "parameters": {
                    "car_slug": "Car identifier from the car URL"
                },
                "response": "Car object with name, description, and array of image URLs"
            },
            "/search": {
                "method": "GET",
                "description": "Search for cars by name",
                "parameters": {
                    "q": "Search query"
                },
                "response": "Array of matching cars"
            }
        }
    }))
}

/// `GET /brands`
pub async fn brands(State(catalog): State<Arc<Catalog>>) -> ApiResult<Vec<Brand>> {
    let brands = catalog.brands().await?;
    Ok(Json(Envelope::list(brands)))
}

/// `GET /brands/:brand_slug`
pub async fn brand_vehicles(
    State(catalog): State<Arc<Catalog>>,
    Path(brand_slug): Path<String>,
) -> ApiResult<Vec<VehicleSummary>> {
    let vehicles = catalog.brand_vehicles(&brand_slug).await?;
    Ok(Json(Envelope::list(vehicles).with_brand(brand_slug)))
}

/// `GET /cars`
pub async fn all_vehicles(State(catalog): State<Arc<Catalog>>) -> ApiResult<Vec<VehicleSummary>> {
    let aggregate = catalog.all_vehicles().await?;
    Ok(Json(Envelope::list(aggregate.vehicles)))
}

/// `GET /cars/:car_slug`
pub async fn vehicle_detail(
    State(catalog): State<Arc<Catalog>>,
    Path(car_slug): Path<String>,
) -> ApiResult<VehicleDetail> {
    let detail = catalog.vehicle_detail(&car_slug).await?;
    Ok(Json(Envelope::item(detail)))
}

/// `GET /search?q=`
pub async fn search(
    State(catalog): State<Arc<Catalog>>,
    Query(params): Query<SearchParams>,
) -> ApiResult<Vec<VehicleSummary>> {
    let query = params
        .q
        .filter(|q| !q.is_empty())
        .ok_or_else(|| ScrapeError::MissingParameter("q".to_string()))?;

    let aggregate = catalog.search(&query).await?;
    Ok(Json(Envelope::list(aggregate.vehicles).with_query(query)))
}
