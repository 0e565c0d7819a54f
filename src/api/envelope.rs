//! JSON response envelopes
//!
//! Every response body has a `success` flag. Successful responses carry
//! `data` and, for lists, a `count`; failures carry an `error` message.

use crate::ScrapeError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Successful response body
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub success: bool,

    /// Brand slug, on brand listings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,

    /// Search query as received, on search results
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,

    pub data: T,
}

impl<T> Envelope<T> {
    /// Wraps a single record
    pub fn item(data: T) -> Self {
        Self {
            success: true,
            brand: None,
            query: None,
            count: None,
            data,
        }
    }
}

impl<T> Envelope<Vec<T>> {
    /// Wraps a list, counting its entries
    pub fn list(data: Vec<T>) -> Self {
        Self {
            count: Some(data.len()),
            ..Self::item(data)
        }
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }
}

/// Failure response body
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
}

/// An operation failure rendered as an error envelope
///
/// Caller mistakes answer 400; upstream failures answer 500.
#[derive(Debug)]
pub struct ApiError(pub ScrapeError);

impl From<ScrapeError> for ApiError {
    fn from(error: ScrapeError) -> Self {
        Self(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = if self.0.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            tracing::error!("Request failed: {}", self.0);
            StatusCode::INTERNAL_SERVER_ERROR
        };

        let body = ErrorBody {
            success: false,
            error: self.0.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
