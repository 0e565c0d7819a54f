//! JSON REST API over the catalog
//!
//! Thin routing glue: request dispatch, response envelopes, and CORS
//! headers. All scraping happens in [`Catalog`].

mod envelope;
mod routes;

pub use envelope::{ApiError, Envelope, ErrorBody};

use crate::crawler::Catalog;
use crate::ScrapeError;
use axum::extract::Request;
use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
    CONTENT_TYPE,
};
use axum::http::{HeaderMap, HeaderValue, Method, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Builds the API router
///
/// # Routes
///
/// | Route | Operation |
/// |-------|-----------|
/// | `GET /` | Endpoint index |
/// | `GET /brands` | All brands |
/// | `GET /brands/:brand_slug` | One brand's vehicles |
/// | `GET /cars` | Every brand's vehicles |
/// | `GET /cars/:car_slug` | One vehicle's details and images |
/// | `GET /search?q=` | Vehicles matching a brand or vehicle name |
pub fn router(catalog: Arc<Catalog>) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/brands", get(routes::brands))
        .route("/brands/:brand_slug", get(routes::brand_vehicles))
        .route("/cars", get(routes::all_vehicles))
        .route("/cars/:car_slug", get(routes::vehicle_detail))
        .route("/search", get(routes::search))
        .layer(middleware::from_fn(cors))
        .with_state(catalog)
}

/// Serves the API until Ctrl-C is received
pub async fn serve(catalog: Arc<Catalog>, addr: SocketAddr) -> Result<(), ScrapeError> {
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(catalog))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}

/// Adds CORS headers to every response and answers preflight requests directly
async fn cors(request: Request, next: Next) -> Response {
    let mut response = if request.method() == Method::OPTIONS {
        StatusCode::OK.into_response()
    } else {
        next.run(request).await
    };

    apply_cors_headers(response.headers_mut());
    response
}

fn apply_cors_headers(headers: &mut HeaderMap) {
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(
        ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, PUT, DELETE, OPTIONS"),
    );
    headers.insert(
        ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Origin, Content-Type, Accept"),
    );
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
}
