//! Integration tests for the catalog operations
//!
//! These tests use wiremock to stand in for the catalog site and exercise
//! fetching, extraction and aggregation end-to-end.

use partasala_api::config::{AggregationConfig, Config, ServerConfig, SiteConfig};
use partasala_api::{Catalog, FetchError, MatchType, ScrapeError};
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const FRONT_PAGE: &str = r#"<html><body>
    <nav>
        <a href="/bilaflokkur/toyota/">Toyota</a>
        <a href="/bilaflokkur/audi/">Audi</a>
        <a href="/bilaflokkur/bmw/">BMW</a>
    </nav>
    <main><a href="/bilaskra/audi-a4-2008/">Latest: Audi A4</a></main>
    <footer>
        <a href="/bilaflokkur/audi/">Audi (footer)</a>
    </footer>
</body></html>"#;

const AUDI_PAGE: &str = r#"<html><body>
    <a href="/bilaskra/audi-a4-2008/"><img src="/wp-content/uploads/a4-300x300.jpg">Audi A4 2008</a>
    <a href="/bilaskra/audi-a6-2004/">Audi A6 2004</a>
    <a href="/bilaskra/audi-tt-2001/">Audi TT 2001</a>
    <a href="/bilaskra/audi-a4-2008/">Audi A4 2008 (again)</a>
</body></html>"#;

const BMW_PAGE: &str = r#"<html><body>
    <a href="/bilaskra/bmw-320-sport/">BMW 320 Sport</a>
    <a href="/bilaskra/bmw-x5-2005/">BMW X5 2005</a>
</body></html>"#;

const TOYOTA_PAGE: &str = r#"<html><body>
    <a href="/bilaskra/toyota-yaris-2006/">Toyota Yaris 2006</a>
    <a href="/bilaskra/toyota-sport-2010/">Toyota Sport 2010</a>
</body></html>"#;

const VEHICLE_PAGE: &str = r#"<html><body>
    <h1>Audi A4 2008</h1>
    <a href="/bilaflokkur/audi/">Audi</a>
    <div class="entry-content">Ekinn 210.000 km, dísel.</div>
    <img src="/wp-content/uploads/site-logo.png">
    <img src="/wp-content/uploads/a4-front-640x480.jpg">
    <img src="/wp-content/uploads/a4-back-640x480.jpg">
    <a href="/wp-content/uploads/a4-front.jpg">Front</a>
    <a href="/wp-content/uploads/a4-engine.jpg">Engine</a>
</body></html>"#;

/// Creates a test configuration pointing at the mock server
fn create_test_config(base_url: &str) -> Config {
    Config {
        site: SiteConfig {
            base_url: base_url.to_string(),
            user_agent: "TestBrowser/1.0".to_string(),
            timeout_secs: 1,
        },
        server: ServerConfig::default(),
        aggregation: AggregationConfig::default(),
    }
}

fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body)
        .insert_header("content-type", "text/html; charset=utf-8")
}

async fn mount_page(server: &MockServer, page_path: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(html(body))
        .mount(server)
        .await;
}

/// Mounts the front page and every brand listing
async fn mount_catalog(server: &MockServer) {
    mount_page(server, "/", FRONT_PAGE).await;
    mount_page(server, "/bilaflokkur/audi/", AUDI_PAGE).await;
    mount_page(server, "/bilaflokkur/bmw/", BMW_PAGE).await;
    mount_page(server, "/bilaflokkur/toyota/", TOYOTA_PAGE).await;
}

fn catalog_for(server: &MockServer) -> Catalog {
    Catalog::from_config(&create_test_config(&server.uri())).expect("Failed to build catalog")
}

#[tokio::test]
async fn test_brands_are_sorted_and_deduplicated() {
    let server = MockServer::start().await;
    mount_page(&server, "/", FRONT_PAGE).await;

    let brands = catalog_for(&server).brands().await.unwrap();

    let names: Vec<&str> = brands.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, vec!["Audi", "BMW", "Toyota"]);
    assert_eq!(brands[0].slug, "audi");
    assert_eq!(brands[0].url, format!("{}/bilaflokkur/audi/", server.uri()));
}

#[tokio::test]
async fn test_requests_carry_browser_user_agent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .and(header("user-agent", "TestBrowser/1.0"))
        .respond_with(html(FRONT_PAGE))
        .expect(1)
        .mount(&server)
        .await;

    let brands = catalog_for(&server).brands().await.unwrap();
    assert_eq!(brands.len(), 3);
}

#[tokio::test]
async fn test_brand_vehicles() {
    let server = MockServer::start().await;
    mount_page(&server, "/bilaflokkur/audi/", AUDI_PAGE).await;

    let vehicles = catalog_for(&server).brand_vehicles("audi").await.unwrap();

    assert_eq!(vehicles.len(), 3);
    assert_eq!(vehicles[0].slug, "audi-a4-2008");
    assert_eq!(vehicles[0].name, "Audi A4 2008");
    assert_eq!(
        vehicles[0].thumbnail,
        Some(format!("{}/wp-content/uploads/a4-300x300.jpg", server.uri()))
    );
    assert!(vehicles.iter().all(|v| v.brand == "audi"));
}

#[tokio::test]
async fn test_vehicle_detail() {
    let server = MockServer::start().await;
    mount_page(&server, "/bilaskra/audi-a4-2008/", VEHICLE_PAGE).await;

    let detail = catalog_for(&server)
        .vehicle_detail("audi-a4-2008")
        .await
        .unwrap();

    assert_eq!(detail.name, "Audi A4 2008");
    assert_eq!(detail.slug, "audi-a4-2008");
    assert_eq!(detail.url, format!("{}/bilaskra/audi-a4-2008/", server.uri()));
    assert_eq!(detail.brand.as_deref(), Some("Audi"));
    assert_eq!(detail.description.as_deref(), Some("Ekinn 210.000 km, dísel."));

    let urls: Vec<String> = detail.images.iter().map(|i| i.url.clone()).collect();
    assert_eq!(
        urls,
        vec![
            format!("{}/wp-content/uploads/a4-front.jpg", server.uri()),
            format!("{}/wp-content/uploads/a4-back.jpg", server.uri()),
            format!("{}/wp-content/uploads/a4-engine.jpg", server.uri()),
        ]
    );
    assert_eq!(detail.image_count(), 3);
}

#[tokio::test]
async fn test_all_vehicles_in_brand_order() {
    let server = MockServer::start().await;
    mount_catalog(&server).await;

    let aggregate = catalog_for(&server).all_vehicles().await.unwrap();

    let brands: Vec<&str> = aggregate.vehicles.iter().map(|v| v.brand.as_str()).collect();
    assert_eq!(
        brands,
        vec!["audi", "audi", "audi", "bmw", "bmw", "toyota", "toyota"]
    );
    assert!(aggregate.skipped.is_empty());
}

#[tokio::test]
async fn test_all_vehicles_skips_failing_brand() {
    let server = MockServer::start().await;
    mount_page(&server, "/", FRONT_PAGE).await;
    mount_page(&server, "/bilaflokkur/audi/", AUDI_PAGE).await;
    mount_page(&server, "/bilaflokkur/toyota/", TOYOTA_PAGE).await;
    Mock::given(method("GET"))
        .and(path("/bilaflokkur/bmw/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let aggregate = catalog_for(&server).all_vehicles().await.unwrap();

    assert_eq!(aggregate.vehicles.len(), 5);
    assert!(aggregate.vehicles.iter().all(|v| v.brand != "bmw"));
    assert_eq!(aggregate.skipped.len(), 1);
    assert_eq!(aggregate.skipped[0].slug, "bmw");
}

#[tokio::test]
async fn test_concurrent_fetches_keep_brand_order() {
    let server = MockServer::start().await;
    mount_page(&server, "/", FRONT_PAGE).await;
    // The first brand answers last
    Mock::given(method("GET"))
        .and(path("/bilaflokkur/audi/"))
        .respond_with(html(AUDI_PAGE).set_delay(Duration::from_millis(300)))
        .mount(&server)
        .await;
    mount_page(&server, "/bilaflokkur/bmw/", BMW_PAGE).await;
    mount_page(&server, "/bilaflokkur/toyota/", TOYOTA_PAGE).await;

    let catalog = catalog_for(&server).with_max_concurrent_fetches(3);
    let aggregate = catalog.all_vehicles().await.unwrap();

    assert_eq!(aggregate.vehicles.len(), 7);
    assert_eq!(aggregate.vehicles[0].brand, "audi");
    assert_eq!(aggregate.vehicles[6].brand, "toyota");
}

#[tokio::test]
async fn test_all_vehicles_fails_without_brand_index() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let result = catalog_for(&server).all_vehicles().await;

    assert!(matches!(
        result.unwrap_err(),
        ScrapeError::Fetch(FetchError::HttpStatus { code: 503, .. })
    ));
}

#[tokio::test]
async fn test_search_by_brand_name_tags_every_vehicle() {
    let server = MockServer::start().await;
    mount_catalog(&server).await;

    let aggregate = catalog_for(&server).search("audi").await.unwrap();

    assert_eq!(aggregate.vehicles.len(), 3);
    assert!(aggregate
        .vehicles
        .iter()
        .all(|v| v.brand == "audi" && v.match_type == Some(MatchType::Brand)));
}

#[tokio::test]
async fn test_search_by_vehicle_name() {
    let server = MockServer::start().await;
    mount_catalog(&server).await;

    let aggregate = catalog_for(&server).search("SPORT").await.unwrap();

    let slugs: Vec<&str> = aggregate.vehicles.iter().map(|v| v.slug.as_str()).collect();
    assert_eq!(slugs, vec!["bmw-320-sport", "toyota-sport-2010"]);
    assert!(aggregate
        .vehicles
        .iter()
        .all(|v| v.match_type == Some(MatchType::CarName)));
}

#[tokio::test]
async fn test_search_skips_failing_brand() {
    let server = MockServer::start().await;
    mount_page(&server, "/", FRONT_PAGE).await;
    mount_page(&server, "/bilaflokkur/audi/", AUDI_PAGE).await;
    mount_page(&server, "/bilaflokkur/toyota/", TOYOTA_PAGE).await;
    Mock::given(method("GET"))
        .and(path("/bilaflokkur/bmw/"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let aggregate = catalog_for(&server).search("sport").await.unwrap();

    assert_eq!(aggregate.vehicles.len(), 1);
    assert_eq!(aggregate.vehicles[0].slug, "toyota-sport-2010");
    assert_eq!(aggregate.skipped[0].slug, "bmw");
}

#[tokio::test]
async fn test_blank_search_fetches_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(html(FRONT_PAGE))
        .expect(0)
        .mount(&server)
        .await;

    let catalog = catalog_for(&server);
    for query in ["", "   "] {
        let error = catalog.search(query).await.unwrap_err();
        assert!(matches!(error, ScrapeError::MissingParameter(_)));
        assert!(error.is_client_error());
    }
}

#[tokio::test]
async fn test_http_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/bilaskra/missing/"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let error = catalog_for(&server).vehicle_detail("missing").await.unwrap_err();

    match error {
        ScrapeError::Fetch(FetchError::HttpStatus { code, status, .. }) => {
            assert_eq!(code, 404);
            assert_eq!(status, "Not Found");
        }
        other => panic!("Expected HTTP status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_timeout_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(FRONT_PAGE).set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;

    let error = catalog_for(&server).brands().await.unwrap_err();

    assert!(matches!(
        error,
        ScrapeError::Fetch(FetchError::Timeout { .. })
    ));
}

#[tokio::test]
async fn test_network_error() {
    let config = create_test_config("http://127.0.0.1:9");
    let catalog = Catalog::from_config(&config).unwrap();

    let error = catalog.brands().await.unwrap_err();

    assert!(matches!(
        error,
        ScrapeError::Fetch(FetchError::Network { .. })
    ));
}

#[tokio::test]
async fn test_malformed_html_is_not_an_error() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/bilaflokkur/kia/",
        r#"<div><a href="/bilaskra/kia-rio/">Kia Rio<td></table><a href="/bilaskra/kia-ceed">Ceed"#,
    )
    .await;

    let vehicles = catalog_for(&server).brand_vehicles("kia").await.unwrap();

    let slugs: Vec<&str> = vehicles.iter().map(|v| v.slug.as_str()).collect();
    assert_eq!(slugs, vec!["kia-rio", "kia-ceed"]);
}
