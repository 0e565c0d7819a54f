//! Extraction rules for the partasala.is page layout
//!
//! Brand pages live under `/bilaflokkur/<slug>/` and vehicle pages under
//! `/bilaskra/<slug>/`. Everything is matched from anchor hrefs, so the same
//! rules work whether a link sits in the navbar, the footer or the content.

use super::images::collect_images;
use super::PageShape;
use crate::models::{Brand, VehicleDetail, VehicleSummary};
use crate::url::{normalize_url, slug_from_href, BRAND_PATH};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use std::sync::LazyLock;

static BRAND_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/bilaflokkur/[^/]+/?$").expect("invalid brand link pattern"));

static VEHICLE_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/bilaskra/[^/]+/?$").expect("invalid vehicle link pattern"));

static LINK_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("invalid anchor selector"));

static IMG_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("img").expect("invalid img selector"));

static HEADING_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h1").expect("invalid h1 selector"));

static DIV_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div[class]").expect("invalid div selector"));

/// Class-name fragments that mark the description block ("lýsing" is Icelandic)
const DESCRIPTION_CLASSES: &[&str] = &["description", "content", "lýsing"];

/// The partasala.is layout
#[derive(Debug, Clone, Copy, Default)]
pub struct PartasalaShape;

impl PageShape for PartasalaShape {
    fn brands(&self, doc: &Html, base_url: &str) -> Vec<Brand> {
        extract_brands(doc, base_url)
    }

    fn vehicles(&self, doc: &Html, base_url: &str, brand_slug: &str) -> Vec<VehicleSummary> {
        extract_vehicles(doc, base_url, brand_slug)
    }

    fn detail(&self, doc: &Html, base_url: &str, slug: &str, page_url: &str) -> VehicleDetail {
        extract_detail(doc, base_url, slug, page_url)
    }
}

/// Trimmed text content of an element and its descendants
fn element_text(element: &ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Yields `(anchor, href, slug)` for every link matching `pattern`, first occurrence of each slug only
fn unique_links<'a>(
    doc: &'a Html,
    pattern: &'a Regex,
) -> impl Iterator<Item = (ElementRef<'a>, &'a str, &'a str)> + 'a {
    let mut seen = HashSet::new();

    doc.select(&LINK_SELECTOR).filter_map(move |element| {
        let href = element.value().attr("href")?;
        if !pattern.is_match(href) {
            return None;
        }
        let slug = slug_from_href(href)?;
        if !seen.insert(slug) {
            return None;
        }
        Some((element, href, slug))
    })
}

/// Extracts the brand index, sorted by display name
///
/// The front page repeats brand links in several places; only the first
/// link for each slug is kept. Sorting happens after de-duplication and
/// compares names byte-wise, so uppercase names sort before lowercase ones.
///
/// # Example
///
/// ```
/// use partasala_api::shape::extract_brands;
/// use scraper::Html;
///
/// let html = r#"<a href="/bilaflokkur/toyota/">Toyota</a><a href="/bilaflokkur/audi/">Audi</a>"#;
/// let brands = extract_brands(&Html::parse_document(html), "https://partasala.is");
/// assert_eq!(brands[0].slug, "audi");
/// ```
pub fn extract_brands(doc: &Html, base_url: &str) -> Vec<Brand> {
    let mut brands: Vec<Brand> = unique_links(doc, &BRAND_LINK)
        .map(|(element, href, slug)| Brand {
            name: element_text(&element),
            slug: slug.to_string(),
            url: normalize_url(base_url, href),
        })
        .collect();

    brands.sort_by(|a, b| a.name.cmp(&b.name));
    brands
}

/// Extracts the vehicles listed on a brand page, in page order
pub fn extract_vehicles(doc: &Html, base_url: &str, brand_slug: &str) -> Vec<VehicleSummary> {
    unique_links(doc, &VEHICLE_LINK)
        .map(|(element, href, slug)| {
            // Listing thumbnails are optional
            let thumbnail = element
                .select(&IMG_SELECTOR)
                .next()
                .and_then(|img| img.value().attr("src"))
                .map(|src| normalize_url(base_url, src));

            VehicleSummary {
                name: element_text(&element),
                slug: slug.to_string(),
                url: normalize_url(base_url, href),
                thumbnail,
                brand: brand_slug.to_string(),
                match_type: None,
            }
        })
        .collect()
}

/// Extracts a vehicle detail page
///
/// Missing pieces never fail the extraction: no `<h1>` gives an empty name,
/// and no description block or brand link leaves those fields unset.
pub fn extract_detail(doc: &Html, base_url: &str, slug: &str, page_url: &str) -> VehicleDetail {
    let name = doc
        .select(&HEADING_SELECTOR)
        .next()
        .map(|h1| element_text(&h1))
        .unwrap_or_default();

    let description = doc
        .select(&DIV_SELECTOR)
        .find(|div| {
            let class = div.value().attr("class").unwrap_or_default().to_lowercase();
            DESCRIPTION_CLASSES.iter().any(|needle| class.contains(needle))
        })
        .map(|div| element_text(&div));

    let brand = doc
        .select(&LINK_SELECTOR)
        .find(|a| {
            a.value()
                .attr("href")
                .is_some_and(|href| href.contains(BRAND_PATH))
        })
        .map(|a| element_text(&a));

    VehicleDetail {
        name,
        slug: slug.to_string(),
        url: page_url.to_string(),
        brand,
        description,
        images: collect_images(doc, base_url),
    }
}
