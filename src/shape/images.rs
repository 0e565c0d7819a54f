//! Image discovery on vehicle pages
//!
//! Uploaded photos appear twice on a typical vehicle page: as resized
//! `<img>` thumbnails and as `<a>` links to the original upload. Both are
//! merged into one list keyed by the full-resolution URL.

use crate::models::Image;
use crate::url::normalize_url;
use regex::Regex;
use scraper::{Html, Selector};
use std::borrow::Cow;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Resized variants carry a `-<width>x<height>` suffix before the extension;
/// any query string or fragment after the extension is captured and kept
static SIZE_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)-\d+x\d+\.(jpg|jpeg|png|gif)([?#].*)?$")
        .expect("invalid size suffix pattern")
});

static IMAGE_EXTENSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\.(jpg|jpeg|png|gif)$").expect("invalid image extension pattern")
});

static IMG_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("img[src]").expect("invalid img selector"));

static LINK_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("invalid anchor selector"));

/// Strips the size suffix from a resized image URL
///
/// # Examples
///
/// ```
/// use partasala_api::shape::full_resolution_url;
///
/// assert_eq!(full_resolution_url("/uploads/photo-640x480.jpg"), "/uploads/photo.jpg");
/// assert_eq!(full_resolution_url("/uploads/photo.jpg"), "/uploads/photo.jpg");
/// assert_eq!(full_resolution_url("/uploads/photo-640x480.jpg?ver=2"), "/uploads/photo.jpg?ver=2");
/// ```
pub fn full_resolution_url(src: &str) -> Cow<'_, str> {
    SIZE_SUFFIX.replace(src, ".${1}${2}")
}

/// Ordered, de-duplicated image list keyed by full-resolution URL
#[derive(Debug, Default)]
struct ImageSet {
    seen: HashSet<String>,
    images: Vec<Image>,
}

impl ImageSet {
    fn insert(&mut self, url: String, thumbnail: String) {
        if self.seen.insert(url.clone()) {
            self.images.push(Image { url, thumbnail });
        }
    }
}

/// Collects every uploaded image on a vehicle page
///
/// Two passes run in order over the document, sharing one seen-set:
///
/// 1. `<img>` elements whose `src` contains `uploads` and not `logo`
///    (case-insensitive). The full URL is the `src` with its size suffix
///    stripped; the thumbnail is the `src` as written.
/// 2. `<a>` elements whose `href` ends in an image extension and contains
///    `uploads`. Full URL and thumbnail are both the link target.
///
/// An image found by the first pass is never added again by the second.
pub fn collect_images(doc: &Html, base_url: &str) -> Vec<Image> {
    let mut set = ImageSet::default();

    for element in doc.select(&IMG_SELECTOR) {
        let Some(src) = element.value().attr("src") else {
            continue;
        };
        if !src.contains("uploads") || src.to_lowercase().contains("logo") {
            continue;
        }

        let full = normalize_url(base_url, &full_resolution_url(src));
        set.insert(full, normalize_url(base_url, src));
    }

    for element in doc.select(&LINK_SELECTOR) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        if !IMAGE_EXTENSION.is_match(href) || !href.contains("uploads") {
            continue;
        }

        let full = normalize_url(base_url, href);
        set.insert(full.clone(), full);
    }

    set.images
}
