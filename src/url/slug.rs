/// Derives a slug from a catalog link
///
/// The slug is the last non-empty path segment once trailing slashes are
/// removed, so `/bilaflokkur/audi/` and `/bilaflokkur/audi` both yield `audi`.
///
/// Returns `None` when the link has no non-empty segment at all.
pub fn slug_from_href(href: &str) -> Option<&str> {
    href.trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
}
