/// Makes a link found on a catalog page absolute
///
/// # Rules
///
/// 1. `http://` and `https://` URLs pass through unchanged
/// 2. Root-relative paths (`/path`) get the site origin prepended
/// 3. Anything else is treated as a bare relative path: `base + "/" + href`
///
/// Applying the function to its own output is a no-op, since every result
/// falls under rule 1.
///
/// # Arguments
///
/// * `base_url` - Site origin without a trailing slash (e.g. `https://partasala.is`)
/// * `href` - The raw `href`/`src` attribute value
///
/// # Examples
///
/// ```
/// use partasala_api::url::normalize_url;
///
/// let base = "https://partasala.is";
/// assert_eq!(normalize_url(base, "/bilaskra/golf/"), "https://partasala.is/bilaskra/golf/");
/// assert_eq!(normalize_url(base, "img/a.jpg"), "https://partasala.is/img/a.jpg");
/// ```
pub fn normalize_url(base_url: &str, href: &str) -> String {
    if is_absolute(href) {
        return href.to_string();
    }

    if href.starts_with('/') {
        format!("{}{}", base_url, href)
    } else {
        format!("{}/{}", base_url, href)
    }
}

fn is_absolute(href: &str) -> bool {
    href.starts_with("http://") || href.starts_with("https://")
}
