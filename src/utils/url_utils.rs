//! URL helpers for image candidate normalization.
//!
//! The source site serves gallery thumbnails from size-suffixed paths; the
//! helpers here rewrite those to their full-size variants and resolve
//! page-relative `src` attributes into absolute, fetchable URLs.

use url::Url;

/// Size markers the source CDN embeds in thumbnail URLs, paired with their
/// full-size replacements. Checked in order; first match wins.
const SIZE_MARKERS: &[(&str, &str)] = &[
    ("/small/", "/large/"),
    ("-small.", "-large."),
    ("_thumb.", "_full."),
];

/// Rewrite a known "small" size marker in an image URL to its "large"
/// counterpart. URLs without a recognized marker are returned unchanged.
#[must_use]
pub fn upgrade_size_marker(url: &str) -> String {
    for (small, large) in SIZE_MARKERS {
        if url.contains(small) {
            return url.replacen(small, large, 1);
        }
    }
    url.to_string()
}

/// Check whether a candidate `src` is worth fetching at all.
///
/// Rejects empty strings, inline data URLs, and non-http(s) schemes before we
/// spend a network round trip on them.
#[must_use]
pub fn is_fetchable_url(url: &str) -> bool {
    if url.is_empty() || url.starts_with("data:") || url.starts_with("javascript:") {
        return false;
    }
    match Url::parse(url) {
        Ok(parsed) => matches!(parsed.scheme(), "http" | "https"),
        // Relative URLs parse later against the page base
        Err(url::ParseError::RelativeUrlWithoutBase) => true,
        Err(_) => false,
    }
}

/// Resolve a possibly-relative image `src` against the page it was found on.
///
/// Returns `None` when the result is not an absolute http(s) URL.
#[must_use]
pub fn resolve_candidate_url(src: &str, page_url: &Url) -> Option<String> {
    if !is_fetchable_url(src) {
        return None;
    }
    let resolved = page_url.join(src).ok()?;
    matches!(resolved.scheme(), "http" | "https").then(|| resolved.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upgrades_small_path_marker() {
        assert_eq!(
            upgrade_size_marker("https://cdn.example.com/img/small/bow.jpg"),
            "https://cdn.example.com/img/large/bow.jpg"
        );
    }

    #[test]
    fn upgrades_small_suffix_marker() {
        assert_eq!(
            upgrade_size_marker("https://cdn.example.com/img/bow-small.jpg"),
            "https://cdn.example.com/img/bow-large.jpg"
        );
    }

    #[test]
    fn leaves_unmarked_urls_alone() {
        let url = "https://cdn.example.com/img/bow.jpg";
        assert_eq!(upgrade_size_marker(url), url);
    }

    #[test]
    fn rejects_data_urls() {
        assert!(!is_fetchable_url("data:image/gif;base64,R0lGOD"));
        assert!(!is_fetchable_url(""));
        assert!(is_fetchable_url("/media/bow.jpg"));
        assert!(is_fetchable_url("https://example.com/bow.jpg"));
    }

    #[test]
    fn resolves_relative_against_page() {
        let page = Url::parse("https://example.com/yachts/aurora/").unwrap();
        assert_eq!(
            resolve_candidate_url("../img/bow.jpg", &page).as_deref(),
            Some("https://example.com/img/bow.jpg")
        );
        assert_eq!(resolve_candidate_url("data:image/png;base64,x", &page), None);
    }
}
