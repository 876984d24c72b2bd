//! Candidate filtering heuristics.
//!
//! Pure functions between the raw JavaScript observations and the cooked
//! [`ExtractedPage`]: image selection/priority/de-duplication and paragraph
//! filtering. Kept free of browser types so they are directly testable.

use std::collections::HashSet;

use url::Url;

use crate::utils::constants::{
    MAX_DESCRIPTION_PARAGRAPHS, MIN_CANDIDATE_WIDTH_PX, MIN_PARAGRAPH_CHARS,
};
use crate::utils::url_utils::{resolve_candidate_url, upgrade_size_marker};

use super::schema::{ImageCandidate, RawImageCandidate};

/// Substrings marking cookie-notice and similar boilerplate paragraphs.
/// Matched case-insensitively against the whole paragraph.
const BOILERPLATE_MARKERS: &[&str] = &[
    "cookie",
    "gdpr",
    "consent",
    "privacy policy",
    "newsletter",
];

/// Select, order, and de-duplicate image candidates.
///
/// Two heuristics in priority order: images inside gallery/slider containers
/// first, then any other image wider than the content threshold. URLs are
/// resolved against the page, upgraded from known "small" size markers, and
/// de-duplicated by resolved URL (first occurrence wins, so a gallery hit
/// shadows the same URL found elsewhere).
#[must_use]
pub fn select_image_candidates(
    raw: Vec<RawImageCandidate>,
    page_url: &Url,
) -> Vec<ImageCandidate> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut selected = Vec::new();

    let (gallery, rest): (Vec<_>, Vec<_>) = raw.into_iter().partition(|c| c.in_gallery);

    for candidate in gallery
        .into_iter()
        .chain(rest.into_iter().filter(|c| c.width > MIN_CANDIDATE_WIDTH_PX))
    {
        let Some(resolved) = resolve_candidate_url(&candidate.src, page_url) else {
            continue;
        };
        let full_size = upgrade_size_marker(&resolved);
        if seen.insert(full_size.clone()) {
            selected.push(ImageCandidate {
                url: full_size,
                alt: candidate.alt,
            });
        }
    }

    selected
}

/// Keep paragraphs long enough to be real description text and free of
/// cookie-notice boilerplate, capped to the first
/// [`MAX_DESCRIPTION_PARAGRAPHS`].
#[must_use]
pub fn select_paragraphs(raw: Vec<String>) -> Vec<String> {
    raw.into_iter()
        .map(|p| p.trim().to_string())
        .filter(|p| p.len() >= MIN_PARAGRAPH_CHARS)
        .filter(|p| {
            let lower = p.to_lowercase();
            !BOILERPLATE_MARKERS.iter().any(|marker| lower.contains(marker))
        })
        .take(MAX_DESCRIPTION_PARAGRAPHS)
        .collect()
}
