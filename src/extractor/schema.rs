//! Extraction result types.
//!
//! Raw shapes mirror what the in-page JavaScript returns; the cooked
//! [`ExtractedPage`] is what the reconciler consumes after the heuristics
//! have filtered and normalized the raw data.

use serde::Deserialize;

/// One `<img>` observation straight out of the page, before filtering.
#[derive(Debug, Clone, Deserialize)]
pub struct RawImageCandidate {
    pub src: String,
    #[serde(default)]
    pub alt: String,
    /// True when the element sits inside a gallery/slider container.
    #[serde(default, rename = "inGallery")]
    pub in_gallery: bool,
    /// Max of rendered and natural width, in CSS pixels.
    #[serde(default)]
    pub width: f64,
}

/// Raw text observation for destination pages.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPageText {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub paragraphs: Vec<String>,
}

/// A filtered, de-duplicated image candidate with its resolved absolute URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageCandidate {
    pub url: String,
    pub alt: String,
}

/// Structured candidate data for one source target.
///
/// An empty value is the extractor's failure signal: the orchestrator logs
/// and moves on rather than aborting the run.
#[derive(Debug, Clone, Default)]
pub struct ExtractedPage {
    /// First `<h1>` on the page, if any (destinations only).
    pub name: Option<String>,
    /// Usable description paragraphs in document order (destinations only).
    pub paragraphs: Vec<String>,
    /// Image candidates in priority order: gallery images first.
    pub image_candidates: Vec<ImageCandidate>,
}

impl ExtractedPage {
    /// True when extraction produced neither text nor images.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.paragraphs.is_empty() && self.image_candidates.is_empty()
    }
}
