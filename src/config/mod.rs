//! Pipeline configuration.
//!
//! All process parameters live here: store target, media storage root, public
//! base URL for asset links, source inputs, and pacing. The config is built
//! once at startup and passed by reference into the pipeline; nothing in this
//! crate reads process-global state after construction.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::utils::constants::{
    DEFAULT_POLITENESS_DELAY_MS, DESTINATION_GALLERY_CAP, YACHT_GALLERY_CAP,
};

/// Configuration for one ingestion run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestConfig {
    /// SQLite database file backing the catalog store.
    pub(crate) database_path: PathBuf,
    /// Write-once directory receiving transcoded image bytes.
    pub(crate) media_dir: PathBuf,
    /// Public base URL prepended to generated filenames when constructing
    /// asset URLs. No trailing slash.
    pub(crate) public_base_url: String,
    /// Referer sent on direct image fetches. The source site's hotlink
    /// protection rejects requests without one.
    pub(crate) referer: String,
    /// Pre-scraped yacht batch file (JSON array of source records).
    pub(crate) yacht_batch_path: Option<PathBuf>,
    /// Destination pages scraped live, in order.
    pub(crate) destination_urls: Vec<String>,
    pub(crate) headless: bool,
    pub(crate) politeness_delay_ms: u64,
    pub(crate) yacht_gallery_cap: usize,
    pub(crate) destination_gallery_cap: usize,
}

impl IngestConfig {
    /// Create a config with the three required process parameters; everything
    /// else starts at its documented default.
    pub fn new(
        database_path: impl Into<PathBuf>,
        media_dir: impl Into<PathBuf>,
        public_base_url: impl Into<String>,
    ) -> Self {
        let public_base_url = public_base_url.into();
        let public_base_url = public_base_url.trim_end_matches('/').to_string();
        Self {
            database_path: database_path.into(),
            media_dir: media_dir.into(),
            public_base_url,
            referer: String::new(),
            yacht_batch_path: None,
            destination_urls: Vec::new(),
            headless: true,
            politeness_delay_ms: DEFAULT_POLITENESS_DELAY_MS,
            yacht_gallery_cap: YACHT_GALLERY_CAP,
            destination_gallery_cap: DESTINATION_GALLERY_CAP,
        }
    }

    #[must_use]
    pub fn with_referer(mut self, referer: impl Into<String>) -> Self {
        self.referer = referer.into();
        self
    }

    #[must_use]
    pub fn with_yacht_batch_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.yacht_batch_path = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_destination_urls(mut self, urls: Vec<String>) -> Self {
        self.destination_urls = urls;
        self
    }

    #[must_use]
    pub fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    #[must_use]
    pub fn with_politeness_delay_ms(mut self, millis: u64) -> Self {
        self.politeness_delay_ms = millis;
        self
    }

    #[must_use]
    pub fn with_gallery_caps(mut self, yacht: usize, destination: usize) -> Self {
        self.yacht_gallery_cap = yacht;
        self.destination_gallery_cap = destination;
        self
    }

    #[must_use]
    pub fn database_path(&self) -> &Path {
        &self.database_path
    }

    #[must_use]
    pub fn media_dir(&self) -> &Path {
        &self.media_dir
    }

    #[must_use]
    pub fn public_base_url(&self) -> &str {
        &self.public_base_url
    }

    #[must_use]
    pub fn referer(&self) -> &str {
        &self.referer
    }

    #[must_use]
    pub fn yacht_batch_path(&self) -> Option<&Path> {
        self.yacht_batch_path.as_deref()
    }

    #[must_use]
    pub fn destination_urls(&self) -> &[String] {
        &self.destination_urls
    }

    #[must_use]
    pub fn headless(&self) -> bool {
        self.headless
    }

    #[must_use]
    pub fn politeness_delay_ms(&self) -> u64 {
        self.politeness_delay_ms
    }

    #[must_use]
    pub fn yacht_gallery_cap(&self) -> usize {
        self.yacht_gallery_cap
    }

    #[must_use]
    pub fn destination_gallery_cap(&self) -> usize {
        self.destination_gallery_cap
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_stripped() {
        let config = IngestConfig::new("/tmp/catalog.db", "/tmp/media", "https://cdn.example.com/");
        assert_eq!(config.public_base_url(), "https://cdn.example.com");
    }

    #[test]
    fn defaults_match_documented_caps() {
        let config = IngestConfig::new("/tmp/catalog.db", "/tmp/media", "https://cdn.example.com");
        assert_eq!(config.yacht_gallery_cap(), YACHT_GALLERY_CAP);
        assert_eq!(config.destination_gallery_cap(), DESTINATION_GALLERY_CAP);
        assert!(config.headless());
    }
}
