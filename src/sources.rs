//! Source input contract.
//!
//! Yacht records arrive as a pre-scraped JSON batch file; destination records
//! are discovered live by navigating a small fixed set of source URLs. This
//! module owns both shapes plus the batch loader.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::utils::string_utils::{humanize_slug, slugify};

/// Hull/propulsion category of a yacht.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum YachtCategory {
    Motor,
    Sailing,
    Catamaran,
    Gulet,
}

impl YachtCategory {
    /// Stable string form stored in the catalog.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Motor => "motor",
            Self::Sailing => "sailing",
            Self::Catamaran => "catamaran",
            Self::Gulet => "gulet",
        }
    }
}

/// Optional numeric specs carried by a yacht source record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct YachtSpecs {
    #[serde(default)]
    pub length_m: Option<f64>,
    #[serde(default)]
    pub cabins: Option<u32>,
    #[serde(default)]
    pub crew: Option<u32>,
    #[serde(default)]
    pub year: Option<u32>,
    #[serde(default)]
    pub cruising_speed_kn: Option<f64>,
}

/// Weekly charter price as listed on the source site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Price {
    pub amount: f64,
    pub currency: String,
}

/// One pre-scraped yacht record from the batch file.
///
/// `images` holds raw candidate URLs in source order; when it is empty the
/// pipeline falls back to live extraction from `url`. `hero_video` marks a
/// record whose hero slot is intentionally image-free because the listing
/// leads with a video.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YachtSourceRecord {
    pub name: String,
    pub slug: String,
    #[serde(rename = "type")]
    pub category: YachtCategory,
    pub url: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub specs: YachtSpecs,
    #[serde(default)]
    pub destinations: Vec<String>,
    #[serde(default)]
    pub hero_video: Option<String>,
    #[serde(default)]
    pub price: Option<Price>,
}

/// A destination page to scrape live.
#[derive(Debug, Clone)]
pub struct DestinationTarget {
    pub url: String,
    /// Natural key derived from the URL's final path segment.
    pub slug: String,
    /// Display name used when the page yields no `<h1>`.
    pub fallback_name: String,
}

impl DestinationTarget {
    /// Derive a target from a source URL.
    ///
    /// Fails when the URL does not parse or has an empty path; destination
    /// URLs are operator-configured, so this is a configuration error.
    pub fn from_url(url: &str) -> Result<Self> {
        let parsed = Url::parse(url).with_context(|| format!("invalid destination URL: {url}"))?;
        let segment = parsed
            .path_segments()
            .and_then(|mut segments| segments.rfind(|s| !s.is_empty()))
            .with_context(|| format!("destination URL has no path segment: {url}"))?;
        let slug = slugify(segment);
        if slug.is_empty() {
            anyhow::bail!("destination URL yields an empty slug: {url}");
        }
        let fallback_name = humanize_slug(&slug);
        Ok(Self {
            url: url.to_string(),
            slug,
            fallback_name,
        })
    }
}

/// Load and parse the pre-scraped yacht batch file.
pub async fn load_yacht_batch(path: &Path) -> Result<Vec<YachtSourceRecord>> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read yacht batch file: {}", path.display()))?;
    let records: Vec<YachtSourceRecord> = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse yacht batch file: {}", path.display()))?;
    log::info!("Loaded {} yacht source records from {}", records.len(), path.display());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_parses_with_minimal_fields() {
        let json = r#"{
            "name": "Aurora",
            "slug": "aurora",
            "type": "motor",
            "url": "https://example.com/yachts/aurora"
        }"#;
        let record: YachtSourceRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.category, YachtCategory::Motor);
        assert!(record.images.is_empty());
        assert!(record.specs.length_m.is_none());
        assert!(record.hero_video.is_none());
    }

    #[test]
    fn record_parses_with_full_fields() {
        let json = r#"{
            "name": "Meltemi",
            "slug": "meltemi",
            "type": "gulet",
            "url": "https://example.com/yachts/meltemi",
            "images": ["https://cdn.example.com/small/a.jpg"],
            "specs": {"length_m": 24.0, "cabins": 5, "crew": 4, "year": 2016, "cruising_speed_kn": 10.5},
            "destinations": ["Greek Islands", "Turkey"],
            "price": {"amount": 18500.0, "currency": "EUR"}
        }"#;
        let record: YachtSourceRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.specs.cabins, Some(5));
        assert_eq!(record.destinations.len(), 2);
        assert_eq!(record.price.as_ref().unwrap().currency, "EUR");
    }

    #[test]
    fn destination_target_derives_slug_from_url() {
        let target =
            DestinationTarget::from_url("https://example.com/destinations/Greek-Islands/").unwrap();
        assert_eq!(target.slug, "greek-islands");
        assert_eq!(target.fallback_name, "Greek Islands");
    }

    #[test]
    fn destination_target_rejects_bare_host() {
        assert!(DestinationTarget::from_url("https://example.com").is_err());
    }
}
