//! Catalog entity types.
//!
//! Galleries are stored by value as ordered `{url, alt}` pairs serialized to
//! JSON, not as foreign keys into `image_assets`: each asset is owned by
//! exactly one gallery and the rendering layer only needs URLs.

use serde::{Deserialize, Serialize};

use crate::sources::{Price, YachtCategory, YachtSpecs};

/// One entry of an entity's ordered gallery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryImage {
    pub url: String,
    pub alt: String,
}

/// A transcoded, stored image. Immutable once created; the pipeline never
/// updates or deletes these rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageAsset {
    /// Generated filename; source filenames are never trusted or preserved.
    pub filename: String,
    /// Public URL constructed from the configured base URL.
    pub url: String,
    pub width: u32,
    pub height: u32,
    /// Size of the stored file in bytes, re-read after the write.
    pub bytes: u64,
    pub mime: String,
    /// Absolute path of the stored file.
    pub storage_path: String,
    /// Alt text carried over from the originating `<img>`.
    pub alt: String,
}

/// Column values for a yacht row about to be created.
#[derive(Debug, Clone)]
pub struct NewYacht {
    pub slug: String,
    pub name: String,
    pub category: YachtCategory,
    pub hero_image: Option<String>,
    pub gallery: Vec<GalleryImage>,
    pub summary: Option<String>,
    pub description: String,
    pub specs: YachtSpecs,
    pub price: Option<Price>,
}

/// Column values for a destination row about to be created.
#[derive(Debug, Clone)]
pub struct NewDestination {
    pub slug: String,
    pub name: String,
    pub hero_image: Option<String>,
    pub gallery: Vec<GalleryImage>,
    pub description: String,
    pub best_season: Option<String>,
    pub highlights: Vec<String>,
}
