//! Catalog reconciliation.
//!
//! Maps extracted candidate data onto catalog entities and performs the store
//! writes: create entity, attach media, link relations. Idempotency is by
//! slug; an existing row is skipped outright, never partially merged. The
//! only update path is the fix-missing pass, which re-ingests galleries for
//! rows known to lack them.

pub mod fallbacks;

use std::collections::HashMap;

use log::{info, warn};

use crate::catalog::{CatalogStore, GalleryImage, NewDestination, NewYacht};
use crate::error::IngestResult;
use crate::extractor::{ExtractedPage, ImageCandidate};
use crate::media::MediaTranscoder;
use crate::sources::{DestinationTarget, YachtSourceRecord};
use crate::utils::string_utils::slugify;

use fallbacks::{curated_best_season, curated_highlights, resolve_description};

/// Result of reconciling one source target against the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A new row was created.
    Created { id: i64 },
    /// Nothing was written.
    Skipped(SkipReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// A row with this slug already exists; re-runs never merge into it.
    AlreadyExists,
    /// Extraction produced neither usable text nor image candidates.
    NothingExtracted,
}

/// Source destination labels we recognize, normalized to slug form, mapped to
/// the canonical destination slug they group under. Labels outside this list
/// are silently dropped.
const RECOGNIZED_REGIONS: &[(&str, &str)] = &[
    ("greece", "greek-islands"),
    ("greek-islands", "greek-islands"),
    ("cyclades", "greek-islands"),
    ("ionian", "greek-islands"),
    ("croatia", "croatia"),
    ("dalmatia", "croatia"),
    ("turkey", "turkish-coast"),
    ("turkish-riviera", "turkish-coast"),
    ("turquoise-coast", "turkish-coast"),
    ("italy", "amalfi-coast"),
    ("amalfi", "amalfi-coast"),
    ("amalfi-coast", "amalfi-coast"),
    ("france", "french-riviera"),
    ("french-riviera", "french-riviera"),
    ("cote-d-azur", "french-riviera"),
];

/// Map a source destination label onto the canonical slug of its recognized
/// grouping, if any.
#[must_use]
pub fn resolve_destination_group(label: &str) -> Option<&'static str> {
    let normalized = slugify(label);
    RECOGNIZED_REGIONS
        .iter()
        .find(|(key, _)| *key == normalized)
        .map(|(_, slug)| *slug)
}

/// Reconciles extracted data into the catalog store.
pub struct Reconciler<'a> {
    store: &'a CatalogStore,
    transcoder: &'a MediaTranscoder,
    yacht_gallery_cap: usize,
    destination_gallery_cap: usize,
}

impl<'a> Reconciler<'a> {
    #[must_use]
    pub fn new(
        store: &'a CatalogStore,
        transcoder: &'a MediaTranscoder,
        yacht_gallery_cap: usize,
        destination_gallery_cap: usize,
    ) -> Self {
        Self {
            store,
            transcoder,
            yacht_gallery_cap,
            destination_gallery_cap,
        }
    }

    /// Reconcile one destination target.
    ///
    /// Policy for the empty case: a destination yielding neither paragraphs
    /// nor image candidates is skipped, not created, so the catalog never
    /// carries a page-shaped husk with only boilerplate text.
    pub async fn reconcile_destination(
        &self,
        target: &DestinationTarget,
        extracted: &ExtractedPage,
    ) -> IngestResult<Outcome> {
        if self.store.destination_id_by_slug(&target.slug).await?.is_some() {
            info!("Destination '{}' already exists, skipping", target.slug);
            return Ok(Outcome::Skipped(SkipReason::AlreadyExists));
        }

        if extracted.paragraphs.is_empty() && extracted.image_candidates.is_empty() {
            warn!(
                "Destination '{}' yielded no text and no images, skipping creation",
                target.slug
            );
            return Ok(Outcome::Skipped(SkipReason::NothingExtracted));
        }

        let name = extracted
            .name
            .clone()
            .unwrap_or_else(|| target.fallback_name.clone());

        let (gallery, hero_image) = self
            .ingest_gallery(
                &extracted.image_candidates,
                &target.slug,
                self.destination_gallery_cap,
            )
            .await?;

        let scraped = extracted.paragraphs.join("\n\n");
        let destination = NewDestination {
            slug: target.slug.clone(),
            name: name.clone(),
            hero_image,
            gallery,
            description: resolve_description(&target.slug, &name, &scraped),
            best_season: curated_best_season(&target.slug),
            highlights: curated_highlights(&target.slug),
        };

        let id = self.store.insert_destination(&destination).await?;
        info!(
            "Created destination '{}' with {} gallery images",
            target.slug,
            destination.gallery.len()
        );
        Ok(Outcome::Created { id })
    }

    /// Reconcile one yacht source record.
    ///
    /// `candidates` are the already-normalized image candidates for the
    /// record (from the batch file, or from live extraction when the batch
    /// carried none). Returns the outcome and the number of destination
    /// links created. A yacht with zero images is still created; the source
    /// record always carries name and specs.
    pub async fn reconcile_yacht(
        &self,
        record: &YachtSourceRecord,
        candidates: &[ImageCandidate],
        destination_ids: &HashMap<String, i64>,
    ) -> IngestResult<(Outcome, usize)> {
        if self.store.yacht_id_by_slug(&record.slug).await?.is_some() {
            info!("Yacht '{}' already exists, skipping", record.slug);
            return Ok((Outcome::Skipped(SkipReason::AlreadyExists), 0));
        }

        let (gallery, first_image) = self
            .ingest_gallery(candidates, &record.slug, self.yacht_gallery_cap)
            .await?;

        // A leading video keeps the hero slot intentionally empty.
        let hero_image = if record.hero_video.is_some() {
            None
        } else {
            first_image
        };

        let yacht = NewYacht {
            slug: record.slug.clone(),
            name: record.name.clone(),
            category: record.category,
            hero_image,
            gallery,
            summary: yacht_summary(record),
            description: resolve_description(&record.slug, &record.name, ""),
            specs: record.specs.clone(),
            price: record.price.clone(),
        };

        let id = self.store.insert_yacht(&yacht).await?;
        info!(
            "Created yacht '{}' with {} gallery images",
            record.slug,
            yacht.gallery.len()
        );

        let links = self.link_destinations(id, record, destination_ids).await?;
        Ok((Outcome::Created { id }, links))
    }

    /// Re-ingest the gallery of an existing yacht that lacks one.
    ///
    /// Returns true when media was written. Rows that do not exist or
    /// already have a gallery are left untouched.
    pub async fn fix_missing_yacht_media(
        &self,
        record: &YachtSourceRecord,
        candidates: &[ImageCandidate],
    ) -> IngestResult<bool> {
        let Some((_, existing_gallery)) = self.store.yacht_media(&record.slug).await? else {
            warn!("Yacht '{}' not found in store, skipping fix", record.slug);
            return Ok(false);
        };
        if !existing_gallery.is_empty() {
            info!("Yacht '{}' already has a gallery, skipping fix", record.slug);
            return Ok(false);
        }

        let (gallery, first_image) = self
            .ingest_gallery(candidates, &record.slug, self.yacht_gallery_cap)
            .await?;
        if gallery.is_empty() {
            warn!("No images could be ingested for yacht '{}'", record.slug);
            return Ok(false);
        }

        let hero_image = if record.hero_video.is_some() {
            None
        } else {
            first_image
        };
        self.store
            .update_yacht_media(&record.slug, hero_image.as_deref(), &gallery)
            .await?;
        info!(
            "Backfilled {} gallery images for yacht '{}'",
            gallery.len(),
            record.slug
        );
        Ok(true)
    }

    /// Transcode candidates sequentially until `cap` successes; the first
    /// success is the hero. Failed candidates are skipped, not counted
    /// against the cap. Asset rows are written as they are produced; a store
    /// write failure surfaces immediately.
    async fn ingest_gallery(
        &self,
        candidates: &[ImageCandidate],
        name_prefix: &str,
        cap: usize,
    ) -> IngestResult<(Vec<GalleryImage>, Option<String>)> {
        let mut gallery = Vec::new();
        for candidate in candidates {
            if gallery.len() >= cap {
                break;
            }
            if let Some(asset) = self
                .transcoder
                .ingest(&candidate.url, name_prefix, &candidate.alt)
                .await
            {
                self.store.insert_image_asset(&asset).await?;
                gallery.push(GalleryImage {
                    url: asset.url,
                    alt: asset.alt,
                });
            }
        }
        let hero = gallery.first().map(|g| g.url.clone());
        Ok((gallery, hero))
    }

    /// Create link rows for each recognized destination reference that
    /// resolves against the pre-built lookup map. Unrecognized labels and
    /// destinations missing from the store are dropped.
    async fn link_destinations(
        &self,
        yacht_id: i64,
        record: &YachtSourceRecord,
        destination_ids: &HashMap<String, i64>,
    ) -> IngestResult<usize> {
        let mut created = 0;
        for label in &record.destinations {
            let Some(slug) = resolve_destination_group(label) else {
                log::debug!(
                    "Yacht '{}' references unrecognized destination '{label}', dropping",
                    record.slug
                );
                continue;
            };
            let Some(&destination_id) = destination_ids.get(slug) else {
                log::debug!(
                    "Yacht '{}' references destination '{slug}' not present in store, dropping",
                    record.slug
                );
                continue;
            };
            if self
                .store
                .link_yacht_destination(yacht_id, destination_id)
                .await?
            {
                created += 1;
            }
        }
        Ok(created)
    }
}

/// One-line summary derived from the record's specs, when enough of them are
/// present to say something useful.
fn yacht_summary(record: &YachtSourceRecord) -> Option<String> {
    let length = record.specs.length_m?;
    let mut summary = format!("{length:.0}m {} yacht", record.category.as_str());
    if let Some(cabins) = record.specs.cabins {
        summary.push_str(&format!(" with {cabins} cabins"));
    }
    Some(summary)
}
