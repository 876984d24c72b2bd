//! Ingestion orchestration.
//!
//! Owns the browser session for the whole run, sequences extraction, media
//! ingestion, and reconciliation target by target, and enforces the
//! politeness delay between targets. Strictly sequential: one page, one
//! target, one download at a time.

use std::collections::HashSet;
use std::time::Duration;

use log::{error, info, warn};

use crate::browser::BrowserSession;
use crate::catalog::CatalogStore;
use crate::config::IngestConfig;
use crate::error::{IngestError, IngestResult};
use crate::extractor::{self, ChromiumDriver, EntityKind, ImageCandidate, PageDriver};
use crate::media::MediaTranscoder;
use crate::reconciler::{Outcome, Reconciler};
use crate::sources::{self, DestinationTarget, YachtSourceRecord};
use crate::utils::url_utils::{is_fetchable_url, upgrade_size_marker};

/// Everything one run works through: destination pages scraped live, then
/// yacht records from the pre-scraped batch file.
#[derive(Debug, Clone, Default)]
pub struct IngestPlan {
    pub destinations: Vec<DestinationTarget>,
    pub yachts: Vec<YachtSourceRecord>,
}

impl IngestPlan {
    /// Build the plan from the configured inputs.
    pub async fn load(config: &IngestConfig) -> IngestResult<Self> {
        let mut destinations = Vec::new();
        for url in config.destination_urls() {
            let target = DestinationTarget::from_url(url)
                .map_err(|e| IngestError::Config(format!("{e:#}")))?;
            destinations.push(target);
        }

        let yachts = match config.yacht_batch_path() {
            Some(path) => sources::load_yacht_batch(path)
                .await
                .map_err(|e| IngestError::SourceBatch(format!("{e:#}")))?,
            None => Vec::new(),
        };

        Ok(Self {
            destinations,
            yachts,
        })
    }
}

/// Counters reported at the end of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub destinations_created: usize,
    pub destinations_skipped: usize,
    pub yachts_created: usize,
    pub yachts_skipped: usize,
    pub links_created: usize,
    pub galleries_backfilled: usize,
}

/// The batch ingestion pipeline.
///
/// Construction opens the catalog store and media transcoder; the browser
/// session is scoped to each run and released on every exit path, including
/// a store write failure mid-batch.
pub struct IngestPipeline {
    config: IngestConfig,
    store: CatalogStore,
    transcoder: MediaTranscoder,
}

impl IngestPipeline {
    pub async fn new(config: IngestConfig) -> IngestResult<Self> {
        let store = CatalogStore::open(config.database_path()).await?;
        let transcoder = MediaTranscoder::new(
            config.media_dir(),
            config.public_base_url(),
            config.referer(),
        )?;
        Ok(Self {
            config,
            store,
            transcoder,
        })
    }

    #[must_use]
    pub fn store(&self) -> &CatalogStore {
        &self.store
    }

    /// Run the full batch: destinations first (so yacht linking can
    /// resolve), then yachts.
    pub async fn run(&self, plan: &IngestPlan) -> IngestResult<RunSummary> {
        let session = BrowserSession::launch(self.config.headless())
            .await
            .map_err(|e| IngestError::Browser(format!("{e:#}")))?;

        // The batch result is captured so the session is released on every
        // exit path before the result is surfaced.
        let result = self.run_with_session(&session, plan).await;
        session.close().await;

        match &result {
            Ok(summary) => info!("Ingestion run complete: {summary:?}"),
            Err(e) => error!("Ingestion run failed: {e}"),
        }
        result
    }

    async fn run_with_session(
        &self,
        session: &BrowserSession,
        plan: &IngestPlan,
    ) -> IngestResult<RunSummary> {
        let page = session
            .new_page()
            .await
            .map_err(|e| IngestError::Browser(format!("{e:#}")))?;
        let driver = ChromiumDriver::new(page);

        let mut summary = RunSummary::default();
        let reconciler = Reconciler::new(
            &self.store,
            &self.transcoder,
            self.config.yacht_gallery_cap(),
            self.config.destination_gallery_cap(),
        );

        // Destination lookup map first; newly created destinations join it
        // so later yacht linking resolves within the same run.
        let mut destination_ids = self.store.destination_slug_map().await?;

        for target in &plan.destinations {
            info!("Ingesting destination '{}' from {}", target.slug, target.url);
            let extracted = extractor::extract(&driver, &target.url, EntityKind::Destination).await;
            match reconciler.reconcile_destination(target, &extracted).await? {
                Outcome::Created { id } => {
                    destination_ids.insert(target.slug.clone(), id);
                    summary.destinations_created += 1;
                }
                Outcome::Skipped(_) => summary.destinations_skipped += 1,
            }
            self.politeness_delay().await;
        }

        for record in &plan.yachts {
            info!("Ingesting yacht '{}'", record.slug);
            let candidates = self.candidates_for_record(&driver, record).await;
            if candidates.is_empty() {
                warn!("No image candidates for yacht '{}'", record.slug);
            }
            let (outcome, links) = reconciler
                .reconcile_yacht(record, &candidates, &destination_ids)
                .await?;
            match outcome {
                Outcome::Created { .. } => summary.yachts_created += 1,
                Outcome::Skipped(_) => summary.yachts_skipped += 1,
            }
            summary.links_created += links;
            self.politeness_delay().await;
        }

        Ok(summary)
    }

    /// Re-ingest galleries for existing yachts that lack them.
    ///
    /// `slugs` narrows the pass; when empty, every yacht with an empty
    /// gallery is targeted. This is the only path that updates existing rows.
    pub async fn run_fix_missing(
        &self,
        plan: &IngestPlan,
        slugs: &[String],
    ) -> IngestResult<RunSummary> {
        let targeted: HashSet<&str> = if slugs.is_empty() {
            let missing = self.store.yacht_slugs_missing_gallery().await?;
            info!("Fix-missing pass targeting {} yachts with empty galleries", missing.len());
            return Box::pin(self.run_fix_missing(plan, &missing)).await;
        } else {
            slugs.iter().map(String::as_str).collect()
        };

        let session = BrowserSession::launch(self.config.headless())
            .await
            .map_err(|e| IngestError::Browser(format!("{e:#}")))?;
        let result = self.fix_missing_with_session(&session, plan, &targeted).await;
        session.close().await;
        result
    }

    async fn fix_missing_with_session(
        &self,
        session: &BrowserSession,
        plan: &IngestPlan,
        targeted: &HashSet<&str>,
    ) -> IngestResult<RunSummary> {
        let page = session
            .new_page()
            .await
            .map_err(|e| IngestError::Browser(format!("{e:#}")))?;
        let driver = ChromiumDriver::new(page);

        let mut summary = RunSummary::default();
        let reconciler = Reconciler::new(
            &self.store,
            &self.transcoder,
            self.config.yacht_gallery_cap(),
            self.config.destination_gallery_cap(),
        );

        for record in plan.yachts.iter().filter(|r| targeted.contains(r.slug.as_str())) {
            info!("Fixing missing media for yacht '{}'", record.slug);
            let candidates = self.candidates_for_record(&driver, record).await;
            if reconciler.fix_missing_yacht_media(record, &candidates).await? {
                summary.galleries_backfilled += 1;
            }
            self.politeness_delay().await;
        }

        info!("Fix-missing pass complete: {summary:?}");
        Ok(summary)
    }

    /// Image candidates for a yacht record: the batch file's URL list when it
    /// has one, otherwise live extraction from the record's source page.
    async fn candidates_for_record(
        &self,
        driver: &dyn PageDriver,
        record: &YachtSourceRecord,
    ) -> Vec<ImageCandidate> {
        if !record.images.is_empty() {
            return candidates_from_batch(&record.images, &record.name);
        }
        extractor::extract(driver, &record.url, EntityKind::Yacht)
            .await
            .image_candidates
    }

    async fn politeness_delay(&self) {
        tokio::time::sleep(Duration::from_millis(self.config.politeness_delay_ms())).await;
    }
}

/// Normalize a batch file's raw image URL list into candidates: drop
/// non-fetchable entries, upgrade size markers, de-duplicate preserving
/// order. The yacht name doubles as alt text; the batch carries none.
#[must_use]
pub fn candidates_from_batch(images: &[String], name: &str) -> Vec<ImageCandidate> {
    let mut seen = HashSet::new();
    images
        .iter()
        .filter(|url| is_fetchable_url(url))
        .map(|url| upgrade_size_marker(url))
        .filter(|url| seen.insert(url.clone()))
        .map(|url| ImageCandidate {
            url,
            alt: name.to_string(),
        })
        .collect()
}
