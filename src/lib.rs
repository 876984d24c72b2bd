//! Batch catalog ingestion for charter yachts and destinations.
//!
//! The pipeline drives a headless browser over a fixed set of source
//! targets, transcodes the photography it finds into canonical JPEG assets,
//! and idempotently reconciles everything into a SQLite catalog store.
//! Re-running with identical input is always safe: existing slugs are
//! skipped, never duplicated or merged.

pub mod browser;
pub mod catalog;
pub mod config;
pub mod error;
pub mod extractor;
pub mod media;
pub mod pipeline;
pub mod reconciler;
pub mod sources;
pub mod utils;

pub use browser::BrowserSession;
pub use catalog::{CatalogStore, GalleryImage, ImageAsset};
pub use config::IngestConfig;
pub use error::{IngestError, IngestResult};
pub use extractor::{EntityKind, ExtractedPage, ImageCandidate, PageDriver};
pub use media::MediaTranscoder;
pub use pipeline::{IngestPipeline, IngestPlan, RunSummary};
pub use reconciler::{Outcome, Reconciler, SkipReason};
pub use sources::{DestinationTarget, YachtSourceRecord};

/// Run the full ingestion batch with the given configuration.
///
/// The store pool is released before the result is surfaced, on success and
/// failure alike, mirroring how the browser session is scoped to the run.
pub async fn run(config: IngestConfig) -> IngestResult<RunSummary> {
    let plan = IngestPlan::load(&config).await?;
    let pipeline = IngestPipeline::new(config).await?;
    let result = pipeline.run(&plan).await;
    pipeline.store().close().await;
    result
}
