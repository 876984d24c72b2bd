// Catalog ingestion batch runner.
//
// All process parameters come from the environment; there is no CLI surface
// of note. Required:
//   REGATTA_DATABASE        path to the SQLite catalog database
//   REGATTA_MEDIA_DIR       directory receiving transcoded images
//   REGATTA_PUBLIC_BASE_URL public base URL for asset links
// Optional:
//   REGATTA_YACHT_BATCH     pre-scraped yacht batch file (JSON)
//   REGATTA_DESTINATION_URLS comma-separated destination page URLs
//   REGATTA_REFERER         Referer header for direct image fetches
//   REGATTA_FIX_MISSING     run the fix-missing pass instead of a full run;
//                           value is a comma-separated slug list, or "auto"
//                           to target every yacht with an empty gallery

use anyhow::{Context, Result};
use log::info;

use regatta_ingest::{IngestConfig, IngestPipeline, IngestPlan};

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("{key} must be set"))
}

fn build_config() -> Result<IngestConfig> {
    let mut config = IngestConfig::new(
        require_env("REGATTA_DATABASE")?,
        require_env("REGATTA_MEDIA_DIR")?,
        require_env("REGATTA_PUBLIC_BASE_URL")?,
    );

    if let Ok(batch) = std::env::var("REGATTA_YACHT_BATCH") {
        config = config.with_yacht_batch_path(batch);
    }
    if let Ok(urls) = std::env::var("REGATTA_DESTINATION_URLS") {
        let urls = urls
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();
        config = config.with_destination_urls(urls);
    }
    if let Ok(referer) = std::env::var("REGATTA_REFERER") {
        config = config.with_referer(referer);
    }

    Ok(config)
}

/// Parse the fix-missing target spec: the literal `auto` keyword targets
/// every yacht with an empty gallery; anything else must name at least one
/// slug. A value that filters down to nothing is a configuration mistake,
/// not a request to widen scope.
fn parse_fix_missing(spec: &str) -> Result<Vec<String>> {
    if spec.trim() == "auto" {
        return Ok(Vec::new());
    }
    let slugs: Vec<String> = spec
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect();
    if slugs.is_empty() {
        anyhow::bail!("REGATTA_FIX_MISSING must be 'auto' or a comma-separated slug list");
    }
    Ok(slugs)
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let config = build_config()?;
    let plan = IngestPlan::load(&config).await?;
    let pipeline = IngestPipeline::new(config).await?;

    let result = match std::env::var("REGATTA_FIX_MISSING") {
        Ok(spec) => match parse_fix_missing(&spec) {
            Ok(slugs) => pipeline.run_fix_missing(&plan, &slugs).await,
            Err(e) => {
                pipeline.store().close().await;
                return Err(e);
            }
        },
        Err(_) => pipeline.run(&plan).await,
    };
    // Release the pool before surfacing the batch result
    pipeline.store().close().await;
    let summary = result?;

    info!(
        "Done: {} destinations created ({} skipped), {} yachts created ({} skipped), {} links, {} galleries backfilled",
        summary.destinations_created,
        summary.destinations_skipped,
        summary.yachts_created,
        summary.yachts_skipped,
        summary.links_created,
        summary.galleries_backfilled
    );
    Ok(())
}
