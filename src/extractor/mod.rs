//! Page extraction.
//!
//! Drives a browser page to a source URL and returns structured candidate
//! data (text fields, image URL candidates) via DOM heuristics. The browser
//! dependency is narrowed to the [`PageDriver`] capability trait so the
//! heuristics stay isolated and swappable; [`ChromiumDriver`] is the
//! production implementation over a chromiumoxide page.

pub mod heuristics;
pub mod js_scripts;
pub mod schema;

pub use schema::{ExtractedPage, ImageCandidate};

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use async_trait::async_trait;
use chromiumoxide::Page;
use log::{debug, warn};
use url::Url;

use crate::utils::constants::{
    QUIESCENCE_POLL_INTERVAL_MS, QUIESCENCE_STABLE_POLLS, QUIESCENCE_TIMEOUT_SECS, SCROLL_SETTLE_MS,
};

use schema::{RawImageCandidate, RawPageText};

/// Which kind of catalog entity a source target feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Yacht,
    Destination,
}

/// Narrow browser capability the extractor needs: navigate and evaluate.
///
/// Everything site-specific lives in the scripts and heuristics on top of
/// this trait, so tests drive extraction with a canned-JSON stub instead of a
/// real browser.
#[async_trait]
pub trait PageDriver: Send + Sync {
    /// Navigate to a URL and wait for the navigation to commit.
    async fn navigate(&self, url: &str) -> Result<()>;

    /// Evaluate a JavaScript expression and return its JSON value.
    async fn evaluate(&self, script: &str) -> Result<serde_json::Value>;
}

/// Production driver over one chromiumoxide page.
pub struct ChromiumDriver {
    page: Page,
}

impl ChromiumDriver {
    #[must_use]
    pub fn new(page: Page) -> Self {
        Self { page }
    }
}

#[async_trait]
impl PageDriver for ChromiumDriver {
    async fn navigate(&self, url: &str) -> Result<()> {
        self.page
            .goto(url)
            .await
            .with_context(|| format!("navigation failed: {url}"))?;
        self.page
            .wait_for_navigation()
            .await
            .with_context(|| format!("navigation did not settle: {url}"))?;
        Ok(())
    }

    async fn evaluate(&self, script: &str) -> Result<serde_json::Value> {
        let result = self
            .page
            .evaluate(script)
            .await
            .context("script evaluation failed")?;
        result
            .into_value::<serde_json::Value>()
            .context("script returned a non-JSON value")
    }
}

/// Extract candidate content for one source target.
///
/// Failure policy: any navigation or evaluation error is logged and yields an
/// empty [`ExtractedPage`]; the orchestrator proceeds to the next target
/// rather than aborting the run.
pub async fn extract(driver: &dyn PageDriver, source_url: &str, kind: EntityKind) -> ExtractedPage {
    match extract_inner(driver, source_url, kind).await {
        Ok(page) => page,
        Err(e) => {
            warn!("Extraction failed for {source_url}: {e:#}");
            ExtractedPage::default()
        }
    }
}

async fn extract_inner(
    driver: &dyn PageDriver,
    source_url: &str,
    kind: EntityKind,
) -> Result<ExtractedPage> {
    let page_url = Url::parse(source_url).with_context(|| format!("bad source URL: {source_url}"))?;

    driver.navigate(source_url).await?;
    driver
        .evaluate(js_scripts::INSTALL_MUTATION_OBSERVER_SCRIPT)
        .await?;
    wait_for_quiescence(driver).await;

    // Two scroll passes trigger lazy-loaded galleries; each is followed by a
    // settle delay and the final one by another quiescence wait.
    driver.evaluate(js_scripts::SCROLL_MIDPOINT_SCRIPT).await?;
    tokio::time::sleep(Duration::from_millis(SCROLL_SETTLE_MS)).await;
    driver.evaluate(js_scripts::SCROLL_BOTTOM_SCRIPT).await?;
    tokio::time::sleep(Duration::from_millis(SCROLL_SETTLE_MS)).await;
    wait_for_quiescence(driver).await;

    let raw_images: Vec<RawImageCandidate> =
        serde_json::from_value(driver.evaluate(js_scripts::IMAGE_CANDIDATES_SCRIPT).await?)
            .context("image candidate script returned an unexpected shape")?;
    let image_candidates = heuristics::select_image_candidates(raw_images, &page_url);

    let (name, paragraphs) = match kind {
        EntityKind::Destination => {
            let raw: RawPageText =
                serde_json::from_value(driver.evaluate(js_scripts::DESTINATION_TEXT_SCRIPT).await?)
                    .context("text script returned an unexpected shape")?;
            let name = raw.name.filter(|n| !n.trim().is_empty());
            (name, heuristics::select_paragraphs(raw.paragraphs))
        }
        // Yacht text comes from the pre-scraped batch file, not the page.
        EntityKind::Yacht => (None, Vec::new()),
    };

    debug!(
        "Extracted {} image candidates and {} paragraphs from {source_url}",
        image_candidates.len(),
        paragraphs.len()
    );

    Ok(ExtractedPage {
        name,
        paragraphs,
        image_candidates,
    })
}

/// Poll the page's mutation counter until it holds still.
///
/// Replaces fixed post-navigation sleeps with an explicit readiness check:
/// the page counts DOM mutations and we call it settled after
/// [`QUIESCENCE_STABLE_POLLS`] unchanged reads. A page that never settles
/// (carousel timers, ads) is released by the timeout; extraction proceeds
/// with whatever is rendered.
async fn wait_for_quiescence(driver: &dyn PageDriver) {
    let start = Instant::now();
    let timeout = Duration::from_secs(QUIESCENCE_TIMEOUT_SECS);
    let poll_interval = Duration::from_millis(QUIESCENCE_POLL_INTERVAL_MS);

    let mut last_count: Option<u64> = None;
    let mut stable_polls: u32 = 0;

    while start.elapsed() < timeout {
        tokio::time::sleep(poll_interval).await;

        let count = match driver.evaluate(js_scripts::MUTATION_COUNT_SCRIPT).await {
            Ok(value) => value.as_u64().unwrap_or(0),
            Err(e) => {
                debug!("Mutation count poll failed, retrying: {e:#}");
                continue;
            }
        };

        if last_count == Some(count) {
            stable_polls += 1;
            if stable_polls >= QUIESCENCE_STABLE_POLLS {
                debug!(
                    "Page settled after {:.2}s ({count} mutations)",
                    start.elapsed().as_secs_f64()
                );
                return;
            }
        } else {
            stable_polls = 0;
            last_count = Some(count);
        }
    }

    warn!(
        "Page did not settle within {QUIESCENCE_TIMEOUT_SECS}s, proceeding with current DOM"
    );
}
