//! Media transcoding.
//!
//! Fetches a candidate image URL, validates it, canonicalizes to JPEG at a
//! fixed quality, downsizes over-wide images, persists the bytes under a
//! generated filename, and returns asset metadata read back from the stored
//! file. Every failure is a logged skip; nothing propagates past
//! [`MediaTranscoder::ingest`].

use std::io::Cursor;
use std::path::PathBuf;

use anyhow::{Context, Result};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::GenericImageView;
use log::{debug, warn};
use reqwest::Client;
use uuid::Uuid;

use crate::catalog::ImageAsset;
use crate::utils::constants::{
    BROWSER_USER_AGENT, JPEG_QUALITY, MAX_IMAGE_WIDTH, MIN_IMAGE_BYTES,
};

/// Transcodes and persists remote images into the media directory.
pub struct MediaTranscoder {
    client: Client,
    media_dir: PathBuf,
    public_base_url: String,
    referer: String,
}

impl MediaTranscoder {
    /// Build a transcoder writing into `media_dir` and publishing under
    /// `public_base_url`. `referer` is sent on every fetch; the source site's
    /// hotlink protection rejects requests without one.
    pub fn new(
        media_dir: impl Into<PathBuf>,
        public_base_url: impl Into<String>,
        referer: impl Into<String>,
    ) -> Result<Self> {
        let client = Client::builder()
            .user_agent(BROWSER_USER_AGENT)
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .context("Failed to build HTTP client")?;
        let referer = referer.into();
        if referer.is_empty() {
            warn!(
                "No referer configured; sources with hotlink protection will reject image fetches"
            );
        }
        Ok(Self {
            client,
            media_dir: media_dir.into(),
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
            referer,
        })
    }

    /// Fetch, transcode, and persist one image.
    ///
    /// Returns `None` on any failure (bad status, wrong content type,
    /// undersized payload, decode/encode error, disk error) so the caller can
    /// continue with other candidates.
    pub async fn ingest(&self, image_url: &str, name_prefix: &str, alt: &str) -> Option<ImageAsset> {
        match self.ingest_inner(image_url, name_prefix, alt).await {
            Ok(asset) => {
                debug!(
                    "Stored {} ({}x{}, {} bytes) from {image_url}",
                    asset.filename, asset.width, asset.height, asset.bytes
                );
                Some(asset)
            }
            Err(e) => {
                warn!("Skipping image {image_url}: {e:#}");
                None
            }
        }
    }

    async fn ingest_inner(&self, image_url: &str, name_prefix: &str, alt: &str) -> Result<ImageAsset> {
        let mut request = self.client.get(image_url);
        if !self.referer.is_empty() {
            request = request.header("Referer", &self.referer);
        }
        let response = request.send().await.context("fetch failed")?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("unexpected status {status}");
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        if !content_type.starts_with("image/") {
            anyhow::bail!("not an image content type: '{content_type}'");
        }

        let payload = response.bytes().await.context("body read failed")?;
        if payload.len() < MIN_IMAGE_BYTES {
            anyhow::bail!(
                "payload too small ({} bytes), treating as placeholder",
                payload.len()
            );
        }

        // Decode, downscale, and re-encode off the async runtime.
        let jpeg = tokio::task::spawn_blocking(move || transcode_to_jpeg(&payload))
            .await
            .context("transcode task panicked")??;

        let filename = generate_filename(name_prefix);
        let storage_path = self.media_dir.join(&filename);

        tokio::fs::create_dir_all(&self.media_dir)
            .await
            .context("failed to create media directory")?;
        tokio::fs::write(&storage_path, &jpeg)
            .await
            .with_context(|| format!("failed to write {}", storage_path.display()))?;

        // Record what actually landed on disk, not the in-memory metadata.
        let (width, height) = image::image_dimensions(&storage_path)
            .context("failed to read back stored image dimensions")?;
        let bytes = tokio::fs::metadata(&storage_path)
            .await
            .context("failed to stat stored image")?
            .len();

        Ok(ImageAsset {
            url: format!("{}/{filename}", self.public_base_url),
            filename,
            width,
            height,
            bytes,
            mime: "image/jpeg".to_string(),
            storage_path: storage_path.to_string_lossy().into_owned(),
            alt: alt.to_string(),
        })
    }
}

/// Decode raw image bytes, downscale anything wider than
/// [`MAX_IMAGE_WIDTH`] preserving aspect ratio, and encode to JPEG at
/// [`JPEG_QUALITY`]. Never upscales.
fn transcode_to_jpeg(payload: &[u8]) -> Result<Vec<u8>> {
    let decoded = image::load_from_memory(payload).context("decode failed")?;
    let (width, height) = decoded.dimensions();

    let resized = if width > MAX_IMAGE_WIDTH {
        let new_height =
            ((u64::from(height) * u64::from(MAX_IMAGE_WIDTH)) / u64::from(width)).max(1) as u32;
        decoded.resize_exact(MAX_IMAGE_WIDTH, new_height, FilterType::Lanczos3)
    } else {
        decoded
    };

    // JPEG has no alpha channel
    let rgb = resized.into_rgb8();

    let mut encoded = Vec::new();
    JpegEncoder::new_with_quality(Cursor::new(&mut encoded), JPEG_QUALITY)
        .encode_image(&rgb)
        .context("encode failed")?;
    Ok(encoded)
}

/// Generate a unique filename for an asset. Source filenames are never
/// trusted or preserved.
fn generate_filename(name_prefix: &str) -> String {
    let prefix = sanitize_filename::sanitize(name_prefix);
    let prefix = if prefix.is_empty() { "asset" } else { &prefix };
    format!("{prefix}-{}.jpg", Uuid::new_v4().simple())
}
