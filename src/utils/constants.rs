//! Shared configuration constants for the ingestion pipeline
//!
//! Default values and tuning knobs used throughout the codebase to ensure
//! consistency and avoid magic numbers.

/// Politeness delay between source targets: 2 seconds
///
/// The pipeline is strictly sequential and this pause is applied between
/// consecutive targets scraped from the source site. This is a deliberate
/// rate-limiting choice toward the source, not a performance tunable.
pub const DEFAULT_POLITENESS_DELAY_MS: u64 = 2_000;

/// Minimum accepted image payload: 4 KiB
///
/// The source site serves 1x1 tracking pixels and broken-image placeholders
/// well under this floor. Anything smaller is treated as a placeholder and
/// skipped rather than persisted.
pub const MIN_IMAGE_BYTES: usize = 4_096;

/// Maximum stored image width in pixels
///
/// Images wider than this are downscaled preserving aspect ratio. Images at
/// or under this width are stored as-is (never upscaled).
pub const MAX_IMAGE_WIDTH: u32 = 1_600;

/// JPEG encode quality for transcoded assets
pub const JPEG_QUALITY: u8 = 82;

/// Maximum successfully transcoded images per yacht gallery
pub const YACHT_GALLERY_CAP: usize = 15;

/// Maximum successfully transcoded images per destination gallery
pub const DESTINATION_GALLERY_CAP: usize = 8;

/// Minimum rendered or natural width for an `<img>` outside a gallery
/// container to count as a content image candidate
pub const MIN_CANDIDATE_WIDTH_PX: f64 = 200.0;

/// Minimum length for a scraped paragraph to be kept as description text
pub const MIN_PARAGRAPH_CHARS: usize = 60;

/// Maximum paragraphs kept per extracted page
pub const MAX_DESCRIPTION_PARAGRAPHS: usize = 6;

/// Descriptions shorter than this are replaced by the curated or generic
/// fallback text
pub const MIN_DESCRIPTION_CHARS: usize = 80;

/// Interval between DOM mutation-count polls while waiting for a page to
/// settle
pub const QUIESCENCE_POLL_INTERVAL_MS: u64 = 250;

/// Consecutive unchanged mutation-count polls required to call a page settled
pub const QUIESCENCE_STABLE_POLLS: u32 = 3;

/// Upper bound on waiting for DOM quiescence before proceeding anyway
pub const QUIESCENCE_TIMEOUT_SECS: u64 = 10;

/// Settle delay after each scroll pass, giving lazy loaders time to fire
pub const SCROLL_SETTLE_MS: u64 = 800;

/// Browser user agent string, also sent on direct image fetches
///
/// The source site's hotlink protection rejects requests without a
/// browser-like User-Agent and a plausible Referer.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/132.0.6834.160 Safari/537.36";
