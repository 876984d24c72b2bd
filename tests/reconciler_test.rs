//! End-to-end reconciliation tests: mock image server, real transcoder,
//! in-memory catalog store.
//!
//! These pin the pipeline's catalog invariants: idempotency by slug, gallery
//! caps counted in successes, hero selection, description fallback, the
//! empty-destination skip policy, and link resolution.

mod common;

use std::collections::HashMap;

use regatta_ingest::catalog::CatalogStore;
use regatta_ingest::extractor::{ExtractedPage, ImageCandidate};
use regatta_ingest::reconciler::{Outcome, Reconciler, SkipReason};
use regatta_ingest::sources::{DestinationTarget, YachtCategory, YachtSourceRecord, YachtSpecs};
use regatta_ingest::MediaTranscoder;

const YACHT_CAP: usize = 15;
const DESTINATION_CAP: usize = 8;

struct Fixture {
    store: CatalogStore,
    transcoder: MediaTranscoder,
    _media_dir: tempfile::TempDir,
    server: mockito::ServerGuard,
}

impl Fixture {
    async fn new() -> Self {
        let mut server = mockito::Server::new_async().await;
        // Any /ok/ path serves a real image; any /placeholder/ path serves a
        // sub-floor payload that the transcoder must reject.
        server
            .mock("GET", mockito::Matcher::Regex(r"^/ok/.*$".to_string()))
            .with_header("content-type", "image/png")
            .with_body(common::noise_png(640, 480))
            .expect_at_least(0)
            .create_async()
            .await;
        server
            .mock("GET", mockito::Matcher::Regex(r"^/placeholder/.*$".to_string()))
            .with_header("content-type", "image/png")
            .with_body(common::placeholder_png())
            .expect_at_least(0)
            .create_async()
            .await;

        let media_dir = tempfile::tempdir().unwrap();
        let transcoder =
            MediaTranscoder::new(media_dir.path(), "https://cdn.example.com", "").unwrap();
        let store = CatalogStore::open_in_memory().await.unwrap();
        Self {
            store,
            transcoder,
            _media_dir: media_dir,
            server,
        }
    }

    fn reconciler(&self) -> Reconciler<'_> {
        Reconciler::new(&self.store, &self.transcoder, YACHT_CAP, DESTINATION_CAP)
    }

    fn ok_candidate(&self, n: usize) -> ImageCandidate {
        ImageCandidate {
            url: format!("{}/ok/{n}.png", self.server.url()),
            alt: format!("photo {n}"),
        }
    }

    fn placeholder_candidate(&self, n: usize) -> ImageCandidate {
        ImageCandidate {
            url: format!("{}/placeholder/{n}.png", self.server.url()),
            alt: String::new(),
        }
    }
}

fn yacht_record(slug: &str) -> YachtSourceRecord {
    YachtSourceRecord {
        name: "Aurora".to_string(),
        slug: slug.to_string(),
        category: YachtCategory::Motor,
        url: format!("https://source.example.com/yachts/{slug}"),
        images: Vec::new(),
        specs: YachtSpecs {
            length_m: Some(32.0),
            cabins: Some(5),
            ..YachtSpecs::default()
        },
        destinations: Vec::new(),
        hero_video: None,
        price: None,
    }
}

fn destination_target(slug: &str) -> DestinationTarget {
    DestinationTarget::from_url(&format!("https://source.example.com/destinations/{slug}/"))
        .unwrap()
}

fn long_paragraph() -> String {
    "Sheltered channels, medieval harbor towns, and over a thousand islands make \
     this one of the most forgiving cruising grounds in the Mediterranean."
        .to_string()
}

#[tokio::test]
async fn yacht_gallery_cap_counts_successes_only() {
    let fixture = Fixture::new().await;

    // 20 candidates, 3 of them fail the size filter: min(15, 17) = 15 persist
    let mut candidates = Vec::new();
    for n in 0..20 {
        if [3, 7, 11].contains(&n) {
            candidates.push(fixture.placeholder_candidate(n));
        } else {
            candidates.push(fixture.ok_candidate(n));
        }
    }

    let (outcome, _) = fixture
        .reconciler()
        .reconcile_yacht(&yacht_record("aurora"), &candidates, &HashMap::new())
        .await
        .unwrap();
    assert!(matches!(outcome, Outcome::Created { .. }));

    assert_eq!(fixture.store.image_asset_count().await.unwrap(), 15);

    let (hero, gallery) = fixture.store.yacht_media("aurora").await.unwrap().unwrap();
    assert_eq!(gallery.len(), 15);
    // Hero is the first successful candidate
    assert_eq!(hero.as_deref(), Some(gallery[0].url.as_str()));
    assert_eq!(gallery[0].alt, "photo 0");
}

#[tokio::test]
async fn rerun_skips_existing_slug_and_writes_nothing() {
    let fixture = Fixture::new().await;
    let candidates = vec![fixture.ok_candidate(0), fixture.ok_candidate(1)];

    let (first, _) = fixture
        .reconciler()
        .reconcile_yacht(&yacht_record("aurora"), &candidates, &HashMap::new())
        .await
        .unwrap();
    assert!(matches!(first, Outcome::Created { .. }));
    let assets_after_first = fixture.store.image_asset_count().await.unwrap();

    let (second, links) = fixture
        .reconciler()
        .reconcile_yacht(&yacht_record("aurora"), &candidates, &HashMap::new())
        .await
        .unwrap();
    assert_eq!(second, Outcome::Skipped(SkipReason::AlreadyExists));
    assert_eq!(links, 0);
    // Zero new rows, zero new assets
    assert_eq!(fixture.store.image_asset_count().await.unwrap(), assets_after_first);
}

#[tokio::test]
async fn yacht_without_images_is_created_text_only() {
    let fixture = Fixture::new().await;

    let (outcome, _) = fixture
        .reconciler()
        .reconcile_yacht(&yacht_record("aurora"), &[], &HashMap::new())
        .await
        .unwrap();
    assert!(matches!(outcome, Outcome::Created { .. }));

    let (hero, gallery) = fixture.store.yacht_media("aurora").await.unwrap().unwrap();
    assert!(hero.is_none());
    assert!(gallery.is_empty());
}

#[tokio::test]
async fn hero_slot_stays_empty_for_video_led_listings() {
    let fixture = Fixture::new().await;
    let mut record = yacht_record("aurora");
    record.hero_video = Some("https://source.example.com/videos/aurora.mp4".to_string());

    let candidates = vec![fixture.ok_candidate(0)];
    fixture
        .reconciler()
        .reconcile_yacht(&record, &candidates, &HashMap::new())
        .await
        .unwrap();

    let (hero, gallery) = fixture.store.yacht_media("aurora").await.unwrap().unwrap();
    assert!(hero.is_none());
    assert_eq!(gallery.len(), 1);
}

#[tokio::test]
async fn recognized_destination_references_become_links() {
    let fixture = Fixture::new().await;
    let reconciler = fixture.reconciler();

    let extracted = ExtractedPage {
        name: Some("Greek Islands".to_string()),
        paragraphs: vec![long_paragraph()],
        image_candidates: vec![fixture.ok_candidate(0)],
    };
    let created = reconciler
        .reconcile_destination(&destination_target("greek-islands"), &extracted)
        .await
        .unwrap();
    let Outcome::Created { id: destination_id } = created else {
        panic!("destination should be created");
    };

    let mut record = yacht_record("aurora");
    record.destinations = vec!["Greece".to_string(), "Patagonia".to_string()];
    let map = HashMap::from([("greek-islands".to_string(), destination_id)]);

    let (outcome, links) = reconciler
        .reconcile_yacht(&record, &[], &map)
        .await
        .unwrap();
    let Outcome::Created { id: yacht_id } = outcome else {
        panic!("yacht should be created");
    };
    // "Greece" resolves, "Patagonia" is dropped
    assert_eq!(links, 1);
    assert_eq!(fixture.store.link_count_for_yacht(yacht_id).await.unwrap(), 1);
}

#[tokio::test]
async fn empty_destination_is_skipped_not_created() {
    let fixture = Fixture::new().await;

    let outcome = fixture
        .reconciler()
        .reconcile_destination(&destination_target("croatia"), &ExtractedPage::default())
        .await
        .unwrap();
    assert_eq!(outcome, Outcome::Skipped(SkipReason::NothingExtracted));
    assert!(
        fixture
            .store
            .destination_id_by_slug("croatia")
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn short_description_without_curated_fallback_gets_generic_sentence() {
    let fixture = Fixture::new().await;

    let extracted = ExtractedPage {
        name: Some("Hidden Bay".to_string()),
        // Real but too short to store verbatim
        paragraphs: vec!["A quiet bay with a handful of moorings.".to_string()],
        image_candidates: vec![fixture.ok_candidate(0)],
    };
    fixture
        .reconciler()
        .reconcile_destination(&destination_target("hidden-bay"), &extracted)
        .await
        .unwrap();

    let description = fixture
        .store
        .destination_description("hidden-bay")
        .await
        .unwrap()
        .unwrap();
    assert!(description.contains("Hidden Bay"));
    assert_ne!(description, "A quiet bay with a handful of moorings.");
}

#[tokio::test]
async fn short_description_with_curated_fallback_uses_it() {
    let fixture = Fixture::new().await;

    let extracted = ExtractedPage {
        name: Some("Croatia".to_string()),
        paragraphs: Vec::new(),
        image_candidates: vec![fixture.ok_candidate(0)],
    };
    fixture
        .reconciler()
        .reconcile_destination(&destination_target("croatia"), &extracted)
        .await
        .unwrap();

    let description = fixture
        .store
        .destination_description("croatia")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(
        description,
        regatta_ingest::reconciler::fallbacks::curated_description("croatia").unwrap()
    );
}

#[tokio::test]
async fn fix_missing_pass_backfills_only_empty_galleries() {
    let fixture = Fixture::new().await;
    let reconciler = fixture.reconciler();

    // Created without any images
    reconciler
        .reconcile_yacht(&yacht_record("aurora"), &[], &HashMap::new())
        .await
        .unwrap();

    let candidates = vec![fixture.ok_candidate(0), fixture.ok_candidate(1)];
    assert!(
        reconciler
            .fix_missing_yacht_media(&yacht_record("aurora"), &candidates)
            .await
            .unwrap()
    );
    let (hero, gallery) = fixture.store.yacht_media("aurora").await.unwrap().unwrap();
    assert_eq!(gallery.len(), 2);
    assert!(hero.is_some());

    // Second fix pass is a no-op: the gallery is populated now
    assert!(
        !reconciler
            .fix_missing_yacht_media(&yacht_record("aurora"), &candidates)
            .await
            .unwrap()
    );
    assert_eq!(fixture.store.image_asset_count().await.unwrap(), 2);
}
