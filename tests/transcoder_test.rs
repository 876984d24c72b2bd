//! Media transcoder integration tests against a mock HTTP server.
//!
//! The transcoder's failure policy is "skip and return None"; these tests
//! pin each rejection reason plus the happy path, including the contract
//! that recorded metadata reflects the file actually written to disk.

mod common;

use regatta_ingest::MediaTranscoder;

const BASE_URL: &str = "https://media.example.com";

fn transcoder(dir: &tempfile::TempDir) -> MediaTranscoder {
    MediaTranscoder::new(dir.path(), BASE_URL, "https://source.example.com/").unwrap()
}

#[tokio::test]
async fn wide_image_is_downscaled_and_persisted() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/photos/bow.png")
        .with_header("content-type", "image/png")
        .with_body(common::noise_png(3200, 1600))
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let asset = transcoder(&dir)
        .ingest(&format!("{}/photos/bow.png", server.url()), "aurora", "Bow view")
        .await
        .expect("valid image should be ingested");

    // Downscaled to the max width, aspect preserved
    assert_eq!(asset.width, 1600);
    assert_eq!(asset.height, 800);
    assert_eq!(asset.mime, "image/jpeg");
    assert_eq!(asset.alt, "Bow view");
    assert!(asset.filename.starts_with("aurora-"));
    assert!(asset.filename.ends_with(".jpg"));
    assert_eq!(asset.url, format!("{BASE_URL}/{}", asset.filename));

    // Metadata matches what landed on disk
    let on_disk = std::fs::metadata(&asset.storage_path).unwrap();
    assert_eq!(asset.bytes, on_disk.len());
    let (w, h) = image::image_dimensions(&asset.storage_path).unwrap();
    assert_eq!((w, h), (asset.width, asset.height));
}

#[tokio::test]
async fn small_image_keeps_its_dimensions() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/photos/cabin.png")
        .with_header("content-type", "image/png")
        .with_body(common::noise_png(800, 600))
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let asset = transcoder(&dir)
        .ingest(&format!("{}/photos/cabin.png", server.url()), "aurora", "")
        .await
        .unwrap();

    assert_eq!((asset.width, asset.height), (800, 600));
}

#[tokio::test]
async fn configured_referer_is_sent_on_fetches() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/photos/stern.png")
        .match_header("referer", "https://source.example.com/")
        .with_header("content-type", "image/png")
        .with_body(common::noise_png(640, 480))
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let asset = transcoder(&dir)
        .ingest(&format!("{}/photos/stern.png", server.url()), "aurora", "")
        .await;

    assert!(asset.is_some());
}

#[tokio::test]
async fn empty_referer_sends_no_header() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/photos/stern.png")
        .match_header("referer", mockito::Matcher::Missing)
        .with_header("content-type", "image/png")
        .with_body(common::noise_png(640, 480))
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let asset = MediaTranscoder::new(dir.path(), BASE_URL, "")
        .unwrap()
        .ingest(&format!("{}/photos/stern.png", server.url()), "aurora", "")
        .await;

    assert!(asset.is_some());
}

#[tokio::test]
async fn undersized_payload_is_skipped() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/photos/pixel.png")
        .with_header("content-type", "image/png")
        .with_body(common::placeholder_png())
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let asset = transcoder(&dir)
        .ingest(&format!("{}/photos/pixel.png", server.url()), "aurora", "")
        .await;

    assert!(asset.is_none());
    // Nothing persisted either
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn non_image_content_type_is_skipped() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/photos/bow.png")
        .with_header("content-type", "text/html")
        .with_body("<html>hotlink blocked</html>")
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let asset = transcoder(&dir)
        .ingest(&format!("{}/photos/bow.png", server.url()), "aurora", "")
        .await;

    assert!(asset.is_none());
}

#[tokio::test]
async fn error_status_is_skipped() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/photos/gone.png")
        .with_status(404)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let asset = transcoder(&dir)
        .ingest(&format!("{}/photos/gone.png", server.url()), "aurora", "")
        .await;

    assert!(asset.is_none());
}

#[tokio::test]
async fn undecodable_image_body_is_skipped() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/photos/corrupt.png")
        .with_header("content-type", "image/png")
        .with_body(vec![0u8; 8192])
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let asset = transcoder(&dir)
        .ingest(&format!("{}/photos/corrupt.png", server.url()), "aurora", "")
        .await;

    assert!(asset.is_none());
}
