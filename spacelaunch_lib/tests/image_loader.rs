use std::io::Cursor;
use std::sync::Arc;
use std::time::Duration;

use image::{ImageBuffer, ImageFormat, Rgb};
use spacelaunch_lib::cache::MemoryCache;
use spacelaunch_lib::{ImageLoader, SpaceLaunchError, ThumbnailSize, ThumbnailSlot, THUMBNAIL_SIZE};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn patch_png() -> Vec<u8> {
    let img = ImageBuffer::from_pixel(200, 100, Rgb([12u8, 34, 56]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png).unwrap();
    out.into_inner()
}

fn loader() -> ImageLoader {
    ImageLoader::new(MemoryCache::new(Duration::from_secs(60))).unwrap()
}

#[tokio::test]
async fn loads_and_downsamples_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/patch.png"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "image/png")
                .set_body_bytes(patch_png()),
        )
        .expect(1)
        .mount(&server)
        .await;

    let loader = loader();
    let url = format!("{}/patch.png", server.uri());
    let first = loader.load(&url, THUMBNAIL_SIZE).await.unwrap();
    let second = loader.load(&url, THUMBNAIL_SIZE).await.unwrap();
    assert!(Arc::ptr_eq(&first.png, &second.png));

    let decoded = image::load_from_memory(&first.png).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (40, 40));
}

#[tokio::test]
async fn sizes_are_cached_separately() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/patch.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(patch_png()))
        .expect(2)
        .mount(&server)
        .await;

    let loader = loader();
    let url = format!("{}/patch.png", server.uri());
    let big = ThumbnailSize {
        width: 80,
        height: 60,
    };
    loader.load(&url, THUMBNAIL_SIZE).await.unwrap();
    let thumb = loader.load(&url, big).await.unwrap();
    let decoded = image::load_from_memory(&thumb.png).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (80, 60));
}

#[tokio::test]
async fn missing_image_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/gone.png"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let result = loader()
        .load(&format!("{}/gone.png", server.uri()), THUMBNAIL_SIZE)
        .await;
    assert!(matches!(result, Err(SpaceLaunchError::Image(_))));
}

#[tokio::test]
async fn slot_reused_mid_load_shows_new_image_only() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(patch_png()))
        .mount(&server)
        .await;

    let loader = loader();
    let mut slot = ThumbnailSlot::new();
    let old = slot
        .prepare(Some(&format!("{}/old.png", server.uri())), THUMBNAIL_SIZE)
        .unwrap();
    let new = slot
        .prepare(Some(&format!("{}/new.png", server.uri())), THUMBNAIL_SIZE)
        .unwrap();

    let old_result = loader.load(&old.url, old.size).await;
    assert!(!slot.complete(&old, old_result));
    assert!(slot.shows_placeholder());

    let new_result = loader.load(&new.url, new.size).await;
    assert!(slot.complete(&new, new_result));
    assert_eq!(slot.url(), Some(new.url.as_str()));
}

#[tokio::test]
async fn oversized_image_is_rejected_before_decoding() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/huge.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0u8; 4096]))
        .mount(&server)
        .await;

    let result = loader()
        .with_max_bytes(1024)
        .load(&format!("{}/huge.png", server.uri()), THUMBNAIL_SIZE)
        .await;
    match result {
        Err(SpaceLaunchError::Image(msg)) => assert!(msg.contains("exceeds the 1024 byte limit")),
        other => panic!("expected size limit error, got {:?}", other),
    }
}
