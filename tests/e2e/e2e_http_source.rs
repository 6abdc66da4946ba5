//! End-to-end tests for the HTTP manifest source against a local server.

use std::io::Write;

use iiif_stage::{FetchError, FetchOptions, HttpSource, ManifestSource};
use serde_json::json;
use url::Url;

use crate::fixture::{ManifestServer, Route};

#[tokio::test]
async fn test_fetch_json_manifest() {
    let server = ManifestServer::start(vec![(
        "/manifest.json",
        Route::json(json!({ "items": [{ "id": "https://cdn/a.glb" }] })),
    )])
    .await;

    let source = HttpSource::new().unwrap();
    let value = source.fetch(&server.url("/manifest.json")).await.unwrap();
    assert_eq!(value["items"][0]["id"], "https://cdn/a.glb");
}

#[tokio::test]
async fn test_error_status_is_reported() {
    let server = ManifestServer::start(vec![("/gone.json", Route::raw(410, "{}"))]).await;
    let source = HttpSource::new().unwrap();

    assert_eq!(
        source.fetch(&server.url("/missing.json")).await,
        Err(FetchError::Status(404))
    );
    assert_eq!(
        source.fetch(&server.url("/gone.json")).await,
        Err(FetchError::Status(410))
    );
}

#[tokio::test]
async fn test_invalid_body_is_parse_error() {
    let server =
        ManifestServer::start(vec![("/broken.json", Route::raw(200, "<html>oops</html>"))]).await;
    let source = HttpSource::new().unwrap();

    assert!(matches!(
        source.fetch(&server.url("/broken.json")).await,
        Err(FetchError::Parse(_))
    ));
}

#[tokio::test]
async fn test_unreachable_host_is_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let source = HttpSource::new().unwrap();
    assert!(matches!(
        source.fetch(&format!("http://{}/manifest.json", addr)).await,
        Err(FetchError::Transport(_))
    ));
}

#[tokio::test]
async fn test_relative_location_uses_base_url() {
    let server = ManifestServer::start(vec![(
        "/objects/vase/manifest.json",
        Route::json(json!({ "id": "vase.gltf" })),
    )])
    .await;

    let base = Url::parse(&server.url("/objects/")).unwrap();
    let source = HttpSource::with_options(FetchOptions::default().with_base_url(base)).unwrap();
    let value = source.fetch("vase/manifest.json").await.unwrap();
    assert_eq!(value["id"], "vase.gltf");
}

#[tokio::test]
async fn test_file_manifest() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(br#"{"label":"on disk","items":[{"@id":"disk.glb"}]}"#)
        .unwrap();

    let source = HttpSource::new().unwrap();
    let url = Url::from_file_path(file.path()).unwrap();
    let value = source.fetch(url.as_str()).await.unwrap();
    assert_eq!(value["items"][0]["@id"], "disk.glb");
}
