//! End-to-end stage resolution over real HTTP.

use std::sync::Arc;
use std::time::Duration;

use iiif_stage::{
    HttpSource, ManifestReference, PresentationState, Resolution, StageController, StageOptions,
    StageView,
};
use serde_json::json;

use crate::fixture::{ManifestServer, Route};

fn stage() -> StageController<HttpSource> {
    StageController::new(HttpSource::new().unwrap(), StageOptions::default())
}

/// A IIIF Presentation 3 manifest with the model nested in an annotation body.
fn iiif_manifest(model_id: &str) -> serde_json::Value {
    json!({
        "@context": "http://iiif.io/api/presentation/3/context.json",
        "id": "https://example.org/iiif/vase/manifest",
        "type": "Manifest",
        "label": { "en": ["Vase"] },
        "thumbnail": [{ "id": "https://example.org/vase.png", "format": "image/png" }],
        "items": [{
            "id": "https://example.org/iiif/vase/scene/1",
            "type": "Scene",
            "items": [{
                "type": "AnnotationPage",
                "items": [{
                    "type": "Annotation",
                    "motivation": ["painting"],
                    "body": {
                        "id": model_id,
                        "type": "Model",
                        "format": "model/gltf-binary"
                    }
                }]
            }]
        }]
    })
}

#[tokio::test]
async fn test_fetched_iiif_manifest_becomes_ready() {
    let server = ManifestServer::start(vec![(
        "/vase.json",
        Route::json(iiif_manifest("https://example.org/models/vase")),
    )])
    .await;
    let stage = stage();

    let state = stage.present(server.url("/vase.json")).await;
    assert_eq!(state.model().unwrap(), "https://example.org/models/vase");

    let view = stage.view();
    assert!(view.is_overlaid());
    assert_eq!(view.props().unwrap().env_preset, "studio");

    assert!(stage.mark_asset_loaded(stage.snapshot().generation));
    assert!(!stage.view().is_overlaid());
}

#[tokio::test]
async fn test_missing_manifest_is_error() {
    let server = ManifestServer::start(vec![]).await;
    let stage = stage();

    let state = stage.present(server.url("/manifest.json")).await;
    assert_eq!(state, PresentationState::Error("failed to load manifest".into()));
    assert_eq!(
        stage.view(),
        StageView::Error {
            message: "failed to load manifest".into()
        }
    );
}

#[tokio::test]
async fn test_direct_model_location_is_not_fetched() {
    let server = ManifestServer::start(vec![]).await;
    let stage = stage();

    let state = stage.present(server.url("/model.glb")).await;
    assert_eq!(state.model().unwrap().as_str(), server.url("/model.glb"));
    assert_eq!(server.hits(), 0);
}

#[tokio::test]
async fn test_unparseable_manifest_is_error() {
    let server = ManifestServer::start(vec![("/m.json", Route::raw(200, "not json"))]).await;
    let stage = stage();

    assert_eq!(
        stage.present(server.url("/m.json")).await,
        PresentationState::Error("unable to parse manifest".into())
    );
}

#[tokio::test]
async fn test_slow_manifest_superseded_by_newer_one() {
    let server = ManifestServer::start(vec![
        (
            "/slow.json",
            Route::json(iiif_manifest("https://example.org/slow.glb"))
                .delayed(Duration::from_millis(300)),
        ),
        ("/fast.json", Route::json(iiif_manifest("https://example.org/fast.glb"))),
    ])
    .await;
    let stage = Arc::new(stage());

    let slow = stage
        .observe(ManifestReference::location(server.url("/slow.json")))
        .unwrap();
    let pending = tokio::spawn({
        let stage = Arc::clone(&stage);
        async move { stage.resolve(slow).await }
    });

    while server.hits() == 0 {
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    let state = stage.present(server.url("/fast.json")).await;
    assert_eq!(state.model().unwrap(), "https://example.org/fast.glb");

    assert_eq!(pending.await.unwrap(), Resolution::Superseded);
    assert_eq!(
        stage.state().model().unwrap(),
        "https://example.org/fast.glb"
    );
}
