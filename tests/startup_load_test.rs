//! Loading a prototype from a directory or an HTTP server.

mod common;

use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{png_bytes, prototype_assets, write_prototype_dir};
use tapcanvas::adapters::{loader_for, FsAssetLoader, HttpAssetLoader};
use tapcanvas::app::{App, AppMessage, LoadState};
use tapcanvas::error::LoadError;
use tapcanvas::models::{ScreenType, DEFAULT_PINNED_HEADER};
use tapcanvas::startup::{load_prototype, AppConfig};
use tapcanvas::traits::{AssetLoader, HOTSPOTS_ASSET, SCREENS_ASSET, WORKFLOWS_ASSET};

const UNTYPED_SCREENS: &str = r#"[
  { "id": "login", "src": "images/login.png" },
  { "id": "feed", "src": "images/feed.png" },
  { "id": "broken", "src": "images/missing.png" }
]"#;

fn untyped_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    write_prototype_dir(dir.path());
    std::fs::write(dir.path().join(SCREENS_ASSET), UNTYPED_SCREENS).unwrap();
    std::fs::create_dir(dir.path().join("images")).unwrap();
    std::fs::write(dir.path().join("images/login.png"), png_bytes(60, 90)).unwrap();
    std::fs::write(dir.path().join("images/feed.png"), png_bytes(30, 120)).unwrap();
    dir
}

#[tokio::test]
async fn test_directory_load_infers_screen_types() {
    let dir = untyped_dir();
    let loader: Arc<dyn AssetLoader> = Arc::new(FsAssetLoader::new(dir.path()));

    let prototype = load_prototype(loader, &AppConfig::default()).await.unwrap();

    let types: Vec<_> = prototype.screens.iter().map(|s| s.screen_type).collect();
    assert_eq!(
        types,
        vec![
            Some(ScreenType::Static),
            Some(ScreenType::Scrollable),
            Some(ScreenType::Static)
        ]
    );
    assert_eq!(
        prototype.screens[1].pinned_header_height.as_deref(),
        Some(DEFAULT_PINNED_HEADER)
    );
    assert_eq!(prototype.hotspots["login"].len(), 3);
}

#[tokio::test]
async fn test_missing_document_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    write_prototype_dir(dir.path());
    std::fs::remove_file(dir.path().join(WORKFLOWS_ASSET)).unwrap();

    let loader: Arc<dyn AssetLoader> = Arc::new(FsAssetLoader::new(dir.path()));
    let err = load_prototype(loader, &AppConfig::default()).await.unwrap_err();
    assert_eq!(
        err,
        LoadError::NotFound {
            asset: WORKFLOWS_ASSET.to_string()
        }
    );
}

#[tokio::test]
async fn test_hotspot_dir_replaces_screen_lists() {
    let source = tempfile::tempdir().unwrap();
    std::fs::write(
        source.path().join("home.json"),
        r#"{ "hotspots": [ { "id": "cta", "x": "5%", "y": "5%", "width": "20%", "height": "5%" } ] }"#,
    )
    .unwrap();
    std::fs::write(source.path().join("notes.txt"), "ignored").unwrap();
    std::fs::write(source.path().join("broken.json"), "{").unwrap();

    let config = AppConfig::default().with_hotspot_dir(source.path());
    let prototype = load_prototype(Arc::new(prototype_assets()), &config)
        .await
        .unwrap();

    assert_eq!(prototype.merged_screens, vec!["home".to_string()]);
    let home = &prototype.hotspots["home"];
    assert_eq!(home.len(), 1);
    assert_eq!(home[0].action, "navigate");
    assert_eq!(home[0].target.as_deref(), Some("dashboard"));
    // Screens without a source file keep their lists.
    assert_eq!(prototype.hotspots["login"].len(), 3);
}

#[tokio::test]
async fn test_missing_hotspot_dir_is_not_fatal() {
    let config = AppConfig::default().with_hotspot_dir("/nonexistent/tapcanvas/hotspots");
    let prototype = load_prototype(Arc::new(prototype_assets()), &config)
        .await
        .unwrap();
    assert!(prototype.merged_screens.is_empty());
}

#[tokio::test]
async fn test_http_loader_fetches_documents() {
    let server = MockServer::start().await;
    for (name, body) in [
        (SCREENS_ASSET, common::SCREENS_JSON),
        (HOTSPOTS_ASSET, common::HOTSPOTS_JSON),
        (WORKFLOWS_ASSET, common::WORKFLOWS_JSON),
    ] {
        Mock::given(method("GET"))
            .and(path(format!("/proto/{}", name)))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(&server)
            .await;
    }

    let loader = loader_for(&format!("{}/proto/", server.uri())).unwrap();
    assert!(loader.describe().ends_with("/proto"));
    let prototype = load_prototype(loader, &AppConfig::default()).await.unwrap();
    assert_eq!(prototype.screens.len(), 3);
    assert_eq!(prototype.workflow.initial_screen(), "login");
}

#[tokio::test]
async fn test_http_status_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/screens.json"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let loader = HttpAssetLoader::new(&server.uri()).unwrap();
    assert_eq!(
        loader.load_text(SCREENS_ASSET).await.unwrap_err(),
        LoadError::HttpStatus {
            asset: SCREENS_ASSET.to_string(),
            status: 503
        }
    );
    assert_eq!(
        loader.load_text(HOTSPOTS_ASSET).await.unwrap_err(),
        LoadError::NotFound {
            asset: HOTSPOTS_ASSET.to_string()
        }
    );
}

#[test]
fn test_http_loader_rejects_other_schemes() {
    assert!(HttpAssetLoader::new("ftp://example.com").is_err());
}

#[tokio::test]
async fn test_background_load_reaches_app() {
    let mut app = App::new(AppConfig::default());
    let mut rx = app.message_rx.take().unwrap();
    app.start_loading(Arc::new(prototype_assets()));

    let message = tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .unwrap()
        .unwrap();
    assert!(matches!(message, AppMessage::Loaded(_)));
    app.handle_message(message);

    assert_eq!(app.load_state, LoadState::Ready);
    assert_eq!(app.navigator.current_screen_id(), Some("login"));
}

#[tokio::test]
async fn test_background_load_failure_reaches_app() {
    let assets = prototype_assets();
    assets.set_should_fail(true);
    let mut app = App::new(AppConfig::default());
    let mut rx = app.message_rx.take().unwrap();
    app.start_loading(Arc::new(assets));

    let message = tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .unwrap()
        .unwrap();
    app.handle_message(message);

    assert_eq!(app.load_state, LoadState::Failed);
    assert!(matches!(
        app.notices.banner(),
        Some(LoadError::Unreachable { .. })
    ));
}
