//! Startup load of the three prototype documents.

use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

use super::config::AppConfig;
use crate::error::LoadError;
use crate::hotspot_sync::merge_directory;
use crate::models::{HotspotMap, Screen, Workflow};
use crate::navigator::infer_screen_types;
use crate::store::parse_hotspots;
use crate::traits::{AssetLoader, HOTSPOTS_ASSET, SCREENS_ASSET, WORKFLOWS_ASSET};

/// Everything the session needs before the first frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Prototype {
    pub screens: Vec<Screen>,
    pub hotspots: HotspotMap,
    pub workflow: Workflow,
    /// Screen ids merged from the hotspot source directory
    pub merged_screens: Vec<String>,
}

fn malformed(asset: &str, err: serde_json::Error) -> LoadError {
    LoadError::Malformed {
        asset: asset.to_string(),
        message: err.to_string(),
    }
}

pub async fn load_screens(loader: &dyn AssetLoader) -> Result<Vec<Screen>, LoadError> {
    let text = loader.load_text(SCREENS_ASSET).await?;
    serde_json::from_str(&text).map_err(|e| malformed(SCREENS_ASSET, e))
}

pub async fn load_hotspots(loader: &dyn AssetLoader) -> Result<HotspotMap, LoadError> {
    let text = loader.load_text(HOTSPOTS_ASSET).await?;
    parse_hotspots(&text, HOTSPOTS_ASSET)
}

pub async fn load_workflow(loader: &dyn AssetLoader) -> Result<Workflow, LoadError> {
    let text = loader.load_text(WORKFLOWS_ASSET).await?;
    serde_json::from_str(&text).map_err(|e| malformed(WORKFLOWS_ASSET, e))
}

/// Merge the hotspot source directory on the blocking pool.
///
/// A failed merge leaves the loaded map as it was.
async fn merge_off_runtime(dir: PathBuf, hotspots: HotspotMap) -> (HotspotMap, Vec<String>) {
    let fallback = hotspots.clone();
    let joined = tokio::task::spawn_blocking(move || {
        let mut hotspots = hotspots;
        let merged = merge_directory(&dir, &mut hotspots);
        (hotspots, merged)
    })
    .await;

    match joined {
        Ok((hotspots, Ok(merged))) => (hotspots, merged),
        Ok((hotspots, Err(e))) => {
            warn!("Hotspot directory not merged: {}", e);
            (hotspots, Vec::new())
        }
        Err(e) => {
            warn!("Hotspot directory merge did not finish: {}", e);
            (fallback, Vec::new())
        }
    }
}

/// Load the three documents together, merge the hotspot source directory
/// if one is configured, then infer missing screen types.
///
/// The first failing document aborts the load. Inference never fails.
pub async fn load_prototype(
    loader: Arc<dyn AssetLoader>,
    config: &AppConfig,
) -> Result<Prototype, LoadError> {
    info!("Loading prototype from {}", loader.describe());
    let (screens, hotspots, workflow) = tokio::try_join!(
        load_screens(loader.as_ref()),
        load_hotspots(loader.as_ref()),
        load_workflow(loader.as_ref()),
    )?;

    let (hotspots, merged_screens) = match config.hotspot_dir.clone() {
        Some(dir) => merge_off_runtime(dir, hotspots).await,
        None => (hotspots, Vec::new()),
    };

    let screens = infer_screen_types(screens, Arc::clone(&loader), config.probe_timeout).await;
    info!(
        "Prototype ready: {} screens, {} workflow steps",
        screens.len(),
        workflow.screens.len()
    );
    Ok(Prototype {
        screens,
        hotspots,
        workflow,
        merged_screens,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryAssets;
    use crate::models::ScreenType;

    fn assets() -> InMemoryAssets {
        InMemoryAssets::new()
            .with_text(
                SCREENS_ASSET,
                r#"[{"id":"login","src":"login.png","type":"static"}]"#,
            )
            .with_text(HOTSPOTS_ASSET, r#"{"screens":{"login":[]}}"#)
            .with_text(WORKFLOWS_ASSET, r#"{"initialScreen":"login","screens":{}}"#)
    }

    #[tokio::test]
    async fn test_load_all_documents() {
        let prototype = load_prototype(Arc::new(assets()), &AppConfig::default())
            .await
            .unwrap();
        assert_eq!(prototype.screens.len(), 1);
        assert_eq!(prototype.screens[0].screen_type, Some(ScreenType::Static));
        assert!(prototype.hotspots.contains_key("login"));
        assert_eq!(prototype.workflow.initial_screen(), "login");
    }

    #[tokio::test]
    async fn test_malformed_screens() {
        let assets = assets().with_text(SCREENS_ASSET, "{");
        let err = load_prototype(Arc::new(assets), &AppConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(err, LoadError::Malformed { ref asset, .. } if asset == SCREENS_ASSET));
    }

    #[tokio::test]
    async fn test_unreachable_source() {
        let assets = assets();
        assets.set_should_fail(true);
        let err = load_prototype(Arc::new(assets), &AppConfig::default())
            .await
            .unwrap_err();
        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn test_merge_runs_off_runtime() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("login.json"),
            r#"{"hotspots":[{"id":"cta","x":"1%","y":"1%","width":"5%","height":"5%"}]}"#,
        )
        .unwrap();

        let (hotspots, merged) =
            merge_off_runtime(dir.path().to_path_buf(), HotspotMap::new()).await;
        assert_eq!(merged, vec!["login".to_string()]);
        assert_eq!(hotspots["login"][0].id, "cta");
    }

    #[tokio::test]
    async fn test_failed_merge_keeps_loaded_map() {
        let mut loaded = HotspotMap::new();
        loaded.insert("home".to_string(), Vec::new());

        let (hotspots, merged) =
            merge_off_runtime(PathBuf::from("/nonexistent/tapcanvas/merge"), loaded.clone()).await;
        assert!(merged.is_empty());
        assert_eq!(hotspots, loaded);
    }
}
