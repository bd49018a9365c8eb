//! Per-screen hotspot source files.
//!
//! A directory of `<screenId>.json` files, each `{ "hotspots": [...] }`, is
//! merged into the hotspot map. Missing `action` defaults to `"navigate"`
//! and missing `target` to `"dashboard"`.
//!
//! ```text
//! ┌──────────────┐   notify    ┌──────────────────┐  SyncEvent  ┌────────────┐
//! │ screens dir  │ ──────────► │ StabilityDebounce│ ──────────► │ controller │
//! └──────────────┘             │      (2s)        │             └────────────┘
//!                              └──────────────────┘
//! ```

mod debouncer;
mod watcher;

pub use debouncer::{ChangeKind, StabilityDebouncer, STABILITY_WINDOW};
pub use watcher::{spawn_hotspot_watcher, HotspotWatcher, SyncEvent};

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

use crate::models::{Hotspot, HotspotMap};
use crate::traits::{HOTSPOTS_ASSET, SCREENS_ASSET, WORKFLOWS_ASSET};

/// Action given to merged hotspots that have none.
pub const DEFAULT_SYNC_ACTION: &str = "navigate";
/// Target given to merged hotspots that have none.
pub const DEFAULT_SYNC_TARGET: &str = "dashboard";

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid hotspot file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("file watcher failed: {0}")]
    Watch(#[from] notify::Error),
}

#[derive(Debug, Deserialize)]
struct ScreenHotspotFile {
    #[serde(default)]
    hotspots: Vec<Hotspot>,
}

/// Screen id for a hotspot source file, `None` for anything that is not
/// one (dotfiles, non-JSON, the three startup documents).
pub fn screen_id_for(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_str()?;
    if name.starts_with('.')
        || [SCREENS_ASSET, HOTSPOTS_ASSET, WORKFLOWS_ASSET].contains(&name)
    {
        return None;
    }
    if path.extension()?.to_str()? != "json" {
        return None;
    }
    path.file_stem()?.to_str().map(str::to_string)
}

/// Fill in the default action and target.
pub fn apply_defaults(mut hotspot: Hotspot) -> Hotspot {
    if hotspot.action.is_empty() {
        hotspot.action = DEFAULT_SYNC_ACTION.to_string();
    }
    if hotspot.target.as_deref().map_or(true, str::is_empty) {
        hotspot.target = Some(DEFAULT_SYNC_TARGET.to_string());
    }
    hotspot
}

/// Parse the contents of one source file.
pub fn parse_screen_file(path: &Path, text: &str) -> Result<Vec<Hotspot>, SyncError> {
    let file: ScreenHotspotFile =
        serde_json::from_str(text).map_err(|source| SyncError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(file.hotspots.into_iter().map(apply_defaults).collect())
}

/// Read and parse one source file.
pub fn read_screen_file(path: &Path) -> Result<Vec<Hotspot>, SyncError> {
    let text = std::fs::read_to_string(path).map_err(|source| SyncError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_screen_file(path, &text)
}

/// Merge every source file under `dir` into `map`, replacing the lists of
/// the screens they name. Unreadable files are logged and skipped. Returns
/// the merged screen ids in file-name order.
pub fn merge_directory(dir: &Path, map: &mut HotspotMap) -> Result<Vec<String>, SyncError> {
    let entries = std::fs::read_dir(dir).map_err(|source| SyncError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files: Vec<(String, PathBuf)> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter_map(|path| screen_id_for(&path).map(|id| (id, path)))
        .collect();
    files.sort();

    let mut merged = Vec::new();
    for (screen_id, path) in files {
        match read_screen_file(&path) {
            Ok(hotspots) => {
                info!("Merged {} hotspots for {}", hotspots.len(), screen_id);
                map.insert(screen_id.clone(), hotspots);
                merged.push(screen_id);
            }
            Err(e) => warn!("Skipping hotspot file: {}", e),
        }
    }
    Ok(merged)
}
