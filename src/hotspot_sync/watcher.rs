//! `notify` watcher feeding the stability debouncer.

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use super::debouncer::{ChangeKind, StabilityDebouncer};
use super::{parse_screen_file, screen_id_for, SyncError};
use crate::models::Hotspot;

/// Stable change to a hotspot source file.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncEvent {
    /// The file parsed; its list replaces the screen's list.
    Changed {
        screen_id: String,
        hotspots: Vec<Hotspot>,
    },
    /// The file is gone. The map keeps what it had.
    Removed { screen_id: String },
    /// The file could not be read or parsed.
    Failed { screen_id: String, message: String },
}

/// Keeps the OS watcher and the debounce task alive. Dropping it stops
/// watching.
pub struct HotspotWatcher {
    _watcher: RecommendedWatcher,
    task: tokio::task::JoinHandle<()>,
    dir: PathBuf,
}

impl std::fmt::Debug for HotspotWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HotspotWatcher")
            .field("dir", &self.dir)
            .finish_non_exhaustive()
    }
}

impl HotspotWatcher {
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Drop for HotspotWatcher {
    fn drop(&mut self) {
        self.task.abort();
    }
}

fn classify(kind: &EventKind) -> Option<ChangeKind> {
    match kind {
        EventKind::Create(_) | EventKind::Modify(_) => Some(ChangeKind::Written),
        EventKind::Remove(_) => Some(ChangeKind::Removed),
        _ => None,
    }
}

/// Watch `dir` and send a [`SyncEvent`] for every source file that stays
/// unchanged for `window` after an add, change or removal.
///
/// Must be called inside a tokio runtime.
pub fn spawn_hotspot_watcher(
    dir: &Path,
    window: Duration,
    events: mpsc::UnboundedSender<SyncEvent>,
) -> Result<HotspotWatcher, SyncError> {
    let (raw_tx, raw_rx) = mpsc::unbounded_channel::<(PathBuf, ChangeKind)>();

    let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| match res {
        Ok(event) => {
            let Some(kind) = classify(&event.kind) else {
                return;
            };
            for path in event.paths {
                if screen_id_for(&path).is_some() {
                    let _ = raw_tx.send((path, kind));
                }
            }
        }
        Err(e) => warn!("Hotspot watcher error: {}", e),
    })?;
    watcher.watch(dir, RecursiveMode::NonRecursive)?;
    info!("Watching {} for hotspot changes", dir.display());

    let task = tokio::spawn(debounce_loop(raw_rx, events, window));
    Ok(HotspotWatcher {
        _watcher: watcher,
        task,
        dir: dir.to_path_buf(),
    })
}

async fn debounce_loop(
    mut raw: mpsc::UnboundedReceiver<(PathBuf, ChangeKind)>,
    events: mpsc::UnboundedSender<SyncEvent>,
    window: Duration,
) {
    let mut debouncer = StabilityDebouncer::new(window);
    loop {
        let deadline = debouncer.next_deadline();
        tokio::select! {
            received = raw.recv() => {
                let Some((path, kind)) = received else { break };
                debug!("Hotspot file {:?}: {}", kind, path.display());
                debouncer.record(path, kind, Instant::now().into_std());
            }
            _ = sleep_until(deadline), if deadline.is_some() => {
                for (path, kind) in debouncer.drain_ready(Instant::now().into_std()) {
                    if let Some(event) = settle(&path, kind).await {
                        if events.send(event).is_err() {
                            return;
                        }
                    }
                }
            }
        }
    }
}

async fn sleep_until(deadline: Option<std::time::Instant>) {
    if let Some(deadline) = deadline {
        tokio::time::sleep_until(Instant::from_std(deadline)).await;
    }
}

async fn settle(path: &Path, kind: ChangeKind) -> Option<SyncEvent> {
    let screen_id = screen_id_for(path)?;
    if kind == ChangeKind::Removed {
        warn!(
            "Hotspot file for {} removed; keeping its hotspots",
            screen_id
        );
        return Some(SyncEvent::Removed { screen_id });
    }

    let text = match tokio::fs::read_to_string(path).await {
        Ok(text) => text,
        // Removed between the event and the read.
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Some(SyncEvent::Removed { screen_id });
        }
        Err(e) => {
            return Some(SyncEvent::Failed {
                screen_id,
                message: e.to_string(),
            })
        }
    };
    Some(match parse_screen_file(path, &text) {
        Ok(hotspots) => SyncEvent::Changed {
            screen_id,
            hotspots,
        },
        Err(e) => SyncEvent::Failed {
            screen_id,
            message: e.to_string(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_settle_written_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("home.json");
        std::fs::write(&path, r#"{"hotspots":[{"id":"h1"}]}"#).unwrap();

        match settle(&path, ChangeKind::Written).await {
            Some(SyncEvent::Changed { screen_id, hotspots }) => {
                assert_eq!(screen_id, "home");
                assert_eq!(hotspots[0].action, "navigate");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_settle_removed_and_vanished() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("home.json");
        assert_eq!(
            settle(&path, ChangeKind::Removed).await,
            Some(SyncEvent::Removed {
                screen_id: "home".to_string()
            })
        );
        assert_eq!(
            settle(&path, ChangeKind::Written).await,
            Some(SyncEvent::Removed {
                screen_id: "home".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_settle_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("home.json");
        std::fs::write(&path, "{oops").unwrap();
        assert!(matches!(
            settle(&path, ChangeKind::Written).await,
            Some(SyncEvent::Failed { .. })
        ));
    }

    #[tokio::test]
    async fn test_watcher_on_missing_dir_fails() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let result = spawn_hotspot_watcher(
            Path::new("/nonexistent/tapcanvas/watch"),
            Duration::from_millis(10),
            tx,
        );
        assert!(result.is_err());
    }
}
