//! Stability-window debouncing of file change events.
//!
//! A path is reported only once it has been quiet for the whole window, so
//! an editor writing a file in several chunks produces one merge.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Quiet period before a changed file is re-merged.
pub const STABILITY_WINDOW: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// Created or modified.
    Written,
    Removed,
}

#[derive(Debug)]
pub struct StabilityDebouncer {
    window: Duration,
    pending: HashMap<PathBuf, (ChangeKind, Instant)>,
}

impl Default for StabilityDebouncer {
    fn default() -> Self {
        Self::new(STABILITY_WINDOW)
    }
}

impl StabilityDebouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: HashMap::new(),
        }
    }

    /// Record a change. A later event for the same path restarts its
    /// window and its kind wins.
    pub fn record(&mut self, path: PathBuf, kind: ChangeKind, now: Instant) {
        self.pending.insert(path, (kind, now));
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// When the earliest pending path becomes stable.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.values().map(|(_, at)| *at + self.window).min()
    }

    /// Remove and return every path quiet since `now - window`.
    pub fn drain_ready(&mut self, now: Instant) -> Vec<(PathBuf, ChangeKind)> {
        let window = self.window;
        let ready: Vec<PathBuf> = self
            .pending
            .iter()
            .filter(|(_, (_, at))| now.duration_since(*at) >= window)
            .map(|(path, _)| path.clone())
            .collect();

        let mut drained: Vec<(PathBuf, ChangeKind)> = ready
            .into_iter()
            .filter_map(|path| self.pending.remove(&path).map(|(kind, _)| (path, kind)))
            .collect();
        drained.sort_by(|a, b| a.0.cmp(&b.0));
        drained
    }
}
