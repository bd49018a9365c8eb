//! AppMessage enum for async communication within the application.

use std::path::PathBuf;

use crate::error::{CaptureError, LoadError};
use crate::hotspot_sync::SyncEvent;
use crate::startup::Prototype;

/// Results of background work, delivered to the event loop.
#[derive(Debug, Clone)]
pub enum AppMessage {
    /// The startup load finished
    Loaded(Box<Prototype>),
    /// The startup load failed
    LoadFailed(LoadError),
    /// A capture task finished
    CaptureFinished(Result<PathBuf, CaptureError>),
    /// The hotspot source watcher settled a file
    HotspotsSynced(SyncEvent),
}
