//! Clipboard export of the serialized hotspot map.
//!
//! Uses `arboard` for the OS clipboard. A missing clipboard (headless
//! session, SSH without forwarding) is only a warning: the JSON is still
//! handed back so the UI can show it.

use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
    #[error("clipboard write failed: {0}")]
    WriteFailed(String),
}

/// Result of an export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Export {
    pub json: String,
    pub copied: bool,
}

impl Export {
    /// Status line text for the export.
    pub fn summary(&self) -> String {
        let lines = self.json.lines().count();
        if self.copied {
            format!("Copied hotspot JSON ({} lines) to clipboard", lines)
        } else {
            format!("Clipboard unavailable; hotspot JSON ({} lines) shown below", lines)
        }
    }
}

/// Put `text` on the system clipboard.
pub fn copy_text(text: &str) -> Result<(), ClipboardError> {
    let mut clipboard =
        arboard::Clipboard::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
    clipboard
        .set_text(text.to_string())
        .map_err(|e| ClipboardError::WriteFailed(e.to_string()))
}

/// Export `json` through the system clipboard.
pub fn export(json: String) -> Export {
    export_with(json, copy_text)
}

/// Export `json` through an arbitrary clipboard writer.
pub fn export_with<F>(json: String, write: F) -> Export
where
    F: FnOnce(&str) -> Result<(), ClipboardError>,
{
    match write(&json) {
        Ok(()) => {
            info!("Exported {} bytes of hotspot JSON", json.len());
            Export { json, copied: true }
        }
        Err(e) => {
            warn!("Hotspot export not copied: {}", e);
            Export {
                json,
                copied: false,
            }
        }
    }
}
