//! Screen capture errors.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Why a capture request did not produce an image file.
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureError {
    /// Another capture is still running.
    InFlight,

    /// The previous attempt was too recent.
    Debounced { remaining: Duration },

    /// Nothing is registered under the requested target name.
    TargetNotFound { target: String },

    /// Both the primary and fallback strategies failed.
    StrategiesFailed { primary: String, fallback: String },

    /// The PNG could not be written.
    WriteFailed { path: PathBuf, message: String },
}

impl CaptureError {
    /// Debounce and in-flight refusals are expected noise, not failures.
    pub fn is_refusal(&self) -> bool {
        matches!(self, CaptureError::InFlight | CaptureError::Debounced { .. })
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            CaptureError::InFlight => "A screenshot is already being taken.".to_string(),
            CaptureError::Debounced { .. } => "Screenshots are too frequent, wait a moment.".to_string(),
            CaptureError::TargetNotFound { target } => {
                format!("Nothing to capture for '{}'.", target)
            }
            CaptureError::StrategiesFailed { .. } => "The screenshot could not be taken.".to_string(),
            CaptureError::WriteFailed { path, .. } => {
                format!("Could not save screenshot to {}.", path.display())
            }
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            CaptureError::InFlight => "E_CAPTURE_IN_FLIGHT",
            CaptureError::Debounced { .. } => "E_CAPTURE_DEBOUNCED",
            CaptureError::TargetNotFound { .. } => "E_CAPTURE_TARGET",
            CaptureError::StrategiesFailed { .. } => "E_CAPTURE_FAILED",
            CaptureError::WriteFailed { .. } => "E_CAPTURE_WRITE",
        }
    }
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureError::InFlight => write!(f, "capture already in progress"),
            CaptureError::Debounced { remaining } => {
                write!(f, "capture debounced, {} ms remaining", remaining.as_millis())
            }
            CaptureError::TargetNotFound { target } => {
                write!(f, "capture target not found: {}", target)
            }
            CaptureError::StrategiesFailed { primary, fallback } => {
                write!(f, "capture failed (primary: {}; fallback: {})", primary, fallback)
            }
            CaptureError::WriteFailed { path, message } => {
                write!(f, "failed to write {}: {}", path.display(), message)
            }
        }
    }
}

impl std::error::Error for CaptureError {}
