//! Startup asset load errors.

use std::fmt;

/// Failure to fetch or parse one of the startup documents.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadError {
    /// The asset could not be reached (I/O or connection failure).
    Unreachable { asset: String, message: String },

    /// The asset does not exist.
    NotFound { asset: String },

    /// The server answered with a non-success status.
    HttpStatus { asset: String, status: u16 },

    /// The asset was read but is not the expected JSON shape.
    Malformed { asset: String, message: String },
}

impl LoadError {
    /// The asset this error is about.
    pub fn asset(&self) -> &str {
        match self {
            LoadError::Unreachable { asset, .. }
            | LoadError::NotFound { asset }
            | LoadError::HttpStatus { asset, .. }
            | LoadError::Malformed { asset, .. } => asset,
        }
    }

    /// Transport failures might succeed on a later start; bad data won't.
    pub fn is_transport(&self) -> bool {
        match self {
            LoadError::Unreachable { .. } => true,
            LoadError::HttpStatus { status, .. } => *status >= 500,
            LoadError::NotFound { .. } | LoadError::Malformed { .. } => false,
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            LoadError::Unreachable { asset, .. } => {
                format!("Unable to load {}. Check the asset location.", asset)
            }
            LoadError::NotFound { asset } => format!("{} was not found.", asset),
            LoadError::HttpStatus { asset, status } => {
                format!("Loading {} failed with HTTP {}.", asset, status)
            }
            LoadError::Malformed { asset, .. } => {
                format!("{} is not valid prototype data.", asset)
            }
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            LoadError::Unreachable { .. } => "E_LOAD_UNREACHABLE",
            LoadError::NotFound { .. } => "E_LOAD_NOT_FOUND",
            LoadError::HttpStatus { .. } => "E_LOAD_HTTP",
            LoadError::Malformed { .. } => "E_LOAD_MALFORMED",
        }
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Unreachable { asset, message } => {
                write!(f, "Failed to reach '{}': {}", asset, message)
            }
            LoadError::NotFound { asset } => write!(f, "Asset '{}' not found", asset),
            LoadError::HttpStatus { asset, status } => {
                write!(f, "HTTP {} while loading '{}'", status, asset)
            }
            LoadError::Malformed { asset, message } => {
                write!(f, "Malformed '{}': {}", asset, message)
            }
        }
    }
}

impl std::error::Error for LoadError {}
