//! Screen navigation errors.

use std::fmt;

/// Direction of a sequential step through the screen list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepDirection {
    Next,
    Previous,
}

impl fmt::Display for StepDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepDirection::Next => write!(f, "next"),
            StepDirection::Previous => write!(f, "previous"),
        }
    }
}

/// Why the navigator refused to move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    /// No screen has the requested id.
    ScreenNotFound { screen_id: String },

    /// The current screen scrolls internally and consumes swipe gestures.
    ScrollableScreen { screen_id: String },

    /// Already at the first or last screen.
    AtBoundary { direction: StepDirection },

    /// The screen list has not been loaded yet.
    NotReady,
}

impl NavigationError {
    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            NavigationError::ScreenNotFound { screen_id } => {
                format!("Screen '{}' does not exist.", screen_id)
            }
            NavigationError::ScrollableScreen { .. } => {
                "This screen scrolls; use the hotspots to move on.".to_string()
            }
            NavigationError::AtBoundary { direction: StepDirection::Next } => {
                "This is the last screen.".to_string()
            }
            NavigationError::AtBoundary { direction: StepDirection::Previous } => {
                "This is the first screen.".to_string()
            }
            NavigationError::NotReady => "Screens are still loading.".to_string(),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            NavigationError::ScreenNotFound { .. } => "E_NAV_NOT_FOUND",
            NavigationError::ScrollableScreen { .. } => "E_NAV_SCROLLABLE",
            NavigationError::AtBoundary { .. } => "E_NAV_BOUNDARY",
            NavigationError::NotReady => "E_NAV_NOT_READY",
        }
    }
}

impl fmt::Display for NavigationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavigationError::ScreenNotFound { screen_id } => {
                write!(f, "screen not found: {}", screen_id)
            }
            NavigationError::ScrollableScreen { screen_id } => {
                write!(f, "screen {} is scrollable", screen_id)
            }
            NavigationError::AtBoundary { direction } => {
                write!(f, "no {} screen", direction)
            }
            NavigationError::NotReady => write!(f, "screens not loaded"),
        }
    }
}

impl std::error::Error for NavigationError {}
