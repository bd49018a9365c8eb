//! Error category classification for unified error handling.
//!
//! This module provides a high-level categorization of errors to enable
//! consistent handling and user messaging.

use std::fmt;

/// High-level categorization of errors for handling decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Asset transport errors (connection refused, HTTP failure, timeout).
    Network,

    /// Data was reachable but malformed (bad JSON, bad hotspot geometry).
    Configuration,

    /// User action required (wrong credentials, missing input, bad target).
    User,

    /// The operation was refused because another one is running or ran
    /// too recently.
    Busy,

    /// System/OS errors (filesystem, clipboard).
    System,
}

impl ErrorCategory {
    /// Returns true if trying again later can succeed without any change.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorCategory::Network | ErrorCategory::Busy)
    }

    /// Returns a short label for the category suitable for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "network",
            ErrorCategory::Configuration => "configuration",
            ErrorCategory::User => "user",
            ErrorCategory::Busy => "busy",
            ErrorCategory::System => "system",
        }
    }

    /// Returns a user-friendly description of the category.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "Could not reach prototype assets",
            ErrorCategory::Configuration => "Prototype data problem",
            ErrorCategory::User => "User action required",
            ErrorCategory::Busy => "Operation already in progress",
            ErrorCategory::System => "System error",
        }
    }

    /// Returns suggested recovery actions for this category.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "Check the asset location and restart",
            ErrorCategory::Configuration => "Fix the JSON files and restart",
            ErrorCategory::User => "Please check your input and try again",
            ErrorCategory::Busy => "Wait a moment and try again",
            ErrorCategory::System => "Check file permissions and available disk space",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
