//! Hotspot validation errors.

use std::fmt;

/// The specific invariant a hotspot record violated.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// The id is empty.
    MissingId,

    /// One of x, y, width or height is missing or blank.
    MissingGeometry { id: String, field: &'static str },

    /// The action is missing or blank.
    MissingAction { id: String },

    /// A geometry field is not a number.
    NotANumber {
        id: String,
        field: &'static str,
        value: String,
    },

    /// A geometry field is outside its allowed range.
    OutOfRange {
        id: String,
        field: &'static str,
        value: f64,
    },
}

impl ValidationError {
    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            ValidationError::MissingId => "A hotspot without an id was skipped.".to_string(),
            ValidationError::MissingGeometry { id, .. }
            | ValidationError::NotANumber { id, .. }
            | ValidationError::OutOfRange { id, .. } => {
                format!("Hotspot {} has invalid position or size and was skipped.", id)
            }
            ValidationError::MissingAction { id } => {
                format!("Hotspot {} has no action and was skipped.", id)
            }
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::MissingId => "E_VALID_ID",
            ValidationError::MissingGeometry { .. } => "E_VALID_GEOMETRY",
            ValidationError::MissingAction { .. } => "E_VALID_ACTION",
            ValidationError::NotANumber { .. } => "E_VALID_NAN",
            ValidationError::OutOfRange { .. } => "E_VALID_RANGE",
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingId => write!(f, "Invalid hotspot: missing or invalid id"),
            ValidationError::MissingGeometry { id, field } => {
                write!(f, "Invalid hotspot {}: missing {}", id, field)
            }
            ValidationError::MissingAction { id } => {
                write!(f, "Invalid hotspot {}: missing or invalid action", id)
            }
            ValidationError::NotANumber { id, field, value } => {
                write!(f, "Invalid hotspot {}: {} '{}' is not a percentage", id, field, value)
            }
            ValidationError::OutOfRange { id, field, value } => {
                write!(f, "Invalid hotspot {}: {} {} is out of range", id, field, value)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_field() {
        let err = ValidationError::OutOfRange {
            id: "btn".to_string(),
            field: "width",
            value: 120.0,
        };
        assert!(err.to_string().contains("width"));
        assert!(err.to_string().contains("btn"));
        assert_eq!(err.error_code(), "E_VALID_RANGE");
    }

    #[test]
    fn test_user_message() {
        let err = ValidationError::MissingAction {
            id: "h1".to_string(),
        };
        assert!(err.user_message().contains("h1"));
    }
}
