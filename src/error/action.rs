//! Action resolution errors.

use std::fmt;

/// Why the action resolver refused a hotspot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    /// An `input` hotspot without a `field`.
    MissingField,

    /// A `navigate` hotspot without a `target`.
    MissingTarget,

    /// A `login` hotspot without configured credentials.
    MissingCredentials,

    /// The `mst` or `password` input is empty.
    MissingInputValues,

    /// Entered credentials do not match.
    InvalidCredentials,

    /// The action name is not one the resolver knows.
    UnknownAction(String),
}

impl ActionError {
    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            ActionError::MissingField => "This input has no field configured.".to_string(),
            ActionError::MissingTarget => "This button does not lead anywhere yet.".to_string(),
            ActionError::MissingCredentials => "Login is not configured for this screen.".to_string(),
            ActionError::MissingInputValues => "Please fill in all required fields.".to_string(),
            ActionError::InvalidCredentials => "Incorrect tax code or password.".to_string(),
            ActionError::UnknownAction(name) => format!("Action '{}' is not supported.", name),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            ActionError::MissingField => "E_ACTION_FIELD",
            ActionError::MissingTarget => "E_ACTION_TARGET",
            ActionError::MissingCredentials => "E_ACTION_NO_CREDS",
            ActionError::MissingInputValues => "E_ACTION_NO_INPUT",
            ActionError::InvalidCredentials => "E_ACTION_BAD_CREDS",
            ActionError::UnknownAction(_) => "E_ACTION_UNKNOWN",
        }
    }
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionError::MissingField => write!(f, "missing field configuration"),
            ActionError::MissingTarget => write!(f, "missing target"),
            ActionError::MissingCredentials => write!(f, "missing credentials configuration"),
            ActionError::MissingInputValues => write!(f, "missing required input values"),
            ActionError::InvalidCredentials => write!(f, "invalid credentials"),
            ActionError::UnknownAction(name) => write!(f, "unknown action: {}", name),
        }
    }
}

impl std::error::Error for ActionError {}
