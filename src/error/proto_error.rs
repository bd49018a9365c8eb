//! Unified error type for tapcanvas.

use std::fmt;

use super::action::ActionError;
use super::capture::CaptureError;
use super::category::ErrorCategory;
use super::context::ErrorContext;
use super::load::LoadError;
use super::navigation::NavigationError;
use super::validation::ValidationError;

/// Unified error type.
///
/// `ProtoError` consolidates the domain errors into one enum so the
/// controller can route every failure to the right surface (banner,
/// transient notice or log line) in one place.
#[derive(Debug)]
pub enum ProtoError {
    /// Startup asset failed to load.
    Load(LoadError),

    /// Hotspot record rejected.
    Validation(ValidationError),

    /// Action resolver refused a hotspot.
    Action(ActionError),

    /// Capture failed or was refused.
    Capture(CaptureError),

    /// Navigator refused to move.
    Navigation(NavigationError),

    /// Filesystem, clipboard or terminal trouble.
    System { message: String },

    /// Wrapped error with additional context.
    WithContext {
        error: Box<ProtoError>,
        context: ErrorContext,
    },
}

impl ProtoError {
    /// Get the category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ProtoError::Load(err) => {
                if err.is_transport() {
                    ErrorCategory::Network
                } else {
                    ErrorCategory::Configuration
                }
            }
            ProtoError::Validation(_) => ErrorCategory::Configuration,
            ProtoError::Action(_) => ErrorCategory::User,
            ProtoError::Capture(err) => {
                if err.is_refusal() {
                    ErrorCategory::Busy
                } else {
                    ErrorCategory::System
                }
            }
            ProtoError::Navigation(NavigationError::NotReady) => ErrorCategory::Busy,
            ProtoError::Navigation(_) => ErrorCategory::User,
            ProtoError::System { .. } => ErrorCategory::System,
            ProtoError::WithContext { error, .. } => error.category(),
        }
    }

    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        self.category().is_retryable()
    }

    /// Only a failed startup load stops the prototype from running.
    pub fn is_fatal(&self) -> bool {
        matches!(self.inner(), ProtoError::Load(_))
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            ProtoError::Load(err) => err.user_message(),
            ProtoError::Validation(err) => err.user_message(),
            ProtoError::Action(err) => err.user_message(),
            ProtoError::Capture(err) => err.user_message(),
            ProtoError::Navigation(err) => err.user_message(),
            ProtoError::System { message } => format!("System error: {}", message),
            ProtoError::WithContext { error, .. } => error.user_message(),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            ProtoError::Load(err) => err.error_code(),
            ProtoError::Validation(err) => err.error_code(),
            ProtoError::Action(err) => err.error_code(),
            ProtoError::Capture(err) => err.error_code(),
            ProtoError::Navigation(err) => err.error_code(),
            ProtoError::System { .. } => "E_SYSTEM",
            ProtoError::WithContext { error, .. } => error.error_code(),
        }
    }

    /// Attach context to this error.
    pub fn with_context(self, ctx: ErrorContext) -> Self {
        ProtoError::WithContext {
            error: Box::new(self),
            context: ctx,
        }
    }

    /// Get the context if this error has one attached.
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            ProtoError::WithContext { context, .. } => Some(context),
            _ => None,
        }
    }

    /// Get the inner error without context.
    pub fn inner(&self) -> &ProtoError {
        match self {
            ProtoError::WithContext { error, .. } => error.inner(),
            _ => self,
        }
    }

    /// Get the recovery hint for this error.
    pub fn recovery_hint(&self) -> &'static str {
        self.category().recovery_hint()
    }
}

impl fmt::Display for ProtoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtoError::Load(err) => write!(f, "{}", err),
            ProtoError::Validation(err) => write!(f, "{}", err),
            ProtoError::Action(err) => write!(f, "{}", err),
            ProtoError::Capture(err) => write!(f, "{}", err),
            ProtoError::Navigation(err) => write!(f, "{}", err),
            ProtoError::System { message } => write!(f, "system error: {}", message),
            ProtoError::WithContext { error, context } => write!(f, "{} ({})", error, context),
        }
    }
}

impl std::error::Error for ProtoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProtoError::Load(err) => Some(err),
            ProtoError::Validation(err) => Some(err),
            ProtoError::Action(err) => Some(err),
            ProtoError::Capture(err) => Some(err),
            ProtoError::Navigation(err) => Some(err),
            ProtoError::System { .. } => None,
            ProtoError::WithContext { error, .. } => error.source(),
        }
    }
}

// ============================================================================
// From implementations for automatic error conversion
// ============================================================================

impl From<LoadError> for ProtoError {
    fn from(err: LoadError) -> Self {
        ProtoError::Load(err)
    }
}

impl From<ValidationError> for ProtoError {
    fn from(err: ValidationError) -> Self {
        ProtoError::Validation(err)
    }
}

impl From<ActionError> for ProtoError {
    fn from(err: ActionError) -> Self {
        ProtoError::Action(err)
    }
}

impl From<CaptureError> for ProtoError {
    fn from(err: CaptureError) -> Self {
        ProtoError::Capture(err)
    }
}

impl From<NavigationError> for ProtoError {
    fn from(err: NavigationError) -> Self {
        ProtoError::Navigation(err)
    }
}

impl From<std::io::Error> for ProtoError {
    fn from(err: std::io::Error) -> Self {
        ProtoError::System {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for ProtoError {
    fn from(err: serde_json::Error) -> Self {
        ProtoError::Load(LoadError::Malformed {
            asset: "unknown".to_string(),
            message: err.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;
    use std::time::Duration;

    #[test]
    fn test_load_error_category_depends_on_transport() {
        let transport: ProtoError = LoadError::Unreachable {
            asset: "a".to_string(),
            message: "b".to_string(),
        }
        .into();
        assert_eq!(transport.category(), ErrorCategory::Network);
        assert!(transport.is_retryable());

        let data: ProtoError = LoadError::Malformed {
            asset: "a".to_string(),
            message: "b".to_string(),
        }
        .into();
        assert_eq!(data.category(), ErrorCategory::Configuration);
        assert!(!data.is_retryable());
    }

    #[test]
    fn test_capture_refusal_is_busy() {
        let err: ProtoError = CaptureError::Debounced {
            remaining: Duration::from_millis(100),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Busy);

        let err: ProtoError = CaptureError::StrategiesFailed {
            primary: "x".to_string(),
            fallback: "y".to_string(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::System);
    }

    #[test]
    fn test_inner_unwraps_nested_context() {
        let err: ProtoError = ActionError::MissingTarget.into();
        let wrapped = err
            .with_context(ErrorContext::new("dispatch"))
            .with_context(ErrorContext::new("click"));
        assert!(matches!(wrapped.inner(), ProtoError::Action(ActionError::MissingTarget)));
        assert_eq!(wrapped.error_code(), "E_ACTION_TARGET");
    }

    #[test]
    fn test_source_chain() {
        let err: ProtoError = NavigationError::NotReady.into();
        assert!(err.source().is_some());
        assert_eq!(err.category(), ErrorCategory::Busy);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: ProtoError = io_err.into();
        assert_eq!(err.category(), ErrorCategory::System);
    }
}
