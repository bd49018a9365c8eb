//! Result type alias for tapcanvas operations.

use super::context::ErrorContext;
use super::proto_error::ProtoError;

/// Type alias for Results using ProtoError.
pub type ProtoResult<T> = Result<T, ProtoError>;

/// Extension trait for Result types to add context to errors.
pub trait ResultExt<T> {
    /// Add context to an error if the result is Err.
    fn context(self, ctx: ErrorContext) -> ProtoResult<T>;

    /// Add context using a closure (only called on error).
    fn with_context<F>(self, f: F) -> ProtoResult<T>
    where
        F: FnOnce() -> ErrorContext;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Into<ProtoError>,
{
    fn context(self, ctx: ErrorContext) -> ProtoResult<T> {
        self.map_err(|e| e.into().with_context(ctx))
    }

    fn with_context<F>(self, f: F) -> ProtoResult<T>
    where
        F: FnOnce() -> ErrorContext,
    {
        self.map_err(|e| e.into().with_context(f()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LoadError;

    #[test]
    fn test_context_on_domain_error() {
        let result: Result<(), LoadError> = Err(LoadError::NotFound {
            asset: "screens.json".to_string(),
        });
        let err = result.context(ErrorContext::new("load_screens")).unwrap_err();
        assert_eq!(err.context().unwrap().operation, "load_screens");
    }

    #[test]
    fn test_with_context_lazy() {
        let ok: Result<u8, std::io::Error> = Ok(3);
        let value = ok
            .with_context(|| panic!("closure must not run on Ok"))
            .unwrap();
        assert_eq!(value, 3);
    }
}
