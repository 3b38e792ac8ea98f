//! Result type alias for encyclo operations.

use super::context::ErrorContext;
use super::encyclo_error::EncycloError;

/// Type alias for Results using EncycloError.
pub type EncycloResult<T> = Result<T, EncycloError>;

/// Extension trait for Result types to add context to errors.
pub trait ResultExt<T> {
    /// Add context to an error if the result is Err.
    fn context(self, ctx: ErrorContext) -> EncycloResult<T>;

    /// Add context using a closure (only called on error).
    fn with_context<F>(self, f: F) -> EncycloResult<T>
    where
        F: FnOnce() -> ErrorContext;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Into<EncycloError>,
{
    fn context(self, ctx: ErrorContext) -> EncycloResult<T> {
        self.map_err(|e| e.into().with_context(ctx))
    }

    fn with_context<F>(self, f: F) -> EncycloResult<T>
    where
        F: FnOnce() -> ErrorContext,
    {
        self.map_err(|e| e.into().with_context(f()))
    }
}
