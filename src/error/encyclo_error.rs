//! Unified error type for the encyclo client.
//!
//! `EncycloError` consolidates the domain error types so every action can end
//! in exactly one notification with a consistent message and error code.

use std::fmt;

use super::category::ErrorCategory;
use super::context::ErrorContext;
use super::network::NetworkError;
use super::stream::StreamError;
use super::system::SystemError;
use super::user::UserError;
use crate::config::ConfigError;

/// Unified error type for the encyclo client.
#[derive(Debug)]
pub enum EncycloError {
    /// Transport errors (connections, HTTP status, body reads).
    Network(NetworkError),

    /// SSE dispatch errors (error frames, undecodable payloads).
    Stream(StreamError),

    /// Rejected user actions.
    User(UserError),

    /// Invalid configuration or flags.
    Config(ConfigError),

    /// System/filesystem/terminal errors.
    System(SystemError),

    /// Wrapped error with additional context.
    WithContext {
        error: Box<EncycloError>,
        context: ErrorContext,
    },
}

impl EncycloError {
    /// Get the category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            EncycloError::Network(NetworkError::HttpStatus { status, .. }) if *status < 500 => {
                ErrorCategory::User
            }
            EncycloError::Network(NetworkError::HttpStatus { .. }) => ErrorCategory::Server,
            EncycloError::Network(_) => ErrorCategory::Network,
            EncycloError::Stream(StreamError::Backend { .. }) => ErrorCategory::Server,
            EncycloError::Stream(_) => ErrorCategory::Client,
            EncycloError::User(_) => ErrorCategory::User,
            EncycloError::Config(_) => ErrorCategory::Configuration,
            EncycloError::System(_) => ErrorCategory::System,
            EncycloError::WithContext { error, .. } => error.category(),
        }
    }

    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            EncycloError::Network(err) => err.is_retryable(),
            EncycloError::Stream(err) => err.is_retryable(),
            EncycloError::User(_) => false,
            EncycloError::Config(_) => false,
            EncycloError::System(err) => err.is_transient(),
            EncycloError::WithContext { error, .. } => error.is_retryable(),
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            EncycloError::Network(err) => err.user_message(),
            EncycloError::Stream(err) => err.user_message(),
            EncycloError::User(err) => err.user_message(),
            EncycloError::Config(err) => err.to_string(),
            EncycloError::System(err) => err.user_message(),
            EncycloError::WithContext { error, .. } => error.user_message(),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            EncycloError::Network(err) => err.error_code(),
            EncycloError::Stream(err) => err.error_code(),
            EncycloError::User(err) => err.error_code(),
            EncycloError::Config(_) => "E_CONFIG",
            EncycloError::System(err) => err.error_code(),
            EncycloError::WithContext { error, .. } => error.error_code(),
        }
    }

    /// Attach context to this error.
    pub fn with_context(self, ctx: ErrorContext) -> Self {
        EncycloError::WithContext {
            error: Box::new(self),
            context: ctx,
        }
    }

    /// Get the context if this error has one attached.
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            EncycloError::WithContext { context, .. } => Some(context),
            _ => None,
        }
    }

    /// Get the inner error without context.
    pub fn inner(&self) -> &EncycloError {
        match self {
            EncycloError::WithContext { error, .. } => error.inner(),
            _ => self,
        }
    }

    /// Get the recovery hint for this error.
    pub fn recovery_hint(&self) -> &'static str {
        self.category().recovery_hint()
    }
}

impl fmt::Display for EncycloError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncycloError::Network(err) => write!(f, "{}", err),
            EncycloError::Stream(err) => write!(f, "{}", err),
            EncycloError::User(err) => write!(f, "{}", err),
            EncycloError::Config(err) => write!(f, "{}", err),
            EncycloError::System(err) => write!(f, "{}", err),
            EncycloError::WithContext { error, context } => {
                write!(f, "{} ({})", error, context)
            }
        }
    }
}

impl std::error::Error for EncycloError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EncycloError::Network(err) => Some(err),
            EncycloError::Stream(err) => Some(err),
            EncycloError::User(err) => Some(err),
            EncycloError::Config(err) => Some(err),
            EncycloError::System(err) => Some(err),
            EncycloError::WithContext { error, .. } => error.source(),
        }
    }
}

// ============================================================================
// From implementations for automatic error conversion
// ============================================================================

impl From<NetworkError> for EncycloError {
    fn from(err: NetworkError) -> Self {
        EncycloError::Network(err)
    }
}

impl From<StreamError> for EncycloError {
    fn from(err: StreamError) -> Self {
        EncycloError::Stream(err)
    }
}

impl From<UserError> for EncycloError {
    fn from(err: UserError) -> Self {
        EncycloError::User(err)
    }
}

impl From<ConfigError> for EncycloError {
    fn from(err: ConfigError) -> Self {
        EncycloError::Config(err)
    }
}

impl From<SystemError> for EncycloError {
    fn from(err: SystemError) -> Self {
        EncycloError::System(err)
    }
}

impl From<std::io::Error> for EncycloError {
    fn from(err: std::io::Error) -> Self {
        use super::system::classify_io_error;
        EncycloError::System(classify_io_error(err, None, "I/O operation"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_http_status_category_splits_on_500() {
        let client_side: EncycloError = NetworkError::HttpStatus {
            status: 400,
            message: "Topic cannot be empty".to_string(),
        }
        .into();
        assert_eq!(client_side.category(), ErrorCategory::User);

        let server_side: EncycloError = NetworkError::HttpStatus {
            status: 500,
            message: "Streaming not supported".to_string(),
        }
        .into();
        assert_eq!(server_side.category(), ErrorCategory::Server);
    }

    #[test]
    fn test_stream_error_category() {
        let backend: EncycloError = StreamError::Backend {
            message: "rate limited".to_string(),
        }
        .into();
        assert_eq!(backend.category(), ErrorCategory::Server);
        assert!(backend.is_retryable());

        let bad_json: EncycloError = StreamError::InvalidResult {
            message: "expected object".to_string(),
        }
        .into();
        assert_eq!(bad_json.category(), ErrorCategory::Client);
        assert!(!bad_json.is_retryable());
    }

    #[test]
    fn test_user_error_not_retryable() {
        let err: EncycloError = UserError::ActionInProgress.into();
        assert_eq!(err.category(), ErrorCategory::User);
        assert!(!err.is_retryable());
        assert_eq!(err.error_code(), "E_USER_BUSY");
    }

    #[test]
    fn test_with_context_preserves_properties() {
        let err: EncycloError = NetworkError::ConnectionFailed {
            url: "http://localhost:8080/api/start".to_string(),
            message: "refused".to_string(),
        }
        .into();
        let with_ctx = err.with_context(ErrorContext::new("start").with_topic("Rust"));

        assert_eq!(with_ctx.category(), ErrorCategory::Network);
        assert!(with_ctx.is_retryable());
        assert_eq!(with_ctx.error_code(), "E_NET_CONN");
        assert_eq!(with_ctx.context().map(|c| c.operation.as_str()), Some("start"));
        assert!(matches!(with_ctx.inner(), EncycloError::Network(_)));
        assert!(with_ctx.source().is_some());
    }

    #[test]
    fn test_user_message_ignores_context() {
        let err: EncycloError = StreamError::Backend {
            message: "boom".to_string(),
        }
        .into();
        let with_ctx = err.with_context(ErrorContext::new("continue"));
        assert_eq!(with_ctx.user_message(), "Failed to generate article: boom");
        assert!(with_ctx.to_string().contains("[continue]"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::Other, "disk on fire");
        let err: EncycloError = io_err.into();
        assert_eq!(err.category(), ErrorCategory::System);
    }
}
