//! Network-related error types.
//!
//! Transport failures: the request never produced a usable response, or the
//! response body stopped mid-stream.

use std::fmt;

use crate::traits::HttpError;

/// Network-specific error variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkError {
    /// Connection to the server failed.
    ConnectionFailed {
        url: String,
        message: String,
    },

    /// Request timed out.
    Timeout {
        operation: String,
        message: String,
    },

    /// HTTP status error (non-2xx response). Stream consumption never starts.
    HttpStatus {
        status: u16,
        message: String,
    },

    /// Reading the response body failed after the stream had started.
    BodyRead {
        message: String,
    },

    /// The configured URL could not be used.
    InvalidUrl {
        url: String,
    },

    /// Generic network error.
    Other {
        message: String,
    },
}

impl NetworkError {
    /// Check if this error is likely transient and can be retried.
    pub fn is_retryable(&self) -> bool {
        match self {
            NetworkError::ConnectionFailed { .. } => true,
            NetworkError::Timeout { .. } => true,
            NetworkError::HttpStatus { status, .. } => {
                *status >= 500 || *status == 429 || *status == 408
            }
            NetworkError::BodyRead { .. } => true,
            NetworkError::InvalidUrl { .. } => false,
            NetworkError::Other { .. } => false,
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            NetworkError::ConnectionFailed { url, .. } => {
                format!("Could not connect to {}.", url)
            }
            NetworkError::Timeout { operation, .. } => {
                format!("The {} request timed out.", operation)
            }
            NetworkError::HttpStatus { status, message } => {
                if message.is_empty() {
                    format!("Server error: HTTP {}", status)
                } else {
                    format!("Server error: HTTP {} ({})", status, message.trim())
                }
            }
            NetworkError::BodyRead { .. } => {
                "The connection dropped while the article was streaming.".to_string()
            }
            NetworkError::InvalidUrl { url } => format!("Invalid backend URL: {}", url),
            NetworkError::Other { message } => format!("Network error: {}", message),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            NetworkError::ConnectionFailed { .. } => "E_NET_CONN",
            NetworkError::Timeout { .. } => "E_NET_TIMEOUT",
            NetworkError::HttpStatus { .. } => "E_NET_HTTP",
            NetworkError::BodyRead { .. } => "E_NET_BODY",
            NetworkError::InvalidUrl { .. } => "E_NET_URL",
            NetworkError::Other { .. } => "E_NET_OTHER",
        }
    }
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkError::ConnectionFailed { url, message } => {
                write!(f, "Connection to {} failed: {}", url, message)
            }
            NetworkError::Timeout { operation, message } => {
                write!(f, "{} timed out: {}", operation, message)
            }
            NetworkError::HttpStatus { status, message } => {
                write!(f, "HTTP {}: {}", status, message)
            }
            NetworkError::BodyRead { message } => {
                write!(f, "Failed to read response body: {}", message)
            }
            NetworkError::InvalidUrl { url } => write!(f, "Invalid URL: {}", url),
            NetworkError::Other { message } => write!(f, "Network error: {}", message),
        }
    }
}

impl std::error::Error for NetworkError {}

/// Classify an [`HttpError`] from the transport seam for a given URL.
pub fn classify_http_error(err: HttpError, url: &str) -> NetworkError {
    match err {
        HttpError::ConnectionFailed(message) => NetworkError::ConnectionFailed {
            url: url.to_string(),
            message,
        },
        HttpError::Timeout(message) => NetworkError::Timeout {
            operation: url.to_string(),
            message,
        },
        HttpError::ServerError { status, message } => NetworkError::HttpStatus { status, message },
        HttpError::Io(message) => NetworkError::BodyRead { message },
        HttpError::InvalidUrl(url) => NetworkError::InvalidUrl { url },
        HttpError::Other(message) => NetworkError::Other { message },
    }
}

impl From<HttpError> for NetworkError {
    fn from(err: HttpError) -> Self {
        classify_http_error(err, "backend")
    }
}
