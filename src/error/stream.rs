//! Streaming-related error types.
//!
//! Errors raised while dispatching frames of an SSE response: an `error`
//! frame from the backend, or a payload that does not decode the way its
//! event name promises.

use std::fmt;

/// Stream-specific error variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamError {
    /// Backend reported an error via an `error` frame. Consumption stops and no
    /// partial result is returned.
    Backend {
        message: String,
    },

    /// A frame's payload was not the JSON its event name requires.
    InvalidJson {
        event_type: String,
        message: String,
    },

    /// The non-streaming response body was not a JSON object.
    InvalidResult {
        message: String,
    },
}

impl StreamError {
    /// Check if this error is likely transient and can be retried.
    pub fn is_retryable(&self) -> bool {
        matches!(self, StreamError::Backend { .. })
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            StreamError::Backend { message } => format!("Failed to generate article: {}", message),
            StreamError::InvalidJson { event_type, .. } => {
                format!(
                    "Received invalid data from server ({}). Please try again.",
                    event_type
                )
            }
            StreamError::InvalidResult { .. } => {
                "The server returned a result this client could not read.".to_string()
            }
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            StreamError::Backend { .. } => "E_STREAM_BACKEND",
            StreamError::InvalidJson { .. } => "E_STREAM_JSON",
            StreamError::InvalidResult { .. } => "E_STREAM_RESULT",
        }
    }

    /// Build an [`StreamError::InvalidJson`] for a frame's event name.
    pub fn invalid_json(event_type: &str, err: &serde_json::Error) -> Self {
        StreamError::InvalidJson {
            event_type: if event_type.is_empty() {
                "<unnamed>".to_string()
            } else {
                event_type.to_string()
            },
            message: err.to_string(),
        }
    }
}

impl fmt::Display for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamError::Backend { message } => write!(f, "Backend error: {}", message),
            StreamError::InvalidJson {
                event_type,
                message,
            } => {
                write!(f, "Invalid JSON for {} event: {}", event_type, message)
            }
            StreamError::InvalidResult { message } => {
                write!(f, "Invalid terminal result: {}", message)
            }
        }
    }
}

impl std::error::Error for StreamError {}
