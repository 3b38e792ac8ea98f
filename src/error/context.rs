//! Error context for enriched error information.
//!
//! Attached by the client so a failure notification can name the action and
//! endpoint that produced it.

/// Context information attached to errors for debugging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// Human-readable description of the operation that failed.
    pub operation: String,

    /// Endpoint URL, when the failure happened during a request.
    pub endpoint: Option<String>,

    /// Topic of the article being authored, if known.
    pub topic: Option<String>,
}

impl ErrorContext {
    /// Create a new ErrorContext for an operation.
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            endpoint: None,
            topic: None,
        }
    }

    /// Set the endpoint for this context.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the topic for this context.
    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = Some(topic.into());
        self
    }

    /// Get a formatted context string suitable for logging.
    pub fn to_log_string(&self) -> String {
        let mut parts = vec![format!("operation={}", self.operation)];

        if let Some(ref endpoint) = self.endpoint {
            parts.push(format!("endpoint={}", endpoint));
        }

        if let Some(ref topic) = self.topic {
            parts.push(format!("topic={:?}", topic));
        }

        parts.join(" ")
    }
}

impl std::fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.operation)?;

        if let Some(ref endpoint) = self.endpoint {
            write!(f, " {}", endpoint)?;
        }

        Ok(())
    }
}
