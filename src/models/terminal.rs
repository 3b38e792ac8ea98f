use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::article::ArticleState;
use crate::error::StreamError;

/// The authoritative final state delivered by the `done` frame.
///
/// Kept as opaque JSON: it is sent back verbatim on `/api/continue`, so fields
/// this client does not know about must survive the round trip.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct TerminalResult(Value);

impl TerminalResult {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Decode a `done` frame payload: a JSON string whose content is itself
    /// the JSON-encoded result.
    pub fn from_done_payload(data: &str) -> Result<Self, serde_json::Error> {
        let inner: String = serde_json::from_str(data)?;
        let value: Value = serde_json::from_str(&inner)?;
        Ok(Self(value))
    }

    /// Accept a non-streaming response body. It must be a JSON object.
    pub fn from_body(body: &str) -> Result<Self, StreamError> {
        let value: Value =
            serde_json::from_str(body).map_err(|e| StreamError::InvalidResult {
                message: e.to_string(),
            })?;
        if !value.is_object() {
            return Err(StreamError::InvalidResult {
                message: "expected a JSON object".to_string(),
            });
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    /// Typed view. Returns `None` when the value is not an object or a known
    /// field has an unexpected type.
    pub fn state(&self) -> Option<ArticleState> {
        // Derived struct impls also accept a sequence
        if !self.0.is_object() {
            return None;
        }
        ArticleState::deserialize(&self.0).ok()
    }

    pub fn topic(&self) -> Option<&str> {
        self.0.get("topic").and_then(Value::as_str)
    }

    /// The final article text.
    pub fn article(&self) -> Option<&str> {
        self.0.get("current_article").and_then(Value::as_str)
    }

    /// Serialize for `/api/continue`.
    pub fn to_body(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.0)
    }
}
