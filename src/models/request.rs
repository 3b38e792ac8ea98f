use serde::{Deserialize, Serialize};

use crate::error::UserError;

/// Rounds used when the caller asks for zero or a negative number.
pub const DEFAULT_MAX_ROUNDS: u32 = 3;

/// Body of `POST /api/start`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StartRequest {
    /// Subject of the article, already trimmed
    pub topic: String,
    /// Upper bound on critique/revise rounds; the backend applies its own
    /// default when omitted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_rounds: Option<u32>,
}

impl StartRequest {
    /// Build a request, trimming the topic.
    ///
    /// Fails with [`UserError::EmptyTopic`] when nothing but whitespace is
    /// left, so the request is never sent.
    pub fn new(topic: &str) -> Result<Self, UserError> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(UserError::EmptyTopic);
        }
        Ok(Self {
            topic: topic.to_string(),
            max_rounds: None,
        })
    }

    /// Set the round limit. Values `<= 0` fall back to [`DEFAULT_MAX_ROUNDS`].
    pub fn with_max_rounds(mut self, max_rounds: i64) -> Self {
        self.max_rounds = Some(normalize_max_rounds(max_rounds));
        self
    }
}

/// Clamp a user-supplied round count the way the backend does.
pub fn normalize_max_rounds(max_rounds: i64) -> u32 {
    if max_rounds <= 0 {
        DEFAULT_MAX_ROUNDS
    } else {
        u32::try_from(max_rounds).unwrap_or(u32::MAX)
    }
}
