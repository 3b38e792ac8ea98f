//! Errors caused by the requested action itself rather than the backend.

use std::fmt;

/// User-actionable error variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserError {
    /// The topic was empty or whitespace only.
    EmptyTopic,

    /// Another action is still streaming; the new one was rejected.
    ActionInProgress,

    /// Continue was requested before any final result was received.
    NothingToContinue,
}

impl UserError {
    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            UserError::EmptyTopic => "Please enter a topic.".to_string(),
            UserError::ActionInProgress => {
                "Please wait for the current article to finish streaming.".to_string()
            }
            UserError::NothingToContinue => {
                "There is no finished article to continue yet.".to_string()
            }
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            UserError::EmptyTopic => "E_USER_TOPIC",
            UserError::ActionInProgress => "E_USER_BUSY",
            UserError::NothingToContinue => "E_USER_NO_RESULT",
        }
    }
}

impl fmt::Display for UserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserError::EmptyTopic => write!(f, "Topic cannot be empty"),
            UserError::ActionInProgress => write!(f, "An action is already in flight"),
            UserError::NothingToContinue => write!(f, "No terminal result to continue from"),
        }
    }
}

impl std::error::Error for UserError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_distinct() {
        let codes = [
            UserError::EmptyTopic.error_code(),
            UserError::ActionInProgress.error_code(),
            UserError::NothingToContinue.error_code(),
        ];
        assert_ne!(codes[0], codes[1]);
        assert_ne!(codes[1], codes[2]);
    }

    #[test]
    fn test_empty_topic_message() {
        assert_eq!(UserError::EmptyTopic.user_message(), "Please enter a topic.");
        assert_eq!(UserError::EmptyTopic.to_string(), "Topic cannot be empty");
    }
}
