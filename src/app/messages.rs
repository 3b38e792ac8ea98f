//! Message types for async communication between the stream task and the UI
//! loop.

use crate::dispatch::Channel;
use crate::error::EncycloError;
use crate::models::{Round, TerminalResult};
use crate::render::ActionKind;

/// Messages sent from the stream task to the main loop.
///
/// For one action the order is: any number of stream events, then exactly
/// one of `Completed` or `Failed` (absent only if the task panicked), then
/// `Ended`.
#[derive(Debug)]
pub enum AppMessage {
    /// A token on one of the text channels
    Token { channel: Channel, token: String },
    /// A critique round finished
    RoundComplete(Round),
    /// The critique loop stopped early
    Converged,
    /// The final article text is complete; metadata may still follow
    ArticleDone,
    /// The terminal result frame arrived
    Done,
    /// The stream ended cleanly, with or without a terminal result
    Completed(Option<TerminalResult>),
    /// The request or stream failed
    Failed(EncycloError),
    /// The stream task is gone; handling this reopens the gate
    Ended(ActionKind),
}
