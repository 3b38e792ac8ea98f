//! Stream dispatching: routes decoded frames to token handlers and
//! structural-event handlers, and extracts the terminal result.
//!
//! Token events (`*_token`) carry a JSON string fragment for one
//! [`Channel`]. Structural events:
//!
//! | Event | Payload | Effect |
//! |-------|---------|--------|
//! | `round_complete` | `Round` JSON | `on_round_complete` |
//! | `converged` | ignored | `on_converged` |
//! | `article_done` | ignored | `on_article_done` |
//! | `done` | JSON string of the JSON result | stores the terminal result, `on_done` |
//! | `error` | JSON string message | aborts with `StreamError::Backend` |

mod callbacks;
mod channel;
mod dispatcher;

pub use callbacks::{StreamCallbacks, TokenCallback, TokenRegistry};
pub use channel::Channel;
pub use dispatcher::{
    consume_stream, DispatchStats, StreamDispatcher, ARTICLE_DONE, CONVERGED, DONE, ERROR,
    ROUND_COMPLETE,
};
