//! SSE (Server-Sent Events) frame decoding.
//!
//! The backend uses a simplified framing:
//! - `event: <name>` - sets the active event name
//! - `data: <payload>` - emits one frame under the active name, then clears it
//! - anything else (blank separators, comments) - ignored
//!
//! There is no `id:`/`retry:` support and no multi-line data concatenation.
//! Decoding is incremental: chunk boundaries may split lines, frames or
//! multi-byte characters anywhere.

mod decoder;
mod line;
mod utf8;

pub use decoder::{frames, FrameDecoder};
pub use line::{parse_sse_line, Frame, SseLine, DATA_PREFIX, EVENT_PREFIX};
pub use utf8::Utf8Carry;
