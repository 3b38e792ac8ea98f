//! Unified error handling for encyclo.
//!
//! - **Error Categories**: high-level classification for handling decisions
//! - **Domain errors**: network, stream, user, system (config errors live in
//!   [`crate::config`])
//! - **Unified Error Type**: `EncycloError`
//! - **Error Context**: the operation and endpoint that failed
//!
//! | Category | Description | Retryable |
//! |----------|-------------|-----------|
//! | Network | Connection, timeout, dropped body | Yes |
//! | Server | HTTP 5xx, `error` frames | Yes |
//! | Client | Undecodable payloads | No |
//! | User | Empty topic, action in flight, HTTP 4xx | No |
//! | System | Filesystem, terminal | Sometimes |
//! | Configuration | Bad flag or env value | No |

mod category;
mod context;
mod encyclo_error;
mod network;
mod result;
mod stream;
mod system;
mod user;

pub use category::ErrorCategory;
pub use context::ErrorContext;
pub use encyclo_error::EncycloError;
pub use network::{classify_http_error, NetworkError};
pub use result::{EncycloResult, ResultExt};
pub use stream::StreamError;
pub use system::{classify_io_error, SystemError};
pub use user::UserError;
