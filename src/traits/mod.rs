//! Trait abstractions for dependency injection and testability.
//!
//! - [`HttpClient`] - HTTP POST with buffered or streaming response bodies

pub mod http;

pub use http::{ByteStream, Headers, HttpClient, HttpError, Response, StreamingResponse};
