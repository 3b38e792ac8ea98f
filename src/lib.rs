//! encyclo - a terminal client for a generate, critique and revise
//! encyclopedia article backend.
//!
//! The backend streams one response per action as server-sent events. The
//! pipeline is:
//!
//! - [`sse`] turns arbitrarily chunked bytes into `event:`/`data:` frames
//! - [`dispatch`] routes frames to per-channel callbacks and captures the
//!   terminal result
//! - [`render`] accumulates callbacks into the state the view draws
//!
//! [`client`] ties them to HTTP, [`app`] and [`ui`] to the terminal.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod client;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod logging;
pub mod markdown;
pub mod models;
pub mod render;
pub mod sse;
pub mod traits;
pub mod ui;
