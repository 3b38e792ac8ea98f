//! Application state and logic for the TUI.
//!
//! This module contains the core [`App`] struct and related types:
//! - [`Focus`] - Which pane receives navigation keys
//! - [`AppMessage`] - Messages from the stream task to the UI loop
//! - [`ActionGate`] - Single-flight guard for start/continue

mod actions;
mod gate;
mod handlers;
mod messages;
mod types;

pub use gate::{ActionGate, ActionPermit};
pub use messages::AppMessage;
pub use types::Focus;

use tokio::sync::mpsc;

use crate::adapters::ReqwestHttpClient;
use crate::client::EncycloClient;
use crate::config::ClientConfig;
use crate::render::UiState;
use crate::traits::HttpClient;

/// Main application state.
pub struct App<C: HttpClient = ReqwestHttpClient> {
    /// Everything the view draws
    pub ui: UiState,
    /// Topic being typed
    pub input: String,
    pub focus: Focus,
    /// First visible line of the article pane
    pub article_scroll: u16,
    pub should_quit: bool,
    /// Set whenever state changed since the last draw
    pub needs_redraw: bool,
    /// Receiver for async messages (taken by the main loop)
    pub message_rx: Option<mpsc::UnboundedReceiver<AppMessage>>,
    /// Sender for async messages (clone this to pass to async tasks)
    pub message_tx: mpsc::UnboundedSender<AppMessage>,
    client: EncycloClient<C>,
    gate: ActionGate,
    /// Held from spawn until the action's `Ended` message is handled
    permit: Option<ActionPermit>,
    max_rounds: u32,
}

impl<C: HttpClient + 'static> App<C> {
    pub fn new(client: EncycloClient<C>, config: &ClientConfig) -> Self {
        let (message_tx, message_rx) = mpsc::unbounded_channel();
        Self {
            ui: UiState::new(config.outline_debounce),
            input: String::new(),
            focus: Focus::Input,
            article_scroll: 0,
            should_quit: false,
            needs_redraw: true,
            message_rx: Some(message_rx),
            message_tx,
            client,
            gate: ActionGate::new(),
            permit: None,
            max_rounds: config.max_rounds,
        }
    }

    /// Prefill the topic input, e.g. from `--topic`.
    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.input = topic.into();
        self
    }

    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }

    pub fn max_rounds(&self) -> u32 {
        self.max_rounds
    }

    /// True while a start or continue is in flight.
    pub fn is_busy(&self) -> bool {
        self.gate.is_busy()
    }

    pub fn mark_dirty(&mut self) {
        self.needs_redraw = true;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Advance timers such as the outline debounce.
    pub fn tick(&mut self) {
        if self.ui.tick(std::time::Instant::now()) {
            self.mark_dirty();
        }
    }
}
