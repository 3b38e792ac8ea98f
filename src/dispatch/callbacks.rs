use std::collections::HashMap;
use std::fmt;

use super::channel::Channel;
use crate::models::{Round, TerminalResult};

pub type TokenCallback<'a> = Box<dyn FnMut(String) + Send + 'a>;
pub type RoundCallback<'a> = Box<dyn FnMut(Round) + Send + 'a>;
pub type SignalCallback<'a> = Box<dyn FnMut() + Send + 'a>;
pub type DoneCallback<'a> = Box<dyn FnMut(&TerminalResult) + Send + 'a>;

/// Caller-supplied handlers for one stream.
///
/// Every handler is optional. Token events for channels without a handler
/// are ignored.
#[derive(Default)]
pub struct StreamCallbacks<'a> {
    tokens: HashMap<Channel, TokenCallback<'a>>,
    on_round_complete: Option<RoundCallback<'a>>,
    on_converged: Option<SignalCallback<'a>>,
    on_article_done: Option<SignalCallback<'a>>,
    on_done: Option<DoneCallback<'a>>,
}

impl<'a> StreamCallbacks<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the handler for a token channel, replacing any previous one.
    pub fn on_token<F>(mut self, channel: Channel, f: F) -> Self
    where
        F: FnMut(String) + Send + 'a,
    {
        self.tokens.insert(channel, Box::new(f));
        self
    }

    pub fn on_round_complete<F>(mut self, f: F) -> Self
    where
        F: FnMut(Round) + Send + 'a,
    {
        self.on_round_complete = Some(Box::new(f));
        self
    }

    pub fn on_converged<F>(mut self, f: F) -> Self
    where
        F: FnMut() + Send + 'a,
    {
        self.on_converged = Some(Box::new(f));
        self
    }

    pub fn on_article_done<F>(mut self, f: F) -> Self
    where
        F: FnMut() + Send + 'a,
    {
        self.on_article_done = Some(Box::new(f));
        self
    }

    pub fn on_done<F>(mut self, f: F) -> Self
    where
        F: FnMut(&TerminalResult) + Send + 'a,
    {
        self.on_done = Some(Box::new(f));
        self
    }

    pub fn registered_channels(&self) -> Vec<Channel> {
        let mut channels: Vec<_> = self.tokens.keys().copied().collect();
        channels.sort();
        channels
    }

    pub(crate) fn into_parts(self) -> (TokenRegistry<'a>, StructuralHandlers<'a>) {
        let registry = TokenRegistry {
            entries: self
                .tokens
                .into_iter()
                .map(|(channel, f)| (channel.event_name(), f))
                .collect(),
        };
        let handlers = StructuralHandlers {
            on_round_complete: self.on_round_complete,
            on_converged: self.on_converged,
            on_article_done: self.on_article_done,
            on_done: self.on_done,
        };
        (registry, handlers)
    }
}

impl fmt::Debug for StreamCallbacks<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamCallbacks")
            .field("tokens", &self.registered_channels())
            .field("on_round_complete", &self.on_round_complete.is_some())
            .field("on_converged", &self.on_converged.is_some())
            .field("on_article_done", &self.on_article_done.is_some())
            .field("on_done", &self.on_done.is_some())
            .finish()
    }
}

/// Event name to token handler. Built fresh for every stream; structural
/// event names never appear here.
pub struct TokenRegistry<'a> {
    entries: HashMap<&'static str, TokenCallback<'a>>,
}

impl<'a> TokenRegistry<'a> {
    pub fn get_mut(&mut self, event_name: &str) -> Option<&mut TokenCallback<'a>> {
        self.entries.get_mut(event_name)
    }

    pub fn contains(&self, event_name: &str) -> bool {
        self.entries.contains_key(event_name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub(crate) struct StructuralHandlers<'a> {
    pub on_round_complete: Option<RoundCallback<'a>>,
    pub on_converged: Option<SignalCallback<'a>>,
    pub on_article_done: Option<SignalCallback<'a>>,
    pub on_done: Option<DoneCallback<'a>>,
}
