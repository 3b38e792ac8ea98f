use std::collections::BTreeMap;

use crate::dispatch::Channel;

/// Running text per token channel.
///
/// Views are re-derived from the whole accumulated text on every token, so
/// this is the only place partial stream content lives.
#[derive(Debug, Clone, Default)]
pub struct ChannelBuffers {
    buffers: BTreeMap<Channel, String>,
}

impl ChannelBuffers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, channel: Channel, token: &str) {
        self.buffers.entry(channel).or_default().push_str(token);
    }

    /// Replace a channel's text wholesale.
    pub fn set(&mut self, channel: Channel, text: impl Into<String>) {
        self.buffers.insert(channel, text.into());
    }

    pub fn get(&self, channel: Channel) -> &str {
        self.buffers.get(&channel).map(String::as_str).unwrap_or("")
    }

    pub fn reset(&mut self, channel: Channel) {
        self.buffers.remove(&channel);
    }

    pub fn clear(&mut self) {
        self.buffers.clear();
    }

    pub fn has_content(&self, channel: Channel) -> bool {
        !self.get(channel).is_empty()
    }

    /// Channels that have received any text, in declaration order.
    pub fn active_channels(&self) -> Vec<Channel> {
        self.buffers
            .iter()
            .filter(|(_, text)| !text.is_empty())
            .map(|(channel, _)| *channel)
            .collect()
    }
}
