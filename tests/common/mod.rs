//! Common test utilities for integration tests.
//!
//! Builders for event-stream bodies and a recorder that captures every
//! callback in arrival order.

#![allow(dead_code)]

use std::sync::Mutex;

use encyclo::dispatch::{Channel, StreamCallbacks};
use serde_json::Value;
use wiremock::ResponseTemplate;

/// One `event:`/`data:` pair followed by the blank separator line.
pub fn event(name: &str, data: &str) -> String {
    format!("event: {name}\ndata: {data}\n\n")
}

/// A token frame; `text` is JSON-encoded as the backend does.
pub fn token(channel: Channel, text: &str) -> String {
    let data = serde_json::to_string(text).unwrap();
    event(channel.event_name(), &data)
}

/// A `done` frame carrying `value` double-encoded.
pub fn done(value: &Value) -> String {
    let inner = value.to_string();
    event("done", &serde_json::to_string(&inner).unwrap())
}

pub fn round_complete(number: u32, overall: f64) -> String {
    let data = serde_json::json!({
        "number": number,
        "article": "",
        "evaluation": {
            "scores": {
                "factual_accuracy": 8,
                "completeness": 7,
                "neutrality": 9,
                "clarity": 8,
                "structure": 7
            },
            "overall": overall,
            "critical_issues": []
        }
    });
    event("round_complete", &data.to_string())
}

pub fn sse_response(body: impl Into<String>) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.into().into_bytes(), "text/event-stream")
}

/// Records every callback as a short string, in order.
#[derive(Default)]
pub struct Recorder {
    events: Mutex<Vec<String>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, entry: String) {
        self.events.lock().unwrap().push(entry);
    }

    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    /// Concatenated tokens for one channel.
    pub fn text(&self, channel: Channel) -> String {
        let prefix = format!("{}:", channel.event_name());
        self.events()
            .iter()
            .filter_map(|e| e.strip_prefix(&prefix).map(str::to_string))
            .collect()
    }

    pub fn callbacks(&self) -> StreamCallbacks<'_> {
        let mut callbacks = StreamCallbacks::new();
        for channel in Channel::ALL {
            callbacks = callbacks.on_token(channel, move |t| {
                self.push(format!("{}:{t}", channel.event_name()))
            });
        }
        callbacks
            .on_round_complete(move |round| self.push(format!("round_complete:{}", round.number)))
            .on_converged(move || self.push("converged".to_string()))
            .on_article_done(move || self.push("article_done".to_string()))
            .on_done(move |_| self.push("done".to_string()))
    }
}
