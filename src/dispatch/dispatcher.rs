use bytes::Bytes;
use futures_util::{Stream, StreamExt};
use tracing::{debug, info, warn};

use super::callbacks::{StreamCallbacks, StructuralHandlers, TokenRegistry};
use super::channel::Channel;
use crate::error::{EncycloResult, StreamError};
use crate::models::{Round, TerminalResult};
use crate::sse::{frames, Frame};
use crate::traits::HttpError;

pub const ROUND_COMPLETE: &str = "round_complete";
pub const CONVERGED: &str = "converged";
pub const ARTICLE_DONE: &str = "article_done";
pub const DONE: &str = "done";
pub const ERROR: &str = "error";

/// Counters kept while dispatching one stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchStats {
    pub frames: usize,
    pub tokens: usize,
    pub structural: usize,
    pub ignored: usize,
}

/// Routes decoded frames to the caller's handlers.
///
/// Holds the terminal result once a `done` frame arrives; the stream keeps
/// draining after that.
pub struct StreamDispatcher<'a> {
    registry: TokenRegistry<'a>,
    handlers: StructuralHandlers<'a>,
    result: Option<TerminalResult>,
    stats: DispatchStats,
}

impl<'a> StreamDispatcher<'a> {
    pub fn new(callbacks: StreamCallbacks<'a>) -> Self {
        let (registry, handlers) = callbacks.into_parts();
        Self {
            registry,
            handlers,
            result: None,
            stats: DispatchStats::default(),
        }
    }

    /// Handle one frame.
    ///
    /// An `error` frame, or a payload that fails to decode, returns `Err`; the
    /// caller must not dispatch further frames after that.
    pub fn dispatch(&mut self, frame: &Frame) -> Result<(), StreamError> {
        self.stats.frames += 1;
        let name = frame.event_name.as_str();

        if let Some(callback) = self.registry.get_mut(name) {
            let token: String = serde_json::from_str(&frame.data)
                .map_err(|e| StreamError::invalid_json(name, &e))?;
            callback(token);
            self.stats.tokens += 1;
            return Ok(());
        }

        match name {
            ROUND_COMPLETE => {
                let round: Round = serde_json::from_str(&frame.data)
                    .map_err(|e| StreamError::invalid_json(name, &e))?;
                debug!(round = round.number, overall = round.evaluation.overall, "Round complete");
                if let Some(f) = self.handlers.on_round_complete.as_mut() {
                    f(round);
                }
            }
            CONVERGED => {
                debug!("Converged");
                if let Some(f) = self.handlers.on_converged.as_mut() {
                    f();
                }
            }
            ARTICLE_DONE => {
                debug!("Article done");
                if let Some(f) = self.handlers.on_article_done.as_mut() {
                    f();
                }
            }
            DONE => {
                let result = TerminalResult::from_done_payload(&frame.data)
                    .map_err(|e| StreamError::invalid_json(name, &e))?;
                if self.result.is_some() {
                    warn!("Received a second done frame; replacing the earlier result");
                }
                if let Some(f) = self.handlers.on_done.as_mut() {
                    f(&result);
                }
                self.result = Some(result);
            }
            ERROR => {
                let message: String = serde_json::from_str(&frame.data)
                    .map_err(|e| StreamError::invalid_json(name, &e))?;
                return Err(StreamError::Backend { message });
            }
            _ => {
                if Channel::from_event_name(name).is_some() {
                    debug!(event = name, "No handler registered for token event");
                } else {
                    debug!(event = name, "Ignoring unknown event");
                }
                self.stats.ignored += 1;
                return Ok(());
            }
        }

        self.stats.structural += 1;
        Ok(())
    }

    /// Deliver a terminal result that arrived outside the event stream (the
    /// non-streaming JSON response), as if a `done` frame carried it.
    pub fn accept_result(&mut self, result: TerminalResult) {
        if let Some(f) = self.handlers.on_done.as_mut() {
            f(&result);
        }
        self.result = Some(result);
    }

    pub fn result(&self) -> Option<&TerminalResult> {
        self.result.as_ref()
    }

    pub fn stats(&self) -> DispatchStats {
        self.stats
    }

    pub fn finish(self) -> (Option<TerminalResult>, DispatchStats) {
        (self.result, self.stats)
    }
}

/// Read a response body to the end, dispatching every frame.
///
/// Returns the terminal result, or `None` when the body ended without a
/// `done` frame. Transport failures, `error` frames and undecodable payloads
/// abort with an error and no partial result.
pub async fn consume_stream<S>(
    body: S,
    callbacks: StreamCallbacks<'_>,
) -> EncycloResult<Option<TerminalResult>>
where
    S: Stream<Item = Result<Bytes, HttpError>> + Unpin,
{
    let mut dispatcher = StreamDispatcher::new(callbacks);
    let mut frames = Box::pin(frames(body));

    while let Some(frame) = frames.next().await {
        let frame = frame?;
        if let Err(err) = dispatcher.dispatch(&frame) {
            warn!(
                error_code = err.error_code(),
                frames = dispatcher.stats().frames,
                "Stream aborted: {}",
                err
            );
            return Err(err.into());
        }
    }

    let (result, stats) = dispatcher.finish();
    info!(
        frames = stats.frames,
        tokens = stats.tokens,
        structural = stats.structural,
        ignored = stats.ignored,
        "Stream finished"
    );
    if result.is_none() {
        warn!("Stream ended without a final result");
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use futures_util::stream;
    use serde_json::json;

    use super::*;
    use crate::error::{EncycloError, NetworkError};

    type Log = Arc<Mutex<Vec<String>>>;

    fn body(chunks: &[&str]) -> impl Stream<Item = Result<Bytes, HttpError>> + Unpin {
        let owned: Vec<_> = chunks
            .iter()
            .map(|c| Ok(Bytes::from(c.to_string())))
            .collect();
        stream::iter(owned)
    }

    fn recording_callbacks(log: &Log) -> StreamCallbacks<'static> {
        let mut callbacks = StreamCallbacks::new();
        for channel in Channel::ALL {
            let log = Arc::clone(log);
            callbacks = callbacks.on_token(channel, move |t| {
                log.lock().unwrap().push(format!("{}:{}", channel.event_name(), t))
            });
        }
        let l = Arc::clone(log);
        callbacks = callbacks.on_round_complete(move |r| {
            l.lock().unwrap().push(format!("round:{}", r.number))
        });
        let l = Arc::clone(log);
        callbacks = callbacks.on_converged(move || l.lock().unwrap().push("converged".into()));
        let l = Arc::clone(log);
        callbacks = callbacks.on_article_done(move || l.lock().unwrap().push("article_done".into()));
        let l = Arc::clone(log);
        callbacks.on_done(move |_| l.lock().unwrap().push("done".into()))
    }

    #[tokio::test]
    async fn test_hello_world_done() {
        let tokens = Arc::new(Mutex::new(Vec::new()));
        let t = Arc::clone(&tokens);
        let callbacks =
            StreamCallbacks::new().on_token(Channel::Article, move |s| t.lock().unwrap().push(s));

        let result = consume_stream(
            body(&[
                "event: article_token\ndata: \"Hello\"\n\n",
                "event: article_token\ndata: \" world\"\n\n",
                "event: done\ndata: \"{\\\"topic\\\":\\\"T\\\"}\"\n\n",
            ]),
            callbacks,
        )
        .await
        .unwrap();

        assert_eq!(*tokens.lock().unwrap(), vec!["Hello", " world"]);
        assert_eq!(result.unwrap().value(), &json!({"topic": "T"}));
    }

    #[tokio::test]
    async fn test_split_event_name_dispatches_once() {
        let log: Log = Arc::default();
        consume_stream(
            body(&["event: art", "icle_token\ndata: \"x\"\n\n"]),
            recording_callbacks(&log),
        )
        .await
        .unwrap();
        assert_eq!(*log.lock().unwrap(), vec!["article_token:x"]);
    }

    #[tokio::test]
    async fn test_round_complete_structure() {
        let rounds = Arc::new(Mutex::new(Vec::new()));
        let r = Arc::clone(&rounds);
        let callbacks = StreamCallbacks::new().on_round_complete(move |round| r.lock().unwrap().push(round));

        consume_stream(
            body(&[concat!(
                "event: round_complete\n",
                "data: {\"number\":1,\"article\":\"...\",\"evaluation\":{\"scores\":{\"factual_accuracy\":8,",
                "\"completeness\":7,\"neutrality\":9,\"clarity\":8,\"structure\":7},\"overall\":7.8,\"critical_issues\":[]}}\n\n"
            )]),
            callbacks,
        )
        .await
        .unwrap();

        let rounds = rounds.lock().unwrap();
        assert_eq!(rounds.len(), 1);
        assert_eq!(rounds[0].number, 1);
        assert_eq!(rounds[0].evaluation.scores.factual_accuracy, 8);
        assert!((rounds[0].evaluation.overall - 7.8).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_events_dispatched_in_order() {
        let log: Log = Arc::default();
        let result = consume_stream(
            body(&[
                "event: article_token\ndata: \"a\"\n\n",
                "event: evaluation_token\ndata: \"e\"\n\n",
                "event: revision_plan_token\ndata: \"p\"\n\n",
                "event: round_complete\ndata: {\"number\":1}\n\n",
                "event: converged\ndata: \"\"\n\n",
                "event: article_done\ndata: \"\"\n\n",
                "event: seealso_token\ndata: \"s\"\n\n",
                "event: done\ndata: \"{}\"\n\n",
            ]),
            recording_callbacks(&log),
        )
        .await
        .unwrap();

        assert!(result.is_some());
        assert_eq!(
            *log.lock().unwrap(),
            vec![
                "article_token:a",
                "evaluation_token:e",
                "revision_plan_token:p",
                "round:1",
                "converged",
                "article_done",
                "seealso_token:s",
                "done",
            ]
        );
    }

    #[tokio::test]
    async fn test_error_frame_aborts() {
        let log: Log = Arc::default();
        let err = consume_stream(
            body(&[
                "event: article_token\ndata: \"a\"\n\n",
                "event: article_token\ndata: \"b\"\n\n",
                "event: error\ndata: \"model overloaded\"\n\n",
                "event: article_token\ndata: \"c\"\n\n",
                "event: done\ndata: \"{}\"\n\n",
            ]),
            recording_callbacks(&log),
        )
        .await
        .unwrap_err();

        assert!(matches!(
            err,
            EncycloError::Stream(StreamError::Backend { ref message }) if message == "model overloaded"
        ));
        assert_eq!(*log.lock().unwrap(), vec!["article_token:a", "article_token:b"]);
    }

    #[tokio::test]
    async fn test_missing_done_is_not_an_error() {
        let log: Log = Arc::default();
        let result = consume_stream(
            body(&["event: article_token\ndata: \"a\"\n\n"]),
            recording_callbacks(&log),
        )
        .await
        .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_done_without_trailing_newline_is_lost() {
        let result = consume_stream(
            body(&["event: done\ndata: \"{}\""]),
            StreamCallbacks::new(),
        )
        .await
        .unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_unregistered_and_unknown_events_ignored() {
        let tokens = Arc::new(Mutex::new(Vec::new()));
        let t = Arc::clone(&tokens);
        let callbacks =
            StreamCallbacks::new().on_token(Channel::Article, move |s| t.lock().unwrap().push(s));

        let mut dispatcher = StreamDispatcher::new(callbacks);
        dispatcher
            .dispatch(&Frame::new("critique_token", "not even json"))
            .unwrap();
        dispatcher.dispatch(&Frame::new("heartbeat", "{}")).unwrap();
        dispatcher.dispatch(&Frame::new("", "\"orphan\"")).unwrap();
        dispatcher
            .dispatch(&Frame::new("article_token", "\"kept\""))
            .unwrap();

        assert_eq!(*tokens.lock().unwrap(), vec!["kept"]);
        assert_eq!(
            dispatcher.stats(),
            DispatchStats {
                frames: 4,
                tokens: 1,
                structural: 0,
                ignored: 3,
            }
        );
    }

    #[tokio::test]
    async fn test_invalid_token_payload_aborts() {
        let err = consume_stream(
            body(&["event: article_token\ndata: Hello\n\n"]),
            StreamCallbacks::new().on_token(Channel::Article, |_| {}),
        )
        .await
        .unwrap_err();
        assert!(matches!(
            err,
            EncycloError::Stream(StreamError::InvalidJson { ref event_type, .. }) if event_type == "article_token"
        ));
    }

    #[tokio::test]
    async fn test_single_encoded_done_aborts() {
        let err = consume_stream(body(&["event: done\ndata: {\"topic\":\"T\"}\n"]), StreamCallbacks::new())
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "E_STREAM_JSON");
    }

    #[tokio::test]
    async fn test_stream_keeps_draining_after_done() {
        let log: Log = Arc::default();
        let result = consume_stream(
            body(&[
                "event: done\ndata: \"{\\\"topic\\\":\\\"first\\\"}\"\n\n",
                "event: article_token\ndata: \"late\"\n\n",
            ]),
            recording_callbacks(&log),
        )
        .await
        .unwrap();
        assert_eq!(result.unwrap().topic(), Some("first"));
        assert_eq!(*log.lock().unwrap(), vec!["done", "article_token:late"]);
    }

    #[tokio::test]
    async fn test_transport_error_surfaces() {
        let chunks = vec![
            Ok(Bytes::from_static(b"event: article_token\ndata: \"a\"\n")),
            Err(HttpError::Io("reset".to_string())),
        ];
        let err = consume_stream(stream::iter(chunks), StreamCallbacks::new())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            EncycloError::Network(NetworkError::BodyRead { .. })
        ));
    }

    #[tokio::test]
    async fn test_multibyte_token_split_across_chunks() {
        let tokens = Arc::new(Mutex::new(String::new()));
        let t = Arc::clone(&tokens);
        let callbacks = StreamCallbacks::new()
            .on_token(Channel::Article, move |s| t.lock().unwrap().push_str(&s));

        let text = "event: article_token\ndata: \"Größe 🦀\"\n\n".as_bytes();
        let mid_crab = text.len() - 5;
        let chunks = vec![
            Ok(Bytes::copy_from_slice(&text[..mid_crab])),
            Ok(Bytes::copy_from_slice(&text[mid_crab..])),
        ];
        consume_stream(stream::iter(chunks), callbacks).await.unwrap();
        assert_eq!(*tokens.lock().unwrap(), "Größe 🦀");
    }
}
