//! Stateful frame decoder and the byte-stream adapter built on it.

use std::collections::VecDeque;

use bytes::Bytes;
use futures_util::stream::{self, Stream, StreamExt};

use super::line::{parse_sse_line, Frame, SseLine};
use super::utf8::Utf8Carry;
use crate::error::NetworkError;
use crate::traits::HttpError;

/// Turns raw response chunks into [`Frame`]s.
///
/// One decoder consumes exactly one response body. Between calls to
/// [`feed`](Self::feed) the line buffer never holds a complete
/// newline-terminated line.
#[derive(Debug, Default)]
pub struct FrameDecoder {
    utf8: Utf8Carry,
    buffer: String,
    event_name: String,
}

impl FrameDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the next chunk of the body, returning every frame it completes in
    /// arrival order.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<Frame> {
        let text = self.utf8.decode(chunk);
        self.buffer.push_str(&text);

        let Some(last_newline) = self.buffer.rfind('\n') else {
            return Vec::new();
        };

        let tail = self.buffer.split_off(last_newline + 1);
        let complete = std::mem::replace(&mut self.buffer, tail);

        let mut frames = Vec::new();
        for line in complete[..last_newline].split('\n') {
            self.process_line(line, &mut frames);
        }
        frames
    }

    /// End of body. The unterminated final line, if any, is discarded without
    /// being processed; the number of discarded bytes is returned.
    pub fn finish(&mut self) -> usize {
        let discarded = self.buffer.len() + self.utf8.discard();
        self.buffer.clear();
        self.event_name.clear();
        discarded
    }

    /// The partial line waiting for its newline.
    pub fn buffered(&self) -> &str {
        &self.buffer
    }

    /// The event name set by the last `event:` line and not yet consumed.
    pub fn active_event(&self) -> &str {
        &self.event_name
    }

    fn process_line(&mut self, line: &str, frames: &mut Vec<Frame>) {
        match parse_sse_line(line) {
            SseLine::Event(name) => {
                self.event_name.clear();
                self.event_name.push_str(name);
            }
            SseLine::Data(data) => {
                frames.push(Frame {
                    event_name: std::mem::take(&mut self.event_name),
                    data: data.to_string(),
                });
            }
            SseLine::Ignored => {}
        }
    }
}

/// Decode a response body into a lazy stream of frames.
///
/// A transport error while reading the body is yielded once as an `Err`; the
/// consumer is expected to stop there.
pub fn frames<S>(body: S) -> impl Stream<Item = Result<Frame, NetworkError>>
where
    S: Stream<Item = Result<Bytes, HttpError>> + Unpin,
{
    stream::unfold(
        (body, FrameDecoder::new(), VecDeque::new()),
        |(mut body, mut decoder, mut pending)| async move {
            loop {
                if let Some(frame) = pending.pop_front() {
                    return Some((Ok(frame), (body, decoder, pending)));
                }

                match body.next().await {
                    Some(Ok(chunk)) => pending.extend(decoder.feed(&chunk)),
                    Some(Err(err)) => {
                        return Some((Err(NetworkError::from(err)), (body, decoder, pending)));
                    }
                    None => {
                        let discarded = decoder.finish();
                        if discarded > 0 {
                            tracing::warn!(
                                discarded_bytes = discarded,
                                "stream ended inside an unterminated line; tail dropped"
                            );
                        }
                        return None;
                    }
                }
            }
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENARIO: &str = "event: article_token\ndata: \"Hello\"\n\nevent: article_token\ndata: \" world\"\n\nevent: done\ndata: \"{\\\"topic\\\":\\\"T\\\"}\"\n\n";

    fn decode_all(chunks: &[&[u8]]) -> Vec<Frame> {
        let mut decoder = FrameDecoder::new();
        let mut out = Vec::new();
        for chunk in chunks {
            out.extend(decoder.feed(chunk));
        }
        out
    }

    #[test]
    fn test_scenario_frames() {
        let frames = decode_all(&[SCENARIO.as_bytes()]);
        assert_eq!(
            frames,
            vec![
                Frame::new("article_token", "\"Hello\""),
                Frame::new("article_token", "\" world\""),
                Frame::new("done", r#""{\"topic\":\"T\"}""#),
            ]
        );
    }

    #[test]
    fn test_split_event_name() {
        let whole = decode_all(&[b"event: article_token\ndata: \"x\"\n"]);
        let split = decode_all(&[b"event: art", b"icle_token\ndata: \"x\"\n"]);
        assert_eq!(whole, split);
        assert_eq!(split[0].event_name, "article_token");
    }

    #[test]
    fn test_every_two_way_split_is_identical() {
        let text = "event: article_token\ndata: \"Größe 🦀\"\n\nevent: round_complete\ndata: {\"number\":1}\n\n";
        let bytes = text.as_bytes();
        let expected = decode_all(&[bytes]);
        assert_eq!(expected.len(), 2);
        for split in 0..=bytes.len() {
            let got = decode_all(&[&bytes[..split], &bytes[split..]]);
            assert_eq!(got, expected, "split at byte {}", split);
        }
    }

    #[test]
    fn test_byte_at_a_time_is_identical() {
        let bytes = SCENARIO.as_bytes();
        let chunks: Vec<&[u8]> = bytes.chunks(1).collect();
        assert_eq!(decode_all(&chunks), decode_all(&[bytes]));
    }

    #[test]
    fn test_buffer_never_holds_complete_line() {
        let mut decoder = FrameDecoder::new();
        for chunk in SCENARIO.as_bytes().chunks(7) {
            decoder.feed(chunk);
            assert!(!decoder.buffered().contains('\n'));
        }
    }

    #[test]
    fn test_event_name_reset_after_data() {
        let frames = decode_all(&[b"event: article_token\ndata: \"a\"\ndata: \"b\"\n"]);
        assert_eq!(
            frames,
            vec![
                Frame::new("article_token", "\"a\""),
                Frame::new("", "\"b\""),
            ]
        );
    }

    #[test]
    fn test_last_event_line_wins() {
        let frames = decode_all(&[b"event: one\nevent: two\ndata: x\n"]);
        assert_eq!(frames, vec![Frame::new("two", "x")]);
    }

    #[test]
    fn test_blank_and_comment_lines_ignored() {
        let frames = decode_all(&[b": ping\n\n\nevent: converged\n\ndata: \"\"\n"]);
        assert_eq!(frames, vec![Frame::new("converged", "\"\"")]);
    }

    #[test]
    fn test_unterminated_tail_is_discarded() {
        let mut decoder = FrameDecoder::new();
        let frames = decoder.feed(b"event: done\ndata: \"{}\"");
        assert!(frames.is_empty());
        assert_eq!(decoder.active_event(), "done");
        assert_eq!(decoder.finish(), "data: \"{}\"".len());
        assert_eq!(decoder.buffered(), "");
    }

    #[test]
    fn test_crlf_is_not_stripped() {
        let frames = decode_all(&[b"event: done\r\ndata: x\r\n"]);
        assert_eq!(frames, vec![Frame::new("done\r", "x\r")]);
    }

    #[tokio::test]
    async fn test_frames_stream_adapter() {
        let chunks = vec![
            Ok(Bytes::from_static(b"event: article_tok")),
            Ok(Bytes::from_static(b"en\ndata: \"Hel")),
            Ok(Bytes::from_static(b"lo\"\n\nevent: done\ndata: \"x\"")),
        ];
        let collected: Vec<_> = frames(stream::iter(chunks)).collect().await;
        assert_eq!(
            collected,
            vec![Ok(Frame::new("article_token", "\"Hello\""))]
        );
    }

    #[tokio::test]
    async fn test_frames_stream_surfaces_transport_error() {
        let chunks = vec![
            Ok(Bytes::from_static(b"event: article_token\ndata: \"a\"\n")),
            Err(HttpError::Io("connection reset".to_string())),
        ];
        let mut stream = Box::pin(frames(stream::iter(chunks)));
        assert_eq!(
            stream.next().await,
            Some(Ok(Frame::new("article_token", "\"a\"")))
        );
        assert!(matches!(
            stream.next().await,
            Some(Err(NetworkError::BodyRead { .. }))
        ));
    }
}
