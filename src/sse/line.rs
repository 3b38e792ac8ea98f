//! Line classification and the decoded frame type.

/// Literal prefix of an event-name line.
pub const EVENT_PREFIX: &str = "event: ";

/// Literal prefix of a data line.
pub const DATA_PREFIX: &str = "data: ";

/// One decoded `(event_name, data)` pair.
///
/// `event_name` is empty when a `data:` line arrives without a preceding
/// `event:` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub event_name: String,
    pub data: String,
}

impl Frame {
    pub fn new(event_name: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            event_name: event_name.into(),
            data: data.into(),
        }
    }
}

/// A single classified line of the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SseLine<'a> {
    /// `event: <name>`; the name is everything after the prefix, untrimmed
    Event(&'a str),
    /// `data: <payload>`; the payload is everything after the prefix, untrimmed
    Data(&'a str),
    /// Blank separators, comments and anything else
    Ignored,
}

/// Classify one line (without its trailing `\n`).
///
/// Matching is on the exact prefixes, including the single space: `event:x`
/// and `data:x` are ignored.
pub fn parse_sse_line(line: &str) -> SseLine<'_> {
    if let Some(rest) = line.strip_prefix(EVENT_PREFIX) {
        return SseLine::Event(rest);
    }

    if let Some(rest) = line.strip_prefix(DATA_PREFIX) {
        return SseLine::Data(rest);
    }

    SseLine::Ignored
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_event_line() {
        assert_eq!(
            parse_sse_line("event: article_token"),
            SseLine::Event("article_token")
        );
    }

    #[test]
    fn test_parse_data_line() {
        assert_eq!(
            parse_sse_line(r#"data: "Hello""#),
            SseLine::Data(r#""Hello""#)
        );
    }

    #[test]
    fn test_remainder_is_not_trimmed() {
        assert_eq!(parse_sse_line("event:  padded "), SseLine::Event(" padded "));
        assert_eq!(parse_sse_line("data: \"x\"\r"), SseLine::Data("\"x\"\r"));
        assert_eq!(parse_sse_line("data: "), SseLine::Data(""));
    }

    #[test]
    fn test_prefix_without_space_is_ignored() {
        assert_eq!(parse_sse_line("event:done"), SseLine::Ignored);
        assert_eq!(parse_sse_line("data:{}"), SseLine::Ignored);
    }

    #[test]
    fn test_other_lines_ignored() {
        assert_eq!(parse_sse_line(""), SseLine::Ignored);
        assert_eq!(parse_sse_line(": keep-alive"), SseLine::Ignored);
        assert_eq!(parse_sse_line("id: 7"), SseLine::Ignored);
        assert_eq!(parse_sse_line("retry: 1000"), SseLine::Ignored);
        assert_eq!(parse_sse_line(" event: indented"), SseLine::Ignored);
    }
}
