//! Headless mode: run one start or continue action without the TUI.
//!
//! Article tokens are written to `out` as they arrive. Round summaries and the
//! final report go to `report`, so stdout can be piped straight to a file.

use std::io::Write;
use std::path::Path;

use tracing::{info, warn};

use super::args::{HeadlessArgs, HeadlessSource};
use crate::client::EncycloClient;
use crate::dispatch::{Channel, StreamCallbacks};
use crate::error::{classify_io_error, EncycloResult, StreamError};
use crate::models::{Round, StartRequest, TerminalResult};
use crate::render::ConvergenceBadge;
use crate::traits::HttpClient;

/// What a headless run observed.
#[derive(Debug, Default)]
pub struct HeadlessOutcome {
    pub result: Option<TerminalResult>,
    pub rounds: Vec<Round>,
    pub converged: bool,
}

impl HeadlessOutcome {
    /// Same rule as the TUI sidebar: max-rounds only when rounds ran.
    pub fn badge(&self) -> Option<ConvergenceBadge> {
        let state = self.result.as_ref()?.state();
        let converged = self.converged || state.map(|s| s.converged).unwrap_or(false);
        if converged {
            Some(ConvergenceBadge::Converged)
        } else if self.round_count() > 0 {
            Some(ConvergenceBadge::MaxRoundsReached)
        } else {
            None
        }
    }

    /// Rounds in the final result, or those observed on the stream when the
    /// result has no typed view.
    pub fn round_count(&self) -> usize {
        self.result
            .as_ref()
            .and_then(TerminalResult::state)
            .map(|s| s.rounds.len())
            .unwrap_or(self.rounds.len())
    }
}

/// Run the action described by `args` against `client`.
pub async fn run_headless<C, W, R>(
    client: &EncycloClient<C>,
    args: &HeadlessArgs,
    max_rounds: u32,
    out: &mut W,
    report: &mut R,
) -> EncycloResult<HeadlessOutcome>
where
    C: HttpClient,
    W: Write + Send,
    R: Write + Send,
{
    let mut rounds = Vec::new();
    let mut converged = false;

    let callbacks = StreamCallbacks::new()
        .on_token(Channel::Article, |token| {
            let _ = out.write_all(token.as_bytes());
            let _ = out.flush();
        })
        .on_round_complete(|round| {
            let _ = writeln!(report, "\n{}", round.summary());
            rounds.push(round);
        })
        .on_converged(|| converged = true);

    let result = match &args.source {
        HeadlessSource::Start { topic } => {
            let request = StartRequest::new(topic)?.with_max_rounds(i64::from(max_rounds));
            client.start(&request, callbacks).await?
        }
        HeadlessSource::Continue { path } => {
            let previous = load_result(path).await?;
            client.continue_article(&previous, callbacks).await?
        }
    };

    writeln!(out)?;
    out.flush()?;

    let outcome = HeadlessOutcome {
        result,
        rounds,
        converged,
    };
    write_report(&outcome, report)?;

    match (&outcome.result, &args.output) {
        (Some(result), Some(path)) => {
            save_result(result, path).await?;
            writeln!(report, "Saved result to {}", path.display())?;
        }
        (None, Some(path)) => {
            warn!(path = %path.display(), "No result to save");
        }
        _ => {}
    }

    Ok(outcome)
}

fn write_report<R: Write>(outcome: &HeadlessOutcome, report: &mut R) -> std::io::Result<()> {
    if outcome.result.is_none() {
        writeln!(report, "Stream ended without a final result")?;
        return Ok(());
    }

    if let Some(last) = outcome.rounds.last() {
        let scores = last
            .evaluation
            .scores
            .labelled()
            .iter()
            .map(|(label, score)| format!("{label} {score}/10"))
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(report, "Scores: {scores}")?;
    }

    match outcome.badge() {
        Some(badge) => writeln!(
            report,
            "{} after {} round(s)",
            badge.label(),
            outcome.round_count()
        )?,
        None => writeln!(report, "Article complete")?,
    }
    report.flush()
}

/// Read a terminal result saved by `--output`.
pub async fn load_result(path: &Path) -> EncycloResult<TerminalResult> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| classify_io_error(e, Some(path.to_path_buf()), "read result"))?;
    info!(path = %path.display(), "Loaded previous result");
    Ok(TerminalResult::from_body(&text)?)
}

pub async fn save_result(result: &TerminalResult, path: &Path) -> EncycloResult<()> {
    let body =
        serde_json::to_string_pretty(result.value()).map_err(|e| StreamError::InvalidResult {
            message: e.to_string(),
        })?;
    tokio::fs::write(path, body)
        .await
        .map_err(|e| classify_io_error(e, Some(path.to_path_buf()), "write result"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use serde_json::json;
    use tempfile::TempDir;

    use super::*;
    use crate::adapters::mock::{MockHttpClient, MockResponse};
    use crate::cli::args::CommonArgs;
    use crate::client::{CONTINUE_PATH, START_PATH};
    use crate::error::{EncycloError, SystemError, UserError};

    const STREAM: &str = concat!(
        "event: article_token\ndata: \"# Rust\\n\\nA \"\n\n",
        "event: article_token\ndata: \"language.\"\n\n",
        "event: round_complete\n",
        "data: {\"number\":1,\"article\":\"# Rust\",\"evaluation\":{\"scores\":{\"factual_accuracy\":9,\"completeness\":8,\"neutrality\":9,\"clarity\":8,\"structure\":7},\"overall\":8.2,\"critical_issues\":[]}}\n\n",
        "event: converged\ndata: {}\n\n",
        "event: done\n",
        "data: \"{\\\"topic\\\":\\\"Rust\\\",\\\"rounds\\\":[{}],\\\"converged\\\":true}\"\n\n",
    );

    fn start_args(topic: &str, output: Option<PathBuf>) -> HeadlessArgs {
        HeadlessArgs {
            source: HeadlessSource::Start {
                topic: topic.to_string(),
            },
            output,
            common: CommonArgs::default(),
        }
    }

    fn client(mock: &MockHttpClient) -> EncycloClient<MockHttpClient> {
        EncycloClient::new("http://localhost:8080", mock.clone())
    }

    #[tokio::test]
    async fn test_start_streams_article_and_reports() {
        let mock = MockHttpClient::new();
        mock.set_response(START_PATH, MockResponse::sse_chunks([STREAM]));

        let mut out = Vec::new();
        let mut report = Vec::new();
        let outcome = run_headless(&client(&mock), &start_args("Rust", None), 2, &mut out, &mut report)
            .await
            .unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "# Rust\n\nA language.\n");
        let report = String::from_utf8(report).unwrap();
        assert!(report.contains("Round 1 complete (score: 8.2)"));
        assert!(report.contains("Scores: Accuracy 9/10, Completeness 8/10"));
        assert!(report.contains("Converged after 1 round(s)"));
        assert_eq!(outcome.rounds.len(), 1);
        assert_eq!(outcome.badge(), Some(ConvergenceBadge::Converged));

        let sent: serde_json::Value =
            serde_json::from_str(mock.get_requests()[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(sent, json!({"topic": "Rust", "max_rounds": 2}));
    }

    #[tokio::test]
    async fn test_output_file_can_be_continued() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rust.json");

        let mock = MockHttpClient::new();
        mock.set_response(START_PATH, MockResponse::sse_chunks([STREAM]));
        mock.set_response(
            CONTINUE_PATH,
            MockResponse::sse_chunks([
                "event: done\ndata: \"{\\\"topic\\\":\\\"Rust\\\",\\\"rounds\\\":[{},{}],\\\"converged\\\":false}\"\n\n",
            ]),
        );

        run_headless(
            &client(&mock),
            &start_args("Rust", Some(path.clone())),
            3,
            &mut Vec::new(),
            &mut Vec::new(),
        )
        .await
        .unwrap();

        let saved = load_result(&path).await.unwrap();
        assert_eq!(saved.topic(), Some("Rust"));

        let args = HeadlessArgs {
            source: HeadlessSource::Continue { path: path.clone() },
            output: None,
            common: CommonArgs::default(),
        };
        let mut report = Vec::new();
        let outcome = run_headless(&client(&mock), &args, 3, &mut Vec::new(), &mut report)
            .await
            .unwrap();

        let requests = mock.get_requests();
        assert!(requests[1].url.ends_with(CONTINUE_PATH));
        let sent: serde_json::Value = serde_json::from_str(requests[1].body.as_deref().unwrap()).unwrap();
        assert_eq!(&sent, saved.value());

        assert_eq!(outcome.badge(), Some(ConvergenceBadge::MaxRoundsReached));
        assert!(String::from_utf8(report)
            .unwrap()
            .contains("Max rounds reached after 2 round(s)"));
    }

    #[tokio::test]
    async fn test_missing_done_reports_no_result() {
        let mock = MockHttpClient::new();
        mock.set_response(
            START_PATH,
            MockResponse::sse_chunks(["event: article_token\ndata: \"partial\"\n\n"]),
        );

        let mut out = Vec::new();
        let mut report = Vec::new();
        let outcome = run_headless(&client(&mock), &start_args("Rust", None), 3, &mut out, &mut report)
            .await
            .unwrap();

        assert!(outcome.result.is_none());
        assert_eq!(outcome.badge(), None);
        assert_eq!(String::from_utf8(out).unwrap(), "partial\n");
        assert!(String::from_utf8(report)
            .unwrap()
            .contains("Stream ended without a final result"));
    }

    #[tokio::test]
    async fn test_result_without_rounds_has_no_badge() {
        let mock = MockHttpClient::new();
        mock.set_response(
            START_PATH,
            MockResponse::sse_chunks([
                "event: article_token\ndata: \"text\"\n\nevent: done\ndata: \"{\\\"topic\\\":\\\"Rust\\\",\\\"current_article\\\":\\\"text\\\"}\"\n\n",
            ]),
        );

        let mut report = Vec::new();
        let outcome = run_headless(
            &client(&mock),
            &start_args("Rust", None),
            3,
            &mut Vec::new(),
            &mut report,
        )
        .await
        .unwrap();

        assert!(outcome.result.is_some());
        assert_eq!(outcome.round_count(), 0);
        assert_eq!(outcome.badge(), None);
        let report = String::from_utf8(report).unwrap();
        assert!(report.contains("Article complete"));
        assert!(!report.contains("Max rounds reached"));
    }

    #[tokio::test]
    async fn test_blank_topic_sends_nothing() {
        let mock = MockHttpClient::new();
        let err = run_headless(
            &client(&mock),
            &start_args("   ", None),
            3,
            &mut Vec::new(),
            &mut Vec::new(),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, EncycloError::User(UserError::EmptyTopic)));
        assert!(mock.get_requests().is_empty());
    }

    #[tokio::test]
    async fn test_missing_continue_file() {
        let dir = TempDir::new().unwrap();
        let err = load_result(&dir.path().join("nope.json")).await.unwrap_err();
        assert!(matches!(
            err,
            EncycloError::System(SystemError::FileNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_continue_file_must_hold_an_object() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "[1, 2]").unwrap();

        let err = load_result(&path).await.unwrap_err();
        assert!(matches!(err, EncycloError::Stream(StreamError::InvalidResult { .. })));
    }
}
