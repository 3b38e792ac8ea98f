//! Controller-owned UI state with pure view derivations.

use std::time::{Duration, Instant};

use tracing::debug;

use super::buffers::ChannelBuffers;
use super::debounce::Debounce;
use super::decoded::{CategoriesView, Decoded, InfoboxView, ReferencesView, SeeAlsoView};
use super::phase::{PhaseTracker, PhaseTrigger};
use super::score::ConvergenceBadge;
use crate::dispatch::Channel;
use crate::markdown::{extract_headings, Heading};
use crate::models::{Round, TerminalResult};

/// Which backend action is streaming.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Start,
    Continue,
}

impl ActionKind {
    pub fn label(self) -> &'static str {
        match self {
            ActionKind::Start => "start",
            ActionKind::Continue => "continue",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Warning,
    Error,
}

/// One message surfaced at the end of an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }
}

/// Everything the view draws, accumulated from stream events.
///
/// The last terminal result survives new actions so it can be continued;
/// the provisional view is reset at the start of each action.
#[derive(Debug, Clone)]
pub struct UiState {
    topic: String,
    buffers: ChannelBuffers,
    phases: PhaseTracker,
    rounds: Vec<Round>,
    converged: bool,
    finished: bool,
    result: Option<TerminalResult>,
    action: Option<ActionKind>,
    notification: Option<Notification>,
    round_counter: Option<String>,
    outline: Vec<Heading>,
    outline_debounce: Debounce,
}

impl Default for UiState {
    fn default() -> Self {
        Self::new(super::debounce::DEFAULT_OUTLINE_DEBOUNCE)
    }
}

impl UiState {
    pub fn new(outline_debounce: Duration) -> Self {
        Self {
            topic: String::new(),
            buffers: ChannelBuffers::new(),
            phases: PhaseTracker::new(),
            rounds: Vec::new(),
            converged: false,
            finished: false,
            result: None,
            action: None,
            notification: None,
            round_counter: None,
            outline: Vec::new(),
            outline_debounce: Debounce::new(outline_debounce),
        }
    }

    // ---- stream events ----

    pub fn begin_action(&mut self, kind: ActionKind, topic: &str) {
        debug!(action = kind.label(), topic, "Begin action");
        self.topic = topic.to_string();
        self.buffers.clear();
        self.rounds.clear();
        self.converged = false;
        self.finished = false;
        self.action = Some(kind);
        self.notification = None;
        self.round_counter = None;
        self.outline.clear();
        self.outline_debounce.cancel();
        self.phases.apply(PhaseTrigger::ActionStarted);
    }

    pub fn on_token(&mut self, channel: Channel, token: &str, now: Instant) {
        if channel == Channel::Article && self.phases.revision_pending() {
            self.buffers.reset(Channel::Article);
        }
        self.phases.observe_token(channel);
        self.buffers.push(channel, token);
        if channel == Channel::Article {
            self.outline_debounce.touch(now);
        }
    }

    pub fn on_round_complete(&mut self, round: Round) {
        self.round_counter = Some(round.summary());
        self.rounds.push(round);
        self.phases.apply(PhaseTrigger::RoundComplete);
    }

    pub fn on_converged(&mut self) {
        self.converged = true;
    }

    pub fn on_article_done(&mut self) {
        self.phases.apply(PhaseTrigger::ArticleDone);
    }

    pub fn on_done(&mut self) {
        self.phases.apply(PhaseTrigger::Done);
    }

    /// Replace the provisional view with the authoritative result.
    pub fn apply_terminal(&mut self, result: TerminalResult) {
        match result.state() {
            Some(state) => {
                if !state.topic.is_empty() {
                    self.topic = state.topic;
                }
                self.buffers.set(Channel::Article, state.current_article);
                self.buffers.set(Channel::References, state.references);
                self.buffers.set(Channel::Infobox, state.infobox);
                self.buffers.set(Channel::SeeAlso, state.see_also);
                self.buffers.set(Channel::Category, state.categories);
                self.rounds = state.rounds;
                self.converged = state.converged;
            }
            None => debug!("Terminal result has no typed view; keeping streamed text"),
        }
        self.finished = true;
        self.phases.apply(PhaseTrigger::Done);
        self.rebuild_outline();
        self.result = Some(result);
    }

    /// Close the current action. Safe to call more than once.
    pub fn end_action(&mut self) {
        self.action = None;
    }

    pub fn notify(&mut self, notification: Notification) {
        self.notification = Some(notification);
    }

    pub fn dismiss_notification(&mut self) {
        self.notification = None;
    }

    /// Advance timers. Returns true when the view changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.outline_debounce.fire_if_due(now) {
            self.rebuild_outline();
            return true;
        }
        false
    }

    fn rebuild_outline(&mut self) {
        self.outline_debounce.cancel();
        self.outline = extract_headings(self.buffers.get(Channel::Article));
    }

    // ---- derivations ----

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn is_loading(&self) -> bool {
        self.action.is_some()
    }

    pub fn action(&self) -> Option<ActionKind> {
        self.action
    }

    pub fn article_markdown(&self) -> &str {
        self.buffers.get(Channel::Article)
    }

    pub fn channel_text(&self, channel: Channel) -> &str {
        self.buffers.get(channel)
    }

    pub fn buffers(&self) -> &ChannelBuffers {
        &self.buffers
    }

    pub fn outline(&self) -> &[Heading] {
        &self.outline
    }

    pub fn phases(&self) -> &PhaseTracker {
        &self.phases
    }

    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    pub fn round_counter(&self) -> Option<&str> {
        self.round_counter.as_deref()
    }

    pub fn is_converged(&self) -> bool {
        self.converged
    }

    pub fn convergence_badge(&self) -> Option<ConvergenceBadge> {
        if self.converged {
            Some(ConvergenceBadge::Converged)
        } else if self.finished && !self.rounds.is_empty() {
            Some(ConvergenceBadge::MaxRoundsReached)
        } else {
            None
        }
    }

    pub fn infobox(&self) -> Option<InfoboxView> {
        Decoded::parse(self.buffers.get(Channel::Infobox))
    }

    pub fn references(&self) -> Option<ReferencesView> {
        Decoded::parse(self.buffers.get(Channel::References))
    }

    pub fn see_also(&self) -> Option<SeeAlsoView> {
        Decoded::parse(self.buffers.get(Channel::SeeAlso))
    }

    pub fn categories(&self) -> Option<CategoriesView> {
        Decoded::parse(self.buffers.get(Channel::Category))
    }

    pub fn result(&self) -> Option<&TerminalResult> {
        self.result.as_ref()
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Evaluation;
    use crate::render::phase::{Phase, PhaseStatus};
    use serde_json::json;

    fn round(number: u32, overall: f64) -> Round {
        Round {
            number,
            evaluation: Evaluation {
                overall,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_tokens_accumulate() {
        let now = Instant::now();
        let mut state = UiState::default();
        state.begin_action(ActionKind::Start, "T");
        state.on_token(Channel::Article, "Hello", now);
        state.on_token(Channel::Article, " world", now);
        assert_eq!(state.article_markdown(), "Hello world");
        assert!(state.is_loading());
    }

    #[test]
    fn test_revision_replaces_article() {
        let now = Instant::now();
        let mut state = UiState::default();
        state.begin_action(ActionKind::Start, "T");
        state.on_token(Channel::Article, "draft one", now);
        state.on_token(Channel::Evaluation, "ok", now);
        state.on_round_complete(round(1, 6.0));
        assert_eq!(state.article_markdown(), "draft one");

        state.on_token(Channel::Article, "draft", now);
        state.on_token(Channel::Article, " two", now);
        assert_eq!(state.article_markdown(), "draft two");
        assert_eq!(state.phases().status(Phase::Revise), PhaseStatus::Active);
    }

    #[test]
    fn test_round_counter_text() {
        let mut state = UiState::default();
        state.begin_action(ActionKind::Start, "T");
        state.on_round_complete(round(1, 7.34));
        assert_eq!(state.round_counter(), Some("Round 1 complete (score: 7.3)"));
        state.on_round_complete(round(2, 8.0));
        assert_eq!(state.round_counter(), Some("Round 2 complete (score: 8.0)"));
        assert_eq!(state.rounds().len(), 2);
    }

    #[test]
    fn test_outline_is_debounced() {
        let start = Instant::now();
        let mut state = UiState::new(Duration::from_millis(500));
        state.begin_action(ActionKind::Start, "T");
        state.on_token(Channel::Article, "# Title\n\n## Sec", start);
        assert!(state.outline().is_empty());

        assert!(!state.tick(start + Duration::from_millis(100)));
        state.on_token(Channel::Article, "tion\n", start + Duration::from_millis(200));
        assert!(!state.tick(start + Duration::from_millis(600)));
        assert!(state.tick(start + Duration::from_millis(700)));
        assert_eq!(
            state.outline(),
            &[Heading::new(1, "Title"), Heading::new(2, "Section")]
        );
    }

    #[test]
    fn test_badge_rules() {
        let mut state = UiState::default();
        state.begin_action(ActionKind::Start, "T");
        state.on_round_complete(round(1, 5.0));
        assert_eq!(state.convergence_badge(), None);

        state.apply_terminal(TerminalResult::new(json!({
            "topic": "T",
            "current_article": "x",
            "rounds": [{"number": 1}],
            "converged": false
        })));
        assert_eq!(
            state.convergence_badge(),
            Some(ConvergenceBadge::MaxRoundsReached)
        );

        state.begin_action(ActionKind::Continue, "T");
        assert_eq!(state.convergence_badge(), None);
        state.on_converged();
        assert_eq!(state.convergence_badge(), Some(ConvergenceBadge::Converged));
    }

    #[test]
    fn test_apply_terminal_replaces_provisional_state() {
        let now = Instant::now();
        let mut state = UiState::default();
        state.begin_action(ActionKind::Start, "typed topic");
        state.on_token(Channel::Article, "partial", now);
        state.on_token(Channel::Infobox, "{\"rows\":", now);

        state.apply_terminal(TerminalResult::new(json!({
            "topic": "Canonical Topic",
            "current_article": "# Final\n\nBody",
            "infobox": "{\"rows\":[{\"field\":\"A\",\"value\":\"B\"}]}",
            "categories": "Science, History",
            "rounds": [],
            "converged": true
        })));

        assert_eq!(state.topic(), "Canonical Topic");
        assert_eq!(state.article_markdown(), "# Final\n\nBody");
        assert!(state.infobox().unwrap().is_structured());
        assert_eq!(
            state.categories().unwrap().raw(),
            Some("Science, History")
        );
        assert_eq!(state.outline(), &[Heading::new(1, "Final")]);
        assert!(state.result().is_some());
        assert!(state.phases().active().is_empty());
    }

    #[test]
    fn test_untyped_result_keeps_streamed_text() {
        let now = Instant::now();
        let mut state = UiState::default();
        state.begin_action(ActionKind::Start, "T");
        state.on_token(Channel::Article, "streamed", now);
        state.apply_terminal(TerminalResult::new(json!(["unexpected"])));
        assert_eq!(state.article_markdown(), "streamed");
        assert!(state.result().is_some());
    }

    #[test]
    fn test_result_survives_new_action() {
        let mut state = UiState::default();
        state.begin_action(ActionKind::Start, "T");
        state.apply_terminal(TerminalResult::new(json!({"topic": "T"})));
        state.end_action();
        state.begin_action(ActionKind::Continue, "T");
        assert!(state.result().is_some());
        assert_eq!(state.article_markdown(), "");
    }

    #[test]
    fn test_end_action_and_notification() {
        let mut state = UiState::default();
        state.begin_action(ActionKind::Start, "T");
        state.notify(Notification::error("Failed to generate article: boom"));
        state.end_action();
        state.end_action();
        assert!(!state.is_loading());
        assert_eq!(
            state.notification().unwrap().level,
            NotificationLevel::Error
        );
        state.dismiss_notification();
        assert!(state.notification().is_none());
    }
}
