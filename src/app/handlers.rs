//! Message and key handling for the App.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, error, info, warn};

use super::{App, AppMessage, Focus};
use crate::render::Notification;
use crate::traits::HttpClient;

/// Lines moved by PageUp/PageDown in the article pane.
const PAGE: u16 = 10;

impl<C: HttpClient + 'static> App<C> {
    /// Apply one message from the stream task.
    pub fn handle_message(&mut self, msg: AppMessage) {
        match msg {
            AppMessage::Token { channel, token } => {
                self.ui.on_token(channel, &token, Instant::now());
            }
            AppMessage::RoundComplete(round) => {
                debug!(round = round.number, "Round complete");
                self.ui.on_round_complete(round);
            }
            AppMessage::Converged => self.ui.on_converged(),
            AppMessage::ArticleDone => self.ui.on_article_done(),
            AppMessage::Done => self.ui.on_done(),
            AppMessage::Completed(Some(result)) => {
                info!(topic = ?result.topic(), "Article complete");
                self.ui.apply_terminal(result);
            }
            AppMessage::Completed(None) => {
                warn!("Stream ended without a final result");
                self.ui
                    .notify(Notification::warning("Stream ended without a final result"));
            }
            AppMessage::Failed(err) => {
                error!(code = err.error_code(), "Action failed: {}", err);
                self.ui.notify(Notification::error(err.user_message()));
            }
            AppMessage::Ended(kind) => {
                debug!(action = kind.label(), "Action ended");
                self.permit = None;
                self.ui.end_action();
            }
        }
        self.mark_dirty();
    }

    /// Handle a key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        self.mark_dirty();
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Char('c') if ctrl => self.quit(),
            KeyCode::Char('r') if ctrl => {
                self.continue_article();
            }
            KeyCode::Tab => self.focus = self.focus.toggle(),
            KeyCode::Esc => {
                if self.ui.notification().is_some() {
                    self.ui.dismiss_notification();
                } else {
                    self.focus = Focus::Input;
                }
            }
            _ => match self.focus {
                Focus::Input => self.handle_input_key(key),
                Focus::Article => self.handle_article_key(key),
            },
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => {
                self.submit_topic();
            }
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Char(c) => self.input.push(c),
            _ => {}
        }
    }

    fn handle_article_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.quit(),
            KeyCode::Char('c') => {
                self.continue_article();
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.article_scroll = self.article_scroll.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.article_scroll = self.article_scroll.saturating_add(1);
            }
            KeyCode::PageUp => self.article_scroll = self.article_scroll.saturating_sub(PAGE),
            KeyCode::PageDown => self.article_scroll = self.article_scroll.saturating_add(PAGE),
            KeyCode::Home | KeyCode::Char('g') => self.article_scroll = 0,
            _ => {}
        }
    }
}
