//! Start and continue actions: validation, gating, and the stream task.

use tokio::sync::mpsc;
use tracing::{info, warn};

use super::{ActionPermit, App, AppMessage};
use crate::client::EncycloClient;
use crate::dispatch::{Channel, StreamCallbacks};
use crate::error::UserError;
use crate::models::{StartRequest, TerminalResult};
use crate::render::{ActionKind, Notification};
use crate::traits::HttpClient;

enum ActionRequest {
    Start(StartRequest),
    Continue(TerminalResult),
}

/// Travels with the stream task. Dropping it tells the UI the action is over
/// on every exit path, including a panic or a task that never ran. The UI
/// releases the permit only when it handles that `Ended`, after every earlier
/// message of the action.
struct ActionTicket {
    kind: ActionKind,
    tx: mpsc::UnboundedSender<AppMessage>,
}

impl Drop for ActionTicket {
    fn drop(&mut self) {
        let _ = self.tx.send(AppMessage::Ended(self.kind));
    }
}

impl<C: HttpClient + 'static> App<C> {
    /// Start generating the topic in the input line.
    ///
    /// Returns false when the action was rejected; the reason is shown as a
    /// notification.
    pub fn submit_topic(&mut self) -> bool {
        let request = match StartRequest::new(&self.input) {
            Ok(request) => request.with_max_rounds(i64::from(self.max_rounds)),
            Err(e) => return self.reject(e),
        };
        let Some(permit) = self.gate.try_acquire() else {
            return self.reject(UserError::ActionInProgress);
        };

        self.ui.begin_action(ActionKind::Start, &request.topic);
        self.article_scroll = 0;
        self.spawn_action(ActionKind::Start, permit, ActionRequest::Start(request));
        true
    }

    /// Run another critique/revise pass on the last terminal result.
    pub fn continue_article(&mut self) -> bool {
        let Some(previous) = self.ui.result().cloned() else {
            return self.reject(UserError::NothingToContinue);
        };
        let Some(permit) = self.gate.try_acquire() else {
            return self.reject(UserError::ActionInProgress);
        };

        let topic = previous.topic().unwrap_or(self.ui.topic()).to_string();
        self.ui.begin_action(ActionKind::Continue, &topic);
        self.spawn_action(ActionKind::Continue, permit, ActionRequest::Continue(previous));
        true
    }

    fn reject(&mut self, err: UserError) -> bool {
        warn!(code = err.error_code(), "Action rejected: {}", err);
        self.ui.notify(Notification::warning(err.user_message()));
        self.mark_dirty();
        false
    }

    fn spawn_action(&mut self, kind: ActionKind, permit: ActionPermit, request: ActionRequest) {
        info!(action = kind.label(), "Spawning stream task");
        self.mark_dirty();

        self.permit = Some(permit);

        let client: EncycloClient<C> = self.client.clone();
        let tx = self.message_tx.clone();
        let ticket = ActionTicket {
            kind,
            tx: tx.clone(),
        };

        tokio::spawn(async move {
            let _ticket = ticket;
            let callbacks = forward_to(&tx);
            let outcome = match request {
                ActionRequest::Start(request) => client.start(&request, callbacks).await,
                ActionRequest::Continue(previous) => {
                    client.continue_article(&previous, callbacks).await
                }
            };
            let message = match outcome {
                Ok(result) => AppMessage::Completed(result),
                Err(e) => AppMessage::Failed(e),
            };
            let _ = tx.send(message);
        });
    }
}

/// Callbacks that turn every stream event into an [`AppMessage`].
fn forward_to(tx: &mpsc::UnboundedSender<AppMessage>) -> StreamCallbacks<'static> {
    let mut callbacks = StreamCallbacks::new();
    for channel in Channel::ALL {
        let tx = tx.clone();
        callbacks = callbacks.on_token(channel, move |token| {
            let _ = tx.send(AppMessage::Token { channel, token });
        });
    }

    let round_tx = tx.clone();
    let converged_tx = tx.clone();
    let article_tx = tx.clone();
    let done_tx = tx.clone();
    callbacks
        .on_round_complete(move |round| {
            let _ = round_tx.send(AppMessage::RoundComplete(round));
        })
        .on_converged(move || {
            let _ = converged_tx.send(AppMessage::Converged);
        })
        .on_article_done(move || {
            let _ = article_tx.send(AppMessage::ArticleDone);
        })
        .on_done(move |_| {
            let _ = done_tx.send(AppMessage::Done);
        })
}
