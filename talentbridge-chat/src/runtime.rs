//! Cooperative runtime driving the controller against a [`ChatApi`]

use futures::future::{join_all, BoxFuture};
use futures::stream::FuturesUnordered;
use futures::{FutureExt, StreamExt};
use std::sync::Arc;
use talentbridge_api::ChatApi;
use talentbridge_core::locale::Locale;
use talentbridge_core::notify::NotificationSink;
use talentbridge_core::Result;
use tokio::sync::mpsc;
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::controller::{ChatController, Completion, Effect, Intent};
use crate::lifecycle::Confirm;
use crate::state::ChatState;

/// Runs remote calls concurrently on the current task and applies their
/// completions one at a time
///
/// State is only touched in [`dispatch`](Self::dispatch) and
/// [`apply`](Self::apply), so no lock guards it.
pub struct ChatRuntime<A: ChatApi + ?Sized> {
    controller: ChatController,
    api: Arc<A>,
    sink: Arc<dyn NotificationSink>,
    confirm: Arc<dyn Confirm>,
    in_flight: FuturesUnordered<BoxFuture<'static, Completion>>,
}

impl<A: ChatApi + ?Sized + 'static> ChatRuntime<A> {
    pub fn new(
        api: Arc<A>,
        locale: Locale,
        sink: Arc<dyn NotificationSink>,
        confirm: Arc<dyn Confirm>,
    ) -> Self {
        Self {
            controller: ChatController::new(locale),
            api,
            sink,
            confirm,
            in_flight: FuturesUnordered::new(),
        }
    }

    pub fn state(&self) -> &ChatState {
        self.controller.state()
    }

    pub fn locale(&self) -> Locale {
        self.controller.locale()
    }

    /// Number of remote calls still outstanding
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    pub fn is_idle(&self) -> bool {
        self.in_flight.is_empty()
    }

    /// Hand an intent to the controller and start the calls it asks for
    pub fn dispatch(&mut self, intent: Intent) -> Result<()> {
        let outcome = self.controller.handle(intent, self.confirm.as_ref());
        self.flush_notifications();
        for effect in outcome? {
            self.spawn(effect);
        }
        Ok(())
    }

    /// Wait for the next remote call to finish
    ///
    /// Returns `None` when nothing is in flight.
    pub async fn next_completion(&mut self) -> Option<Completion> {
        self.in_flight.next().await
    }

    /// Feed a completion back into the controller
    pub fn apply(&mut self, completion: Completion) {
        let effects = self.controller.complete(completion);
        self.flush_notifications();
        for effect in effects {
            self.spawn(effect);
        }
    }

    /// Apply completions until no call is in flight
    pub async fn run_until_idle(&mut self) {
        while let Some(completion) = self.next_completion().await {
            self.apply(completion);
        }
    }

    /// Serve intents from `intents` until the channel closes
    ///
    /// Outstanding calls are drained before returning.
    pub async fn run(&mut self, mut intents: mpsc::Receiver<Intent>) {
        info!("Chat runtime started");
        loop {
            tokio::select! {
                intent = intents.recv() => match intent {
                    Some(intent) => {
                        if let Err(e) = self.dispatch(intent) {
                            warn!("Intent rejected: {}", e);
                        }
                    }
                    None => {
                        info!("Intent channel closed, stopping runtime");
                        break;
                    }
                },
                Some(completion) = self.in_flight.next(), if !self.in_flight.is_empty() => {
                    self.apply(completion);
                }
            }
        }
        self.run_until_idle().await;
    }

    fn flush_notifications(&mut self) {
        for notification in self.controller.drain_notifications() {
            self.sink.notify(notification);
        }
    }

    fn spawn(&mut self, effect: Effect) {
        let request_id = Uuid::new_v4();
        let span = info_span!("chat_request", %request_id, call = effect.name());
        let api = Arc::clone(&self.api);
        self.in_flight
            .push(execute(api, effect).instrument(span).boxed());
    }
}

/// Perform one remote call and package its result
async fn execute<A: ChatApi + ?Sized>(api: Arc<A>, effect: Effect) -> Completion {
    debug!("Executing {}", effect.name());
    match effect {
        Effect::ListSessions { auto_select } => Completion::SessionsListed {
            auto_select,
            result: api.list_sessions().await,
        },
        Effect::LoadHistory(ticket) => {
            let result = api.get_history(&ticket.session_id).await;
            Completion::HistoryLoaded { ticket, result }
        }
        Effect::SendMessage(pending) => Completion::MessageSent {
            provisional_id: pending.provisional_id,
            result: api
                .send_message(&pending.session_id, &pending.question)
                .await,
        },
        Effect::CreateSession => Completion::SessionCreated(api.create_session().await),
        Effect::DeleteSession { session_id } => {
            let result = api.clear_session(&session_id).await;
            Completion::SessionDeleted { session_id, result }
        }
        Effect::DeleteAll { session_ids } => {
            let results = join_all(session_ids.iter().map(|id| api.clear_session(id))).await;
            Completion::AllDeleted(session_ids.into_iter().zip(results).collect())
        }
    }
}
