//! Widget controller
//!
//! Turns UI intents and remote completions into state changes plus the
//! remote calls that must follow. Nothing here awaits: the runtime executes
//! [`Effect`]s and feeds their [`Completion`]s back in, one at a time.

use talentbridge_api::{ApiError, ApiResult};
use talentbridge_core::auth::{has_chat_permission, User};
use talentbridge_core::chat::{ChatMessage, ChatSession, MessageId};
use talentbridge_core::locale::{Locale, Text};
use talentbridge_core::notify::Notification;
use talentbridge_core::{Error, Result};
use tracing::{debug, info, warn};

use crate::directory::AutoSelect;
use crate::lifecycle::{Confirm, DestructiveAction};
use crate::send::{PendingSend, Settlement};
use crate::state::ChatState;
use crate::store::{LoadOutcome, LoadTicket};

/// Something the user did
#[derive(Debug, Clone)]
pub enum Intent {
    Open { user: Option<User> },
    Close,
    ToggleMinimized,
    ToggleSettings,
    Refresh,
    Select(String),
    SetInput(String),
    Submit,
    Create,
    Delete(String),
    DeleteAll,
}

/// A remote call the runtime must make
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    ListSessions { auto_select: AutoSelect },
    LoadHistory(LoadTicket),
    SendMessage(PendingSend),
    CreateSession,
    DeleteSession { session_id: String },
    DeleteAll { session_ids: Vec<String> },
}

impl Effect {
    /// Short name used in request spans
    pub fn name(&self) -> &'static str {
        match self {
            Effect::ListSessions { .. } => "list_sessions",
            Effect::LoadHistory(_) => "get_history",
            Effect::SendMessage(_) => "send_message",
            Effect::CreateSession => "create_session",
            Effect::DeleteSession { .. } => "clear_session",
            Effect::DeleteAll { .. } => "clear_all_sessions",
        }
    }
}

/// The answer to an [`Effect`]
#[derive(Debug)]
pub enum Completion {
    SessionsListed {
        auto_select: AutoSelect,
        result: ApiResult<Vec<ChatSession>>,
    },
    HistoryLoaded {
        ticket: LoadTicket,
        result: ApiResult<Vec<ChatMessage>>,
    },
    MessageSent {
        provisional_id: MessageId,
        result: ApiResult<String>,
    },
    SessionCreated(ApiResult<String>),
    SessionDeleted {
        session_id: String,
        result: ApiResult<()>,
    },
    AllDeleted(Vec<(String, ApiResult<()>)>),
}

/// Owner of [`ChatState`]
pub struct ChatController {
    state: ChatState,
    locale: Locale,
    outbox: Vec<Notification>,
}

impl ChatController {
    pub fn new(locale: Locale) -> Self {
        Self {
            state: ChatState::default(),
            locale,
            outbox: Vec::new(),
        }
    }

    pub fn state(&self) -> &ChatState {
        &self.state
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Take the notifications raised since the last call
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.outbox)
    }

    /// Handle a UI intent
    ///
    /// `Err` means the intent was rejected before any remote call. A declined
    /// confirmation is not an error; it simply yields no effects.
    pub fn handle(&mut self, intent: Intent, confirm: &dyn Confirm) -> Result<Vec<Effect>> {
        debug!("Handling intent {:?}", intent);
        match intent {
            Intent::Open { user } => self.open(user.as_ref()),
            Intent::Close => {
                self.state.widget = Default::default();
                self.state.messages.clear();
                Ok(Vec::new())
            }
            Intent::ToggleMinimized => {
                if self.state.widget.open {
                    self.state.widget.minimized = !self.state.widget.minimized;
                }
                Ok(Vec::new())
            }
            Intent::ToggleSettings => {
                self.state.widget.settings_open = !self.state.widget.settings_open;
                Ok(Vec::new())
            }
            Intent::Refresh => Ok(vec![self.refresh(AutoSelect::FirstIfNone)]),
            Intent::Select(session_id) => Ok(self.switch_to(&session_id)),
            Intent::SetInput(text) => {
                self.state.input = text;
                Ok(Vec::new())
            }
            Intent::Submit => self.submit(),
            Intent::Create => {
                if !self.state.lifecycle.begin_create() {
                    debug!("Create already in progress, ignoring");
                    return Ok(Vec::new());
                }
                Ok(vec![Effect::CreateSession])
            }
            Intent::Delete(session_id) => {
                let action = DestructiveAction::DeleteSession {
                    session_id: session_id.clone(),
                };
                if !confirm.confirm(&action) {
                    debug!("Deletion of {} declined", session_id);
                    return Ok(Vec::new());
                }
                Ok(vec![Effect::DeleteSession { session_id }])
            }
            Intent::DeleteAll => {
                if !self.state.can_delete_all() {
                    return Err(Error::Validation("there are no conversations to delete".into()));
                }
                let session_ids = self.state.directory.session_ids();
                let action = DestructiveAction::DeleteAll {
                    count: session_ids.len(),
                };
                if !confirm.confirm(&action) {
                    debug!("Delete-all declined");
                    return Ok(Vec::new());
                }
                Ok(vec![Effect::DeleteAll { session_ids }])
            }
        }
    }

    /// Apply the result of a remote call
    pub fn complete(&mut self, completion: Completion) -> Vec<Effect> {
        match completion {
            Completion::SessionsListed {
                auto_select,
                result,
            } => self.sessions_listed(auto_select, result),
            Completion::HistoryLoaded { ticket, result } => {
                match self.state.messages.apply_load(&ticket, result) {
                    LoadOutcome::Applied(count) => {
                        debug!("Loaded {} messages for session {}", count, ticket.session_id);
                    }
                    LoadOutcome::Failed(e) => self.notify_failure(&e, Text::LoadHistoryFailed),
                    LoadOutcome::Stale => {}
                }
                Vec::new()
            }
            Completion::MessageSent {
                provisional_id,
                result,
            } => {
                match self
                    .state
                    .send
                    .settle(provisional_id, result, &mut self.state.messages)
                {
                    Some(Settlement::Delivered { pending, .. }) => {
                        debug!("Reply received for session {}", pending.session_id);
                        vec![self.refresh(AutoSelect::FirstIfNone)]
                    }
                    Some(Settlement::RolledBack { pending, error }) => {
                        warn!("Send to session {} rolled back", pending.session_id);
                        self.notify_failure(&error, Text::SendFailed);
                        Vec::new()
                    }
                    None => Vec::new(),
                }
            }
            Completion::SessionCreated(result) => {
                self.state.lifecycle.finish_create();
                match result {
                    Ok(session_id) => {
                        info!("Created session {}", session_id);
                        self.notify_success(Text::SessionCreated);
                        vec![self.refresh(AutoSelect::Session(session_id))]
                    }
                    Err(e) => {
                        self.notify_failure(&e, Text::CreateSessionFailed);
                        Vec::new()
                    }
                }
            }
            Completion::SessionDeleted { session_id, result } => {
                match result {
                    Ok(()) => {
                        self.state.lifecycle.session_deleted(
                            &session_id,
                            &mut self.state.directory,
                            &mut self.state.messages,
                        );
                        self.notify_success(Text::SessionDeleted);
                    }
                    Err(e) => self.notify_failure(&e, Text::DeleteSessionFailed),
                }
                vec![self.refresh(AutoSelect::Never)]
            }
            Completion::AllDeleted(results) => {
                let report = self.state.lifecycle.all_deleted(
                    &results,
                    &mut self.state.directory,
                    &mut self.state.messages,
                );
                if report.is_complete() {
                    self.notify_success(Text::AllSessionsDeleted);
                    self.state.widget.settings_open = false;
                } else {
                    let message = self
                        .locale
                        .partial_delete_failed(report.failed.len(), report.total);
                    self.outbox.push(Notification::error(message));
                }
                vec![self.refresh(AutoSelect::Never)]
            }
        }
    }

    fn open(&mut self, user: Option<&User>) -> Result<Vec<Effect>> {
        if !has_chat_permission(user) {
            let message = self.locale.text(Text::LoginRequired);
            self.outbox.push(Notification::error(message));
            return Err(Error::PermissionDenied(message.to_string()));
        }

        self.state.widget.open = true;
        self.state.widget.minimized = false;

        let mut effects = vec![self.refresh(AutoSelect::FirstIfNone)];
        if let Some(active) = self.state.directory.active().map(str::to_string) {
            effects.push(Effect::LoadHistory(self.state.messages.begin_load(&active)));
        }
        Ok(effects)
    }

    fn submit(&mut self) -> Result<Vec<Effect>> {
        let pending = self.state.send.begin(
            &self.state.input,
            self.state.directory.active(),
            &mut self.state.messages,
        )?;
        self.state.input.clear();
        Ok(vec![Effect::SendMessage(pending)])
    }

    fn refresh(&mut self, auto_select: AutoSelect) -> Effect {
        self.state.directory.begin_refresh();
        Effect::ListSessions { auto_select }
    }

    /// Select `session_id` and start loading its log when the widget is open
    fn switch_to(&mut self, session_id: &str) -> Vec<Effect> {
        if !self.state.directory.select(session_id) {
            return Vec::new();
        }
        self.load_active()
    }

    fn load_active(&mut self) -> Vec<Effect> {
        match self.state.directory.active().map(str::to_string) {
            Some(active) if self.state.widget.open => {
                vec![Effect::LoadHistory(self.state.messages.begin_load(&active))]
            }
            _ => {
                self.state.messages.clear();
                Vec::new()
            }
        }
    }

    fn sessions_listed(
        &mut self,
        auto_select: AutoSelect,
        result: ApiResult<Vec<ChatSession>>,
    ) -> Vec<Effect> {
        self.state.directory.finish_refresh();
        match result {
            Ok(sessions) => {
                if self
                    .state
                    .directory
                    .apply_refresh(sessions, &auto_select)
                    .is_some()
                {
                    return self.load_active();
                }
                Vec::new()
            }
            Err(e) => {
                self.notify_failure(&e, Text::LoadSessionsFailed);
                match auto_select {
                    AutoSelect::Session(session_id) => self.switch_to(&session_id),
                    _ => Vec::new(),
                }
            }
        }
    }

    fn notify_success(&mut self, key: Text) {
        self.outbox.push(Notification::success(self.locale.text(key)));
    }

    fn notify_failure(&mut self, error: &ApiError, fallback: Text) {
        warn!("{}: {}", self.locale.text(fallback), error);
        let message = error.user_message(self.locale.text(fallback));
        self.outbox.push(Notification::error(message));
    }
}
