//! Optimistic send coordination
//!
//! A submitted question is shown immediately as a provisional USER message.
//! When the backend answers, the reply is appended after it; when the call
//! fails, the provisional message is retracted. At most one send is in
//! flight at any time.

use serde::Serialize;
use talentbridge_core::chat::{ChatMessage, MessageId};
use thiserror::Error;
use tracing::{debug, warn};

use crate::ids::LocalIdAllocator;
use crate::store::MessageStore;

/// Why a submit never reached the transport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SendRejected {
    #[error("message is empty")]
    EmptyInput,
    #[error("no active session")]
    NoActiveSession,
    #[error("a message is already being sent")]
    AlreadySending,
    #[error("conversation history is still loading")]
    HistoryLoading,
}

impl From<SendRejected> for talentbridge_core::Error {
    fn from(e: SendRejected) -> Self {
        talentbridge_core::Error::Validation(e.to_string())
    }
}

/// A send that has left `Idle`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingSend {
    pub session_id: String,
    pub question: String,
    /// Id of the provisional USER message, used for rollback
    pub provisional_id: MessageId,
    /// Store epoch when the provisional message was appended
    pub epoch: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum SendPhase {
    #[default]
    Idle,
    Sending(PendingSend),
}

/// How the last attempt ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SendOutcome {
    Settled,
    RolledBack,
}

/// What settling a send did to the log
#[derive(Debug)]
pub enum Settlement<E> {
    /// The backend answered; `appended` is false when the log had moved on
    Delivered { pending: PendingSend, appended: bool },
    /// The call failed and the provisional message was retracted
    RolledBack { pending: PendingSend, error: E },
}

#[derive(Debug, Default, Clone, Serialize)]
pub struct OptimisticSendCoordinator {
    phase: SendPhase,
    ids: LocalIdAllocator,
    last_outcome: Option<SendOutcome>,
}

impl OptimisticSendCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &SendPhase {
        &self.phase
    }

    pub fn is_sending(&self) -> bool {
        matches!(self.phase, SendPhase::Sending(_))
    }

    pub fn last_outcome(&self) -> Option<SendOutcome> {
        self.last_outcome
    }

    /// Leave `Idle`: validate, then append the provisional USER message
    pub fn begin(
        &mut self,
        input: &str,
        active: Option<&str>,
        store: &mut MessageStore,
    ) -> Result<PendingSend, SendRejected> {
        let question = input.trim();
        if question.is_empty() {
            return Err(SendRejected::EmptyInput);
        }
        let session_id = active.ok_or(SendRejected::NoActiveSession)?;
        if self.is_sending() {
            return Err(SendRejected::AlreadySending);
        }
        if store.is_loading() {
            return Err(SendRejected::HistoryLoading);
        }

        let provisional = ChatMessage::user(self.ids.allocate(), question);
        let pending = PendingSend {
            session_id: session_id.to_string(),
            question: question.to_string(),
            provisional_id: provisional.id,
            epoch: store.epoch(),
        };
        store.append(provisional);
        self.phase = SendPhase::Sending(pending.clone());
        debug!(
            "Send started in session {} as {}",
            pending.session_id, pending.provisional_id
        );
        Ok(pending)
    }

    /// Settle the in-flight send identified by `provisional_id`
    ///
    /// Returns `None` when no such send is in flight.
    pub fn settle<E>(
        &mut self,
        provisional_id: MessageId,
        result: Result<String, E>,
        store: &mut MessageStore,
    ) -> Option<Settlement<E>> {
        let pending = match std::mem::take(&mut self.phase) {
            SendPhase::Sending(pending) if pending.provisional_id == provisional_id => pending,
            other => {
                warn!("No send in flight for {}", provisional_id);
                self.phase = other;
                return None;
            }
        };

        match result {
            Ok(reply) => {
                let appended = store.epoch() == pending.epoch;
                if appended {
                    store.append(ChatMessage::assistant(self.ids.allocate(), reply));
                } else {
                    warn!(
                        "Reply for session {} arrived after its log was replaced",
                        pending.session_id
                    );
                }
                self.last_outcome = Some(SendOutcome::Settled);
                Some(Settlement::Delivered { pending, appended })
            }
            Err(error) => {
                store.remove_by_id(pending.provisional_id);
                self.last_outcome = Some(SendOutcome::RolledBack);
                Some(Settlement::RolledBack { pending, error })
            }
        }
    }
}
