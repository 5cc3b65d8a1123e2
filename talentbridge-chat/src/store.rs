//! Message log of the active session

use serde::Serialize;
use talentbridge_core::chat::{ChatMessage, MessageId};
use tracing::{debug, warn};

/// Identifies one history load
///
/// Only the most recently issued ticket may write to the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadTicket {
    pub session_id: String,
    pub seq: u64,
}

/// Result of applying a history response
#[derive(Debug)]
pub enum LoadOutcome<E> {
    /// The log now holds this many messages
    Applied(usize),
    /// The load failed; the log is empty
    Failed(E),
    /// The ticket was superseded and the response was dropped
    Stale,
}

/// Messages of the currently selected session
///
/// Only one session's log is materialized at a time. `epoch` changes
/// whenever the log is replaced or cleared, so holders of an older epoch
/// know the log they were writing to is gone.
#[derive(Debug, Default, Clone, Serialize)]
pub struct MessageStore {
    messages: Vec<ChatMessage>,
    pending: Option<LoadTicket>,
    next_seq: u64,
    epoch: u64,
}

impl MessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Whether a history load is outstanding
    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// The outstanding load, if any
    pub fn pending(&self) -> Option<&LoadTicket> {
        self.pending.as_ref()
    }

    /// Empty the log and issue a ticket for loading `session_id`
    ///
    /// Any earlier ticket becomes stale.
    pub fn begin_load(&mut self, session_id: &str) -> LoadTicket {
        self.next_seq += 1;
        let ticket = LoadTicket {
            session_id: session_id.to_string(),
            seq: self.next_seq,
        };
        self.messages.clear();
        self.epoch += 1;
        self.pending = Some(ticket.clone());
        debug!("History load #{} issued for session {}", ticket.seq, session_id);
        ticket
    }

    /// Apply a history response for `ticket`
    ///
    /// Success replaces the log wholesale; failure leaves it empty.
    pub fn apply_load<E>(
        &mut self,
        ticket: &LoadTicket,
        result: Result<Vec<ChatMessage>, E>,
    ) -> LoadOutcome<E> {
        if self.pending.as_ref() != Some(ticket) {
            warn!(
                "Dropping stale history #{} for session {}",
                ticket.seq, ticket.session_id
            );
            return LoadOutcome::Stale;
        }

        self.pending = None;
        self.epoch += 1;
        match result {
            Ok(messages) => {
                self.messages = messages;
                LoadOutcome::Applied(self.messages.len())
            }
            Err(e) => {
                self.messages.clear();
                LoadOutcome::Failed(e)
            }
        }
    }

    /// Add a message at the tail
    pub fn append(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    /// Remove the message with `id`, returning it if present
    pub fn remove_by_id(&mut self, id: MessageId) -> Option<ChatMessage> {
        let index = self.messages.iter().position(|m| m.id == id)?;
        Some(self.messages.remove(index))
    }

    /// Empty the log and invalidate any outstanding load
    pub fn clear(&mut self) {
        self.messages.clear();
        self.pending = None;
        self.epoch += 1;
    }
}
