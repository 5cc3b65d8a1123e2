//! Session directory: the ordered session list and the active selection

use serde::Serialize;
use talentbridge_core::chat::ChatSession;
use tracing::debug;

/// What a completed refresh may do with the selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", content = "session_id", rename_all = "snake_case")]
pub enum AutoSelect {
    /// Select the first listed session when nothing is selected
    FirstIfNone,
    /// Leave the selection alone
    Never,
    /// Select this session once the list is in, whether or not it succeeded
    Session(String),
}

/// Ordered list of the user's sessions plus the active selection
///
/// The list is replaced wholesale on every successful refresh and never
/// re-sorted locally. A refresh never clears or changes an existing
/// selection, even when the selected id is missing from the new list.
#[derive(Debug, Default, Clone, Serialize)]
pub struct SessionDirectory {
    sessions: Vec<ChatSession>,
    active: Option<String>,
    refreshing: usize,
}

impl SessionDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sessions(&self) -> &[ChatSession] {
        &self.sessions
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn is_active(&self, session_id: &str) -> bool {
        self.active.as_deref() == Some(session_id)
    }

    pub fn get(&self, session_id: &str) -> Option<&ChatSession> {
        self.sessions.iter().find(|s| s.session_id == session_id)
    }

    pub fn contains(&self, session_id: &str) -> bool {
        self.get(session_id).is_some()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Ids of every listed session, in list order
    pub fn session_ids(&self) -> Vec<String> {
        self.sessions.iter().map(|s| s.session_id.clone()).collect()
    }

    /// Record that a list request went out
    pub fn begin_refresh(&mut self) {
        self.refreshing += 1;
    }

    /// Record that a list request came back, successfully or not
    pub fn finish_refresh(&mut self) {
        self.refreshing = self.refreshing.saturating_sub(1);
    }

    /// Number of outstanding list requests
    pub fn refreshing(&self) -> usize {
        self.refreshing
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing > 0
    }

    /// Replace the list with a fresh server response
    ///
    /// Returns the id that became active when the refresh selected one.
    pub fn apply_refresh(
        &mut self,
        sessions: Vec<ChatSession>,
        auto_select: &AutoSelect,
    ) -> Option<String> {
        debug!("Session directory refreshed with {} entries", sessions.len());
        self.sessions = sessions;

        match auto_select {
            AutoSelect::FirstIfNone if self.active.is_none() => {
                let first = self.sessions.first()?.session_id.clone();
                self.active = Some(first.clone());
                Some(first)
            }
            AutoSelect::Session(session_id) => {
                self.select(session_id).then(|| session_id.clone())
            }
            _ => None,
        }
    }

    /// Make `session_id` the active session
    ///
    /// Returns false when it already was.
    pub fn select(&mut self, session_id: &str) -> bool {
        if self.is_active(session_id) {
            return false;
        }
        debug!("Selecting session {}", session_id);
        self.active = Some(session_id.to_string());
        true
    }

    pub fn clear_selection(&mut self) {
        self.active = None;
    }
}
