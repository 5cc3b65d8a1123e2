//! Chat session summaries as listed by the backend

use serde::{Deserialize, Serialize};

use crate::locale::{Locale, Text};
use crate::utils::truncate_chars;

/// Default number of preview characters shown in a session chip
pub const DEFAULT_PREVIEW_CHARS: usize = 18;

/// A conversation known to the session directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSession {
    /// Stable session identifier
    pub session_id: String,
    /// First message of the conversation, absent for a fresh session
    #[serde(default)]
    pub first_message: Option<String>,
}

impl ChatSession {
    /// Create a new session summary
    pub fn new(session_id: impl Into<String>, first_message: Option<String>) -> Self {
        Self {
            session_id: session_id.into(),
            first_message,
        }
    }

    /// Short label for the session strip
    pub fn preview_label(&self, max_chars: usize, locale: Locale) -> String {
        match self.first_message.as_deref() {
            Some(text) if !text.is_empty() => truncate_chars(text, max_chars),
            _ => locale.text(Text::NewSessionLabel).to_string(),
        }
    }
}
