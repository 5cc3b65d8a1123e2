//! Notification types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Severity of a user-visible notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Success,
    Error,
}

/// A toast-style message surfaced to the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    /// Severity
    pub level: NotificationLevel,
    /// Text shown to the user
    pub message: String,
    /// When the notification was raised
    pub timestamp: DateTime<Utc>,
}

impl Notification {
    /// Create a success notification
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }

    /// Create an error notification
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }

    /// Check if this is an error notification
    pub fn is_error(&self) -> bool {
        self.level == NotificationLevel::Error
    }
}
