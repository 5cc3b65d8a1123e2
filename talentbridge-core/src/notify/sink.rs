//! Notification sinks

use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{error, info};

use super::notification::{Notification, NotificationLevel};

/// Receiver of user-visible notifications
///
/// The engine never renders anything itself; whatever owns the screen
/// implements this and decides how a toast looks.
pub trait NotificationSink: Send + Sync {
    /// Surface a notification to the user
    fn notify(&self, notification: Notification);
}

impl<S: NotificationSink + ?Sized> NotificationSink for Arc<S> {
    fn notify(&self, notification: Notification) {
        (**self).notify(notification)
    }
}

/// Sink that only writes notifications to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Success => info!("{}", notification.message),
            NotificationLevel::Error => error!("{}", notification.message),
        }
    }
}

/// Sink that keeps every notification in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    entries: Mutex<Vec<Notification>>,
}

impl MemorySink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything received so far
    pub fn entries(&self) -> Vec<Notification> {
        self.entries.lock().clone()
    }

    /// Only the error notifications
    pub fn errors(&self) -> Vec<Notification> {
        self.entries
            .lock()
            .iter()
            .filter(|n| n.is_error())
            .cloned()
            .collect()
    }

    /// Remove and return everything received so far
    pub fn drain(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.entries.lock())
    }
}

impl NotificationSink for MemorySink {
    fn notify(&self, notification: Notification) {
        self.entries.lock().push(notification);
    }
}
