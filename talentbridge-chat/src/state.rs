use serde::Serialize;

use crate::directory::SessionDirectory;
use crate::lifecycle::LifecycleManager;
use crate::send::OptimisticSendCoordinator;
use crate::store::MessageStore;

/// Visibility flags of the chat widget
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WidgetFlags {
    pub open: bool,
    pub minimized: bool,
    pub settings_open: bool,
}

/// Everything the widget renders, owned by one controller
#[derive(Debug, Default, Clone, Serialize)]
pub struct ChatState {
    pub(crate) directory: SessionDirectory,
    pub(crate) messages: MessageStore,
    pub(crate) send: OptimisticSendCoordinator,
    pub(crate) lifecycle: LifecycleManager,
    pub(crate) input: String,
    pub(crate) widget: WidgetFlags,
}

impl ChatState {
    pub fn directory(&self) -> &SessionDirectory {
        &self.directory
    }

    pub fn messages(&self) -> &MessageStore {
        &self.messages
    }

    pub fn send(&self) -> &OptimisticSendCoordinator {
        &self.send
    }

    pub fn lifecycle(&self) -> &LifecycleManager {
        &self.lifecycle
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn widget(&self) -> WidgetFlags {
        self.widget
    }

    pub fn active_session(&self) -> Option<&str> {
        self.directory.active()
    }

    /// Whether any spinner should be showing
    pub fn is_busy(&self) -> bool {
        self.directory.is_refreshing()
            || self.messages.is_loading()
            || self.send.is_sending()
            || self.lifecycle.is_creating()
    }

    /// Delete-all is offered only when there is something to delete
    pub fn can_delete_all(&self) -> bool {
        !self.directory.is_empty()
    }
}
