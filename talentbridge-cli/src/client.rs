//! Wiring between the configuration, the HTTP backend and the chat engine

use console::style;
use std::sync::Arc;
use talentbridge_api::HttpChatApi;
use talentbridge_chat::{AutoConfirm, ChatRuntime, Confirm, DestructiveAction};
use talentbridge_core::config::Config;
use talentbridge_core::locale::{Locale, Text};
use talentbridge_core::notify::{Notification, NotificationLevel, NotificationSink};
use tracing::warn;

pub type CliRuntime = ChatRuntime<HttpChatApi>;

/// Prints notifications as one-line toasts
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink;

impl NotificationSink for ConsoleSink {
    fn notify(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Success => {
                println!("{} {}", style("✓").green().bold(), notification.message)
            }
            NotificationLevel::Error => {
                eprintln!("{} {}", style("✗").red(), notification.message)
            }
        }
    }
}

/// Asks on the terminal before destructive actions
pub struct PromptConfirm {
    locale: Locale,
}

impl PromptConfirm {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }
}

impl Confirm for PromptConfirm {
    fn confirm(&self, action: &DestructiveAction) -> bool {
        let prompt = match action {
            DestructiveAction::DeleteSession { .. } => self.locale.text(Text::ConfirmDelete),
            DestructiveAction::DeleteAll { .. } => self.locale.text(Text::ConfirmDeleteAll),
        };
        dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .unwrap_or_else(|e| {
                warn!("Confirmation prompt failed: {}", e);
                false
            })
    }
}

/// Build a runtime talking to the configured backend
pub fn build_runtime(config: &Config, assume_yes: bool) -> CliRuntime {
    let api = Arc::new(HttpChatApi::from_config(&config.api, &config.auth));
    let locale = config.chat.locale;
    let confirm: Arc<dyn Confirm> = if assume_yes || !config.chat.confirm_destructive {
        Arc::new(AutoConfirm)
    } else {
        Arc::new(PromptConfirm::new(locale))
    };
    ChatRuntime::new(api, locale, Arc::new(ConsoleSink), confirm)
}
