//! Configuration schema definitions

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::auth::{User, CHAT_PERMISSION};
use crate::chat::DEFAULT_PREVIEW_CHARS;
use crate::locale::Locale;

/// Root configuration for the chat client
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Backend connection
    #[serde(default)]
    pub api: ApiConfig,
    /// Signed-in account
    #[serde(default)]
    pub auth: AuthConfig,
    /// Widget behaviour
    #[serde(default)]
    pub chat: ChatConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (text, json)
    #[serde(default = "default_log_format")]
    pub format: String,
    /// Directory for log files
    #[serde(default = "default_log_dir")]
    pub dir: String,
    /// Module-specific overrides
    #[serde(default)]
    pub overrides: HashMap<String, String>,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_log_dir() -> String {
    "logs".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            dir: default_log_dir(),
            overrides: HashMap::new(),
        }
    }
}

/// Backend connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the REST backend, including the version prefix
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:8080/api/v1".to_string()
}

fn default_timeout() -> u64 {
    60
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Account settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Bearer token sent with every request; empty means signed out
    #[serde(default)]
    pub access_token: String,
    /// Account email
    #[serde(default)]
    pub email: String,
    /// Permissions granted to the account
    #[serde(default = "default_permissions")]
    pub permissions: Vec<String>,
}

fn default_permissions() -> Vec<String> {
    vec![CHAT_PERMISSION.to_string()]
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            access_token: String::new(),
            email: String::new(),
            permissions: default_permissions(),
        }
    }
}

impl AuthConfig {
    /// The signed-in user, if a token is configured
    pub fn user(&self) -> Option<User> {
        if self.access_token.trim().is_empty() {
            None
        } else {
            Some(User::new(self.email.clone(), self.permissions.clone()))
        }
    }
}

/// Chat widget settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Display language for notifications and labels
    #[serde(default)]
    pub locale: Locale,
    /// Characters of the first message shown in a session label
    #[serde(default = "default_preview_chars")]
    pub preview_chars: usize,
    /// Ask before deleting conversations
    #[serde(default = "default_true")]
    pub confirm_destructive: bool,
}

fn default_preview_chars() -> usize {
    DEFAULT_PREVIEW_CHARS
}

fn default_true() -> bool {
    true
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            preview_chars: default_preview_chars(),
            confirm_destructive: true,
        }
    }
}
