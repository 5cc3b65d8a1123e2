//! Current user and the chat capability check

use serde::{Deserialize, Serialize};

/// Permission a user needs to open the chat widget
pub const CHAT_PERMISSION: &str = "POST /chat-message";

/// The signed-in user, as provided by the authentication layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Account email
    pub email: String,
    /// Granted permissions, formatted as `METHOD /path`
    #[serde(default)]
    pub permissions: Vec<String>,
}

impl User {
    /// Create a user with the given permissions
    pub fn new(email: impl Into<String>, permissions: Vec<String>) -> Self {
        Self {
            email: email.into(),
            permissions,
        }
    }

    /// Check if the user holds a permission
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.iter().any(|p| p == permission)
    }
}

/// Whether the widget may be opened for this user
pub fn has_chat_permission(user: Option<&User>) -> bool {
    user.is_some_and(|u| u.has_permission(CHAT_PERMISSION))
}
