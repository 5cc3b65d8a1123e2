//! Base trait for the chat backend

use async_trait::async_trait;
use talentbridge_core::chat::{ChatMessage, ChatSession};
use thiserror::Error;

/// Error type for remote chat operations
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("API error (HTTP {status}): {}", .message.as_deref().unwrap_or("no message"))]
    Api {
        status: u16,
        message: Option<String>,
    },
}

impl ApiError {
    /// Build an error from a status code and an optional server message
    pub fn api(status: u16, message: Option<String>) -> Self {
        ApiError::Api { status, message }
    }

    /// The message the server attached to the failure, if any
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Api {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => Some(message),
            _ => None,
        }
    }

    /// Text to show the user: the server's message verbatim, else `fallback`
    pub fn user_message(&self, fallback: &str) -> String {
        self.server_message().unwrap_or(fallback).to_string()
    }
}

impl From<ApiError> for talentbridge_core::Error {
    fn from(e: ApiError) -> Self {
        talentbridge_core::Error::Network(e.to_string())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Remote operations the chat engine depends on
///
/// Implementations are plain request/response calls; retries and
/// authentication headers are their own business.
#[async_trait]
pub trait ChatApi: Send + Sync {
    /// List the current user's sessions, most recent first
    async fn list_sessions(&self) -> ApiResult<Vec<ChatSession>>;

    /// Allocate a new empty session and return its id
    async fn create_session(&self) -> ApiResult<String>;

    /// Fetch the full message history of a session
    async fn get_history(&self, session_id: &str) -> ApiResult<Vec<ChatMessage>>;

    /// Ask a question in a session and return the assistant's reply
    async fn send_message(&self, session_id: &str, question: &str) -> ApiResult<String>;

    /// Delete a session and its history
    async fn clear_session(&self, session_id: &str) -> ApiResult<()>;
}
