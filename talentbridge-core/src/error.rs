//! Error types for the TalentBridge chat client

use thiserror::Error;

/// The main error type for chat client operations
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A remote call failed or returned an error payload
    #[error("Network error: {0}")]
    Network(String),

    /// Input rejected before any remote call was made
    #[error("Validation error: {0}")]
    Validation(String),

    /// The current user may not use the chat widget
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Not found errors
    #[error("Not found: {0}")]
    NotFound(String),

    /// Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A specialized Result type for chat client operations
pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl Error {
    /// Whether the error was raised before reaching the transport
    pub fn is_rejection(&self) -> bool {
        matches!(self, Error::Validation(_) | Error::PermissionDenied(_))
    }
}
