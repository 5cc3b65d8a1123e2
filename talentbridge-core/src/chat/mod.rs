//! Chat domain types
//!
//! Sessions and messages as the widget sees them. Only the active session's
//! messages are ever materialized on the client.

pub mod message;
pub mod session;

pub use message::{ChatMessage, MessageId, Role};
pub use session::{ChatSession, DEFAULT_PREVIEW_CHARS};
