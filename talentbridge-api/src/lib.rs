//! Remote chat backend for TalentBridge
//!
//! [`ChatApi`] is the seam the chat engine talks to; [`HttpChatApi`] is the
//! REST implementation used by the CLI.

pub mod base;
pub mod http;

pub use base::{ApiError, ApiResult, ChatApi};
pub use http::HttpChatApi;
