//! User-visible notifications
//!
//! Every failure inside the engine ends up here as a single toast instead of
//! propagating to the caller.

pub mod notification;
pub mod sink;

pub use notification::{Notification, NotificationLevel};
pub use sink::{MemorySink, NotificationSink, TracingSink};
