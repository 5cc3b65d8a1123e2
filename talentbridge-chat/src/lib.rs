//! Chat session and messaging state engine for the TalentBridge widget
//!
//! Four components share one [`ChatState`]:
//! [`SessionDirectory`] (session list and selection), [`MessageStore`]
//! (the active session's log), [`OptimisticSendCoordinator`] (provisional
//! messages and rollback) and [`LifecycleManager`] (create / delete /
//! delete-all). [`ChatController`] mutates the state in response to intents
//! and completions; [`ChatRuntime`] executes the resulting remote calls.

pub mod controller;
pub mod directory;
pub mod ids;
pub mod lifecycle;
pub mod runtime;
pub mod send;
pub mod state;
pub mod store;

pub use controller::{ChatController, Completion, Effect, Intent};
pub use directory::{AutoSelect, SessionDirectory};
pub use ids::LocalIdAllocator;
pub use lifecycle::{
    AutoConfirm, Confirm, Decline, DeleteAllReport, DestructiveAction, LifecycleManager,
};
pub use runtime::ChatRuntime;
pub use send::{OptimisticSendCoordinator, PendingSend, SendOutcome, SendPhase, SendRejected};
pub use state::{ChatState, WidgetFlags};
pub use store::{LoadOutcome, LoadTicket, MessageStore};
