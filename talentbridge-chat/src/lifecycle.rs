//! Session lifecycle: create, delete and delete-all

use serde::Serialize;
use tracing::{info, warn};

use crate::directory::SessionDirectory;
use crate::store::MessageStore;

/// A destructive operation that needs the user's go-ahead
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum DestructiveAction {
    DeleteSession { session_id: String },
    DeleteAll { count: usize },
}

/// Asks the user to confirm a destructive action
pub trait Confirm: Send + Sync {
    fn confirm(&self, action: &DestructiveAction) -> bool;
}

/// Confirms everything, for non-interactive use
#[derive(Debug, Default, Clone, Copy)]
pub struct AutoConfirm;

impl Confirm for AutoConfirm {
    fn confirm(&self, _action: &DestructiveAction) -> bool {
        true
    }
}

/// Declines everything
#[derive(Debug, Default, Clone, Copy)]
pub struct Decline;

impl Confirm for Decline {
    fn confirm(&self, _action: &DestructiveAction) -> bool {
        false
    }
}

/// Tally of a delete-all fan-out
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteAllReport {
    pub total: usize,
    pub failed: Vec<String>,
}

impl DeleteAllReport {
    pub fn succeeded(&self) -> usize {
        self.total - self.failed.len()
    }

    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Bookkeeping for create / delete / delete-all
#[derive(Debug, Default, Clone, Serialize)]
pub struct LifecycleManager {
    creating: bool,
}

impl LifecycleManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_creating(&self) -> bool {
        self.creating
    }

    /// Mark a create as outstanding; false when one already is
    pub fn begin_create(&mut self) -> bool {
        if self.creating {
            return false;
        }
        self.creating = true;
        true
    }

    pub fn finish_create(&mut self) {
        self.creating = false;
    }

    /// Apply a successful clear of `session_id`
    ///
    /// Deleting the active session drops the selection and its log.
    pub fn session_deleted(
        &self,
        session_id: &str,
        directory: &mut SessionDirectory,
        store: &mut MessageStore,
    ) {
        info!("Session {} deleted", session_id);
        if directory.is_active(session_id) {
            directory.clear_selection();
            store.clear();
        }
    }

    /// Apply the joined results of a delete-all fan-out
    ///
    /// Selection and log are dropped regardless of partial failure.
    pub fn all_deleted<E: std::fmt::Display>(
        &self,
        results: &[(String, Result<(), E>)],
        directory: &mut SessionDirectory,
        store: &mut MessageStore,
    ) -> DeleteAllReport {
        let failed: Vec<String> = results
            .iter()
            .filter_map(|(session_id, result)| match result {
                Ok(()) => None,
                Err(e) => {
                    warn!("Failed to delete session {}: {}", session_id, e);
                    Some(session_id.clone())
                }
            })
            .collect();

        directory.clear_selection();
        store.clear();

        let report = DeleteAllReport {
            total: results.len(),
            failed,
        };
        info!(
            "Delete-all finished: {}/{} sessions removed",
            report.succeeded(),
            report.total
        );
        report
    }
}
