//! Local message id allocation

use serde::Serialize;
use talentbridge_core::chat::MessageId;

/// Monotonic allocator for [`MessageId::Local`] ids
///
/// One allocator lives per engine, so local ids are unique for its lifetime.
#[derive(Debug, Default, Clone, Serialize)]
pub struct LocalIdAllocator {
    next: u64,
}

impl LocalIdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand out the next unused local id
    pub fn allocate(&mut self) -> MessageId {
        self.next += 1;
        MessageId::Local(self.next)
    }
}
