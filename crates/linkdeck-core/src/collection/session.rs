//! Move-mode editing session.
//!
//! Entering move mode snapshots the collection; every drag after that works
//! on the live copy. Saving keeps the live copy, cancelling restores the
//! snapshot. The snapshot is a full structural copy, so nothing done to the
//! live collection during the session can reach back into it.

use tracing::debug;

use crate::collection::types::Collection;

/// Where the session currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Editing,
}

/// Transactional wrapper around move-mode edits.
#[derive(Debug, Default)]
pub struct MoveSession {
    snapshot: Option<Collection>,
}

impl MoveSession {
    pub fn new() -> Self {
        MoveSession::default()
    }

    pub fn state(&self) -> SessionState {
        if self.snapshot.is_some() {
            SessionState::Editing
        } else {
            SessionState::Idle
        }
    }

    pub fn is_editing(&self) -> bool {
        self.state() == SessionState::Editing
    }

    /// Begin a session, capturing the rollback snapshot.
    ///
    /// Entering while already editing keeps the original snapshot; cancel
    /// always rolls back to the state before the first enter.
    pub fn enter(&mut self, current: &Collection) {
        if self.snapshot.is_some() {
            debug!("move session already active; keeping original snapshot");
            return;
        }
        self.snapshot = Some(current.clone());
    }

    /// End the session keeping the mutated collection.
    pub fn save(&mut self) {
        self.snapshot = None;
    }

    /// End the session, returning the snapshot to restore.
    ///
    /// Returns `None` when no session was active.
    pub fn cancel(&mut self) -> Option<Collection> {
        self.snapshot.take()
    }
}
