//! In-process session store.
//!
//! Backs the demo server and the test suites. Every primitive runs as one
//! critical section under a write (or read) lock, which makes it trivially
//! atomic per code and also gives it a native list append.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use wordmafia_protocol::{Player, Session, SessionCode};

use crate::{Precondition, PutOutcome, SessionStore, SessionUpdate, StoreError, UpdateOutcome};

/// A [`SessionStore`] held entirely in memory.
///
/// Cheap to clone: clones share the same underlying map, which is how
/// tests hand one store to several lobby managers.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    sessions: Arc<RwLock<HashMap<SessionCode, Session>>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of sessions currently stored.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Returns `true` if no sessions are stored.
    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

impl SessionStore for MemoryStore {
    async fn get(&self, code: &SessionCode) -> Result<Option<Session>, StoreError> {
        Ok(self.sessions.read().await.get(code).cloned())
    }

    async fn put_if_absent(&self, session: Session) -> Result<PutOutcome, StoreError> {
        let mut sessions = self.sessions.write().await;
        match sessions.entry(session.code.clone()) {
            Entry::Occupied(_) => Ok(PutOutcome::AlreadyExists),
            Entry::Vacant(slot) => {
                tracing::trace!(code = %session.code, "session stored");
                slot.insert(session);
                Ok(PutOutcome::Created)
            }
        }
    }

    async fn conditional_update(
        &self,
        code: &SessionCode,
        precondition: Precondition,
        update: SessionUpdate,
    ) -> Result<UpdateOutcome, StoreError> {
        let mut sessions = self.sessions.write().await;
        let Some(session) = sessions.get_mut(code) else {
            return Ok(UpdateOutcome::Missing);
        };
        if !precondition.holds(session) {
            return Ok(UpdateOutcome::PreconditionFailed(session.clone()));
        }
        update.apply_to(session);
        Ok(UpdateOutcome::Applied(session.clone()))
    }

    async fn append_player(
        &self,
        code: &SessionCode,
        player: Player,
        precondition: Precondition,
    ) -> Result<UpdateOutcome, StoreError> {
        let mut sessions = self.sessions.write().await;
        let Some(session) = sessions.get_mut(code) else {
            return Ok(UpdateOutcome::Missing);
        };
        if !precondition.holds(session) {
            return Ok(UpdateOutcome::PreconditionFailed(session.clone()));
        }
        session.players.push(player);
        session.version += 1;
        Ok(UpdateOutcome::Applied(session.clone()))
    }
}
