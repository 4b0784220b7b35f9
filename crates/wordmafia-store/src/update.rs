//! Conditional-write vocabulary shared by every store implementation.

use wordmafia_protocol::{Player, Session, SessionStatus};

// ---------------------------------------------------------------------------
// Precondition
// ---------------------------------------------------------------------------

/// A guard evaluated against the stored record before a write commits.
///
/// Both fields are optional; an empty precondition always holds. This is
/// plain data rather than a closure so that a remote store can translate
/// it into its own condition expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Precondition {
    /// The record's current status must equal this.
    pub status: Option<SessionStatus>,
    /// The record's current version must equal this.
    pub version: Option<u64>,
}

impl Precondition {
    /// A precondition that always holds.
    pub fn always() -> Self {
        Self::default()
    }

    /// Requires the session to currently be in `status`.
    pub fn status(status: SessionStatus) -> Self {
        Self {
            status: Some(status),
            version: None,
        }
    }

    /// Additionally pins the record version (optimistic compare-and-swap).
    pub fn and_version(self, version: u64) -> Self {
        Self {
            version: Some(version),
            ..self
        }
    }

    /// Returns `true` if `session` satisfies every constraint.
    pub fn holds(&self, session: &Session) -> bool {
        self.status.is_none_or(|s| s == session.status)
            && self.version.is_none_or(|v| v == session.version)
    }
}

// ---------------------------------------------------------------------------
// SessionUpdate
// ---------------------------------------------------------------------------

/// Field replacements applied in a single atomic write.
///
/// `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionUpdate {
    pub status: Option<SessionStatus>,
    pub players: Option<Vec<Player>>,
    pub word: Option<String>,
}

impl SessionUpdate {
    /// Replaces only the player list.
    pub fn players(players: Vec<Player>) -> Self {
        Self {
            players: Some(players),
            ..Self::default()
        }
    }

    /// The start transition: status, assigned players, and word together.
    pub fn start(players: Vec<Player>, word: String) -> Self {
        Self {
            status: Some(SessionStatus::Started),
            players: Some(players),
            word: Some(word),
        }
    }

    /// Writes the replacements into `session` and bumps its version.
    ///
    /// Store implementations call this inside their critical section
    /// once the precondition has been checked.
    pub fn apply_to(self, session: &mut Session) {
        if let Some(status) = self.status {
            session.status = status;
        }
        if let Some(players) = self.players {
            session.players = players;
        }
        if let Some(word) = self.word {
            session.word = Some(word);
        }
        session.version += 1;
    }
}

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// Result of [`SessionStore::put_if_absent`](crate::SessionStore::put_if_absent).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PutOutcome {
    Created,
    /// A session already exists under that code; nothing was written.
    AlreadyExists,
}

/// Result of a conditional write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The write committed. Carries the record as it now stands.
    Applied(Session),
    /// The precondition failed. Carries the record that failed it.
    PreconditionFailed(Session),
    /// No session exists under that code.
    Missing,
}
