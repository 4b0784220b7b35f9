//! Error types for the lobby layer.

use wordmafia_protocol::{ErrorBody, ErrorKind, SessionCode};
use wordmafia_store::StoreError;

/// Errors returned by lobby operations.
///
/// Each variant maps onto one [`ErrorKind`] of the wire format.
#[derive(Debug, thiserror::Error)]
pub enum LobbyError {
    /// Missing or malformed caller input (blank name, blank code, ...).
    #[error("invalid request: {0}")]
    Validation(String),

    /// No session exists under this code.
    #[error("session {0} not found")]
    NotFound(SessionCode),

    /// The operation isn't allowed in the session's current state.
    /// For example, starting with three players, or joining after start.
    #[error("invalid session state: {0}")]
    InvalidState(String),

    /// Every generated code was already taken.
    #[error("could not allocate a session code: {0}")]
    Conflict(String),

    /// The session store failed. The session is unchanged.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl LobbyError {
    /// The wire-level category for this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::InvalidState(_) => ErrorKind::InvalidState,
            Self::Conflict(_) => ErrorKind::Conflict,
            Self::Store(_) => ErrorKind::Store,
        }
    }

    /// Builds the client-facing error payload.
    ///
    /// Store errors are summarised; their text can name backend
    /// internals and stays in the server log.
    pub fn to_body(&self) -> ErrorBody {
        match self {
            Self::Store(_) => ErrorBody::new(
                ErrorKind::Store,
                "session store temporarily unavailable, please retry",
            ),
            other => ErrorBody::new(other.kind(), other.to_string()),
        }
    }
}
