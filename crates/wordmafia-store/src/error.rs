//! Error types for the store layer.

use wordmafia_protocol::SessionCode;

/// Errors a [`SessionStore`](crate::SessionStore) can report.
///
/// A failed precondition is NOT an error: it's an ordinary
/// [`UpdateOutcome`](crate::UpdateOutcome) the caller decides about.
/// These variants are for the store itself misbehaving.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backend couldn't be reached or rejected the call.
    #[error("session store unavailable: {0}")]
    Unavailable(String),

    /// A retried conditional write kept losing to concurrent writers.
    #[error("session {code} still contended after {attempts} attempts")]
    Contention { code: SessionCode, attempts: u32 },
}
