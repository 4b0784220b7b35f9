//! The [`SessionStore`] trait: the atomic primitives the lobby relies on.
//!
//! The lobby never locks anything itself. Every cross-request guarantee
//! (no lost joins, exactly one successful start) comes from these
//! primitives being atomic per session code. Any backend that can offer
//! a get, a create-if-absent, and a conditional write can implement it:
//! the in-process [`MemoryStore`](crate::MemoryStore), or a remote
//! key-value table with condition expressions.

use wordmafia_protocol::{Player, Session, SessionCode};

use crate::{Precondition, PutOutcome, SessionUpdate, StoreError, UpdateOutcome};

/// Key-value persistence for sessions, keyed by [`SessionCode`].
///
/// # Trait bounds
///
/// - `Send + Sync + 'static` → one store is shared by every connection
///   task for the life of the server.
/// - Every method returns a `Send` future so callers can hold the store
///   behind an `Arc` and drive it from `tokio::spawn`ed tasks.
///
/// # Consistency
///
/// Implementations must give read-your-writes per code, and each write
/// must become visible all at once (never half-applied).
pub trait SessionStore: Send + Sync + 'static {
    /// Reads the latest committed record, or `None` if the code is unknown.
    fn get(
        &self,
        code: &SessionCode,
    ) -> impl Future<Output = Result<Option<Session>, StoreError>> + Send;

    /// Writes `session` only if nothing is stored under its code yet.
    fn put_if_absent(
        &self,
        session: Session,
    ) -> impl Future<Output = Result<PutOutcome, StoreError>> + Send;

    /// Applies `update` only if the current record satisfies
    /// `precondition`. On success the record's version is bumped.
    fn conditional_update(
        &self,
        code: &SessionCode,
        precondition: Precondition,
        update: SessionUpdate,
    ) -> impl Future<Output = Result<UpdateOutcome, StoreError>> + Send;

    /// Appends `player` to the session's player list if `precondition`
    /// holds.
    ///
    /// The default implementation is read-modify-write under a version
    /// compare-and-swap. A round only fails because another write
    /// committed first, so the loop keeps retrying from the record that
    /// write left behind until either the append commits or
    /// `precondition` itself no longer holds. Every concurrent joiner
    /// therefore lands, however many there are.
    ///
    /// Stores with a native atomic list append should override it.
    fn append_player(
        &self,
        code: &SessionCode,
        player: Player,
        precondition: Precondition,
    ) -> impl Future<Output = Result<UpdateOutcome, StoreError>> + Send {
        async move {
            let Some(mut current) = self.get(code).await? else {
                return Ok(UpdateOutcome::Missing);
            };

            let mut attempt: u64 = 0;
            loop {
                attempt += 1;
                if !precondition.holds(&current) {
                    return Ok(UpdateOutcome::PreconditionFailed(current));
                }

                let guard = precondition.and_version(current.version);
                let mut players = current.players.clone();
                players.push(player.clone());

                match self
                    .conditional_update(code, guard, SessionUpdate::players(players))
                    .await?
                {
                    UpdateOutcome::PreconditionFailed(latest) => {
                        tracing::debug!(%code, attempt, "append lost a race, retrying");
                        current = latest;
                    }
                    outcome => return Ok(outcome),
                }
            }
        }
    }
}
