//! Session persistence for Word Mafia.
//!
//! The lobby needs only four primitives from storage, all defined on the
//! [`SessionStore`] trait:
//!
//! 1. **get**: read the latest committed session
//! 2. **put_if_absent**: create a session without clobbering one
//! 3. **conditional_update**: write fields only if a [`Precondition`] holds
//! 4. **append_player**: atomically grow the player list
//!
//! # How it fits in the stack
//!
//! ```text
//! Lobby Layer (above)  ← composes these primitives into create/join/start
//!     ↕
//! Store Layer (this crate)  ← atomic, per-code persistence
//!     ↕
//! Protocol Layer (below)  ← provides the Session record type
//! ```

mod error;
mod memory;
mod store;
mod update;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use store::SessionStore;
pub use update::{Precondition, PutOutcome, SessionUpdate, UpdateOutcome};
