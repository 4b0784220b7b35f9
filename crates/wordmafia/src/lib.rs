//! # Word Mafia
//!
//! Session coordination server for Word Mafia, a party game where every
//! player but one shares a secret word and the odd one out has to bluff.
//!
//! Clients talk JSON over WebSocket. A host creates a session and reads
//! out its code, friends join with that code, and the host starts the
//! round once at least four players are in. Everyone then polls
//! `getSnapshot` to learn their own role and, unless they are the
//! saboteur, the word.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use wordmafia::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), WordMafiaError> {
//!     wordmafia::telemetry::init();
//!
//!     let server = WordMafiaServerBuilder::new()
//!         .bind("0.0.0.0:8080")
//!         .build(MemoryStore::new(), StaticWordPool::default())
//!         .await?;
//!     server.run().await
//! }
//! ```

mod error;
mod handler;
mod server;
pub mod telemetry;
pub mod transport;

pub use error::WordMafiaError;
pub use server::{DEFAULT_BIND_ADDR, ServerConfig, WordMafiaServer, WordMafiaServerBuilder};

/// Everything needed to run a server, in one import.
pub mod prelude {
    pub use crate::{ServerConfig, WordMafiaError, WordMafiaServer, WordMafiaServerBuilder};

    pub use wordmafia_lobby::{LobbyConfig, LobbyError, StaticWordPool, WordPool};
    pub use wordmafia_protocol::{
        Codec, ErrorBody, ErrorKind, JsonCodec, PlayerSummary, Request, RequestEnvelope, Response,
        ResponseEnvelope, Secret, SessionCode, SessionStatus, SessionView, ViewerRole,
    };
    pub use wordmafia_store::{MemoryStore, SessionStore, StoreError};
}
