//! Wire protocol and data model for Word Mafia.
//!
//! This crate defines everything that is serialized:
//!
//! - **Session record** ([`Session`], [`Player`], [`Role`],
//!   [`SessionStatus`], [`SessionCode`]): the shape persisted in the
//!   session store.
//! - **Views** ([`SessionView`], [`Secret`], [`ViewerRole`]): what a
//!   single player is allowed to see.
//! - **Messages** ([`RequestEnvelope`], [`ResponseEnvelope`],
//!   [`ErrorBody`]): the JSON frames exchanged with clients.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]): bytes in, types out.
//!
//! # Architecture
//!
//! ```text
//! Transport (frames) → Protocol (envelopes) → Lobby (sessions) → Store (records)
//! ```

mod codec;
mod error;
mod message;
mod session;
mod view;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use message::{
    ErrorBody, ErrorKind, Request, RequestEnvelope, Response, ResponseEnvelope,
};
pub use session::{Player, Role, Session, SessionCode, SessionStatus};
pub use view::{PlayerSummary, Secret, SessionView, ViewerRole};
