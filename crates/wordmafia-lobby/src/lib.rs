//! The Word Mafia session lifecycle.
//!
//! A session moves through two states, driven by [`LobbyManager`]:
//!
//! ```text
//! create ─→ Pending ──join──→ Pending ──start──→ Started
//! ```
//!
//! Starting picks the shared word from a [`WordPool`] and secretly makes
//! one player the saboteur ([`assign_roles`]). Players then read the
//! session through [`project`], which only ever shows a player their own
//! role, and the word only to those allowed to know it.
//!
//! # Key types
//!
//! - [`LobbyManager`]: create, join, start, snapshot
//! - [`LobbyConfig`]: player minimum, retry budgets, saboteur text
//! - [`WordPool`] / [`StaticWordPool`]: where secret words come from
//! - [`LobbyError`]: validation, not-found, state, conflict and store failures

mod code;
mod config;
mod error;
mod manager;
mod roles;
mod view;
mod words;

pub use code::generate_code;
pub use config::LobbyConfig;
pub use error::LobbyError;
pub use manager::LobbyManager;
pub use roles::assign_roles;
pub use view::project;
pub use words::{DEFAULT_WORDS, StaticWordPool, WordPool};
