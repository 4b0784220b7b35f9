//! Player-specific views of a session.
//!
//! Clients never see a raw [`Session`](crate::Session). They get a
//! [`SessionView`] projected for one player: everyone's name, but only
//! their own role, and the word only if their role is allowed to know it.

use serde::{Deserialize, Serialize};

use crate::{SessionCode, SessionStatus};

/// A player as other players see them: name and host flag, never a role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSummary {
    pub name: String,
    pub is_host: bool,
}

/// The viewer's own role, as reported in a started session.
///
/// `Unknown` means the requested name isn't in the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewerRole {
    Saboteur,
    Regular,
    Unknown,
}

/// What the viewer is told in place of (or as) the secret word.
///
/// Adjacently tagged:
///   `{ "kind": "Word", "text": "cherry" }`
///   `{ "kind": "Instruction", "text": "You are the Saboteur..." }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text")]
pub enum Secret {
    /// The shared word. Only ever given to `Regular` players.
    Word(String),
    /// Shown to the saboteur instead of the word.
    Instruction(String),
}

/// A session snapshot projected for a single player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub code: SessionCode,
    pub status: SessionStatus,
    pub players: Vec<PlayerSummary>,

    /// Absent while the session is pending.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<ViewerRole>,

    /// Absent while pending, and for viewers whose role is `Unknown`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret: Option<Secret>,
}

impl SessionView {
    /// The word, if this view discloses it.
    pub fn word(&self) -> Option<&str> {
        match &self.secret {
            Some(Secret::Word(word)) => Some(word),
            _ => None,
        }
    }
}
