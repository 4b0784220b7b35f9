//! The persisted session record.
//!
//! A [`Session`] is one round of Word Mafia: who joined, in what order,
//! whether the round has started, and (once it has) the shared secret
//! word. This is the exact shape written to the session store, so the
//! field names are camelCase on the wire (`isHost`, `createdAt`).

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// SessionCode
// ---------------------------------------------------------------------------

/// The human-readable code players type to find a session, e.g. `"482-917"`.
///
/// Newtype over `String` so a code can't be mixed up with a player name
/// in a function signature. `#[serde(transparent)]` keeps it a plain JSON
/// string on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionCode(String);

impl SessionCode {
    /// Wraps a raw code. No format check is done here; codes arrive from
    /// clients as free text and an unknown code is simply not found.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the code has the `DDD-DDD` shape produced by
    /// the code generator.
    pub fn is_well_formed(&self) -> bool {
        let bytes = self.0.as_bytes();
        bytes.len() == 7
            && bytes[3] == b'-'
            && bytes[..3].iter().all(u8::is_ascii_digit)
            && bytes[4..].iter().all(u8::is_ascii_digit)
    }
}

impl fmt::Display for SessionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SessionCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

// ---------------------------------------------------------------------------
// Role / SessionStatus
// ---------------------------------------------------------------------------

/// A player's secret role.
///
/// Every player is `Unassigned` until the session starts. Starting assigns
/// exactly one `Saboteur`; everyone else becomes `Regular`. Roles never
/// change after that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Role {
    #[default]
    Unassigned,
    Saboteur,
    Regular,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unassigned => write!(f, "Unassigned"),
            Self::Saboteur => write!(f, "Saboteur"),
            Self::Regular => write!(f, "Regular"),
        }
    }
}

/// The two-state session lifecycle.
///
/// ```text
/// Pending ──(start)──→ Started
/// ```
///
/// There is no way back: a started session stays started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SessionStatus {
    #[default]
    Pending,
    Started,
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "Pending"),
            Self::Started => write!(f, "Started"),
        }
    }
}

// ---------------------------------------------------------------------------
// Player
// ---------------------------------------------------------------------------

/// One participant in a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    /// Display name chosen by the client. Not required to be unique.
    pub name: String,

    /// `true` only for the player who created the session.
    #[serde(default)]
    pub is_host: bool,

    /// `Unassigned` until the session starts.
    #[serde(default)]
    pub role: Role,
}

impl Player {
    /// A freshly joined, non-host player.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_host: false,
            role: Role::Unassigned,
        }
    }

    /// The session creator.
    pub fn host(name: impl Into<String>) -> Self {
        Self {
            is_host: true,
            ..Self::new(name)
        }
    }

    /// Returns a copy of this player carrying `role`.
    pub fn with_role(&self, role: Role) -> Self {
        Self {
            role,
            ..self.clone()
        }
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// The full internal state of a session (a "snapshot").
///
/// Invariants, upheld by the lifecycle manager:
/// - at most one player has `is_host == true`
/// - `word.is_some()` exactly when `status == Started`
/// - once started, exactly one player is `Saboteur`
/// - `players` only ever grows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub code: SessionCode,
    pub status: SessionStatus,

    /// Join order until the session starts; shuffled order afterwards.
    pub players: Vec<Player>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word: Option<String>,

    pub created_at: DateTime<Utc>,

    /// Bumped by the store on every committed write. Conditional updates
    /// compare against it to detect concurrent modification.
    #[serde(default)]
    pub version: u64,
}

impl Session {
    /// Builds a new pending session with `host` as its only player.
    pub fn new(code: SessionCode, host: Player, created_at: DateTime<Utc>) -> Self {
        Self {
            code,
            status: SessionStatus::Pending,
            players: vec![host],
            word: None,
            created_at,
            version: 0,
        }
    }

    /// Finds the first player with this exact (case-sensitive) name.
    pub fn player(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.name == name)
    }

    /// Returns the host player.
    pub fn host(&self) -> Option<&Player> {
        self.players.iter().find(|p| p.is_host)
    }

    pub fn is_started(&self) -> bool {
        self.status == SessionStatus::Started
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Session {
        let mut session = Session::new(
            SessionCode::new("123-456"),
            Player::host("Alice"),
            Utc::now(),
        );
        session.players.push(Player::new("Bob"));
        session
    }

    #[test]
    fn test_session_code_well_formed() {
        assert!(SessionCode::new("123-456").is_well_formed());
        assert!(!SessionCode::new("123456").is_well_formed());
        assert!(!SessionCode::new("12-3456").is_well_formed());
        assert!(!SessionCode::new("abc-def").is_well_formed());
        assert!(!SessionCode::new("").is_well_formed());
    }

    #[test]
    fn test_session_code_serializes_as_plain_string() {
        let json = serde_json::to_string(&SessionCode::new("100-999")).unwrap();
        assert_eq!(json, "\"100-999\"");
    }

    #[test]
    fn test_new_session_is_pending_with_single_host() {
        let session = Session::new(SessionCode::new("123-456"), Player::host("Alice"), Utc::now());
        assert_eq!(session.status, SessionStatus::Pending);
        assert_eq!(session.players.len(), 1);
        assert!(session.players[0].is_host);
        assert_eq!(session.players[0].role, Role::Unassigned);
        assert!(session.word.is_none());
        assert_eq!(session.version, 0);
    }

    #[test]
    fn test_session_record_uses_camel_case_fields() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["code"], "123-456");
        assert_eq!(json["status"], "Pending");
        assert_eq!(json["players"][0]["isHost"], true);
        assert_eq!(json["players"][1]["role"], "Unassigned");
        assert!(json.get("createdAt").is_some());
        // `word` is omitted entirely while pending.
        assert!(json.get("word").is_none());
    }

    #[test]
    fn test_player_lookup_is_case_sensitive() {
        let session = sample();
        assert!(session.player("Bob").is_some());
        assert!(session.player("bob").is_none());
        assert_eq!(session.host().map(|p| p.name.as_str()), Some("Alice"));
    }

    #[test]
    fn test_player_with_role_keeps_identity() {
        let host = Player::host("Alice").with_role(Role::Saboteur);
        assert_eq!(host.name, "Alice");
        assert!(host.is_host);
        assert_eq!(host.role, Role::Saboteur);
    }
}
