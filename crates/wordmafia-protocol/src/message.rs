//! Request and response envelopes exchanged with clients.
//!
//! Every frame a client sends is one [`RequestEnvelope`]; the server
//! answers each with exactly one [`ResponseEnvelope`] carrying the same
//! `id`, so a client polling on a timer can match answers to questions.
//!
//! ```text
//! → { "id": 7, "request": { "op": "join", "code": "482-917", "playerName": "Bob" } }
//! ← { "id": 7, "response": { "type": "Snapshot", "code": "482-917", ... } }
//! ```

use serde::{Deserialize, Serialize};

use crate::{SessionCode, SessionView};

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// One lifecycle operation requested by a client.
///
/// Internally tagged by `op`; field names are camelCase to match the
/// JSON bodies browser clients already send (`hostName`, `playerName`).
/// Missing name fields decode as empty strings so the lobby can answer
/// with a proper validation error instead of a decode failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum Request {
    /// Open a new session with the sender as host.
    #[serde(rename_all = "camelCase")]
    Create {
        #[serde(default)]
        host_name: String,
    },

    /// Join an existing pending session.
    #[serde(rename_all = "camelCase")]
    Join {
        code: SessionCode,
        #[serde(default)]
        player_name: String,
    },

    /// Start the round. `player_name` selects whose view is returned.
    #[serde(rename_all = "camelCase")]
    Start {
        code: SessionCode,
        #[serde(default)]
        player_name: Option<String>,
    },

    /// Poll the current state of a session.
    #[serde(rename_all = "camelCase")]
    GetSnapshot {
        code: SessionCode,
        #[serde(default)]
        player_name: Option<String>,
    },
}

impl Request {
    /// Short operation name for logs.
    pub fn op(&self) -> &'static str {
        match self {
            Self::Create { .. } => "create",
            Self::Join { .. } => "join",
            Self::Start { .. } => "start",
            Self::GetSnapshot { .. } => "getSnapshot",
        }
    }
}

/// A request plus the client-chosen correlation id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestEnvelope {
    #[serde(default)]
    pub id: u64,
    pub request: Request,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Machine-readable error category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Malformed or missing input. The caller's fault; don't retry as-is.
    Validation,
    /// No session exists for the given code.
    NotFound,
    /// Not allowed in the session's current state.
    InvalidState,
    /// Could not allocate a fresh session code.
    Conflict,
    /// The store failed or stayed contended. Safe to retry.
    Store,
}

impl ErrorKind {
    /// HTTP-style status code, following the same conventions as the
    /// rest of the wire format (400 = bad request, 404 = not found, ...).
    pub fn status(&self) -> u16 {
        match self {
            Self::Validation => 400,
            Self::NotFound => 404,
            Self::InvalidState | Self::Conflict => 409,
            Self::Store => 503,
        }
    }
}

/// The error payload: `{ "kind": "NotFound", "error": "...", "status": 404 }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub kind: ErrorKind,
    /// Human-readable summary. Never contains store internals.
    pub error: String,
    pub status: u16,
}

impl ErrorBody {
    pub fn new(kind: ErrorKind, error: impl Into<String>) -> Self {
        Self {
            kind,
            error: error.into(),
            status: kind.status(),
        }
    }
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

/// The server's answer to one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Response {
    /// A session was created; share this code with the other players.
    Created { code: SessionCode },

    /// The session as the requesting player is allowed to see it.
    Snapshot(SessionView),

    /// The request failed.
    Error(ErrorBody),
}

/// A response plus the id of the request it answers.
///
/// `id` is 0 when the request couldn't be decoded far enough to read one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub id: u64,
    pub response: Response,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PlayerSummary, SessionStatus};

    #[test]
    fn test_create_request_json_format() {
        let json = r#"{ "id": 1, "request": { "op": "create", "hostName": "Alice" } }"#;
        let env: RequestEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(env.id, 1);
        assert_eq!(
            env.request,
            Request::Create {
                host_name: "Alice".into()
            }
        );
    }

    #[test]
    fn test_join_request_json_format() {
        let req = Request::Join {
            code: SessionCode::new("123-456"),
            player_name: "Bob".into(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["op"], "join");
        assert_eq!(json["code"], "123-456");
        assert_eq!(json["playerName"], "Bob");
    }

    #[test]
    fn test_get_snapshot_op_name_is_camel_case() {
        let json = r#"{ "op": "getSnapshot", "code": "123-456" }"#;
        let req: Request = serde_json::from_str(json).unwrap();
        assert_eq!(
            req,
            Request::GetSnapshot {
                code: SessionCode::new("123-456"),
                player_name: None,
            }
        );
        assert_eq!(req.op(), "getSnapshot");
    }

    #[test]
    fn test_missing_host_name_decodes_as_empty() {
        let req: Request = serde_json::from_str(r#"{ "op": "create" }"#).unwrap();
        assert_eq!(
            req,
            Request::Create {
                host_name: String::new()
            }
        );
    }

    #[test]
    fn test_missing_envelope_id_defaults_to_zero() {
        let json = r#"{ "request": { "op": "start", "code": "123-456" } }"#;
        let env: RequestEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(env.id, 0);
    }

    #[test]
    fn test_unknown_op_returns_error() {
        let result: Result<Request, _> =
            serde_json::from_str(r#"{ "op": "leave", "code": "123-456" }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_error_response_json_format() {
        let resp = Response::Error(ErrorBody::new(ErrorKind::NotFound, "session not found"));
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["type"], "Error");
        assert_eq!(json["kind"], "NotFound");
        assert_eq!(json["error"], "session not found");
        assert_eq!(json["status"], 404);
    }

    #[test]
    fn test_snapshot_response_flattens_view() {
        let resp = Response::Snapshot(SessionView {
            code: SessionCode::new("123-456"),
            status: SessionStatus::Pending,
            players: vec![PlayerSummary {
                name: "Alice".into(),
                is_host: true,
            }],
            role: None,
            secret: None,
        });
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["type"], "Snapshot");
        assert_eq!(json["code"], "123-456");
        assert_eq!(json["players"][0]["name"], "Alice");
    }

    #[test]
    fn test_error_kind_status_codes() {
        assert_eq!(ErrorKind::Validation.status(), 400);
        assert_eq!(ErrorKind::NotFound.status(), 404);
        assert_eq!(ErrorKind::InvalidState.status(), 409);
        assert_eq!(ErrorKind::Conflict.status(), 409);
        assert_eq!(ErrorKind::Store.status(), 503);
    }
}
