//! Unified error type for the Word Mafia server.

use wordmafia_protocol::ProtocolError;

use crate::transport::TransportError;

/// Top-level error: what ends a connection task or stops the server.
///
/// Lobby and store failures never reach this type. They become an
/// `Error` response to the client and the connection carries on.
#[derive(Debug, thiserror::Error)]
pub enum WordMafiaError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_protocol_error() {
        let err: WordMafiaError = ProtocolError::InvalidMessage("empty frame".into()).into();
        assert!(matches!(err, WordMafiaError::Protocol(_)));
        assert!(err.to_string().contains("empty frame"));
    }

    #[test]
    fn test_from_transport_error() {
        let io = std::io::Error::new(std::io::ErrorKind::AddrInUse, "taken");
        let err: WordMafiaError = TransportError::Bind(io).into();
        assert!(err.to_string().contains("taken"));
    }
}
