//! WebSocket listener and connections, via `tokio-tungstenite`.
//!
//! Every frame is one whole message. Text and binary frames are both
//! accepted on the way in; replies go out as text, since the payload is
//! JSON and browsers handle text frames most easily.

use std::fmt;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};

use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::WebSocketStream;
use tokio_tungstenite::tungstenite::{self, Message};

/// Counter for generating unique connection IDs.
static NEXT_CONNECTION_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque identifier for a connection, used only in log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

impl ConnectionId {
    fn next() -> Self {
        Self(NEXT_CONNECTION_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

/// Errors that can occur in the transport layer.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Binding the listening socket failed.
    #[error("bind failed: {0}")]
    Bind(#[source] std::io::Error),

    /// Accepting a TCP connection failed.
    #[error("accept failed: {0}")]
    Accept(#[source] std::io::Error),

    /// The peer connected but the WebSocket upgrade failed.
    #[error("websocket handshake failed: {0}")]
    Handshake(#[source] tungstenite::Error),

    /// Sending a frame failed.
    #[error("send failed: {0}")]
    Send(#[source] tungstenite::Error),

    /// Receiving a frame failed.
    #[error("receive failed: {0}")]
    Receive(#[source] tungstenite::Error),
}

/// Accepts incoming WebSocket connections.
pub struct WebSocketListener {
    listener: TcpListener,
}

impl WebSocketListener {
    /// Binds to `addr`. Port 0 picks a free port; see [`local_addr`](Self::local_addr).
    pub async fn bind(addr: &str) -> Result<Self, TransportError> {
        let listener = TcpListener::bind(addr).await.map_err(TransportError::Bind)?;
        tracing::info!(addr, "WebSocket listener bound");
        Ok(Self { listener })
    }

    /// Returns the address actually bound.
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Waits for the next TCP client.
    ///
    /// Only the TCP accept happens here. The WebSocket upgrade is left to
    /// [`PendingConnection::upgrade`] so a client that never finishes it
    /// can't hold up the accept loop.
    pub async fn accept(&self) -> Result<PendingConnection, TransportError> {
        let (stream, addr) = self.listener.accept().await.map_err(TransportError::Accept)?;
        let id = ConnectionId::next();
        tracing::debug!(%id, %addr, "accepted TCP connection");
        Ok(PendingConnection { id, addr, stream })
    }
}

/// A TCP connection that hasn't completed the WebSocket upgrade yet.
pub struct PendingConnection {
    id: ConnectionId,
    addr: SocketAddr,
    stream: TcpStream,
}

impl PendingConnection {
    pub fn id(&self) -> ConnectionId {
        self.id
    }

    pub fn peer_addr(&self) -> SocketAddr {
        self.addr
    }

    /// Runs the WebSocket handshake. Waits as long as the client takes;
    /// callers bound it with a timeout.
    pub async fn upgrade(self) -> Result<WebSocketConnection, TransportError> {
        let ws = tokio_tungstenite::accept_async(self.stream)
            .await
            .map_err(TransportError::Handshake)?;
        tracing::debug!(id = %self.id, "WebSocket upgrade complete");

        Ok(WebSocketConnection { ws })
    }
}

/// A single client connection.
///
/// Owned by exactly one handler task, so reads and writes need no lock.
pub struct WebSocketConnection {
    ws: WebSocketStream<TcpStream>,
}

impl WebSocketConnection {
    /// Receives the next data frame.
    ///
    /// Control frames are skipped. Returns `Ok(None)` once the peer has
    /// closed the connection.
    pub async fn recv(&mut self) -> Result<Option<Vec<u8>>, TransportError> {
        loop {
            match self.ws.next().await {
                Some(Ok(Message::Text(text))) => return Ok(Some(text.as_bytes().to_vec())),
                Some(Ok(Message::Binary(data))) => return Ok(Some(data.to_vec())),
                Some(Ok(Message::Close(_))) | None => return Ok(None),
                Some(Ok(_)) => continue, // ping/pong/raw frame
                Some(Err(e)) => return Err(TransportError::Receive(e)),
            }
        }
    }

    /// Sends `data` as a text frame, or as a binary frame if it isn't UTF-8.
    pub async fn send(&mut self, data: Vec<u8>) -> Result<(), TransportError> {
        let msg = match String::from_utf8(data) {
            Ok(text) => Message::Text(text.into()),
            Err(e) => Message::Binary(e.into_bytes().into()),
        };
        self.ws.send(msg).await.map_err(TransportError::Send)
    }

    /// Starts the closing handshake.
    pub async fn close(&mut self) -> Result<(), TransportError> {
        self.ws.close(None).await.map_err(TransportError::Send)
    }
}
