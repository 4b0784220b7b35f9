//! `WordMafiaServer` builder and accept loop.
//!
//! Ties the layers together: transport → protocol → lobby → store.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use wordmafia_lobby::{LobbyConfig, LobbyManager, WordPool};
use wordmafia_protocol::{Codec, JsonCodec};
use wordmafia_store::SessionStore;

use crate::WordMafiaError;
use crate::handler::handle_connection;
use crate::transport::WebSocketListener;

/// Default address used when the builder isn't given one.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";

/// Per-connection settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// A connection that sends nothing for this long is closed. Polling
    /// clients re-read the snapshot every few seconds, so a minute of
    /// silence means the client is gone.
    pub idle_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            idle_timeout: Duration::from_secs(60),
        }
    }
}

/// Shared state handed to every connection task.
pub(crate) struct ServerState<S: SessionStore, W: WordPool, C: Codec> {
    pub(crate) lobby: LobbyManager<S, W>,
    pub(crate) codec: C,
    pub(crate) config: ServerConfig,
}

/// Builder for configuring and starting a Word Mafia server.
///
/// # Example
///
/// ```rust,no_run
/// use wordmafia::prelude::*;
///
/// # async fn demo() -> Result<(), WordMafiaError> {
/// let server = WordMafiaServerBuilder::new()
///     .bind("0.0.0.0:8080")
///     .build(MemoryStore::new(), StaticWordPool::default())
///     .await?;
/// server.run().await
/// # }
/// ```
pub struct WordMafiaServerBuilder {
    bind_addr: String,
    lobby_config: LobbyConfig,
    server_config: ServerConfig,
}

impl WordMafiaServerBuilder {
    /// Creates a builder with default settings.
    pub fn new() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            lobby_config: LobbyConfig::default(),
            server_config: ServerConfig::default(),
        }
    }

    /// Sets the address to bind the server to.
    pub fn bind(mut self, addr: &str) -> Self {
        self.bind_addr = addr.to_string();
        self
    }

    /// Sets the lobby rules (player minimum, retry budgets, ...).
    pub fn lobby_config(mut self, config: LobbyConfig) -> Self {
        self.lobby_config = config;
        self
    }

    pub fn server_config(mut self, config: ServerConfig) -> Self {
        self.server_config = config;
        self
    }

    /// Shorthand for overriding only [`ServerConfig::idle_timeout`].
    pub fn idle_timeout(mut self, timeout: Duration) -> Self {
        self.server_config.idle_timeout = timeout;
        self
    }

    /// Binds the listener and wires up the lobby over `store` and `words`.
    ///
    /// Uses `JsonCodec`, the only wire format clients speak.
    pub async fn build<S: SessionStore, W: WordPool>(
        self,
        store: S,
        words: W,
    ) -> Result<WordMafiaServer<S, W, JsonCodec>, WordMafiaError> {
        let listener = WebSocketListener::bind(&self.bind_addr).await?;

        let state = Arc::new(ServerState {
            lobby: LobbyManager::new(store, words, self.lobby_config),
            codec: JsonCodec,
            config: self.server_config,
        });

        Ok(WordMafiaServer { listener, state })
    }
}

impl Default for WordMafiaServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A bound Word Mafia server.
///
/// Call [`run()`](Self::run) to start accepting connections.
pub struct WordMafiaServer<S: SessionStore, W: WordPool, C: Codec> {
    listener: WebSocketListener,
    state: Arc<ServerState<S, W, C>>,
}

impl<S, W, C> WordMafiaServer<S, W, C>
where
    S: SessionStore,
    W: WordPool,
    C: Codec,
{
    /// Returns the local address the server is bound to.
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Runs the accept loop until the task is dropped.
    ///
    /// Each connection gets its own task, which also runs the WebSocket
    /// upgrade, so a slow or silent client never delays the next accept.
    /// A failed accept is logged and the loop carries on.
    pub async fn run(self) -> Result<(), WordMafiaError> {
        tracing::info!("Word Mafia server running");

        loop {
            match self.listener.accept().await {
                Ok(conn) => {
                    let state = Arc::clone(&self.state);
                    tokio::spawn(async move {
                        let id = conn.id();
                        if let Err(e) = handle_connection(conn, state).await {
                            tracing::debug!(%id, error = %e, "connection ended with error");
                        }
                    });
                }
                Err(e) => {
                    tracing::warn!(error = %e, "accept failed");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_config_default_timeout() {
        assert_eq!(ServerConfig::default().idle_timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_builder_overrides() {
        let builder = WordMafiaServerBuilder::new()
            .bind("0.0.0.0:9000")
            .idle_timeout(Duration::from_secs(5))
            .lobby_config(LobbyConfig {
                min_players: 3,
                ..LobbyConfig::default()
            });

        assert_eq!(builder.bind_addr, "0.0.0.0:9000");
        assert_eq!(builder.server_config.idle_timeout, Duration::from_secs(5));
        assert_eq!(builder.lobby_config.min_players, 3);
    }
}
