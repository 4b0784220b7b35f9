//! Per-connection handler: decode a request, run it, answer it.
//!
//! The protocol is strict request/response. Each incoming frame holds one
//! [`RequestEnvelope`]; the handler always sends back exactly one
//! [`ResponseEnvelope`] carrying the same `id`, even when the frame could
//! not be decoded (then `id` is 0). There is no server push: clients poll
//! with `getSnapshot`.

use std::sync::Arc;

use wordmafia_lobby::{LobbyError, LobbyManager, WordPool};
use wordmafia_protocol::{
    Codec, ErrorBody, ErrorKind, Request, RequestEnvelope, Response, ResponseEnvelope,
};
use wordmafia_store::SessionStore;

use crate::WordMafiaError;
use crate::server::ServerState;
use crate::transport::PendingConnection;

/// Handles a single connection from accept to close.
///
/// The WebSocket upgrade runs here, inside the connection's own task, and
/// gets the same `idle_timeout` as every later read.
pub(crate) async fn handle_connection<S, W, C>(
    pending: PendingConnection,
    state: Arc<ServerState<S, W, C>>,
) -> Result<(), WordMafiaError>
where
    S: SessionStore,
    W: WordPool,
    C: Codec,
{
    let conn_id = pending.id();
    let peer = pending.peer_addr();

    let mut conn = match tokio::time::timeout(state.config.idle_timeout, pending.upgrade()).await {
        Ok(result) => result?,
        Err(_) => {
            tracing::debug!(%conn_id, %peer, "no WebSocket handshake before timeout, dropping");
            return Ok(());
        }
    };
    tracing::debug!(%conn_id, %peer, "handling new connection");

    loop {
        let data = match tokio::time::timeout(state.config.idle_timeout, conn.recv()).await {
            Ok(Ok(Some(data))) => data,
            Ok(Ok(None)) => {
                tracing::debug!(%conn_id, "connection closed cleanly");
                break;
            }
            Ok(Err(e)) => return Err(e.into()),
            Err(_) => {
                tracing::debug!(%conn_id, "connection idle, closing");
                let _ = conn.close().await;
                break;
            }
        };

        let reply = match state.codec.decode::<RequestEnvelope>(&data) {
            Ok(envelope) => ResponseEnvelope {
                id: envelope.id,
                response: dispatch(&state.lobby, envelope.request).await,
            },
            Err(e) => {
                tracing::debug!(%conn_id, error = %e, "undecodable request");
                ResponseEnvelope {
                    id: 0,
                    response: Response::Error(ErrorBody::new(
                        ErrorKind::Validation,
                        format!("invalid request: {e}"),
                    )),
                }
            }
        };

        let bytes = state.codec.encode(&reply)?;
        conn.send(bytes).await?;
    }

    Ok(())
}

/// Runs one request against the lobby and builds the response.
///
/// Anything that goes back to a client as a snapshot is projected for
/// the named player first; raw sessions never leave the server.
pub(crate) async fn dispatch<S, W>(lobby: &LobbyManager<S, W>, request: Request) -> Response
where
    S: SessionStore,
    W: WordPool,
{
    let op = request.op();

    let result = match request {
        Request::Create { host_name } => lobby
            .create(&host_name)
            .await
            .map(|session| Response::Created { code: session.code }),

        Request::Join { code, player_name } => lobby
            .join(code.as_str(), &player_name)
            .await
            .map(|session| Response::Snapshot(lobby.project(&session, &player_name))),

        Request::Start { code, player_name } => {
            let viewer = player_name.as_deref().unwrap_or_default();
            lobby
                .start(code.as_str())
                .await
                .map(|session| Response::Snapshot(lobby.project(&session, viewer)))
        }

        Request::GetSnapshot { code, player_name } => {
            let viewer = player_name.as_deref().unwrap_or_default();
            lobby
                .view(code.as_str(), viewer)
                .await
                .map(Response::Snapshot)
        }
    };

    result.unwrap_or_else(|err| {
        log_failure(op, &err);
        Response::Error(err.to_body())
    })
}

fn log_failure(op: &str, err: &LobbyError) {
    match err {
        LobbyError::Store(e) => tracing::warn!(op, error = %e, "store failure"),
        other => tracing::debug!(op, error = %other, "request rejected"),
    }
}
