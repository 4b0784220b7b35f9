use wordmafia::prelude::*;

/// Environment variable holding the listen address.
const BIND_ENV: &str = "WORDMAFIA_BIND";
const DEFAULT_BIND: &str = "0.0.0.0:8080";

fn bind_addr() -> String {
    std::env::var(BIND_ENV)
        .ok()
        .filter(|addr| !addr.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_BIND.to_string())
}

async fn build(addr: &str) -> Result<WordMafiaServer<MemoryStore, StaticWordPool, JsonCodec>, WordMafiaError> {
    WordMafiaServerBuilder::new()
        .bind(addr)
        .build(MemoryStore::new(), StaticWordPool::default())
        .await
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    wordmafia::telemetry::init();

    let server = build(&bind_addr()).await?;
    tracing::info!(addr = %server.local_addr()?, "party server listening");

    tokio::select! {
        result = server.run() => result?,
        _ = tokio::signal::ctrl_c() => tracing::info!("shutting down"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::{SinkExt, StreamExt};
    use tokio_tungstenite::tungstenite::Message;

    #[tokio::test]
    async fn test_demo_server_creates_sessions() {
        let server = build("127.0.0.1:0").await.unwrap();
        let addr = server.local_addr().unwrap();
        tokio::spawn(async move {
            let _ = server.run().await;
        });

        let (mut ws, _) = tokio_tungstenite::connect_async(format!("ws://{addr}"))
            .await
            .unwrap();
        ws.send(Message::Text(
            r#"{"id":1,"request":{"op":"create","hostName":"Alice"}}"#.into(),
        ))
        .await
        .unwrap();

        let reply = ws.next().await.unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_slice(&reply.into_data()).unwrap();
        assert_eq!(json["response"]["type"], "Created");
    }
}
