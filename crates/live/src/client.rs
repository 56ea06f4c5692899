//! WebSocket client for the backend push channel.
//!
//! [`PushClient`] holds the channel URL; [`PushClient::connect`]
//! establishes a live [`PushConnection`].

use tokio_tungstenite::{connect_async, MaybeTlsStream};

/// Configuration handle for the backend push channel.
pub struct PushClient {
    ws_url: String,
}

/// A live WebSocket connection to the push channel.
pub struct PushConnection {
    /// Unique client id sent during the handshake.
    pub client_id: String,
    /// The raw WebSocket stream for reading frames.
    pub ws_stream: tokio_tungstenite::WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>,
}

impl PushClient {
    /// Create a client targeting the given WebSocket base URL,
    /// e.g. `ws://host:4000`.
    pub fn new(ws_url: String) -> Self {
        Self { ws_url }
    }

    /// WebSocket base URL.
    pub fn ws_url(&self) -> &str {
        &self.ws_url
    }

    /// Connect to the push channel.
    ///
    /// Generates a unique client id (UUID v4) and appends it as a query
    /// parameter so the backend can address this subscriber.
    pub async fn connect(&self) -> Result<PushConnection, PushClientError> {
        let client_id = uuid::Uuid::new_v4().to_string();
        let url = format!("{}/ws?clientId={client_id}", self.ws_url);

        let (ws_stream, _response) = connect_async(&url).await.map_err(|e| {
            PushClientError::Connection(format!(
                "Failed to connect to push channel at {}: {e}",
                self.ws_url
            ))
        })?;

        tracing::info!(client_id = %client_id, "Connected to push channel at {}", self.ws_url);

        Ok(PushConnection {
            client_id,
            ws_stream,
        })
    }
}

/// Errors from the push-channel client.
#[derive(Debug, thiserror::Error)]
pub enum PushClientError {
    /// Failed to establish the WebSocket connection.
    #[error("Connection error: {0}")]
    Connection(String),
}
