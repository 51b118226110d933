//! Push transport seam.
//!
//! The channel only needs a stream of raw text messages per board;
//! what carries them is a collaborator. Production uses a WebSocket,
//! tests use scripted in-memory streams.

use std::pin::Pin;

use async_trait::async_trait;
use futures_util::{Stream, StreamExt};
use syncboard_board::types::BoardKey;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::debug;

use crate::error::{Result, SyncError};

/// Raw messages from one connection. The stream ending means the
/// connection closed.
pub type EventStream = Pin<Box<dyn Stream<Item = Result<String>> + Send>>;

#[async_trait]
pub trait PushTransport: Send + Sync {
    /// Open a connection scoped to one board.
    async fn connect(&self, board: &BoardKey) -> Result<EventStream>;
}

/// WebSocket transport. `base_url` is the server root, e.g.
/// `wss://boards.example.com/sync`.
pub struct WebSocketTransport {
    base_url: String,
}

impl WebSocketTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl PushTransport for WebSocketTransport {
    async fn connect(&self, board: &BoardKey) -> Result<EventStream> {
        let url = format!("{}/{}", self.base_url, board);
        let (ws_stream, _) = connect_async(&url).await?;
        debug!(%url, "push channel connected");

        let stream = ws_stream.filter_map(|message| async {
            match message {
                Ok(Message::Text(text)) => Some(Ok(text.to_string())),
                // Pings and pongs are handled by the library; binary
                // frames are not part of this protocol.
                Ok(_) => None,
                Err(err) => Some(Err(SyncError::from(err))),
            }
        });
        Ok(Box::pin(stream))
    }
}
