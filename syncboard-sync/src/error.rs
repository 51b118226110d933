//! Error types for the sync layer

use thiserror::Error;

/// Result type for sync operations
pub type Result<T> = std::result::Result<T, SyncError>;

/// Errors from the push channel and session orchestration
#[derive(Debug, Error)]
pub enum SyncError {
    /// The push connection failed or closed unexpectedly
    #[error("channel error: {message}")]
    Channel { message: String },

    /// An event arrived that could not be interpreted
    #[error("protocol error: {message}")]
    Protocol { message: String },

    /// Underlying WebSocket transport failure
    #[error("websocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    /// An error bubbled up from the board engine
    #[error(transparent)]
    Board(#[from] syncboard_board::BoardError),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SyncError {
    /// Create a channel error
    pub fn channel(message: impl Into<String>) -> Self {
        Self::Channel {
            message: message.into(),
        }
    }

    /// Create a protocol error
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SyncError::channel("connection reset");
        assert_eq!(err.to_string(), "channel error: connection reset");
    }

    #[test]
    fn test_board_error_passes_through() {
        let err: SyncError = syncboard_board::BoardError::Aborted.into();
        assert_eq!(err.to_string(), "request aborted");
    }
}
