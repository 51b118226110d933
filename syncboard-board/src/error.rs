//! Error types for the board engine
//!
//! Nothing here is fatal: every variant resolves to a recoverable,
//! visible UI state. `Aborted` marks a fetch cancelled by an
//! intentional board/topic switch and is swallowed by callers.

use thiserror::Error;

/// Result type for board operations
pub type Result<T> = std::result::Result<T, BoardError>;

/// Errors that can occur in board operations
#[derive(Debug, Error)]
pub enum BoardError {
    /// Request rejected before a response arrived
    #[error("network error: {message}")]
    Network { message: String },

    /// Fetch cancelled by a board/topic switch; never surfaced
    #[error("request aborted")]
    Aborted,

    /// Non-success response from a save call
    #[error("persistence failed: {message}")]
    Persistence { message: String },

    /// Local precondition failure, blocks the mutation pipeline
    #[error("invalid {field}: {message}")]
    Validation { field: String, message: String },

    /// Column not found in the current snapshot
    #[error("column not found: {id}")]
    ColumnNotFound { id: String },

    /// Card not found in the current snapshot
    #[error("card not found: {id}")]
    CardNotFound { id: String },

    /// Comment not found on the card
    #[error("comment not found: {id}")]
    CommentNotFound { id: String },

    /// Attachment not found on the card
    #[error("attachment not found: {id}")]
    AttachmentNotFound { id: String },

    /// Checklist index out of range
    #[error("checklist not found at index {index}")]
    ChecklistNotFound { index: usize },

    /// Checklist item index out of range within an existing checklist
    #[error("checklist {checklist} has no item at index {item}")]
    ChecklistItemNotFound { checklist: usize, item: usize },

    /// Per-file upload failure
    #[error("upload failed for {filename}: {message}")]
    Upload { filename: String, message: String },

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BoardError {
    /// Create a network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Create a persistence error
    pub fn persistence(message: impl Into<String>) -> Self {
        Self::Persistence {
            message: message.into(),
        }
    }

    /// Create a validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// True for a fetch cancelled by an intentional switch
    pub fn is_aborted(&self) -> bool {
        matches!(self, Self::Aborted)
    }

    /// True when the error should surface as a dismissible notice
    /// rather than blocking anything
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Validation { .. })
    }
}
