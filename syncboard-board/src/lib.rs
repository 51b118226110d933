//! Collaborative kanban board engine
//!
//! This crate holds the local half of a multi-user board: an in-memory
//! snapshot store, per-operation mutation commands applied through an
//! optimistic pipeline, a drag reordering state machine with rollback,
//! and a pure capability gate. Everything that touches a backend goes
//! through the collaborator traits in [`api`], so the engine runs the
//! same against production services and in-memory fakes.
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use syncboard_board::{
//!     card::AddCard, BoardStore, InMemoryPreferences, MutationPipeline,
//! };
//! use syncboard_board::types::{BoardKey, ColumnId, Role, User};
//!
//! # async fn example(
//! #     api: Arc<dyn syncboard_board::BoardApi>,
//! #     notifier: Arc<dyn syncboard_board::Notifier>,
//! #     uploader: Arc<dyn syncboard_board::FileUploader>,
//! #     column_id: ColumnId,
//! # ) -> syncboard_board::Result<()> {
//! let store = Arc::new(BoardStore::new(
//!     BoardKey::from_string("iot"),
//!     Arc::new(InMemoryPreferences::new()),
//! ));
//! let user = User::new("alice@example.com", "Alice", Role::Admin);
//! let (pipeline, mut notices) =
//!     MutationPipeline::new(store.clone(), api, notifier, uploader, user);
//!
//! // Applied to the store immediately; persisted in the background.
//! pipeline.submit(&AddCard::new(column_id, "Ship it")).await?;
//! # Ok(())
//! # }
//! ```
//!
//! Remote changes arrive as full-snapshot replaces through the sync
//! crate; the store swaps them in atomically, so readers never see a
//! half-applied board.

pub mod access;
pub mod api;
mod error;
pub mod linkify;
mod mutation;
pub mod store;
pub mod types;

// Command modules
pub mod attachment;
pub mod card;
pub mod checklist;
pub mod column;
pub mod comment;
pub mod drag;
pub mod label;
pub mod pipeline;

#[cfg(test)]
pub(crate) mod testutil;

pub use access::{capabilities, Capabilities};
pub use api::{
    BoardApi, ChecklistTemplate, FieldChange, FileUploader, InMemoryPreferences, Notification,
    Notifier, ProgressFn, TopicPreferences, UploadRequest, UploadedFile,
};
pub use error::{BoardError, Result};
pub use mutation::{Mutation, MutationOutcome, NotifySpec};
pub use pipeline::{MutationPipeline, Notice, PendingMutation};
pub use store::{select_default_topic, BoardStore, OpenCard};

// Re-export commonly used types
pub use types::{
    Attachment, AttachmentId, Board, BoardKey, BoardSettings, Card, CardDates, CardId, Checklist,
    ChecklistItem, Column, ColumnId, Comment, CommentId, Label, LabelId, Role, Snapshot, User,
    MAIN_TOPIC,
};
