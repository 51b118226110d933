//! Collaborator contracts consumed by the engine.
//!
//! Everything the core needs from the outside world comes through
//! these traits, so sessions can run against HTTP/WebSocket backends
//! in production and in-memory fakes in tests.

use crate::error::Result;
use crate::types::{
    AttachmentId, BoardKey, CardId, ChecklistItem, Column, ColumnId, Label, LabelId, Snapshot,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// A single changed field carried in a notification, `{from, to}` per key
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldChange {
    pub field: String,
    pub from: Value,
    pub to: Value,
}

impl FieldChange {
    /// Build a change entry; unserializable values degrade to null
    pub fn new(field: impl Into<String>, from: impl Serialize, to: impl Serialize) -> Self {
        Self {
            field: field.into(),
            from: serde_json::to_value(from).unwrap_or(Value::Null),
            to: serde_json::to_value(to).unwrap_or(Value::Null),
        }
    }
}

/// Fire-and-forget payload for mutations visible to other users
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Notification {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_id: Option<CardId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_id: Option<ColumnId>,
    pub board_key: BoardKey,
    pub topic: String,
    pub action: String,
    /// Acting user's email
    pub user: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_data: Option<Value>,
    #[serde(default)]
    pub changes: Vec<FieldChange>,
}

/// A named, reusable checklist
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChecklistTemplate {
    pub name: String,
    #[serde(default)]
    pub items: Vec<ChecklistItem>,
}

/// Snapshot fetch/persist plus board-scoped CRUD. One implementation
/// per backend; all calls are non-blocking.
#[async_trait]
pub trait BoardApi: Send + Sync {
    /// Fetch the full snapshot for one board+topic
    async fn fetch_snapshot(&self, board: &BoardKey, topic: &str) -> Result<Snapshot>;

    /// Persist the full snapshot for one board+topic
    async fn persist_snapshot(&self, board: &BoardKey, topic: &str, columns: &[Column])
        -> Result<()>;

    async fn create_topic(&self, board: &BoardKey, topic: &str) -> Result<Vec<String>>;
    async fn rename_topic(
        &self,
        board: &BoardKey,
        topic: &str,
        new_topic: &str,
    ) -> Result<Vec<String>>;
    async fn delete_topic(&self, board: &BoardKey, topic: &str) -> Result<Vec<String>>;

    async fn create_label(&self, board: &BoardKey, label: &Label) -> Result<Vec<Label>>;
    async fn update_label(&self, board: &BoardKey, label: &Label) -> Result<Vec<Label>>;
    async fn delete_label(&self, board: &BoardKey, label: &LabelId) -> Result<Vec<Label>>;

    async fn save_checklist_template(
        &self,
        board: &BoardKey,
        name: &str,
        items: &[ChecklistItem],
    ) -> Result<Vec<ChecklistTemplate>>;
    async fn delete_checklist_template(
        &self,
        board: &BoardKey,
        name: &str,
    ) -> Result<Vec<ChecklistTemplate>>;
}

/// Best-effort change notifications to other users. Failures are
/// logged and swallowed by the pipeline, never retried.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, notification: &Notification) -> Result<()>;
}

/// A file handed to the uploader
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// A stored file as reported back by the upload collaborator
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UploadedFile {
    pub id: AttachmentId,
    pub filename: String,
    pub size: u64,
    pub path: String,
}

/// Per-file progress callback: (file id, percent, filename)
pub type ProgressFn = Box<dyn Fn(&str, u8, &str) + Send + Sync>;

/// File storage collaborator. Streams per-file progress while
/// uploading an ordered list of files.
#[async_trait]
pub trait FileUploader: Send + Sync {
    async fn upload(&self, files: Vec<UploadRequest>, progress: ProgressFn)
        -> Result<Vec<UploadedFile>>;
}

/// Persists the user's preferred topic per board. Best effort; saving
/// a preference never fails an operation.
#[async_trait]
pub trait TopicPreferences: Send + Sync {
    async fn save_topic(&self, board: &BoardKey, topic: &str);
}

/// In-memory preference store. The default for sessions without a
/// backing profile service, and the fake used throughout tests.
#[derive(Default)]
pub struct InMemoryPreferences {
    topics: RwLock<HashMap<String, String>>,
}

impl InMemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn topic_for(&self, board: &BoardKey) -> Option<String> {
        self.topics.read().await.get(board.as_str()).cloned()
    }
}

#[async_trait]
impl TopicPreferences for InMemoryPreferences {
    async fn save_topic(&self, board: &BoardKey, topic: &str) {
        self.topics
            .write()
            .await
            .insert(board.as_str().to_string(), topic.to_string());
    }
}
