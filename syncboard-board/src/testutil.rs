//! In-memory collaborator fakes shared across unit tests.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::api::{
    BoardApi, ChecklistTemplate, FileUploader, Notification, Notifier, ProgressFn, UploadRequest,
    UploadedFile,
};
use crate::error::{BoardError, Result};
use crate::types::{AttachmentId, BoardKey, ChecklistItem, Column, Label, LabelId, Snapshot};

/// Records persist calls for assertions; fetches always fail.
#[derive(Default)]
pub struct RecordingApi {
    persisted: RwLock<Vec<Vec<Column>>>,
}

impl RecordingApi {
    pub async fn persist_calls(&self) -> usize {
        self.persisted.read().await.len()
    }

    pub async fn last_persisted(&self) -> Option<Vec<Column>> {
        self.persisted.read().await.last().cloned()
    }
}

#[async_trait]
impl BoardApi for RecordingApi {
    async fn fetch_snapshot(&self, _board: &BoardKey, _topic: &str) -> Result<Snapshot> {
        Err(BoardError::network("no snapshot configured"))
    }

    async fn persist_snapshot(
        &self,
        _board: &BoardKey,
        _topic: &str,
        columns: &[Column],
    ) -> Result<()> {
        self.persisted.write().await.push(columns.to_vec());
        Ok(())
    }

    async fn create_topic(&self, _board: &BoardKey, _topic: &str) -> Result<Vec<String>> {
        Ok(Vec::new())
    }

    async fn rename_topic(
        &self,
        _board: &BoardKey,
        _topic: &str,
        _new_topic: &str,
    ) -> Result<Vec<String>> {
        Ok(Vec::new())
    }

    async fn delete_topic(&self, _board: &BoardKey, _topic: &str) -> Result<Vec<String>> {
        Ok(Vec::new())
    }

    async fn create_label(&self, _board: &BoardKey, _label: &Label) -> Result<Vec<Label>> {
        Ok(Vec::new())
    }

    async fn update_label(&self, _board: &BoardKey, _label: &Label) -> Result<Vec<Label>> {
        Ok(Vec::new())
    }

    async fn delete_label(&self, _board: &BoardKey, _label: &LabelId) -> Result<Vec<Label>> {
        Ok(Vec::new())
    }

    async fn save_checklist_template(
        &self,
        _board: &BoardKey,
        _name: &str,
        _items: &[ChecklistItem],
    ) -> Result<Vec<ChecklistTemplate>> {
        Ok(Vec::new())
    }

    async fn delete_checklist_template(
        &self,
        _board: &BoardKey,
        _name: &str,
    ) -> Result<Vec<ChecklistTemplate>> {
        Ok(Vec::new())
    }
}

/// Every call fails: fetches with a network error, saves with a
/// persistence error.
pub struct FailingApi;

#[async_trait]
impl BoardApi for FailingApi {
    async fn fetch_snapshot(&self, _board: &BoardKey, _topic: &str) -> Result<Snapshot> {
        Err(BoardError::network("connection refused"))
    }

    async fn persist_snapshot(
        &self,
        _board: &BoardKey,
        _topic: &str,
        _columns: &[Column],
    ) -> Result<()> {
        Err(BoardError::persistence("500 internal server error"))
    }

    async fn create_topic(&self, _board: &BoardKey, _topic: &str) -> Result<Vec<String>> {
        Err(BoardError::network("connection refused"))
    }

    async fn rename_topic(
        &self,
        _board: &BoardKey,
        _topic: &str,
        _new_topic: &str,
    ) -> Result<Vec<String>> {
        Err(BoardError::network("connection refused"))
    }

    async fn delete_topic(&self, _board: &BoardKey, _topic: &str) -> Result<Vec<String>> {
        Err(BoardError::network("connection refused"))
    }

    async fn create_label(&self, _board: &BoardKey, _label: &Label) -> Result<Vec<Label>> {
        Err(BoardError::network("connection refused"))
    }

    async fn update_label(&self, _board: &BoardKey, _label: &Label) -> Result<Vec<Label>> {
        Err(BoardError::network("connection refused"))
    }

    async fn delete_label(&self, _board: &BoardKey, _label: &LabelId) -> Result<Vec<Label>> {
        Err(BoardError::network("connection refused"))
    }

    async fn save_checklist_template(
        &self,
        _board: &BoardKey,
        _name: &str,
        _items: &[ChecklistItem],
    ) -> Result<Vec<ChecklistTemplate>> {
        Err(BoardError::network("connection refused"))
    }

    async fn delete_checklist_template(
        &self,
        _board: &BoardKey,
        _name: &str,
    ) -> Result<Vec<ChecklistTemplate>> {
        Err(BoardError::network("connection refused"))
    }
}

/// Collects notifications for assertions. Notify is spawned detached
/// by the pipeline, so `wait_for_one` polls instead of racing it.
#[derive(Default)]
pub struct RecordingNotifier {
    notifications: Arc<RwLock<Vec<Notification>>>,
}

impl RecordingNotifier {
    pub async fn wait_for_one(&self) -> Notification {
        for _ in 0..200 {
            if let Some(first) = self.notifications.read().await.first().cloned() {
                return first;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("no notification arrived");
    }

    pub async fn count(&self) -> usize {
        self.notifications.read().await.len()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, notification: &Notification) -> Result<()> {
        self.notifications.write().await.push(notification.clone());
        Ok(())
    }
}

/// Accepts every file, reporting instant completion.
pub struct NoopUploader;

#[async_trait]
impl FileUploader for NoopUploader {
    async fn upload(
        &self,
        files: Vec<UploadRequest>,
        progress: ProgressFn,
    ) -> Result<Vec<UploadedFile>> {
        Ok(files
            .into_iter()
            .map(|file| {
                let id = AttachmentId::new();
                progress(id.as_str(), 100, &file.filename);
                UploadedFile {
                    path: format!("/files/{}", file.filename),
                    size: file.bytes.len() as u64,
                    filename: file.filename,
                    id,
                }
            })
            .collect())
    }
}
