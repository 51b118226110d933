//! MutationPipeline - optimistic apply, async persist, best-effort notify.
//!
//! The pipeline never rolls an optimistic snapshot back: by the time a
//! persistence failure comes in, concurrent edits may already have
//! layered on top. Failures surface as dismissible notices instead.
//! (The drag engine is the one place that does roll back; see
//! `drag::DragEngine`.)

use crate::api::{BoardApi, FileUploader, Notification, Notifier, ProgressFn, UploadRequest};
use crate::attachment::AddAttachment;
use crate::error::{BoardError, Result};
use crate::mutation::Mutation;
use crate::store::BoardStore;
use crate::types::{Attachment, CardId, User};
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// A recoverable, user-visible notice emitted by the pipeline
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    /// A save failed after the optimistic apply; the user may retry or
    /// keep working on top of the local state
    PersistenceFailed { action: String, message: String },
}

/// Handle to a mutation's in-flight persistence. Dropping it detaches
/// the save; awaiting it reports the persistence result.
pub struct PendingMutation {
    handle: JoinHandle<Result<()>>,
}

impl PendingMutation {
    /// Wait for the persistence call to settle
    pub async fn persisted(self) -> Result<()> {
        self.handle
            .await
            .map_err(|e| BoardError::persistence(format!("persistence task failed: {e}")))?
    }
}

pub struct MutationPipeline {
    store: Arc<BoardStore>,
    api: Arc<dyn BoardApi>,
    notifier: Arc<dyn Notifier>,
    uploader: Arc<dyn FileUploader>,
    user: User,
    notices: mpsc::UnboundedSender<Notice>,
}

impl MutationPipeline {
    /// Build a pipeline together with the receiving end of its notice
    /// stream (the UI's dismissible error feed).
    pub fn new(
        store: Arc<BoardStore>,
        api: Arc<dyn BoardApi>,
        notifier: Arc<dyn Notifier>,
        uploader: Arc<dyn FileUploader>,
        user: User,
    ) -> (Self, mpsc::UnboundedReceiver<Notice>) {
        let (notices, rx) = mpsc::unbounded_channel();
        (
            Self {
                store,
                api,
                notifier,
                uploader,
                user,
                notices,
            },
            rx,
        )
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn store(&self) -> &Arc<BoardStore> {
        &self.store
    }

    /// Run a mutation: validate, apply optimistically, persist in the
    /// background, and fire the notification if the mutation has one.
    ///
    /// Returns after the optimistic swap - the UI sees the change
    /// immediately while persistence is still in flight.
    pub async fn submit(&self, mutation: &dyn Mutation) -> Result<PendingMutation> {
        mutation.validate()?;

        let mut next = (*self.store.snapshot().await).clone();
        let outcome = mutation.apply(&mut next, &self.user, Utc::now())?;
        self.store.replace(next.clone()).await;

        let topic = self.store.active_topic().await;
        let board_key = self.store.board_key().clone();
        let action = mutation.action();

        if let Some(spec) = outcome.notify {
            let notification = Notification {
                card_id: spec.card_id,
                column_id: spec.column_id,
                board_key: board_key.clone(),
                topic: topic.clone(),
                action: action.to_string(),
                user: self.user.email.clone(),
                card_data: spec.card_data,
                changes: spec.changes,
            };
            let notifier = self.notifier.clone();
            // Best effort: failures are logged and swallowed, never
            // surfaced or retried. Kept from the original design even
            // though it may hide delivery gaps.
            tokio::spawn(async move {
                if let Err(e) = notifier.notify(&notification).await {
                    warn!(action = %notification.action, error = %e, "notify failed; dropping");
                }
            });
        }

        let api = self.api.clone();
        let notices = self.notices.clone();
        let handle = tokio::spawn(async move {
            match api.persist_snapshot(&board_key, &topic, &next.columns).await {
                Ok(()) => {
                    debug!(action, "mutation persisted");
                    Ok(())
                }
                Err(e) => {
                    warn!(action, error = %e, "mutation persistence failed; keeping optimistic state");
                    let _ = notices.send(Notice::PersistenceFailed {
                        action: action.to_string(),
                        message: e.to_string(),
                    });
                    Err(e)
                }
            }
        });

        Ok(PendingMutation { handle })
    }

    /// Upload files through the storage collaborator and attach each
    /// stored file to the card, reporting per-file progress.
    pub async fn upload_attachments(
        &self,
        card_id: &CardId,
        files: Vec<UploadRequest>,
        progress: ProgressFn,
    ) -> Result<PendingMutation> {
        let stored = self.uploader.upload(files, progress).await?;

        let mut next = (*self.store.snapshot().await).clone();
        let now = Utc::now();
        for file in stored {
            let attachment = Attachment {
                id: file.id,
                filename: file.filename,
                size: Some(file.size),
                path: file.path,
            };
            AddAttachment::new(card_id.clone(), attachment).apply(&mut next, &self.user, now)?;
        }
        // All files attach as one optimistic apply and one save
        self.store.replace(next.clone()).await;

        let topic = self.store.active_topic().await;
        let board_key = self.store.board_key().clone();
        let api = self.api.clone();
        let notices = self.notices.clone();
        let handle = tokio::spawn(async move {
            match api.persist_snapshot(&board_key, &topic, &next.columns).await {
                Ok(()) => Ok(()),
                Err(e) => {
                    warn!(error = %e, "attachment persistence failed; keeping optimistic state");
                    let _ = notices.send(Notice::PersistenceFailed {
                        action: "attach_files".to_string(),
                        message: e.to_string(),
                    });
                    Err(e)
                }
            }
        });
        Ok(PendingMutation { handle })
    }
}
