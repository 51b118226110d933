//! RemoveAttachment command

use crate::error::{BoardError, Result};
use crate::mutation::{card_mut, Mutation, MutationOutcome};
use crate::types::{AttachmentId, CardId, Snapshot, User};
use chrono::{DateTime, Utc};

/// Detach a file from a card. The stored file itself is the storage
/// collaborator's concern.
#[derive(Debug, Clone)]
pub struct RemoveAttachment {
    pub card_id: CardId,
    pub attachment_id: AttachmentId,
}

impl RemoveAttachment {
    pub fn new(card_id: impl Into<CardId>, attachment_id: impl Into<AttachmentId>) -> Self {
        Self {
            card_id: card_id.into(),
            attachment_id: attachment_id.into(),
        }
    }
}

impl Mutation for RemoveAttachment {
    fn action(&self) -> &'static str {
        "attachment_removed"
    }

    fn apply(
        &self,
        snapshot: &mut Snapshot,
        editor: &User,
        now: DateTime<Utc>,
    ) -> Result<MutationOutcome> {
        let (card, _column_id) = card_mut(snapshot, &self.card_id)?;
        let index = card
            .attachments
            .iter()
            .position(|a| a.id == self.attachment_id)
            .ok_or_else(|| BoardError::AttachmentNotFound {
                id: self.attachment_id.to_string(),
            })?;
        card.attachments.remove(index);
        card.touch(&editor.email, now);
        Ok(MutationOutcome::silent())
    }
}
