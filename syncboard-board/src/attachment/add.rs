//! AddAttachment command

use crate::error::Result;
use crate::mutation::{card_mut, Mutation, MutationOutcome};
use crate::types::{Attachment, CardId, Snapshot, User};
use chrono::{DateTime, Utc};

/// Attach an already-uploaded file to a card
#[derive(Debug, Clone)]
pub struct AddAttachment {
    pub card_id: CardId,
    pub attachment: Attachment,
}

impl AddAttachment {
    pub fn new(card_id: impl Into<CardId>, attachment: Attachment) -> Self {
        Self {
            card_id: card_id.into(),
            attachment,
        }
    }
}

impl Mutation for AddAttachment {
    fn action(&self) -> &'static str {
        "attachment_added"
    }

    fn apply(
        &self,
        snapshot: &mut Snapshot,
        editor: &User,
        now: DateTime<Utc>,
    ) -> Result<MutationOutcome> {
        let (card, _column_id) = card_mut(snapshot, &self.card_id)?;
        card.attachments.push(self.attachment.clone());
        card.touch(&editor.email, now);
        Ok(MutationOutcome::silent())
    }
}
