//! DeleteComment command

use crate::error::{BoardError, Result};
use crate::mutation::{card_mut, Mutation, MutationOutcome};
use crate::types::{CardId, CommentId, Snapshot, User};
use chrono::{DateTime, Utc};

/// Remove a comment from a card. Physical and immediate.
#[derive(Debug, Clone)]
pub struct DeleteComment {
    pub card_id: CardId,
    pub comment_id: CommentId,
}

impl DeleteComment {
    pub fn new(card_id: impl Into<CardId>, comment_id: impl Into<CommentId>) -> Self {
        Self {
            card_id: card_id.into(),
            comment_id: comment_id.into(),
        }
    }
}

impl Mutation for DeleteComment {
    fn action(&self) -> &'static str {
        "comment_deleted"
    }

    fn apply(
        &self,
        snapshot: &mut Snapshot,
        editor: &User,
        now: DateTime<Utc>,
    ) -> Result<MutationOutcome> {
        let (card, _column_id) = card_mut(snapshot, &self.card_id)?;
        let index = card
            .comments
            .iter()
            .position(|c| c.id == self.comment_id)
            .ok_or_else(|| BoardError::CommentNotFound {
                id: self.comment_id.to_string(),
            })?;
        card.comments.remove(index);
        card.touch(&editor.email, now);
        Ok(MutationOutcome::silent())
    }
}
