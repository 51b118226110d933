//! RemoveChecklist command

use crate::error::{BoardError, Result};
use crate::mutation::{card_mut, Mutation, MutationOutcome};
use crate::types::{CardId, Snapshot, User};
use chrono::{DateTime, Utc};

/// Delete a whole checklist from a card by position.
#[derive(Debug, Clone)]
pub struct RemoveChecklist {
    pub card_id: CardId,
    pub index: usize,
}

impl RemoveChecklist {
    pub fn new(card_id: impl Into<CardId>, index: usize) -> Self {
        Self {
            card_id: card_id.into(),
            index,
        }
    }
}

impl Mutation for RemoveChecklist {
    fn action(&self) -> &'static str {
        "checklist_removed"
    }

    fn apply(
        &self,
        snapshot: &mut Snapshot,
        editor: &User,
        now: DateTime<Utc>,
    ) -> Result<MutationOutcome> {
        let (card, _column_id) = card_mut(snapshot, &self.card_id)?;
        if self.index >= card.checklists.len() {
            return Err(BoardError::ChecklistNotFound { index: self.index });
        }
        card.checklists.remove(self.index);
        card.touch(&editor.email, now);
        Ok(MutationOutcome::silent())
    }
}
