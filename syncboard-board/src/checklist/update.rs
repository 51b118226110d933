//! UpdateChecklistItem command

use crate::error::{BoardError, Result};
use crate::mutation::{card_mut, Mutation, MutationOutcome};
use crate::types::{CardId, Snapshot, User};
use chrono::{DateTime, NaiveDate, Utc};

/// Edit a single checklist item in place. Unset fields are left alone;
/// `assigned_to` and `due_date` take an outer `Some` to distinguish
/// "set to this value" (inner `Some`) from "clear" (inner `None`).
#[derive(Debug, Clone)]
pub struct UpdateChecklistItem {
    pub card_id: CardId,
    pub checklist: usize,
    pub item: usize,
    pub text: Option<String>,
    pub completed: Option<bool>,
    pub assigned_to: Option<Option<String>>,
    pub due_date: Option<Option<NaiveDate>>,
}

impl UpdateChecklistItem {
    pub fn new(card_id: impl Into<CardId>, checklist: usize, item: usize) -> Self {
        Self {
            card_id: card_id.into(),
            checklist,
            item,
            text: None,
            completed: None,
            assigned_to: None,
            due_date: None,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    pub fn with_assigned_to(mut self, assigned_to: Option<String>) -> Self {
        self.assigned_to = Some(assigned_to);
        self
    }

    pub fn with_due_date(mut self, due_date: Option<NaiveDate>) -> Self {
        self.due_date = Some(due_date);
        self
    }
}

impl Mutation for UpdateChecklistItem {
    fn action(&self) -> &'static str {
        "checklist_item_updated"
    }

    fn apply(
        &self,
        snapshot: &mut Snapshot,
        editor: &User,
        now: DateTime<Utc>,
    ) -> Result<MutationOutcome> {
        let (card, _column_id) = card_mut(snapshot, &self.card_id)?;
        let checklist = card
            .checklists
            .get_mut(self.checklist)
            .ok_or(BoardError::ChecklistNotFound {
                index: self.checklist,
            })?;
        let item = checklist
            .items
            .get_mut(self.item)
            .ok_or(BoardError::ChecklistItemNotFound {
                checklist: self.checklist,
                item: self.item,
            })?;

        if let Some(text) = &self.text {
            item.text = text.clone();
        }
        if let Some(completed) = self.completed {
            item.completed = completed;
        }
        if let Some(assigned_to) = &self.assigned_to {
            item.assigned_to = assigned_to.clone();
        }
        if let Some(due_date) = self.due_date {
            item.due_date = due_date;
        }

        card.touch(&editor.email, now);
        Ok(MutationOutcome::silent())
    }
}
