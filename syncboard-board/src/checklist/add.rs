//! AddChecklist command

use crate::error::Result;
use crate::mutation::{card_mut, require_nonempty, Mutation, MutationOutcome};
use crate::types::{CardId, Checklist, ChecklistItem, Snapshot, User};
use chrono::{DateTime, Utc};

/// Append a named checklist to a card, optionally pre-filled with
/// items (as when instantiating a template).
#[derive(Debug, Clone)]
pub struct AddChecklist {
    pub card_id: CardId,
    pub name: String,
    pub items: Vec<String>,
}

impl AddChecklist {
    pub fn new(card_id: impl Into<CardId>, name: impl Into<String>) -> Self {
        Self {
            card_id: card_id.into(),
            name: name.into(),
            items: Vec::new(),
        }
    }

    pub fn with_items<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.items = items.into_iter().map(Into::into).collect();
        self
    }
}

impl Mutation for AddChecklist {
    fn action(&self) -> &'static str {
        "checklist_added"
    }

    fn validate(&self) -> Result<()> {
        require_nonempty("name", &self.name)
    }

    fn apply(
        &self,
        snapshot: &mut Snapshot,
        editor: &User,
        now: DateTime<Utc>,
    ) -> Result<MutationOutcome> {
        let (card, _column_id) = card_mut(snapshot, &self.card_id)?;
        let mut checklist = Checklist::new(&self.name);
        checklist.items = self.items.iter().map(ChecklistItem::new).collect();
        card.checklists.push(checklist);
        card.touch(&editor.email, now);
        Ok(MutationOutcome::silent())
    }
}
