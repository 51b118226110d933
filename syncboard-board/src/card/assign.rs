//! SetAssignees command

use crate::api::FieldChange;
use crate::error::Result;
use crate::mutation::{card_mut, Mutation, MutationOutcome, NotifySpec};
use crate::types::{CardId, Snapshot, User};
use chrono::{DateTime, Utc};

/// Replace the set of users a card is assigned to
#[derive(Debug, Clone)]
pub struct SetAssignees {
    pub id: CardId,
    pub assigned_to: Vec<String>,
}

impl SetAssignees {
    pub fn new(id: impl Into<CardId>, assigned_to: Vec<String>) -> Self {
        Self {
            id: id.into(),
            assigned_to,
        }
    }
}

impl Mutation for SetAssignees {
    fn action(&self) -> &'static str {
        "card_assigned"
    }

    fn apply(
        &self,
        snapshot: &mut Snapshot,
        editor: &User,
        now: DateTime<Utc>,
    ) -> Result<MutationOutcome> {
        let (card, column_id) = card_mut(snapshot, &self.id)?;
        if card.assigned_to == self.assigned_to {
            return Ok(MutationOutcome::silent());
        }

        let change = FieldChange::new("assigned_to", &card.assigned_to, &self.assigned_to);
        card.assigned_to = self.assigned_to.clone();
        card.touch(&editor.email, now);

        let card_data = serde_json::to_value(&*card)?;
        Ok(MutationOutcome::notifying(
            NotifySpec::for_card(self.id.clone(), column_id)
                .with_card_data(card_data)
                .with_changes(vec![change]),
        ))
    }
}
