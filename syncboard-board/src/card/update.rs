//! UpdateCard command

use crate::api::FieldChange;
use crate::error::Result;
use crate::linkify::linkify;
use crate::mutation::{card_mut, require_nonempty, Mutation, MutationOutcome, NotifySpec};
use crate::types::{CardId, Snapshot, User};
use chrono::{DateTime, Utc};

/// Edit a card's title and/or description. The description passes
/// through link detection here, at explicit save time only.
#[derive(Debug, Clone, Default)]
pub struct UpdateCard {
    pub id: CardId,
    pub title: Option<String>,
    pub description: Option<String>,
}

impl UpdateCard {
    pub fn new(id: impl Into<CardId>) -> Self {
        Self {
            id: id.into(),
            title: None,
            description: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl Mutation for UpdateCard {
    fn action(&self) -> &'static str {
        "card_updated"
    }

    fn validate(&self) -> Result<()> {
        if let Some(title) = &self.title {
            require_nonempty("title", title)?;
        }
        Ok(())
    }

    fn apply(
        &self,
        snapshot: &mut Snapshot,
        editor: &User,
        now: DateTime<Utc>,
    ) -> Result<MutationOutcome> {
        let (card, column_id) = card_mut(snapshot, &self.id)?;
        let mut changes = Vec::new();

        if let Some(title) = &self.title {
            if title != &card.title {
                changes.push(FieldChange::new("title", &card.title, title));
                card.title = title.clone();
            }
        }
        if let Some(description) = &self.description {
            let linked = linkify(description);
            if linked != card.description {
                changes.push(FieldChange::new("description", &card.description, &linked));
                card.description = linked;
            }
        }

        if changes.is_empty() {
            return Ok(MutationOutcome::silent());
        }

        card.touch(&editor.email, now);
        let card_data = serde_json::to_value(&*card)?;
        Ok(MutationOutcome::notifying(
            NotifySpec::for_card(self.id.clone(), column_id)
                .with_card_data(card_data)
                .with_changes(changes),
        ))
    }
}
