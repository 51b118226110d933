//! SetDates command

use crate::api::FieldChange;
use crate::error::Result;
use crate::mutation::{card_mut, Mutation, MutationOutcome, NotifySpec};
use crate::types::{CardDates, CardId, Snapshot, User};
use chrono::{DateTime, Utc};

/// Replace a card's scheduling fields. Only a reminder change is
/// outward-visible (it reschedules delivery for other users), so the
/// notification fires for that alone.
#[derive(Debug, Clone)]
pub struct SetDates {
    pub id: CardId,
    pub dates: CardDates,
}

impl SetDates {
    pub fn new(id: impl Into<CardId>, dates: CardDates) -> Self {
        Self {
            id: id.into(),
            dates,
        }
    }
}

impl Mutation for SetDates {
    fn action(&self) -> &'static str {
        "reminder_set"
    }

    fn apply(
        &self,
        snapshot: &mut Snapshot,
        editor: &User,
        now: DateTime<Utc>,
    ) -> Result<MutationOutcome> {
        let (card, column_id) = card_mut(snapshot, &self.id)?;
        if card.dates == self.dates {
            return Ok(MutationOutcome::silent());
        }

        let reminder_changed = card.dates.reminder != self.dates.reminder;
        let change = FieldChange::new("dates", &card.dates, &self.dates);
        card.dates = self.dates.clone();
        card.touch(&editor.email, now);

        if !reminder_changed {
            return Ok(MutationOutcome::silent());
        }

        let card_data = serde_json::to_value(&*card)?;
        Ok(MutationOutcome::notifying(
            NotifySpec::for_card(self.id.clone(), column_id)
                .with_card_data(card_data)
                .with_changes(vec![change]),
        ))
    }
}
