//! ToggleLabel command

use crate::api::FieldChange;
use crate::error::Result;
use crate::mutation::{card_mut, Mutation, MutationOutcome, NotifySpec};
use crate::types::{CardId, LabelId, Snapshot, User};
use chrono::{DateTime, Utc};

/// Toggle a label on a card. Selecting replaces the active label;
/// re-selecting the active one clears it. A card never carries more
/// than one label.
#[derive(Debug, Clone)]
pub struct ToggleLabel {
    pub card_id: CardId,
    pub label_id: LabelId,
}

impl ToggleLabel {
    pub fn new(card_id: impl Into<CardId>, label_id: impl Into<LabelId>) -> Self {
        Self {
            card_id: card_id.into(),
            label_id: label_id.into(),
        }
    }
}

impl Mutation for ToggleLabel {
    fn action(&self) -> &'static str {
        "card_labeled"
    }

    fn apply(
        &self,
        snapshot: &mut Snapshot,
        editor: &User,
        now: DateTime<Utc>,
    ) -> Result<MutationOutcome> {
        let (card, column_id) = card_mut(snapshot, &self.card_id)?;
        let before = card.labels.clone();
        card.toggle_label(&self.label_id);
        card.touch(&editor.email, now);

        let change = FieldChange::new("labels", &before, &card.labels);
        let card_data = serde_json::to_value(&*card)?;
        Ok(MutationOutcome::notifying(
            NotifySpec::for_card(self.card_id.clone(), column_id)
                .with_card_data(card_data)
                .with_changes(vec![change]),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Card, Column, Role};
    use chrono::TimeZone;

    fn seed() -> (Snapshot, CardId) {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let mut column = Column::new("To Do", "alice@example.com", now);
        let card = Card::new("First", "alice@example.com", now);
        let id = card.id.clone();
        column.cards.push(card);
        (
            Snapshot {
                columns: vec![column],
            },
            id,
        )
    }

    #[test]
    fn test_toggle_sequence_never_exceeds_one_label() {
        let (mut snapshot, id) = seed();
        let editor = User::new("bob@example.com", "Bob", Role::Admin);
        let now = Utc.with_ymd_and_hms(2024, 3, 2, 9, 0, 0).unwrap();

        for label in ["a", "b", "b", "a", "c"] {
            ToggleLabel::new(id.clone(), LabelId::from_string(label))
                .apply(&mut snapshot, &editor, now)
                .unwrap();
            assert!(snapshot.find_card(&id).unwrap().labels.len() <= 1);
        }

        // a, b selected then cleared, a, then c replaced a
        assert_eq!(
            snapshot.find_card(&id).unwrap().labels,
            vec![LabelId::from_string("c")]
        );
    }

    #[test]
    fn test_toggle_unknown_card() {
        let (mut snapshot, _) = seed();
        let editor = User::new("bob@example.com", "Bob", Role::Admin);
        let now = Utc.with_ymd_and_hms(2024, 3, 2, 9, 0, 0).unwrap();

        let result = ToggleLabel::new(CardId::from_string("missing"), LabelId::from_string("a"))
            .apply(&mut snapshot, &editor, now);
        assert!(result.is_err());
    }
}
