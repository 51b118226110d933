//! ToggleFollower command

use crate::error::Result;
use crate::mutation::{card_mut, Mutation, MutationOutcome};
use crate::types::{CardId, Snapshot, User};
use chrono::{DateTime, Utc};

/// Toggle a user's follow state on a card. A follower-only toggle
/// stamps edit metadata but touches no content fields, and it carries
/// no notification.
#[derive(Debug, Clone)]
pub struct ToggleFollower {
    pub id: CardId,
    pub email: String,
}

impl ToggleFollower {
    pub fn new(id: impl Into<CardId>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
        }
    }
}

impl Mutation for ToggleFollower {
    fn action(&self) -> &'static str {
        "follower_toggled"
    }

    fn apply(
        &self,
        snapshot: &mut Snapshot,
        editor: &User,
        now: DateTime<Utc>,
    ) -> Result<MutationOutcome> {
        let (card, _column_id) = card_mut(snapshot, &self.id)?;
        card.toggle_follower(&self.email);
        card.touch(&editor.email, now);
        Ok(MutationOutcome::silent())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Card, Column, Role};
    use chrono::TimeZone;

    #[test]
    fn test_follow_toggle_stamps_metadata_only() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let mut column = Column::new("To Do", "alice@example.com", now);
        let card = Card::new("First", "alice@example.com", now);
        let id = card.id.clone();
        let description = card.description.clone();
        column.cards.push(card);
        let mut snapshot = Snapshot {
            columns: vec![column],
        };
        let editor = User::new("bob@example.com", "Bob", Role::Staff);

        let outcome = ToggleFollower::new(id.clone(), "bob@example.com")
            .apply(&mut snapshot, &editor, now)
            .unwrap();

        let card = snapshot.find_card(&id).unwrap();
        assert_eq!(card.followers, vec!["bob@example.com"]);
        assert_eq!(card.last_edited_by.as_deref(), Some("bob@example.com"));
        assert_eq!(card.description, description);
        assert!(outcome.notify.is_none());
    }
}
