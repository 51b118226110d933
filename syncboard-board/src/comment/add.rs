//! AddComment command

use crate::api::FieldChange;
use crate::error::Result;
use crate::mutation::{card_mut, require_nonempty, Mutation, MutationOutcome, NotifySpec};
use crate::types::{Attachment, CardId, Comment, Snapshot, User};
use chrono::{DateTime, Utc};
use serde_json::Value;

/// Append a comment to a card's discussion thread
#[derive(Debug, Clone)]
pub struct AddComment {
    pub card_id: CardId,
    pub text: String,
    pub attachments: Vec<Attachment>,
}

impl AddComment {
    pub fn new(card_id: impl Into<CardId>, text: impl Into<String>) -> Self {
        Self {
            card_id: card_id.into(),
            text: text.into(),
            attachments: Vec::new(),
        }
    }

    pub fn with_attachments(mut self, attachments: Vec<Attachment>) -> Self {
        self.attachments = attachments;
        self
    }
}

impl Mutation for AddComment {
    fn action(&self) -> &'static str {
        "comment_added"
    }

    fn validate(&self) -> Result<()> {
        require_nonempty("comment", &self.text)
    }

    fn apply(
        &self,
        snapshot: &mut Snapshot,
        editor: &User,
        now: DateTime<Utc>,
    ) -> Result<MutationOutcome> {
        let (card, column_id) = card_mut(snapshot, &self.card_id)?;
        let mut comment = Comment::new(&editor.email, &self.text, now);
        comment.attachments = self.attachments.clone();
        card.comments.push(comment);
        card.touch(&editor.email, now);

        let change = FieldChange::new("comment", Value::Null, &self.text);
        let card_data = serde_json::to_value(&*card)?;
        Ok(MutationOutcome::notifying(
            NotifySpec::for_card(self.card_id.clone(), column_id)
                .with_card_data(card_data)
                .with_changes(vec![change]),
        ))
    }
}
