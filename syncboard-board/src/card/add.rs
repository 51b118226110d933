//! AddCard command

use crate::error::{BoardError, Result};
use crate::mutation::{require_nonempty, Mutation, MutationOutcome};
use crate::types::{Card, ColumnId, Snapshot, User};
use chrono::{DateTime, Utc};

/// Append a new card to a column
#[derive(Debug, Clone)]
pub struct AddCard {
    pub column_id: ColumnId,
    pub title: String,
}

impl AddCard {
    pub fn new(column_id: impl Into<ColumnId>, title: impl Into<String>) -> Self {
        Self {
            column_id: column_id.into(),
            title: title.into(),
        }
    }
}

impl Mutation for AddCard {
    fn action(&self) -> &'static str {
        "card_added"
    }

    fn validate(&self) -> Result<()> {
        require_nonempty("title", &self.title)
    }

    fn apply(
        &self,
        snapshot: &mut Snapshot,
        editor: &User,
        now: DateTime<Utc>,
    ) -> Result<MutationOutcome> {
        let column = snapshot
            .find_column_mut(&self.column_id)
            .ok_or_else(|| BoardError::ColumnNotFound {
                id: self.column_id.to_string(),
            })?;
        column.cards.push(Card::new(&self.title, &editor.email, now));
        Ok(MutationOutcome::silent())
    }
}
