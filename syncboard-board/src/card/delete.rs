//! DeleteCard command

use crate::error::{BoardError, Result};
use crate::mutation::{Mutation, MutationOutcome};
use crate::types::{CardId, Snapshot, User};
use chrono::{DateTime, Utc};

/// Physically remove a card. No tombstone, no undo; the caller
/// confirms with the user before submitting.
#[derive(Debug, Clone)]
pub struct DeleteCard {
    pub id: CardId,
}

impl DeleteCard {
    pub fn new(id: impl Into<CardId>) -> Self {
        Self { id: id.into() }
    }
}

impl Mutation for DeleteCard {
    fn action(&self) -> &'static str {
        "card_deleted"
    }

    fn apply(
        &self,
        snapshot: &mut Snapshot,
        _editor: &User,
        _now: DateTime<Utc>,
    ) -> Result<MutationOutcome> {
        snapshot
            .take_card(&self.id)
            .ok_or_else(|| BoardError::CardNotFound {
                id: self.id.to_string(),
            })?;
        Ok(MutationOutcome::silent())
    }
}
