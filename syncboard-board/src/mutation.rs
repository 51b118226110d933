//! The mutation contract.
//!
//! Every content mutation is a command object: validate, then a pure
//! synchronous `apply` against a snapshot clone. The pipeline owns the
//! optimistic swap, the async persistence, and the best-effort notify;
//! commands only describe the state change and its outward-visible
//! diff.

use crate::api::FieldChange;
use crate::error::Result;
use crate::types::{CardId, ColumnId, Snapshot, User};
use chrono::{DateTime, Utc};
use serde_json::Value;

/// What a mutation reports back to the pipeline
#[derive(Debug, Default)]
pub struct MutationOutcome {
    /// Present when the mutation has observable side effects on other
    /// users (update, comment, assignment, label, reminder)
    pub notify: Option<NotifySpec>,
}

impl MutationOutcome {
    /// A mutation with no outward-visible side effects
    pub fn silent() -> Self {
        Self::default()
    }

    pub fn notifying(spec: NotifySpec) -> Self {
        Self { notify: Some(spec) }
    }
}

/// The card-scoped part of a notification; the pipeline fills in
/// board, topic and acting user.
#[derive(Debug)]
pub struct NotifySpec {
    pub card_id: Option<CardId>,
    pub column_id: Option<ColumnId>,
    pub card_data: Option<Value>,
    pub changes: Vec<FieldChange>,
}

impl NotifySpec {
    pub fn for_card(card_id: CardId, column_id: ColumnId) -> Self {
        Self {
            card_id: Some(card_id),
            column_id: Some(column_id),
            card_data: None,
            changes: Vec::new(),
        }
    }

    pub fn with_card_data(mut self, data: Value) -> Self {
        self.card_data = Some(data);
        self
    }

    pub fn with_changes(mut self, changes: Vec<FieldChange>) -> Self {
        self.changes = changes;
        self
    }
}

/// A content mutation on the board snapshot
pub trait Mutation: Send + Sync {
    /// Action name, also carried in notifications
    fn action(&self) -> &'static str;

    /// Local precondition check; a `Validation` error blocks the
    /// mutation before it reaches the pipeline
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    /// Apply the change to a snapshot clone. Pure and synchronous;
    /// stamps edit metadata on the touched card.
    fn apply(
        &self,
        snapshot: &mut Snapshot,
        editor: &User,
        now: DateTime<Utc>,
    ) -> Result<MutationOutcome>;
}

/// Reject an empty or whitespace-only required field
pub(crate) fn require_nonempty(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(crate::error::BoardError::validation(
            field,
            "must not be empty",
        ));
    }
    Ok(())
}

/// Look up a card for mutation, with the owning column's id
pub(crate) fn card_mut<'a>(
    snapshot: &'a mut Snapshot,
    id: &CardId,
) -> Result<(&'a mut crate::types::Card, ColumnId)> {
    let (ci, i) = snapshot
        .locate_card(id)
        .ok_or_else(|| crate::error::BoardError::CardNotFound { id: id.to_string() })?;
    let column_id = snapshot.columns[ci].id.clone();
    Ok((&mut snapshot.columns[ci].cards[i], column_id))
}
