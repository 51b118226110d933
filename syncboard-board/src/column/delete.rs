//! DeleteColumn command

use crate::error::{BoardError, Result};
use crate::mutation::{Mutation, MutationOutcome};
use crate::types::{ColumnId, Snapshot, User};
use chrono::{DateTime, Utc};

/// Remove a column and every card it owns. Deletion is physical and
/// immediate; the caller confirms with the user before submitting.
#[derive(Debug, Clone)]
pub struct DeleteColumn {
    pub id: ColumnId,
}

impl DeleteColumn {
    pub fn new(id: impl Into<ColumnId>) -> Self {
        Self { id: id.into() }
    }
}

impl Mutation for DeleteColumn {
    fn action(&self) -> &'static str {
        "column_deleted"
    }

    fn apply(
        &self,
        snapshot: &mut Snapshot,
        _editor: &User,
        _now: DateTime<Utc>,
    ) -> Result<MutationOutcome> {
        let index = snapshot
            .column_index(&self.id)
            .ok_or_else(|| BoardError::ColumnNotFound {
                id: self.id.to_string(),
            })?;
        snapshot.columns.remove(index);
        Ok(MutationOutcome::silent())
    }
}
