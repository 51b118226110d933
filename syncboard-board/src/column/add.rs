//! AddColumn command

use crate::error::Result;
use crate::mutation::{require_nonempty, Mutation, MutationOutcome};
use crate::types::{Column, Snapshot, User};
use chrono::{DateTime, Utc};

/// Append a new empty column to the board
#[derive(Debug, Clone)]
pub struct AddColumn {
    pub title: String,
}

impl AddColumn {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

impl Mutation for AddColumn {
    fn action(&self) -> &'static str {
        "column_added"
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
        snapshot
            .columns
            .push(Column::new(&self.title, &editor.email, now));
        Ok(MutationOutcome::silent())
    }
}
