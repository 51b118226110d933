//! RenameColumn command

use crate::error::{BoardError, Result};
use crate::mutation::{require_nonempty, Mutation, MutationOutcome};
use crate::types::{ColumnId, Snapshot, User};
use chrono::{DateTime, Utc};

/// Change a column's title
#[derive(Debug, Clone)]
pub struct RenameColumn {
    pub id: ColumnId,
    pub title: String,
}

impl RenameColumn {
    pub fn new(id: impl Into<ColumnId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}

impl Mutation for RenameColumn {
    fn action(&self) -> &'static str {
        "column_renamed"
    }

    fn validate(&self) -> Result<()> {
        require_nonempty("title", &self.title)
    }

    fn apply(
        &self,
        snapshot: &mut Snapshot,
        _editor: &User,
        _now: DateTime<Utc>,
    ) -> Result<MutationOutcome> {
        let column = snapshot
            .find_column_mut(&self.id)
            .ok_or_else(|| BoardError::ColumnNotFound {
                id: self.id.to_string(),
            })?;
        column.title = self.title.clone();
        Ok(MutationOutcome::silent())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Column, Role};
    use chrono::TimeZone;

    #[test]
    fn test_rename_column() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let column = Column::new("To Do", "alice@example.com", now);
        let id = column.id.clone();
        let mut snapshot = Snapshot {
            columns: vec![column],
        };
        let editor = User::new("alice@example.com", "Alice", Role::Admin);

        RenameColumn::new(id, "Backlog")
            .apply(&mut snapshot, &editor, now)
            .unwrap();
        assert_eq!(snapshot.columns[0].title, "Backlog");
    }

    #[test]
    fn test_rename_missing_column() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let mut snapshot = Snapshot::default();
        let editor = User::new("alice@example.com", "Alice", Role::Admin);

        let result =
            RenameColumn::new(ColumnId::from_string("missing"), "X").apply(&mut snapshot, &editor, now);
        assert!(matches!(result, Err(BoardError::ColumnNotFound { .. })));
    }
}
