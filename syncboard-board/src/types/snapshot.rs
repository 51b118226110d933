//! Snapshot types: Column and the full board+topic Snapshot.
//!
//! A snapshot is the complete in-memory state of one board+topic at an
//! instant. Remote state always arrives as a full snapshot (last writer
//! wins); it is replaced wholesale, never merged field-by-field.

use super::card::Card;
use super::ids::{CardId, ColumnId};
use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A column: an ordered list of cards under a title
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
    #[serde(default)]
    pub cards: Vec<Card>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

impl Column {
    pub fn new(title: impl Into<String>, created_by: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: ColumnId::new(),
            title: title.into(),
            cards: Vec::new(),
            created_by: created_by.into(),
            created_at: now,
        }
    }

    /// Index of a card within this column
    pub fn card_index(&self, id: &CardId) -> Option<usize> {
        self.cards.iter().position(|c| &c.id == id)
    }
}

/// Full state of one board+topic
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Snapshot {
    #[serde(default)]
    pub columns: Vec<Column>,
}

impl Snapshot {
    /// The default three-column board used when the initial load fails
    /// with a non-abort network error.
    pub fn skeleton(created_by: &str, now: DateTime<Utc>) -> Self {
        Self {
            columns: ["To Do", "Doing", "Done"]
                .iter()
                .map(|title| Column::new(*title, created_by, now))
                .collect(),
        }
    }

    /// Parse a wire snapshot, normalizing absent card sequences first.
    pub fn from_wire(mut value: Value) -> Result<Self> {
        normalize_wire(&mut value);
        Ok(serde_json::from_value(value)?)
    }

    pub fn find_column(&self, id: &ColumnId) -> Option<&Column> {
        self.columns.iter().find(|c| &c.id == id)
    }

    pub fn find_column_mut(&mut self, id: &ColumnId) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| &c.id == id)
    }

    pub fn column_index(&self, id: &ColumnId) -> Option<usize> {
        self.columns.iter().position(|c| &c.id == id)
    }

    /// Locate a card as (column index, card index)
    pub fn locate_card(&self, id: &CardId) -> Option<(usize, usize)> {
        self.columns.iter().enumerate().find_map(|(ci, col)| {
            col.card_index(id).map(|i| (ci, i))
        })
    }

    pub fn find_card(&self, id: &CardId) -> Option<&Card> {
        self.locate_card(id)
            .map(|(ci, i)| &self.columns[ci].cards[i])
    }

    pub fn find_card_mut(&mut self, id: &CardId) -> Option<&mut Card> {
        let (ci, i) = self.locate_card(id)?;
        Some(&mut self.columns[ci].cards[i])
    }

    /// The column currently owning a card
    pub fn column_of_card(&self, id: &CardId) -> Option<&Column> {
        self.locate_card(id).map(|(ci, _)| &self.columns[ci])
    }

    /// Remove a card from whichever column owns it. Movement is
    /// ownership transfer: the card exists in exactly one column.
    pub fn take_card(&mut self, id: &CardId) -> Option<Card> {
        let (ci, i) = self.locate_card(id)?;
        Some(self.columns[ci].cards.remove(i))
    }

    /// Serialized form used for change detection by the poller
    pub fn serialized(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Fill absent `followers`/`comments`/`attachments`/`checklists` on
/// every card with empty sequences. Idempotent: running it on an
/// already-normalized snapshot is a no-op.
pub fn normalize_wire(snapshot: &mut Value) {
    let Some(columns) = snapshot.get_mut("columns").and_then(Value::as_array_mut) else {
        return;
    };
    for column in columns {
        let Some(cards) = column.get_mut("cards").and_then(Value::as_array_mut) else {
            continue;
        };
        for card in cards {
            let Some(obj) = card.as_object_mut() else {
                continue;
            };
            for field in ["followers", "comments", "attachments", "checklists"] {
                obj.entry(field).or_insert_with(|| Value::Array(Vec::new()));
            }
        }
    }
}

/// Move `v[from]` to index `to`, shifting everything between. Indices
/// past the end clamp to the last position.
pub fn array_move<T>(v: &mut Vec<T>, from: usize, to: usize) {
    if from >= v.len() || from == to {
        return;
    }
    let item = v.remove(from);
    let to = to.min(v.len());
    v.insert(to, item);
}
