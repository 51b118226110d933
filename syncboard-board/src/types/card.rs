//! Card types: Card, Comment, Attachment, Checklist, CardDates

use super::ids::{AttachmentId, CardId, CommentId, LabelId};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A card on the board.
///
/// `followers`, `comments` and `attachments` default to empty sequences
/// on deserialization - older snapshots omit them entirely, and every
/// ingestion path normalizes them (see `Snapshot::normalize_wire`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Card {
    pub id: CardId,
    pub title: String,
    /// Rich-text description; bare URLs are linkified at explicit save
    #[serde(default)]
    pub description: String,
    /// At most one active label; selecting replaces, re-selecting clears
    #[serde(default)]
    pub labels: Vec<LabelId>,
    /// Emails of the users this card is assigned to
    #[serde(default)]
    pub assigned_to: Vec<String>,
    /// Emails of users following this card
    #[serde(default)]
    pub followers: Vec<String>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    #[serde(default)]
    pub checklists: Vec<Checklist>,
    #[serde(default)]
    pub dates: CardDates,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_edited_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_edited_at: Option<DateTime<Utc>>,
}

impl Card {
    /// Create a new card
    pub fn new(title: impl Into<String>, created_by: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: CardId::new(),
            title: title.into(),
            description: String::new(),
            labels: Vec::new(),
            assigned_to: Vec::new(),
            followers: Vec::new(),
            comments: Vec::new(),
            attachments: Vec::new(),
            checklists: Vec::new(),
            dates: CardDates::default(),
            created_by: created_by.into(),
            created_at: now,
            last_edited_by: None,
            last_edited_at: None,
        }
    }

    /// Stamp edit metadata. Called by every mutating edit, including a
    /// follower-only toggle (which changes no content fields).
    pub fn touch(&mut self, editor: &str, now: DateTime<Utc>) {
        self.last_edited_by = Some(editor.to_string());
        self.last_edited_at = Some(now);
    }

    /// Toggle a label. Selecting an unselected label replaces the
    /// current one; toggling the already-selected label clears it. The
    /// active set never exceeds one entry.
    pub fn toggle_label(&mut self, label: &LabelId) {
        if self.labels.first() == Some(label) {
            self.labels.clear();
        } else {
            self.labels = vec![label.clone()];
        }
    }

    pub fn active_label(&self) -> Option<&LabelId> {
        self.labels.first()
    }

    /// Toggle a follower email on or off. Returns true if the email was
    /// added, false if removed.
    pub fn toggle_follower(&mut self, email: &str) -> bool {
        if let Some(pos) = self.followers.iter().position(|f| f == email) {
            self.followers.remove(pos);
            false
        } else {
            self.followers.push(email.to_string());
            true
        }
    }

    pub fn find_comment(&self, id: &CommentId) -> Option<&Comment> {
        self.comments.iter().find(|c| &c.id == id)
    }

    pub fn find_attachment(&self, id: &AttachmentId) -> Option<&Attachment> {
        self.attachments.iter().find(|a| &a.id == id)
    }

    /// Fraction of completed checklist items across all checklists.
    /// 0.0 when the card has no checklist items.
    pub fn progress(&self) -> f64 {
        let total: usize = self.checklists.iter().map(|c| c.items.len()).sum();
        if total == 0 {
            return 0.0;
        }
        let completed: usize = self
            .checklists
            .iter()
            .map(|c| c.items.iter().filter(|i| i.completed).count())
            .sum();
        completed as f64 / total as f64
    }
}

/// A comment in a card's discussion thread
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Comment {
    pub id: CommentId,
    /// Author email
    pub author: String,
    pub text: String,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(author: impl Into<String>, text: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: CommentId::new(),
            author: author.into(),
            text: text.into(),
            attachments: Vec::new(),
            created_at: now,
        }
    }
}

/// A file attached to a card or a comment
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Attachment {
    pub id: AttachmentId,
    pub filename: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    pub path: String,
}

impl Attachment {
    pub fn new(filename: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            id: AttachmentId::new(),
            filename: filename.into(),
            size: None,
            path: path.into(),
        }
    }

    pub fn with_size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }
}

/// An ordered list of checklist items under a named heading
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Checklist {
    pub name: String,
    #[serde(default)]
    pub items: Vec<ChecklistItem>,
}

impl Checklist {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            items: Vec::new(),
        }
    }

    /// (total, completed) item counts
    pub fn counts(&self) -> (usize, usize) {
        let completed = self.items.iter().filter(|i| i.completed).count();
        (self.items.len(), completed)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChecklistItem {
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
}

impl ChecklistItem {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            completed: false,
            assigned_to: None,
            due_date: None,
        }
    }
}

/// Scheduling fields on a card. `time` is a display-local "HH:MM"
/// string as entered by the user; `reminder` is an absolute instant.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CardDates {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_label_toggle_replaces_and_clears() {
        let mut card = Card::new("Card", "alice@example.com", now());
        let a = LabelId::from_string("label-a");
        let b = LabelId::from_string("label-b");

        card.toggle_label(&a);
        assert_eq!(card.active_label(), Some(&a));

        // Selecting a different label replaces, never appends
        card.toggle_label(&b);
        assert_eq!(card.labels, vec![b.clone()]);

        // Re-selecting clears
        card.toggle_label(&b);
        assert!(card.labels.is_empty());
    }

    #[test]
    fn test_label_invariant_holds_across_sequences() {
        let mut card = Card::new("Card", "alice@example.com", now());
        let labels: Vec<LabelId> = ["a", "b", "a", "c", "c", "b"]
            .iter()
            .map(|s| LabelId::from_string(*s))
            .collect();

        for label in &labels {
            card.toggle_label(label);
            assert!(card.labels.len() <= 1);
        }
    }

    #[test]
    fn test_follower_toggle() {
        let mut card = Card::new("Card", "alice@example.com", now());
        assert!(card.toggle_follower("bob@example.com"));
        assert_eq!(card.followers, vec!["bob@example.com"]);
        assert!(!card.toggle_follower("bob@example.com"));
        assert!(card.followers.is_empty());
    }

    #[test]
    fn test_touch_stamps_edit_metadata() {
        let mut card = Card::new("Card", "alice@example.com", now());
        assert!(card.last_edited_by.is_none());

        card.touch("bob@example.com", now());
        assert_eq!(card.last_edited_by.as_deref(), Some("bob@example.com"));
        assert_eq!(card.last_edited_at, Some(now()));
    }

    #[test]
    fn test_progress_across_checklists() {
        let mut card = Card::new("Card", "alice@example.com", now());
        assert_eq!(card.progress(), 0.0);

        let mut prep = Checklist::new("Prep");
        prep.items.push(ChecklistItem::new("one"));
        let mut item = ChecklistItem::new("two");
        item.completed = true;
        prep.items.push(item);

        let mut ship = Checklist::new("Ship");
        let mut item = ChecklistItem::new("three");
        item.completed = true;
        ship.items.push(item);
        item = ChecklistItem::new("four");
        ship.items.push(item);

        card.checklists.push(prep);
        card.checklists.push(ship);
        assert_eq!(card.progress(), 0.5);
        assert_eq!(card.checklists[0].counts(), (2, 1));
    }

    #[test]
    fn test_card_deserializes_with_missing_sequences() {
        let json = r#"{
            "id": "c1",
            "title": "Card",
            "created_by": "alice@example.com",
            "created_at": "2024-03-01T12:00:00Z"
        }"#;
        let card: Card = serde_json::from_str(json).unwrap();
        assert!(card.followers.is_empty());
        assert!(card.comments.is_empty());
        assert!(card.attachments.is_empty());
        assert!(card.checklists.is_empty());
        assert_eq!(card.dates, CardDates::default());
    }
}
