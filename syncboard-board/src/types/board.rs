//! Board-level types: Board, Label, BoardSettings

use super::ids::{BoardKey, LabelId};
use serde::{Deserialize, Serialize};

/// The topic every board starts with. It cannot be renamed away or
/// deleted, and it is the fallback whenever a selected topic vanishes.
pub const MAIN_TOPIC: &str = "Main Topic";

/// Board metadata. Columns and cards live in per-topic snapshots, not
/// here; labels are shared across all of a board's topics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Board {
    pub key: BoardKey,
    pub name: String,
    /// Organizational tags scoping visibility and edit rights
    #[serde(default)]
    pub practices: Vec<String>,
    #[serde(default = "default_topics")]
    pub topics: Vec<String>,
    #[serde(default)]
    pub labels: Vec<Label>,
    #[serde(default)]
    pub settings: BoardSettings,
}

fn default_topics() -> Vec<String> {
    vec![MAIN_TOPIC.to_string()]
}

impl Board {
    /// Create a new board with the default Main Topic
    pub fn new(key: impl Into<BoardKey>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            practices: Vec::new(),
            topics: default_topics(),
            labels: Vec::new(),
            settings: BoardSettings::default(),
        }
    }

    /// Set the configured practices
    pub fn with_practices(mut self, practices: Vec<String>) -> Self {
        self.practices = practices;
        self
    }

    pub fn has_topic(&self, topic: &str) -> bool {
        self.topics.iter().any(|t| t == topic)
    }

    /// Find a label by id
    pub fn find_label(&self, id: &LabelId) -> Option<&Label> {
        self.labels.iter().find(|l| &l.id == id)
    }
}

/// A label categorizes cards. Board-scoped; a card carries at most one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Label {
    pub id: LabelId,
    pub name: String,
    /// 6-character hex color code without #
    pub color: String,
}

impl Label {
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: LabelId::new(),
            name: name.into(),
            color: color.into(),
        }
    }
}

/// Board-level presentation settings, pushed via `settings_updated`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BoardSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
}
