//! BoardStore - the authoritative local snapshot for one viewing session.
//!
//! The snapshot is the single piece of mutable shared state. It is
//! always replaced by swapping an `Arc`, never mutated field-by-field
//! in place, so readers can never observe a torn snapshot. The store's
//! lifetime is bound to the board-viewing session; it is not a
//! process-wide singleton.

use crate::api::TopicPreferences;
use crate::error::Result;
use crate::types::{BoardKey, BoardSettings, Card, CardId, ColumnId, Snapshot, MAIN_TOPIC};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// The card currently open in a detail view, remembering which column
/// it was opened from.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenCard {
    pub card: Card,
    pub column_id: ColumnId,
}

pub struct BoardStore {
    board_key: BoardKey,
    snapshot: RwLock<Arc<Snapshot>>,
    open_card: RwLock<Option<OpenCard>>,
    topics: RwLock<Vec<String>>,
    active_topic: RwLock<String>,
    settings: RwLock<BoardSettings>,
    preferences: Arc<dyn TopicPreferences>,
}

impl BoardStore {
    pub fn new(board_key: BoardKey, preferences: Arc<dyn TopicPreferences>) -> Self {
        Self {
            board_key,
            snapshot: RwLock::new(Arc::new(Snapshot::default())),
            open_card: RwLock::new(None),
            topics: RwLock::new(vec![MAIN_TOPIC.to_string()]),
            active_topic: RwLock::new(MAIN_TOPIC.to_string()),
            settings: RwLock::new(BoardSettings::default()),
            preferences,
        }
    }

    pub fn board_key(&self) -> &BoardKey {
        &self.board_key
    }

    /// Current snapshot. Cheap: clones an `Arc`, not the data.
    pub async fn snapshot(&self) -> Arc<Snapshot> {
        self.snapshot.read().await.clone()
    }

    /// Atomically swap in a full snapshot and reconcile the open card.
    /// No partial merge: the incoming snapshot wins wholesale.
    pub async fn replace(&self, snapshot: Snapshot) {
        *self.snapshot.write().await = Arc::new(snapshot);
        self.reconcile_open_card().await;
    }

    /// Replace only if the serialized content differs from the current
    /// snapshot. Returns whether a replace happened. Used by the
    /// polling fallback to avoid redundant re-renders.
    pub async fn replace_if_changed(&self, snapshot: Snapshot) -> Result<bool> {
        let current = self.snapshot().await;
        if current.serialized()? == snapshot.serialized()? {
            return Ok(false);
        }
        self.replace(snapshot).await;
        Ok(true)
    }

    // =========================================================================
    // Open card
    // =========================================================================

    /// Open a card's detail view, remembering the column it was opened
    /// from. No-op error-free if the card is missing.
    pub async fn open_card(&self, card_id: &CardId) {
        let snapshot = self.snapshot().await;
        if let Some((ci, i)) = snapshot.locate_card(card_id) {
            let open = OpenCard {
                card: snapshot.columns[ci].cards[i].clone(),
                column_id: snapshot.columns[ci].id.clone(),
            };
            *self.open_card.write().await = Some(open);
        }
    }

    pub async fn close_card(&self) {
        *self.open_card.write().await = None;
    }

    pub async fn opened(&self) -> Option<OpenCard> {
        self.open_card.read().await.clone()
    }

    /// Re-locate the open card inside the current snapshot and refresh
    /// its contents in place, preserving which column it was opened
    /// from. If the id is gone, the previous values stay rather than
    /// clearing the detail view out from under the user.
    async fn reconcile_open_card(&self) {
        let mut guard = self.open_card.write().await;
        let Some(open) = guard.as_mut() else {
            return;
        };
        let snapshot = self.snapshot().await;
        match snapshot.find_card(&open.card.id) {
            Some(card) => open.card = card.clone(),
            None => debug!(card = %open.card.id, "open card missing from new snapshot; keeping previous values"),
        }
    }

    // =========================================================================
    // Topics
    // =========================================================================

    pub async fn topics(&self) -> Vec<String> {
        self.topics.read().await.clone()
    }

    pub async fn active_topic(&self) -> String {
        self.active_topic.read().await.clone()
    }

    /// Select a topic and persist the choice as the user's preference.
    pub async fn set_active_topic(&self, topic: &str) {
        *self.active_topic.write().await = topic.to_string();
        self.preferences.save_topic(&self.board_key, topic).await;
    }

    /// Replace the topic list. If the active topic vanished, fall back
    /// to the Main Topic and persist that preference.
    pub async fn set_topics(&self, topics: Vec<String>) {
        *self.topics.write().await = topics;
        self.ensure_active_topic_present().await;
    }

    pub async fn topic_added(&self, topic: &str) {
        let mut topics = self.topics.write().await;
        if !topics.iter().any(|t| t == topic) {
            topics.push(topic.to_string());
        }
    }

    /// Apply a topic rename. The active topic follows the rename.
    pub async fn topic_renamed(&self, from: &str, to: &str) {
        {
            let mut topics = self.topics.write().await;
            for t in topics.iter_mut() {
                if t == from {
                    *t = to.to_string();
                }
            }
        }
        let active = self.active_topic().await;
        if active == from {
            info!(from, to, "active topic renamed");
            self.set_active_topic(to).await;
        }
    }

    /// Apply a topic deletion. The Main Topic itself is never removed.
    pub async fn topic_deleted(&self, topic: &str) {
        if topic == MAIN_TOPIC {
            return;
        }
        {
            let mut topics = self.topics.write().await;
            topics.retain(|t| t != topic);
        }
        self.ensure_active_topic_present().await;
    }

    async fn ensure_active_topic_present(&self) {
        let active = self.active_topic().await;
        let present = self.topics.read().await.iter().any(|t| *t == active);
        if !present {
            info!(topic = %active, "active topic gone; falling back to Main Topic");
            self.set_active_topic(MAIN_TOPIC).await;
        }
    }

    // =========================================================================
    // Settings
    // =========================================================================

    pub async fn settings(&self) -> BoardSettings {
        self.settings.read().await.clone()
    }

    pub async fn set_settings(&self, settings: BoardSettings) {
        *self.settings.write().await = settings;
    }
}

/// Pick the default topic from per-topic most-recent card activity.
/// The most recently active topic wins; ties go to the topic appearing
/// earlier in the list. Topics without activity lose to any with it.
pub fn select_default_topic(activity: &[(String, Option<DateTime<Utc>>)]) -> String {
    let mut best: Option<(&str, DateTime<Utc>)> = None;
    for (topic, at) in activity {
        if let Some(at) = at {
            // Strictly greater, so the earlier entry keeps a tie
            if best.map(|(_, b)| *at > b).unwrap_or(true) {
                best = Some((topic, *at));
            }
        }
    }
    best.map(|(t, _)| t.to_string())
        .or_else(|| activity.first().map(|(t, _)| t.clone()))
        .unwrap_or_else(|| MAIN_TOPIC.to_string())
}
