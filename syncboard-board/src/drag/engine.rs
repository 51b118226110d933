//! Drag state machine with rollback on failed persistence

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::api::BoardApi;
use crate::error::{BoardError, Result};
use crate::store::BoardStore;
use crate::types::{array_move, CardId, ColumnId, Snapshot};

use super::targets::DragKind;

/// The thing being dragged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraggedItem {
    Column(ColumnId),
    Card(CardId),
}

impl DraggedItem {
    pub fn kind(&self) -> DragKind {
        match self {
            Self::Column(_) => DragKind::Column,
            Self::Card(_) => DragKind::Card,
        }
    }
}

/// Where a drag was released.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropRef {
    Column(ColumnId),
    Card(CardId),
}

enum DragState {
    Idle,
    Dragging {
        item: DraggedItem,
        origin: Snapshot,
    },
}

/// Reorders columns and cards through the shared store. The pre-drag
/// snapshot is held for the whole gesture; a failed persist at drag
/// end restores it exactly, which makes this the one place in the
/// system that rolls an optimistic update back.
pub struct DragEngine {
    store: Arc<BoardStore>,
    api: Arc<dyn BoardApi>,
    state: Mutex<DragState>,
}

impl DragEngine {
    pub fn new(store: Arc<BoardStore>, api: Arc<dyn BoardApi>) -> Self {
        Self {
            store,
            api,
            state: Mutex::new(DragState::Idle),
        }
    }

    /// Begin a drag, capturing the current snapshot for rollback.
    /// Starting a new drag while one is active replaces it.
    pub async fn drag_start(&self, item: DraggedItem) {
        let origin = (*self.store.snapshot().await).clone();
        debug!(kind = ?item.kind(), "drag started");
        *self.state.lock().await = DragState::Dragging { item, origin };
    }

    pub async fn is_dragging(&self) -> bool {
        matches!(&*self.state.lock().await, DragState::Dragging { .. })
    }

    /// A dragged card hovering over another column transfers into it
    /// immediately in the live store. Nothing is persisted until the
    /// drag ends; same-column reordering also waits for drag end.
    pub async fn drag_over_column(&self, target: &ColumnId) -> Result<()> {
        let state = self.state.lock().await;
        let card_id = match &*state {
            DragState::Dragging {
                item: DraggedItem::Card(id),
                ..
            } => id.clone(),
            _ => return Ok(()),
        };
        drop(state);

        let mut snapshot = (*self.store.snapshot().await).clone();
        let current = snapshot
            .column_of_card(&card_id)
            .map(|c| c.id.clone())
            .ok_or_else(|| BoardError::CardNotFound {
                id: card_id.to_string(),
            })?;
        if current == *target {
            return Ok(());
        }

        let card = snapshot
            .take_card(&card_id)
            .ok_or_else(|| BoardError::CardNotFound {
                id: card_id.to_string(),
            })?;
        snapshot
            .find_column_mut(target)
            .ok_or_else(|| BoardError::ColumnNotFound {
                id: target.to_string(),
            })?
            .cards
            .push(card);
        self.store.replace(snapshot).await;
        Ok(())
    }

    /// End the drag. `drop_ref` is the resolved collision target, or
    /// `None` when released outside every target, which cancels.
    pub async fn drag_end(&self, drop_ref: Option<DropRef>) -> Result<()> {
        let mut state = self.state.lock().await;
        let (item, origin) = match std::mem::replace(&mut *state, DragState::Idle) {
            DragState::Dragging { item, origin } => (item, origin),
            DragState::Idle => return Ok(()),
        };

        let drop_ref = match drop_ref {
            Some(d) => d,
            None => {
                self.store.replace(origin).await;
                return Ok(());
            }
        };

        let mut snapshot = (*self.store.snapshot().await).clone();
        match &item {
            DraggedItem::Column(id) => self.place_column(&mut snapshot, id, &drop_ref)?,
            DraggedItem::Card(id) => self.place_card(&mut snapshot, id, &drop_ref)?,
        }

        if snapshot.serialized()? == origin.serialized()? {
            // A hover transfer may have netted out; put the exact
            // pre-drag snapshot back and skip the save.
            self.store.replace(origin).await;
            return Ok(());
        }

        self.store.replace(snapshot.clone()).await;
        let topic = self.store.active_topic().await;
        match self
            .api
            .persist_snapshot(self.store.board_key(), &topic, &snapshot.columns)
            .await
        {
            Ok(()) => {
                debug!(%topic, "reorder persisted");
                Ok(())
            }
            Err(err) => {
                warn!(%topic, error = %err, "reorder persist failed, rolling back");
                self.store.replace(origin).await;
                Err(err)
            }
        }
    }

    /// Abandon the gesture and restore the pre-drag snapshot.
    pub async fn cancel(&self) {
        let mut state = self.state.lock().await;
        if let DragState::Dragging { origin, .. } = std::mem::replace(&mut *state, DragState::Idle)
        {
            self.store.replace(origin).await;
        }
    }

    fn place_column(
        &self,
        snapshot: &mut Snapshot,
        id: &ColumnId,
        drop_ref: &DropRef,
    ) -> Result<()> {
        let target_column = match drop_ref {
            DropRef::Column(target) => target.clone(),
            // A drop resolved onto a card means its parent column.
            DropRef::Card(card) => snapshot
                .column_of_card(card)
                .map(|c| c.id.clone())
                .ok_or_else(|| BoardError::CardNotFound {
                    id: card.to_string(),
                })?,
        };
        let from = snapshot
            .column_index(id)
            .ok_or_else(|| BoardError::ColumnNotFound { id: id.to_string() })?;
        let to =
            snapshot
                .column_index(&target_column)
                .ok_or_else(|| BoardError::ColumnNotFound {
                    id: target_column.to_string(),
                })?;
        array_move(&mut snapshot.columns, from, to);
        Ok(())
    }

    fn place_card(&self, snapshot: &mut Snapshot, id: &CardId, drop_ref: &DropRef) -> Result<()> {
        match drop_ref {
            DropRef::Card(target) if target != id => {
                let (from_col, from_idx) =
                    snapshot
                        .locate_card(id)
                        .ok_or_else(|| BoardError::CardNotFound {
                            id: id.to_string(),
                        })?;
                let (to_col, to_idx) =
                    snapshot
                        .locate_card(target)
                        .ok_or_else(|| BoardError::CardNotFound {
                            id: target.to_string(),
                        })?;
                if from_col == to_col {
                    array_move(&mut snapshot.columns[from_col].cards, from_idx, to_idx);
                } else {
                    let card = snapshot.columns[from_col].cards.remove(from_idx);
                    let cards = &mut snapshot.columns[to_col].cards;
                    cards.insert(to_idx.min(cards.len()), card);
                }
            }
            DropRef::Card(_) => {}
            DropRef::Column(target) => {
                let current = snapshot
                    .column_of_card(id)
                    .map(|c| c.id.clone())
                    .ok_or_else(|| BoardError::CardNotFound {
                        id: id.to_string(),
                    })?;
                if current != *target {
                    let card =
                        snapshot
                            .take_card(id)
                            .ok_or_else(|| BoardError::CardNotFound {
                                id: id.to_string(),
                            })?;
                    snapshot
                        .find_column_mut(target)
                        .ok_or_else(|| BoardError::ColumnNotFound {
                            id: target.to_string(),
                        })?
                        .cards
                        .push(card);
                }
            }
        }
        Ok(())
    }
}
