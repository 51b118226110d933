//! Polling fallback for a disconnected push channel.
//!
//! While the channel is down, the full snapshot is re-fetched on a
//! fixed cadence and applied through the store's normalize/replace
//! path, but only when its serialized content actually changed. The
//! poller idles while the channel reports connected.

use std::sync::Arc;
use std::time::Duration;

use syncboard_board::{BoardApi, BoardStore};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::channel::ConnectionState;
use crate::error::Result;

pub struct SnapshotPoller {
    store: Arc<BoardStore>,
    api: Arc<dyn BoardApi>,
    interval: Duration,
    state: watch::Receiver<ConnectionState>,
    cancel: CancellationToken,
}

impl SnapshotPoller {
    pub fn new(
        store: Arc<BoardStore>,
        api: Arc<dyn BoardApi>,
        interval: Duration,
        state: watch::Receiver<ConnectionState>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            store,
            api,
            interval,
            state,
            cancel,
        }
    }

    /// Tick until cancelled. Fetch failures are logged and the next
    /// tick tries again; an aborted fetch is expected during topic
    /// switches and stays silent.
    pub async fn run(&self) {
        loop {
            tokio::select! {
                _ = self.cancel.cancelled() => return,
                _ = tokio::time::sleep(self.interval) => {}
            }
            if *self.state.borrow() == ConnectionState::Connected {
                continue;
            }
            match self.poll_once().await {
                Ok(true) => debug!("poll applied a changed snapshot"),
                Ok(false) => {}
                Err(err) => match err {
                    crate::error::SyncError::Board(board_err) if board_err.is_aborted() => {}
                    err => warn!(error = %err, "snapshot poll failed"),
                },
            }
        }
    }

    /// One fetch/compare/replace cycle. Returns whether the store was
    /// updated. A response for a topic that is no longer active is
    /// discarded.
    pub async fn poll_once(&self) -> Result<bool> {
        let topic = self.store.active_topic().await;
        let snapshot = self
            .api
            .fetch_snapshot(self.store.board_key(), &topic)
            .await?;
        if self.store.active_topic().await != topic {
            debug!(%topic, "discarding poll response for a stale topic");
            return Ok(false);
        }
        Ok(self.store.replace_if_changed(snapshot).await?)
    }
}
