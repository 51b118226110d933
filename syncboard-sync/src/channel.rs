//! Push channel with bounded reconnect backoff.
//!
//! One channel serves one board. Remote events are dispatched straight
//! into the shared store; the channel never merges, every
//! `board_updated` is an authoritative full replace. Connection state
//! is published through a `watch` so the polling fallback knows when
//! to stand down.

use std::sync::Arc;
use std::time::Duration;

use futures_util::StreamExt;
use syncboard_board::BoardStore;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::protocol::{parse_event, BoardEvent};
use crate::transport::PushTransport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
}

/// Reconnect and polling tuning. Defaults match the production
/// backend's expectations; tests shrink the delays.
#[derive(Debug, Clone)]
pub struct ChannelConfig {
    /// Reconnects attempted before giving up until remount
    pub max_reconnect_attempts: u32,
    /// Backoff base; attempt n waits `base * 2^n`, capped
    pub base_delay: Duration,
    pub max_delay: Duration,
    /// Snapshot poll cadence while disconnected
    pub poll_interval: Duration,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            max_reconnect_attempts: 5,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
            poll_interval: Duration::from_secs(10),
        }
    }
}

/// Backoff for the given attempt number (counted from 1).
pub fn reconnect_delay(config: &ChannelConfig, attempt: u32) -> Duration {
    config
        .base_delay
        .saturating_mul(2u32.saturating_pow(attempt))
        .min(config.max_delay)
}

/// Long-lived push subscription for one board.
pub struct SyncChannel {
    store: Arc<BoardStore>,
    transport: Arc<dyn PushTransport>,
    config: ChannelConfig,
    state_tx: watch::Sender<ConnectionState>,
    cancel: CancellationToken,
}

impl SyncChannel {
    pub fn new(
        store: Arc<BoardStore>,
        transport: Arc<dyn PushTransport>,
        config: ChannelConfig,
        cancel: CancellationToken,
    ) -> (Self, watch::Receiver<ConnectionState>) {
        let (state_tx, state_rx) = watch::channel(ConnectionState::Disconnected);
        (
            Self {
                store,
                transport,
                config,
                state_tx,
                cancel,
            },
            state_rx,
        )
    }

    /// Run until cancelled or the reconnect budget is exhausted. After
    /// exhaustion the board relies on polling until remounted, which
    /// builds a fresh channel with a fresh attempt counter.
    pub async fn run(&self) {
        let mut attempt: u32 = 0;
        loop {
            if self.cancel.is_cancelled() {
                self.set_state(ConnectionState::Disconnected);
                return;
            }

            self.set_state(ConnectionState::Connecting);
            match self.transport.connect(self.store.board_key()).await {
                Ok(stream) => {
                    attempt = 0;
                    self.set_state(ConnectionState::Connected);
                    info!(board = %self.store.board_key(), "push channel open");
                    if self.read_until_closed(stream).await {
                        return;
                    }
                }
                Err(err) => {
                    warn!(error = %err, "push channel connect failed");
                }
            }
            self.set_state(ConnectionState::Disconnected);

            if attempt >= self.config.max_reconnect_attempts {
                info!("reconnect attempts exhausted, polling only until remount");
                return;
            }
            attempt += 1;
            let delay = reconnect_delay(&self.config, attempt);
            debug!(attempt, ?delay, "scheduling reconnect");
            tokio::select! {
                _ = self.cancel.cancelled() => return,
                _ = tokio::time::sleep(delay) => {}
            }
        }
    }

    /// Returns true when the channel was cancelled, false when the
    /// connection dropped and a reconnect should follow.
    async fn read_until_closed(&self, mut stream: crate::transport::EventStream) -> bool {
        loop {
            tokio::select! {
                _ = self.cancel.cancelled() => {
                    self.set_state(ConnectionState::Disconnected);
                    return true;
                }
                next = stream.next() => match next {
                    Some(Ok(raw)) => {
                        if let Some(event) = parse_event(&raw) {
                            self.dispatch(event).await;
                        }
                    }
                    Some(Err(err)) => {
                        warn!(error = %err, "push channel error");
                        return false;
                    }
                    None => {
                        info!("push channel closed by server");
                        return false;
                    }
                }
            }
        }
    }

    /// Apply one remote event to the store.
    pub async fn dispatch(&self, event: BoardEvent) {
        match event {
            BoardEvent::BoardUpdated { topic, snapshot } => {
                if topic == self.store.active_topic().await {
                    self.store.replace(snapshot).await;
                } else {
                    debug!(%topic, "ignoring update for inactive topic");
                }
            }
            BoardEvent::TopicAdded { topic } => self.store.topic_added(&topic).await,
            BoardEvent::TopicRenamed { from, to } => self.store.topic_renamed(&from, &to).await,
            BoardEvent::TopicDeleted { topic } => self.store.topic_deleted(&topic).await,
            BoardEvent::SettingsUpdated { settings } => self.store.set_settings(settings).await,
        }
    }

    fn set_state(&self, state: ConnectionState) {
        self.state_tx.send_replace(state);
    }
}
