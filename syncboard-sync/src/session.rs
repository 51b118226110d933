//! Board session orchestration.
//!
//! A session owns everything alive for one mounted board view: the
//! store, the mutation pipeline, the push channel and its polling
//! fallback. Mounting spawns the background tasks; `shutdown` cancels
//! them all. A remount builds a fresh session, which is what resets
//! the reconnect attempt counter.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use syncboard_board::types::{BoardKey, Snapshot, User};
use syncboard_board::{
    BoardApi, BoardError, BoardStore, FileUploader, MutationPipeline, Notice, Notifier,
    TopicPreferences,
};
use tokio::sync::{mpsc, watch, Mutex};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::channel::{ChannelConfig, ConnectionState, SyncChannel};
use crate::poller::SnapshotPoller;
use crate::transport::PushTransport;

pub struct BoardSession {
    store: Arc<BoardStore>,
    api: Arc<dyn BoardApi>,
    pipeline: MutationPipeline,
    user: User,
    /// Bumped on every load and topic switch; a fetch started under an
    /// older generation is discarded when it finally resolves.
    generation: AtomicU64,
    /// Token for the in-flight snapshot fetch, replaced per fetch
    fetch_cancel: Mutex<CancellationToken>,
    cancel: CancellationToken,
    state_rx: watch::Receiver<ConnectionState>,
}

impl BoardSession {
    /// Build a session and spawn its channel and poller tasks. The
    /// returned receiver carries pipeline notices (persist failures)
    /// for a UI to surface.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        board_key: BoardKey,
        preferences: Arc<dyn TopicPreferences>,
        api: Arc<dyn BoardApi>,
        notifier: Arc<dyn Notifier>,
        uploader: Arc<dyn FileUploader>,
        transport: Arc<dyn PushTransport>,
        user: User,
        config: ChannelConfig,
    ) -> (Self, mpsc::UnboundedReceiver<Notice>) {
        let store = Arc::new(BoardStore::new(board_key, preferences));
        let cancel = CancellationToken::new();

        let (pipeline, notices) = MutationPipeline::new(
            store.clone(),
            api.clone(),
            notifier,
            uploader,
            user.clone(),
        );

        let (channel, state_rx) = SyncChannel::new(
            store.clone(),
            transport,
            config.clone(),
            cancel.child_token(),
        );
        tokio::spawn(async move { channel.run().await });

        let poller = SnapshotPoller::new(
            store.clone(),
            api.clone(),
            config.poll_interval,
            state_rx.clone(),
            cancel.child_token(),
        );
        tokio::spawn(async move { poller.run().await });

        (
            Self {
                store,
                api,
                pipeline,
                user,
                generation: AtomicU64::new(0),
                fetch_cancel: Mutex::new(CancellationToken::new()),
                cancel,
                state_rx,
            },
            notices,
        )
    }

    pub fn store(&self) -> &Arc<BoardStore> {
        &self.store
    }

    pub fn pipeline(&self) -> &MutationPipeline {
        &self.pipeline
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn connection_state(&self) -> ConnectionState {
        *self.state_rx.borrow()
    }

    /// Initial snapshot load for the active topic. A non-abort failure
    /// falls back to the three-column skeleton so the board is still
    /// usable; an aborted fetch means a switch already superseded this
    /// load and nothing is applied.
    pub async fn load(&self) {
        let generation = self.next_generation();
        let topic = self.store.active_topic().await;
        match self.fetch(&topic).await {
            Ok(snapshot) => {
                if self.is_current(generation) {
                    self.store.replace(snapshot).await;
                }
            }
            Err(err) if err.is_aborted() => {}
            Err(err) => {
                warn!(error = %err, "initial load failed, using skeleton board");
                if self.is_current(generation) {
                    let skeleton = Snapshot::skeleton(&self.user.email, Utc::now());
                    self.store.replace(skeleton).await;
                }
            }
        }
    }

    /// Switch the active topic, cancelling any in-flight fetch. The
    /// stale response, if it ever arrives, is discarded.
    pub async fn switch_topic(&self, topic: &str) -> crate::error::Result<()> {
        let generation = self.next_generation();
        self.store.set_active_topic(topic).await;
        match self.fetch(topic).await {
            Ok(snapshot) => {
                if self.is_current(generation) {
                    self.store.replace(snapshot).await;
                }
                Ok(())
            }
            Err(err) if err.is_aborted() => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    /// Tear down the channel, poller and any in-flight fetch.
    pub async fn shutdown(&self) {
        info!(board = %self.store.board_key(), "session shutting down");
        self.fetch_cancel.lock().await.cancel();
        self.cancel.cancel();
    }

    fn next_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    /// Abortable snapshot fetch. Starting a new fetch cancels the
    /// previous one, which then resolves as `Aborted`.
    async fn fetch(&self, topic: &str) -> syncboard_board::Result<Snapshot> {
        let token = {
            let mut guard = self.fetch_cancel.lock().await;
            guard.cancel();
            *guard = CancellationToken::new();
            guard.clone()
        };
        tokio::select! {
            _ = token.cancelled() => Err(BoardError::Aborted),
            result = self.api.fetch_snapshot(self.store.board_key(), topic) => result,
        }
    }
}
