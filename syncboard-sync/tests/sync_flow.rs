//! End-to-end flows across channel, poller and session with scripted
//! collaborators.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use futures_util::{stream, StreamExt};
use syncboard_board::types::{BoardKey, Card, Column, Role, Snapshot, User, MAIN_TOPIC};
use syncboard_board::{
    BoardApi, BoardError, BoardStore, ChecklistTemplate, FileUploader, InMemoryPreferences, Label,
    LabelId, Notification, Notifier, ProgressFn, UploadRequest, UploadedFile,
};
use tokio::sync::{Mutex, Notify, RwLock};
use tokio_util::sync::CancellationToken;

use syncboard_sync::{
    BoardEvent, BoardSession, ChannelConfig, ConnectionState, EventStream, PushTransport,
    SnapshotPoller, SyncChannel, SyncError,
};

fn sample_snapshot(title: &str) -> Snapshot {
    let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
    let mut column = Column::new("To Do", "alice@example.com", now);
    column.cards.push(Card::new(title, "alice@example.com", now));
    Snapshot {
        columns: vec![column],
    }
}

/// Serves a settable snapshot; optionally fails every fetch.
struct MemoryApi {
    snapshot: RwLock<Snapshot>,
    fail_fetch: bool,
    started: Notify,
    gate: Option<Notify>,
}

impl MemoryApi {
    fn new(snapshot: Snapshot) -> Self {
        Self {
            snapshot: RwLock::new(snapshot),
            fail_fetch: false,
            started: Notify::new(),
            gate: None,
        }
    }

    fn failing() -> Self {
        Self {
            fail_fetch: true,
            ..Self::new(Snapshot::default())
        }
    }

    /// Each fetch blocks until [`release_fetch`](Self::release_fetch).
    fn gated(snapshot: Snapshot) -> Self {
        Self {
            gate: Some(Notify::new()),
            ..Self::new(snapshot)
        }
    }

    async fn set_snapshot(&self, snapshot: Snapshot) {
        *self.snapshot.write().await = snapshot;
    }

    async fn fetch_started(&self) {
        self.started.notified().await;
    }

    fn release_fetch(&self) {
        if let Some(gate) = &self.gate {
            gate.notify_one();
        }
    }
}

#[async_trait]
impl BoardApi for MemoryApi {
    async fn fetch_snapshot(
        &self,
        _board: &BoardKey,
        _topic: &str,
    ) -> syncboard_board::Result<Snapshot> {
        if self.fail_fetch {
            return Err(BoardError::network("connection refused"));
        }
        if let Some(gate) = &self.gate {
            self.started.notify_one();
            gate.notified().await;
        }
        Ok(self.snapshot.read().await.clone())
    }

    async fn persist_snapshot(
        &self,
        _board: &BoardKey,
        _topic: &str,
        _columns: &[Column],
    ) -> syncboard_board::Result<()> {
        Ok(())
    }

    async fn create_topic(
        &self,
        _board: &BoardKey,
        _topic: &str,
    ) -> syncboard_board::Result<Vec<String>> {
        Ok(Vec::new())
    }

    async fn rename_topic(
        &self,
        _board: &BoardKey,
        _topic: &str,
        _new_topic: &str,
    ) -> syncboard_board::Result<Vec<String>> {
        Ok(Vec::new())
    }

    async fn delete_topic(
        &self,
        _board: &BoardKey,
        _topic: &str,
    ) -> syncboard_board::Result<Vec<String>> {
        Ok(Vec::new())
    }

    async fn create_label(
        &self,
        _board: &BoardKey,
        _label: &Label,
    ) -> syncboard_board::Result<Vec<Label>> {
        Ok(Vec::new())
    }

    async fn update_label(
        &self,
        _board: &BoardKey,
        _label: &Label,
    ) -> syncboard_board::Result<Vec<Label>> {
        Ok(Vec::new())
    }

    async fn delete_label(
        &self,
        _board: &BoardKey,
        _label: &LabelId,
    ) -> syncboard_board::Result<Vec<Label>> {
        Ok(Vec::new())
    }

    async fn save_checklist_template(
        &self,
        _board: &BoardKey,
        _name: &str,
        _items: &[syncboard_board::ChecklistItem],
    ) -> syncboard_board::Result<Vec<ChecklistTemplate>> {
        Ok(Vec::new())
    }

    async fn delete_checklist_template(
        &self,
        _board: &BoardKey,
        _name: &str,
    ) -> syncboard_board::Result<Vec<ChecklistTemplate>> {
        Ok(Vec::new())
    }
}

struct NoopNotifier;

#[async_trait]
impl Notifier for NoopNotifier {
    async fn notify(&self, _notification: &Notification) -> syncboard_board::Result<()> {
        Ok(())
    }
}

struct NoopUploader;

#[async_trait]
impl FileUploader for NoopUploader {
    async fn upload(
        &self,
        _files: Vec<UploadRequest>,
        _progress: ProgressFn,
    ) -> syncboard_board::Result<Vec<UploadedFile>> {
        Ok(Vec::new())
    }
}

/// One scripted outcome per connection attempt; exhausting the script
/// fails subsequent attempts.
enum Script {
    /// Connection refused
    Fail,
    /// Deliver these messages, then hold the connection open
    Messages(Vec<String>),
}

struct ScriptedTransport {
    scripts: Mutex<VecDeque<Script>>,
}

impl ScriptedTransport {
    fn new(scripts: Vec<Script>) -> Self {
        Self {
            scripts: Mutex::new(scripts.into()),
        }
    }
}

#[async_trait]
impl PushTransport for ScriptedTransport {
    async fn connect(&self, _board: &BoardKey) -> syncboard_sync::Result<EventStream> {
        match self.scripts.lock().await.pop_front() {
            Some(Script::Messages(messages)) => {
                let items: Vec<syncboard_sync::Result<String>> =
                    messages.into_iter().map(Ok).collect();
                Ok(Box::pin(stream::iter(items).chain(stream::pending())))
            }
            Some(Script::Fail) | None => Err(SyncError::channel("connection refused")),
        }
    }
}

fn store() -> Arc<BoardStore> {
    Arc::new(BoardStore::new(
        BoardKey::from_string("iot"),
        Arc::new(InMemoryPreferences::new()),
    ))
}

#[test_log::test(tokio::test)]
async fn test_channel_applies_pushed_snapshot() {
    let store = store();
    let update = serde_json::json!({
        "type": "board_updated",
        "topic": MAIN_TOPIC,
        "columns": sample_snapshot("Pushed").columns,
    })
    .to_string();
    let transport = Arc::new(ScriptedTransport::new(vec![Script::Messages(vec![update])]));
    let cancel = CancellationToken::new();
    let (channel, mut state_rx) = SyncChannel::new(
        store.clone(),
        transport,
        ChannelConfig::default(),
        cancel.clone(),
    );
    tokio::spawn(async move { channel.run().await });

    state_rx
        .wait_for(|state| *state == ConnectionState::Connected)
        .await
        .unwrap();
    for _ in 0..200 {
        if !store.snapshot().await.columns.is_empty() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    let snapshot = store.snapshot().await;
    assert_eq!(snapshot.columns[0].cards[0].title, "Pushed");
    cancel.cancel();
}

#[test_log::test(tokio::test)]
async fn test_channel_ignores_update_for_inactive_topic() {
    let store = store();
    store.replace(sample_snapshot("Before")).await;
    let transport = Arc::new(ScriptedTransport::new(Vec::new()));
    let (channel, _state_rx) = SyncChannel::new(
        store.clone(),
        transport,
        ChannelConfig::default(),
        CancellationToken::new(),
    );

    channel
        .dispatch(BoardEvent::BoardUpdated {
            topic: "Sprint 9".into(),
            snapshot: sample_snapshot("Other"),
        })
        .await;

    assert_eq!(store.snapshot().await.columns[0].cards[0].title, "Before");
}

#[test_log::test(tokio::test)]
async fn test_deleting_active_topic_falls_back_to_main() {
    let store = store();
    store
        .set_topics(vec![MAIN_TOPIC.to_string(), "Sprint 9".to_string()])
        .await;
    store.set_active_topic("Sprint 9").await;
    let transport = Arc::new(ScriptedTransport::new(Vec::new()));
    let (channel, _state_rx) = SyncChannel::new(
        store.clone(),
        transport,
        ChannelConfig::default(),
        CancellationToken::new(),
    );

    channel
        .dispatch(BoardEvent::TopicDeleted {
            topic: "Sprint 9".into(),
        })
        .await;

    assert_eq!(store.active_topic().await, MAIN_TOPIC);
    assert_eq!(store.topics().await, vec![MAIN_TOPIC.to_string()]);
}

#[test_log::test(tokio::test)]
async fn test_reconnect_budget_exhausts_and_gives_up() {
    let store = store();
    let transport = Arc::new(ScriptedTransport::new(Vec::new()));
    let config = ChannelConfig {
        max_reconnect_attempts: 2,
        base_delay: Duration::from_millis(1),
        max_delay: Duration::from_millis(4),
        ..ChannelConfig::default()
    };
    let (channel, state_rx) =
        SyncChannel::new(store, transport, config, CancellationToken::new());

    // Initial attempt plus two reconnects, all refused; run returns.
    channel.run().await;
    assert_eq!(*state_rx.borrow(), ConnectionState::Disconnected);
}

#[test_log::test(tokio::test)]
async fn test_poller_applies_only_changed_snapshots() {
    let store = store();
    let api = Arc::new(MemoryApi::new(sample_snapshot("Polled")));
    let (_state_tx, state_rx) = tokio::sync::watch::channel(ConnectionState::Disconnected);
    let poller = SnapshotPoller::new(
        store.clone(),
        api.clone(),
        Duration::from_secs(10),
        state_rx,
        CancellationToken::new(),
    );

    assert!(poller.poll_once().await.unwrap());
    assert_eq!(store.snapshot().await.columns[0].cards[0].title, "Polled");
    // Identical content on the next tick is not re-applied.
    assert!(!poller.poll_once().await.unwrap());

    api.set_snapshot(sample_snapshot("Changed")).await;
    assert!(poller.poll_once().await.unwrap());
    assert_eq!(store.snapshot().await.columns[0].cards[0].title, "Changed");
}

#[test_log::test(tokio::test)]
async fn test_poll_response_for_switched_topic_is_discarded() {
    let store = store();
    let api = Arc::new(MemoryApi::gated(sample_snapshot("Stale")));
    let (_state_tx, state_rx) = tokio::sync::watch::channel(ConnectionState::Disconnected);
    let poller = Arc::new(SnapshotPoller::new(
        store.clone(),
        api.clone(),
        Duration::from_secs(10),
        state_rx,
        CancellationToken::new(),
    ));

    let polling = tokio::spawn({
        let poller = poller.clone();
        async move { poller.poll_once().await }
    });

    // Switch topics while the fetch is in flight; the response belongs
    // to the old topic and must not reach the store.
    api.fetch_started().await;
    store.set_active_topic("Sprint 9").await;
    api.release_fetch();

    assert!(!polling.await.unwrap().unwrap());
    assert!(store.snapshot().await.columns.is_empty());
}

fn session_with(api: Arc<dyn BoardApi>) -> (BoardSession, tokio::sync::mpsc::UnboundedReceiver<syncboard_board::Notice>) {
    BoardSession::new(
        BoardKey::from_string("iot"),
        Arc::new(InMemoryPreferences::new()),
        api,
        Arc::new(NoopNotifier),
        Arc::new(NoopUploader),
        Arc::new(ScriptedTransport::new(Vec::new())),
        User::new("alice@example.com", "Alice", Role::Admin),
        ChannelConfig {
            max_reconnect_attempts: 0,
            base_delay: Duration::from_millis(1),
            poll_interval: Duration::from_secs(3600),
            ..ChannelConfig::default()
        },
    )
}

#[test_log::test(tokio::test)]
async fn test_session_load_applies_fetched_snapshot() {
    let (session, _notices) = session_with(Arc::new(MemoryApi::new(sample_snapshot("Loaded"))));

    session.load().await;

    let snapshot = session.store().snapshot().await;
    assert_eq!(snapshot.columns[0].cards[0].title, "Loaded");
    session.shutdown().await;
}

#[test_log::test(tokio::test)]
async fn test_session_load_falls_back_to_skeleton() {
    let (session, _notices) = session_with(Arc::new(MemoryApi::failing()));

    session.load().await;

    let snapshot = session.store().snapshot().await;
    let titles: Vec<&str> = snapshot.columns.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, vec!["To Do", "Doing", "Done"]);
    session.shutdown().await;
}

#[test_log::test(tokio::test)]
async fn test_session_switch_topic_fetches_and_selects() {
    let api = Arc::new(MemoryApi::new(sample_snapshot("Sprint work")));
    let (session, _notices) = session_with(api);

    session.switch_topic("Sprint 9").await.unwrap();

    assert_eq!(session.store().active_topic().await, "Sprint 9");
    let snapshot = session.store().snapshot().await;
    assert_eq!(snapshot.columns[0].cards[0].title, "Sprint work");
    session.shutdown().await;
}
