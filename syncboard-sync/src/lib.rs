//! Real-time sync layer for syncboard
//!
//! Keeps a [`syncboard_board::BoardStore`] in step with the server:
//! a push channel streams typed events over a WebSocket, a poller
//! re-fetches the snapshot while the channel is down, and a
//! [`BoardSession`] ties both to the mutation pipeline for one mounted
//! board view.
//!
//! The consistency model is deliberately simple. The server serializes
//! pushes per board and every `board_updated` is a full replace, so the
//! client never merges; the last message wins. Reconnects back off
//! exponentially and give up after five tries, after which polling
//! carries the board until the view is remounted.

pub mod channel;
mod error;
pub mod poller;
pub mod protocol;
pub mod session;
pub mod transport;

pub use channel::{reconnect_delay, ChannelConfig, ConnectionState, SyncChannel};
pub use error::{Result, SyncError};
pub use poller::SnapshotPoller;
pub use protocol::{parse_event, BoardEvent};
pub use session::BoardSession;
pub use transport::{EventStream, PushTransport, WebSocketTransport};
