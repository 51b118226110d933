//! Typed push-channel events.
//!
//! The wire format is a JSON object with a `type` tag. Payloads are
//! validated here at the boundary; an unknown type or a malformed
//! payload is logged and dropped rather than crashing the channel.

use serde_json::Value;
use syncboard_board::types::{BoardSettings, Snapshot};
use tracing::{debug, warn};

/// A change pushed by the server for one board.
#[derive(Debug, Clone, PartialEq)]
pub enum BoardEvent {
    /// Full authoritative replace of one topic's snapshot
    BoardUpdated { topic: String, snapshot: Snapshot },
    TopicAdded { topic: String },
    TopicRenamed { from: String, to: String },
    TopicDeleted { topic: String },
    SettingsUpdated { settings: BoardSettings },
}

/// Parse one raw channel message. Returns `None` for anything that is
/// not a well-formed known event.
pub fn parse_event(raw: &str) -> Option<BoardEvent> {
    let value: Value = match serde_json::from_str(raw) {
        Ok(v) => v,
        Err(err) => {
            warn!(error = %err, "dropping unparseable channel message");
            return None;
        }
    };
    let Some(kind) = value.get("type").and_then(Value::as_str) else {
        warn!("dropping channel message without a type tag");
        return None;
    };

    let event = match kind {
        "board_updated" => {
            let topic = string_field(&value, "topic")?;
            // The event object itself carries `columns`, so it parses
            // as a snapshot directly.
            match Snapshot::from_wire(value.clone()) {
                Ok(snapshot) => Some(BoardEvent::BoardUpdated { topic, snapshot }),
                Err(err) => {
                    warn!(error = %err, "dropping board_updated with malformed columns");
                    None
                }
            }
        }
        "topic_added" => Some(BoardEvent::TopicAdded {
            topic: string_field(&value, "topic")?,
        }),
        "topic_renamed" => Some(BoardEvent::TopicRenamed {
            from: string_field(&value, "from")?,
            to: string_field(&value, "to")?,
        }),
        "topic_deleted" => Some(BoardEvent::TopicDeleted {
            topic: string_field(&value, "topic")?,
        }),
        "settings_updated" => {
            let Some(settings) = value.get("settings").cloned() else {
                warn!("dropping settings_updated without a settings payload");
                return None;
            };
            match serde_json::from_value(settings) {
                Ok(settings) => Some(BoardEvent::SettingsUpdated { settings }),
                Err(err) => {
                    warn!(error = %err, "dropping settings_updated with malformed payload");
                    None
                }
            }
        }
        other => {
            debug!(kind = other, "ignoring unknown channel event");
            None
        }
    };
    event
}

fn string_field(value: &Value, field: &str) -> Option<String> {
    match value.get(field).and_then(Value::as_str) {
        Some(s) => Some(s.to_string()),
        None => {
            warn!(field, "dropping channel event missing a field");
            None
        }
    }
}
