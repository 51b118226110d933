//! Strongly-typed identifiers for board entities.
//!
//! Ids are ULID strings: sortable by creation time and safe to use as
//! map keys or path segments. `from_string` accepts any string so ids
//! arriving over the wire round-trip unchanged.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Generate a fresh ULID-backed id
            pub fn new() -> Self {
                Self(ulid::Ulid::new().to_string())
            }

            /// Wrap an existing id string
            pub fn from_string(s: impl Into<String>) -> Self {
                Self(s.into())
            }

            /// The id as a string slice
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }
    };
}

id_type! {
    /// Identifies a column within one board+topic snapshot
    ColumnId
}
id_type! {
    /// Identifies a card
    CardId
}
id_type! {
    /// Identifies a label (board-scoped, shared across topics)
    LabelId
}
id_type! {
    /// Identifies a comment on a card
    CommentId
}
id_type! {
    /// Identifies an attachment
    AttachmentId
}

/// The practice key identifying a board. Not a ULID - boards are keyed
/// by their practice slug as issued by the server.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoardKey(String);

impl BoardKey {
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BoardKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BoardKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
