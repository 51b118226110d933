//! Core types for the board engine

mod board;
mod card;
mod ids;
mod snapshot;
mod user;

pub use board::{Board, BoardSettings, Label, MAIN_TOPIC};
pub use card::{Attachment, Card, CardDates, Checklist, ChecklistItem, Comment};
pub use ids::{AttachmentId, BoardKey, CardId, ColumnId, CommentId, LabelId};
pub use snapshot::{array_move, normalize_wire, Column, Snapshot};
pub use user::{Role, User};
