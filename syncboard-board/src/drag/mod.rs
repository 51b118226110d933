//! Drag reordering for columns and cards.
//!
//! The engine is a small state machine: Idle → Dragging → DragEnd →
//! Idle. `drag_start` captures a pre-drag snapshot; a card crossing
//! into another column is transferred in the live store immediately;
//! the final ordering is computed and persisted at `drag_end`, and a
//! persistence failure restores the pre-drag snapshot exactly.
//!
//! Target selection (`targets`) and keyboard navigation (`keyboard`)
//! are pure geometry helpers; the engine itself does not care whether
//! coordinates came from a pointer or from arrow keys.

mod engine;
mod keyboard;
mod targets;

pub use engine::{DragEngine, DraggedItem, DropRef};
pub use keyboard::{keyboard_coordinates, Direction};
pub use targets::{nearest_target, DragKind, DropTarget, Rect};
