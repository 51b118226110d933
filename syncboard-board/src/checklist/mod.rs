//! Checklist commands: add a named list to a card, edit single items,
//! remove a whole list. All of them are silent edits; only the card's
//! edit stamp moves.

mod add;
mod remove;
mod update;

pub use add::AddChecklist;
pub use remove::RemoveChecklist;
pub use update::UpdateChecklistItem;
