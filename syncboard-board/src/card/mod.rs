//! Card commands

mod add;
mod assign;
mod dates;
mod delete;
mod follow;
mod update;

pub use add::AddCard;
pub use assign::SetAssignees;
pub use dates::SetDates;
pub use delete::DeleteCard;
pub use follow::ToggleFollower;
pub use update::UpdateCard;
