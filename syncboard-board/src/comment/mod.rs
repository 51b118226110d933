//! Comment commands

mod add;
mod delete;

pub use add::AddComment;
pub use delete::DeleteComment;
