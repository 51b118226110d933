//! Attachment commands

mod add;
mod remove;

pub use add::AddAttachment;
pub use remove::RemoveAttachment;
