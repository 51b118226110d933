//! Label commands

mod toggle;

pub use toggle::ToggleLabel;
