//! Data models for the terminal UI

mod app;
mod dialog;
mod view;

pub use app::*;
pub use dialog::*;
pub use view::*;
