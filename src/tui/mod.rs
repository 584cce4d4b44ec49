//! Terminal user interface using Ratatui.

mod app;
mod calls;
mod chat;
mod compose;
mod contacts;
mod dialog;
mod discussions;
mod help;
mod list;
mod log_capture;
mod settings;
mod theme;
mod ui;

pub use app::run;
pub use log_capture::LogBuffer;
