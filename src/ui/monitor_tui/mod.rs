//! Terminal User Interface for the power/emissions dashboard.
//!
//! Provides a real-time dashboard using ratatui.

mod app;
mod event_handler;
mod render;
mod widgets;

pub use app::{run_monitor_app, MonitorApp};
pub use event_handler::MonitorEvent;
