//! Pomodoro Clock - a session/break countdown clock
//!
//! The clock alternates between a session and a break of configurable
//! length, ticking once per second while running and playing an alert when a
//! phase ends. An HTTP API exposes it to whatever renders the clock face.

pub mod config;
pub mod state;
pub mod api;
pub mod services;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::{AppState, Clock, ClockSnapshot, Phase};
pub use api::create_router;
pub use utils::{format_time, in_range, shutdown_signal};
