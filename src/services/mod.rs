//! External collaborators module
//!
//! Alert playback lives here; the clock only asks for an alert to start or
//! stop and never depends on it succeeding.

pub mod alert;

// Re-export main types
pub use alert::{AlertPlayer, BellAlert, CommandAlert, Playback, SilentAlert};
