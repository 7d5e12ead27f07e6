//! Utility functions module
//!
//! Formatting helpers for the clock face and process signal handling.

pub mod format;
pub mod signals;

pub use format::{format_time, in_range, minutes_left, DurationRange};
pub use signals::shutdown_signal;
