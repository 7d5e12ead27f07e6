//! Background tasks module
//!
//! Tasks spawned on behalf of a running clock.

pub mod ticker;

// Re-export main items
pub use ticker::{Ticker, TICK_PERIOD};
