//! State management module
//!
//! The pure clock state machine and the shared, task-owning wrapper around it.

pub mod app_state;
pub mod clock;
pub mod durations;
pub mod events;
pub mod timer_state;
pub mod trigger;

// Re-export main types
pub use app_state::{ActionOutcome, AppState};
pub use clock::{Clock, ClockSnapshot, PhaseChange, Step};
pub use durations::{Durations, DEFAULT_BREAK_MINUTES, DEFAULT_SESSION_MINUTES};
pub use events::ClockEvent;
pub use timer_state::{Phase, TimerState};
pub use trigger::Trigger;
