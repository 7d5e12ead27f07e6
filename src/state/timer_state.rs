//! Phase and countdown state

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which interval the clock is counting down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Session,
    Break,
}

impl Phase {
    /// The phase that follows this one
    pub fn next(self) -> Self {
        match self {
            Phase::Session => Phase::Break,
            Phase::Break => Phase::Session,
        }
    }

    /// Label shown above the time left
    pub fn label(self) -> &'static str {
        match self {
            Phase::Session => "Session",
            Phase::Break => "Break",
        }
    }

    /// Parse the lowercase name used in request paths
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "session" => Some(Phase::Session),
            "break" => Some(Phase::Break),
            _ => None,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Countdown state of the clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    pub phase: Phase,
    pub remaining_seconds: u64,
    pub running: bool,
}

impl TimerState {
    /// A stopped timer at the start of `phase`
    pub fn stopped(phase: Phase, remaining_seconds: u64) -> Self {
        Self {
            phase,
            remaining_seconds,
            running: false,
        }
    }
}
