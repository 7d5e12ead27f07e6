//! Configured session and break lengths

use serde::{Deserialize, Serialize};

use super::Phase;

pub const DEFAULT_BREAK_MINUTES: u32 = 5;
pub const DEFAULT_SESSION_MINUTES: u32 = 25;

/// Length of each phase in whole minutes, kept within `1..=60`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Durations {
    pub break_minutes: u32,
    pub session_minutes: u32,
}

impl Durations {
    pub fn minutes(&self, phase: Phase) -> u32 {
        match phase {
            Phase::Session => self.session_minutes,
            Phase::Break => self.break_minutes,
        }
    }

    pub fn seconds(&self, phase: Phase) -> u64 {
        u64::from(self.minutes(phase)) * 60
    }

    pub(crate) fn set_minutes(&mut self, phase: Phase, minutes: u32) {
        match phase {
            Phase::Session => self.session_minutes = minutes,
            Phase::Break => self.break_minutes = minutes,
        }
    }
}

impl Default for Durations {
    fn default() -> Self {
        Self {
            break_minutes: DEFAULT_BREAK_MINUTES,
            session_minutes: DEFAULT_SESSION_MINUTES,
        }
    }
}
