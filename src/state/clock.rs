//! Session/break state machine
//!
//! ```text
//!            start / toggle
//!   Stopped ────────────────► Running ──┐ tick: remaining -= 1
//!      ▲  ◄──────────────────    │  ▲   │
//!      │     pause / toggle      │  └───┘
//!      │                         │ remaining hits 0:
//!      │ reset (any state)       │ phase flips, remaining = next duration
//!      └─────────────────────────┘
//! ```
//!
//! `Clock` is plain data with synchronous transitions. Scheduling the ticks
//! and playing alerts belong to [`AppState`](super::AppState).

use serde::{Deserialize, Serialize};

use super::{Durations, Phase, TimerState};
use crate::utils::{format_time, in_range, minutes_left, DurationRange};

/// Direction of a duration adjustment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Increment,
    Decrement,
}

impl Step {
    fn delta(self) -> i64 {
        match self {
            Step::Increment => 1,
            Step::Decrement => -1,
        }
    }
}

/// Emitted by [`Clock::tick`] when the countdown reaches zero
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseChange {
    pub from: Phase,
    pub to: Phase,
    pub remaining_seconds: u64,
}

/// Durations plus countdown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clock {
    durations: Durations,
    timer: TimerState,
}

impl Clock {
    /// Stopped at the start of a default session
    pub fn new() -> Self {
        let durations = Durations::default();
        Self {
            durations,
            timer: TimerState::stopped(Phase::Session, durations.seconds(Phase::Session)),
        }
    }

    pub fn durations(&self) -> Durations {
        self.durations
    }

    pub fn timer(&self) -> TimerState {
        self.timer
    }

    pub fn is_running(&self) -> bool {
        self.timer.running
    }

    /// Returns false if already running
    pub fn start(&mut self) -> bool {
        if self.timer.running {
            return false;
        }
        self.timer.running = true;
        true
    }

    /// Returns false if already stopped
    pub fn pause(&mut self) -> bool {
        if !self.timer.running {
            return false;
        }
        self.timer.running = false;
        true
    }

    /// Start if stopped, pause if running. Returns whether it is now running.
    pub fn toggle(&mut self) -> bool {
        self.timer.running = !self.timer.running;
        self.timer.running
    }

    /// Count down one second.
    ///
    /// Reaching zero flips the phase in the same step, so a running clock is
    /// never left showing `00:00`.
    pub fn tick(&mut self) -> Option<PhaseChange> {
        if !self.timer.running {
            return None;
        }

        self.timer.remaining_seconds = self.timer.remaining_seconds.saturating_sub(1);
        if self.timer.remaining_seconds > 0 {
            return None;
        }

        let from = self.timer.phase;
        let to = from.next();
        self.timer.phase = to;
        self.timer.remaining_seconds = self.durations.seconds(to);

        Some(PhaseChange {
            from,
            to,
            remaining_seconds: self.timer.remaining_seconds,
        })
    }

    /// Adjust one duration by a minute.
    ///
    /// Ignored while running or when the result would leave `1..=60`.
    /// Returns whether the duration changed.
    pub fn adjust(&mut self, phase: Phase, step: Step) -> bool {
        if self.timer.running {
            return false;
        }

        let proposed = i64::from(self.durations.minutes(phase)) + step.delta();
        if !in_range(proposed, DurationRange::default()) {
            return false;
        }

        // in_range leaves 1..=60 here
        self.durations.set_minutes(phase, proposed as u32);
        if self.timer.phase == phase {
            self.timer.remaining_seconds = self.durations.seconds(phase);
        }
        true
    }

    pub fn increment(&mut self, phase: Phase) -> bool {
        self.adjust(phase, Step::Increment)
    }

    pub fn decrement(&mut self, phase: Phase) -> bool {
        self.adjust(phase, Step::Decrement)
    }

    /// Back to default durations, stopped at the start of a session
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn snapshot(&self) -> ClockSnapshot {
        ClockSnapshot {
            phase: self.timer.phase,
            label: self.timer.phase.label().to_string(),
            running: self.timer.running,
            remaining_seconds: self.timer.remaining_seconds,
            time_left: format_time(self.timer.remaining_seconds),
            minutes_left: minutes_left(self.timer.remaining_seconds),
            break_minutes: self.durations.break_minutes,
            session_minutes: self.durations.session_minutes,
        }
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything a clock face needs to render
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockSnapshot {
    pub phase: Phase,
    pub label: String,
    pub running: bool,
    pub remaining_seconds: u64,
    pub time_left: String,
    pub minutes_left: u64,
    pub break_minutes: u32,
    pub session_minutes: u32,
}
