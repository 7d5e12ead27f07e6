//! Notifications published by the clock

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{clock::PhaseChange, Phase};

/// A transition worth telling subscribers about
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ClockEvent {
    Started {
        at: DateTime<Utc>,
    },
    Paused {
        at: DateTime<Utc>,
    },
    /// The countdown reached zero and the alert was requested
    PhaseComplete {
        from: Phase,
        to: Phase,
        remaining_seconds: u64,
        at: DateTime<Utc>,
    },
    Reset {
        at: DateTime<Utc>,
    },
}

impl ClockEvent {
    pub fn started() -> Self {
        ClockEvent::Started { at: Utc::now() }
    }

    pub fn paused() -> Self {
        ClockEvent::Paused { at: Utc::now() }
    }

    pub fn reset() -> Self {
        ClockEvent::Reset { at: Utc::now() }
    }

    pub fn phase_complete(change: PhaseChange) -> Self {
        ClockEvent::PhaseComplete {
            from: change.from,
            to: change.to,
            remaining_seconds: change.remaining_seconds,
            at: Utc::now(),
        }
    }

    /// Event name used on the SSE stream
    pub fn name(&self) -> &'static str {
        match self {
            ClockEvent::Started { .. } => "started",
            ClockEvent::Paused { .. } => "paused",
            ClockEvent::PhaseComplete { .. } => "phase_complete",
            ClockEvent::Reset { .. } => "reset",
        }
    }
}
