//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::{ActionOutcome, ClockSnapshot};

/// Response for control endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub clock: ClockSnapshot,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: String, message: String, clock: ClockSnapshot) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            clock,
        }
    }

    /// The action changed the clock
    pub fn applied(message: String, clock: ClockSnapshot) -> Self {
        Self::new("applied".to_string(), message, clock)
    }

    /// The action was valid but had no effect
    pub fn ignored(message: String, clock: ClockSnapshot) -> Self {
        Self::new("ignored".to_string(), message, clock)
    }

    pub fn from_outcome(outcome: ActionOutcome, applied: &str, ignored: &str) -> Self {
        if outcome.applied {
            Self::applied(applied.to_string(), outcome.snapshot)
        } else {
            Self::ignored(ignored.to_string(), outcome.snapshot)
        }
    }
}

/// Status response with server metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub clock: ClockSnapshot,
    pub alert_playing: bool,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
