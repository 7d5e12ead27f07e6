// Shared helpers for integration tests.

#![allow(dead_code)]

use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

use pomodoro_clock::{services::{AlertPlayer, Playback}, AppState};

/// Counts alerts; optionally fails every play or keeps playing until stopped
#[derive(Debug, Default)]
pub struct RecordingAlert {
    plays: AtomicUsize,
    fail: bool,
    linger: bool,
}

impl RecordingAlert {
    pub fn failing() -> Self {
        Self { fail: true, ..Self::default() }
    }

    pub fn lingering() -> Self {
        Self { linger: true, ..Self::default() }
    }

    pub fn plays(&self) -> usize {
        self.plays.load(Ordering::SeqCst)
    }
}

impl AlertPlayer for RecordingAlert {
    fn play(&self) -> Result<Playback, String> {
        self.plays.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err("audio device unavailable".to_string());
        }
        if self.linger {
            let task = tokio::spawn(async {
                tokio::time::sleep(Duration::from_secs(24 * 3600)).await;
            });
            return Ok(Playback::from_task(task));
        }
        Ok(Playback::finished())
    }
}

pub fn clock_with(alert: Arc<RecordingAlert>) -> Arc<AppState> {
    Arc::new(AppState::new(0, "127.0.0.1".to_string(), alert))
}

/// Let virtual time run for `secs` seconds plus a margin so the last tick lands
pub async fn run_for(secs: u64) {
    tokio::time::sleep(Duration::from_secs(secs) + Duration::from_millis(500)).await;
}
