//! Shared clock state owned by the server

use std::{
    sync::{Arc, Mutex, MutexGuard},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, watch};
use tracing::{debug, info, warn};

use super::{Clock, ClockEvent, ClockSnapshot, Phase, Step, Trigger};
use crate::{
    services::{AlertPlayer, Playback},
    tasks::Ticker,
};

/// Result of a control action
#[derive(Debug, Clone)]
pub struct ActionOutcome {
    /// False when the action was ignored (already running, out of range, ...)
    pub applied: bool,
    pub snapshot: ClockSnapshot,
}

/// Everything guarded by the clock lock.
///
/// Cancelling the ticker or the alert and changing the clock happen in one
/// critical section.
#[derive(Debug)]
struct ClockInner {
    clock: Clock,
    ticker: Option<Ticker>,
    next_generation: u64,
    playback: Option<Playback>,
}

impl ClockInner {
    fn cancel_ticker(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.cancel();
        }
    }

    fn stop_playback(&mut self) {
        if let Some(playback) = self.playback.take() {
            playback.stop();
        }
    }
}

/// One clock instance with its ticking task, alert handle and channels
#[derive(Debug)]
pub struct AppState {
    inner: Mutex<ClockInner>,
    alert: Arc<dyn AlertPlayer>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Mutex<Option<String>>,
    pub last_action_time: Mutex<Option<DateTime<Utc>>>,
    /// Clock events (start, pause, phase complete, reset)
    pub event_tx: broadcast::Sender<ClockEvent>,
    /// Latest snapshot after every change
    pub snapshot_tx: watch::Sender<ClockSnapshot>,
    /// Keep the receiver alive to prevent channel closure
    _snapshot_rx: watch::Receiver<ClockSnapshot>,
}

impl AppState {
    /// Create a stopped clock with default durations
    pub fn new(port: u16, host: String, alert: Arc<dyn AlertPlayer>) -> Self {
        let clock = Clock::new();
        let (event_tx, _) = broadcast::channel(100);
        let (snapshot_tx, snapshot_rx) = watch::channel(clock.snapshot());

        Self {
            inner: Mutex::new(ClockInner {
                clock,
                ticker: None,
                next_generation: 0,
                playback: None,
            }),
            alert,
            start_time: Instant::now(),
            port,
            host,
            last_action: Mutex::new(None),
            last_action_time: Mutex::new(None),
            event_tx,
            snapshot_tx,
            _snapshot_rx: snapshot_rx,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, ClockInner>, String> {
        self.inner
            .lock()
            .map_err(|e| format!("Failed to lock clock state: {}", e))
    }

    /// Record the action and notify watchers after a change
    fn publish(&self, action: &str, snapshot: &ClockSnapshot, event: Option<ClockEvent>) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }

        self.snapshot_tx.send_replace(snapshot.clone());

        if let Some(event) = event {
            if self.event_tx.send(event).is_err() {
                debug!("No event subscribers for {}", action);
            }
        }
    }

    /// Current clock snapshot
    pub fn snapshot(&self) -> Result<ClockSnapshot, String> {
        Ok(self.lock()?.clock.snapshot())
    }

    /// Spawn the ticker for a clock that was just started
    fn begin_ticking(self: &Arc<Self>, inner: &mut ClockInner) {
        let generation = inner.next_generation;
        inner.next_generation += 1;
        inner.ticker = Some(Ticker::spawn(Arc::clone(self), generation));
    }

    fn announce_start(&self, applied: bool, snapshot: &ClockSnapshot) {
        if applied {
            info!("Clock started: {} {}", snapshot.label, snapshot.time_left);
            self.publish("start", snapshot, Some(ClockEvent::started()));
        } else {
            debug!("Start ignored, clock already running");
        }
    }

    fn announce_pause(&self, applied: bool, snapshot: &ClockSnapshot) {
        if applied {
            info!("Clock paused at {}", snapshot.time_left);
            self.publish("pause", snapshot, Some(ClockEvent::paused()));
        } else {
            debug!("Pause ignored, clock not running");
        }
    }

    /// Start counting down. Starting a running clock changes nothing.
    pub fn start(self: &Arc<Self>) -> Result<ActionOutcome, String> {
        let mut inner = self.lock()?;
        let applied = inner.clock.start();
        if applied {
            self.begin_ticking(&mut inner);
        }
        let snapshot = inner.clock.snapshot();
        drop(inner);

        self.announce_start(applied, &snapshot);
        Ok(ActionOutcome { applied, snapshot })
    }

    /// Stop counting down, keeping the remaining time
    pub fn pause(&self) -> Result<ActionOutcome, String> {
        let mut inner = self.lock()?;
        let applied = inner.clock.pause();
        inner.cancel_ticker();
        let snapshot = inner.clock.snapshot();
        drop(inner);

        self.announce_pause(applied, &snapshot);
        Ok(ActionOutcome { applied, snapshot })
    }

    /// Start if stopped, pause if running.
    ///
    /// The check and the transition share one critical section, so
    /// concurrent toggles alternate.
    pub fn toggle(self: &Arc<Self>) -> Result<ActionOutcome, String> {
        let mut inner = self.lock()?;
        let started = inner.clock.toggle();
        if started {
            self.begin_ticking(&mut inner);
        } else {
            inner.cancel_ticker();
        }
        let snapshot = inner.clock.snapshot();
        drop(inner);

        if started {
            self.announce_start(true, &snapshot);
        } else {
            self.announce_pause(true, &snapshot);
        }
        Ok(ActionOutcome { applied: true, snapshot })
    }

    /// Back to defaults from any state, silencing any alert in flight
    pub fn reset(&self) -> Result<ClockSnapshot, String> {
        let mut inner = self.lock()?;
        inner.cancel_ticker();
        inner.stop_playback();
        inner.clock.reset();
        let snapshot = inner.clock.snapshot();
        drop(inner);

        info!("Clock reset");
        self.publish("reset", &snapshot, Some(ClockEvent::reset()));
        Ok(snapshot)
    }

    /// Lengthen or shorten a phase by one minute.
    ///
    /// Rejected triggers, a running clock and out-of-range results are
    /// ignored without error.
    pub fn adjust(&self, phase: Phase, step: Step, trigger: &Trigger) -> Result<ActionOutcome, String> {
        let mut inner = self.lock()?;
        let applied = trigger.is_accepted() && inner.clock.adjust(phase, step);
        let snapshot = inner.clock.snapshot();
        drop(inner);

        let action = match step {
            Step::Increment => format!("{}-increment", phase.label().to_lowercase()),
            Step::Decrement => format!("{}-decrement", phase.label().to_lowercase()),
        };

        if applied {
            info!(
                "{} length set to {} minutes",
                phase,
                match phase {
                    Phase::Session => snapshot.session_minutes,
                    Phase::Break => snapshot.break_minutes,
                }
            );
            self.publish(&action, &snapshot, None);
        } else {
            debug!("Ignored {} ({:?}, running={})", action, trigger, snapshot.running);
        }
        Ok(ActionOutcome { applied, snapshot })
    }

    pub fn increment(&self, phase: Phase, trigger: &Trigger) -> Result<ActionOutcome, String> {
        self.adjust(phase, Step::Increment, trigger)
    }

    pub fn decrement(&self, phase: Phase, trigger: &Trigger) -> Result<ActionOutcome, String> {
        self.adjust(phase, Step::Decrement, trigger)
    }

    /// Apply one tick from the ticker of `generation`.
    ///
    /// Returns `Ok(false)` when that ticker is no longer current, which tells
    /// it to exit. Alert failures are logged and never hold back the flip.
    pub(crate) fn tick(&self, generation: u64) -> Result<bool, String> {
        let mut inner = self.lock()?;
        let current = inner.ticker.as_ref().map(Ticker::generation);
        if current != Some(generation) || !inner.clock.is_running() {
            return Ok(false);
        }

        let change = inner.clock.tick();
        if change.is_some() {
            inner.stop_playback();
            match self.alert.play() {
                Ok(playback) => inner.playback = Some(playback),
                Err(e) => warn!("Alert failed: {}", e),
            }
        }
        let snapshot = inner.clock.snapshot();
        drop(inner);

        match change {
            Some(change) => {
                info!("{} complete, {} begins ({})", change.from, change.to, snapshot.time_left);
                self.publish("phase-complete", &snapshot, Some(ClockEvent::phase_complete(change)));
            }
            None => {
                self.snapshot_tx.send_replace(snapshot);
            }
        }
        Ok(true)
    }

    /// Whether an alert is still playing
    pub fn alert_playing(&self) -> Result<bool, String> {
        Ok(self.lock()?.playback.as_ref().is_some_and(Playback::is_playing))
    }

    /// Cancel the ticker and silence alerts without touching the clock
    pub fn shutdown(&self) -> Result<(), String> {
        let mut inner = self.lock()?;
        inner.cancel_ticker();
        inner.stop_playback();
        info!("Clock tasks stopped");
        Ok(())
    }

    /// Subscribe to clock events
    pub fn subscribe(&self) -> broadcast::Receiver<ClockEvent> {
        self.event_tx.subscribe()
    }

    /// Watch snapshots as they change
    pub fn watch(&self) -> watch::Receiver<ClockSnapshot> {
        self.snapshot_tx.subscribe()
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
