//! One-second ticking task for a running clock

use std::{sync::Arc, time::Duration};

use tokio::{
    task::JoinHandle,
    time::{interval_at, Instant},
};
use tracing::{debug, error};

use crate::state::AppState;

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// A spawned ticking task.
///
/// The generation ties the task to one start of the clock; ticks from a
/// generation that is no longer current are discarded by [`AppState`].
#[derive(Debug)]
pub struct Ticker {
    generation: u64,
    handle: JoinHandle<()>,
}

impl Ticker {
    pub fn spawn(state: Arc<AppState>, generation: u64) -> Self {
        let handle = tokio::spawn(ticker_task(state, generation));
        Self { generation, handle }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Abort the task; no tick from it is applied afterwards
    pub fn cancel(self) {
        debug!("Cancelling ticker generation {}", self.generation);
        self.handle.abort();
    }
}

/// Tick once per elapsed second until the clock stops or a newer ticker
/// replaces this one
async fn ticker_task(state: Arc<AppState>, generation: u64) {
    debug!("Starting ticker generation {}", generation);

    // The first tick is one full period after start
    let mut interval = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);

    loop {
        interval.tick().await;

        match state.tick(generation) {
            Ok(true) => {}
            Ok(false) => {
                debug!("Ticker generation {} is stale, exiting", generation);
                break;
            }
            Err(e) => {
                error!("Failed to apply tick: {}", e);
                break;
            }
        }
    }
}
