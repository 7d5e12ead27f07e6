//! Alert playback when a phase completes

use std::{fmt, io::Write};

use tokio::{process::Command, task::JoinHandle};
use tracing::{debug, info, warn};

/// Something that can play the end-of-phase alert
pub trait AlertPlayer: Send + Sync + fmt::Debug {
    /// Start playing from the beginning.
    ///
    /// Playback runs in the background; the returned handle stops it.
    fn play(&self) -> Result<Playback, String>;
}

/// Handle to an alert that may still be playing
#[derive(Debug)]
pub struct Playback {
    task: Option<JoinHandle<()>>,
}

impl Playback {
    /// Playback driven by a background task; stopping aborts the task
    pub fn from_task(task: JoinHandle<()>) -> Self {
        Self { task: Some(task) }
    }

    /// Playback that completed synchronously
    pub fn finished() -> Self {
        Self { task: None }
    }

    pub fn is_playing(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Stop playback and rewind. Safe to call in any state.
    pub fn stop(mut self) {
        if let Some(task) = self.task.take() {
            if !task.is_finished() {
                debug!("Stopping in-flight alert");
            }
            task.abort();
        }
    }
}

/// Runs a shell command for every alert, e.g. `paplay beep.wav`
#[derive(Debug, Clone)]
pub struct CommandAlert {
    command: String,
}

impl CommandAlert {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }
}

impl AlertPlayer for CommandAlert {
    fn play(&self) -> Result<Playback, String> {
        debug!("Playing alert: {}", self.command);

        // kill_on_drop makes aborting the waiter task stop the sound
        let mut child = Command::new("sh")
            .arg("-c")
            .arg(&self.command)
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| format!("Failed to spawn alert command: {}", e))?;

        let command = self.command.clone();
        let task = tokio::spawn(async move {
            match child.wait().await {
                Ok(status) if status.success() => debug!("Alert finished"),
                Ok(status) => warn!("Alert command '{}' exited with {}", command, status),
                Err(e) => warn!("Failed to wait for alert command: {}", e),
            }
        });

        Ok(Playback::from_task(task))
    }
}

/// Rings the terminal bell
#[derive(Debug, Clone, Default)]
pub struct BellAlert;

impl AlertPlayer for BellAlert {
    fn play(&self) -> Result<Playback, String> {
        let mut stdout = std::io::stdout();
        stdout
            .write_all(b"\x07")
            .and_then(|_| stdout.flush())
            .map_err(|e| format!("Failed to ring terminal bell: {}", e))?;
        Ok(Playback::finished())
    }
}

/// Plays nothing
#[derive(Debug, Clone, Default)]
pub struct SilentAlert;

impl AlertPlayer for SilentAlert {
    fn play(&self) -> Result<Playback, String> {
        info!("Phase complete (alerts muted)");
        Ok(Playback::finished())
    }
}
