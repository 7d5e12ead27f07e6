//! Configuration and CLI argument handling

use std::sync::Arc;

use clap::Parser;

use crate::services::{AlertPlayer, BellAlert, CommandAlert, SilentAlert};

/// CLI argument parsing structure
#[derive(Debug, Parser)]
#[command(name = "pomodoro-clock")]
#[command(about = "A session/break countdown clock with an HTTP control surface")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Shell command played when a phase completes (defaults to the terminal bell)
    #[arg(long, value_name = "CMD")]
    pub alert_command: Option<String>,

    /// Disable phase-complete alerts
    #[arg(long, conflicts_with = "alert_command")]
    pub mute: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Build the alert player selected by the flags
    pub fn alert_player(&self) -> Arc<dyn AlertPlayer> {
        if self.mute {
            return Arc::new(SilentAlert);
        }
        match &self.alert_command {
            Some(command) => Arc::new(CommandAlert::new(command.clone())),
            None => Arc::new(BellAlert),
        }
    }
}
