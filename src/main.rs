//! Pomodoro Clock - a session/break countdown clock
//!
//! This is the main entry point for the pomodoro-clock daemon.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use pomodoro_clock::{
    api::create_router,
    config::Config,
    state::AppState,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("pomodoro_clock={},tower_http=info", config.log_level()))
        .init();

    info!("Starting pomodoro-clock v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration: host={}, port={}, alert={}",
        config.host,
        config.port,
        if config.mute {
            "muted"
        } else {
            config.alert_command.as_deref().unwrap_or("terminal bell")
        }
    );

    let state = Arc::new(AppState::new(config.port, config.host.clone(), config.alert_player()));

    let app = create_router(Arc::clone(&state));

    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /start_stop                - Start or pause the countdown");
    info!("  POST /reset                     - Restore defaults");
    info!("  POST /{{break,session}}/increment - Lengthen a phase by a minute");
    info!("  POST /{{break,session}}/decrement - Shorten a phase by a minute");
    info!("  GET  /status                    - Current clock state");
    info!("  GET  /events                    - Clock event stream");
    info!("  GET  /health                    - Health check");

    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    if let Err(e) = state.shutdown() {
        tracing::error!("Failed to stop clock tasks: {}", e);
    }

    info!("Server shutdown complete");
    Ok(())
}
