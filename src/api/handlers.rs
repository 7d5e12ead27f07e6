//! HTTP endpoint handlers

use std::{convert::Infallible, sync::Arc};
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        Json,
    },
};
use futures::{stream, Stream};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, error, warn};

use crate::state::{ActionOutcome, AppState, Phase, Step, Trigger};
use super::responses::{ApiResponse, HealthResponse, StatusResponse};

/// Handle POST /start_stop - Start or pause the countdown
pub async fn start_stop_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    match state.toggle() {
        Ok(outcome) => {
            let message = if outcome.snapshot.running { "Clock started" } else { "Clock paused" };
            Ok(Json(ApiResponse::applied(message.to_string(), outcome.snapshot)))
        }
        Err(e) => {
            error!("Failed to toggle clock: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /start - Start the countdown if stopped
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    match state.start() {
        Ok(outcome) => Ok(Json(ApiResponse::from_outcome(
            outcome,
            "Clock started",
            "Clock already running",
        ))),
        Err(e) => {
            error!("Failed to start clock: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /pause - Pause the countdown if running
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    match state.pause() {
        Ok(outcome) => Ok(Json(ApiResponse::from_outcome(
            outcome,
            "Clock paused",
            "Clock not running",
        ))),
        Err(e) => {
            error!("Failed to pause clock: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /reset - Restore defaults and silence the alert
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    match state.reset() {
        Ok(snapshot) => Ok(Json(ApiResponse::applied("Clock reset".to_string(), snapshot))),
        Err(e) => {
            error!("Failed to reset clock: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /:kind/increment
pub async fn increment_handler(
    State(state): State<Arc<AppState>>,
    Path(kind): Path<String>,
    body: Bytes,
) -> Result<Json<ApiResponse>, StatusCode> {
    adjust(&state, &kind, Step::Increment, &body)
}

/// Handle POST /:kind/decrement
pub async fn decrement_handler(
    State(state): State<Arc<AppState>>,
    Path(kind): Path<String>,
    body: Bytes,
) -> Result<Json<ApiResponse>, StatusCode> {
    adjust(&state, &kind, Step::Decrement, &body)
}

/// Decode the trigger of an adjust request.
///
/// An empty body is a click. Any other body must be a valid trigger, whatever
/// its content type; `None` means the request is ignored.
pub fn parse_trigger(body: &[u8]) -> Option<Trigger> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Some(Trigger::Click);
    }
    match serde_json::from_slice(body) {
        Ok(trigger) => Some(trigger),
        Err(e) => {
            debug!("Ignoring unreadable trigger: {}", e);
            None
        }
    }
}

fn adjust(
    state: &AppState,
    kind: &str,
    step: Step,
    body: &[u8],
) -> Result<Json<ApiResponse>, StatusCode> {
    let Some(phase) = Phase::from_name(kind) else {
        warn!("Unknown duration kind: {}", kind);
        return Err(StatusCode::NOT_FOUND);
    };

    let result = match parse_trigger(body) {
        Some(trigger) => state.adjust(phase, step, &trigger),
        None => state
            .snapshot()
            .map(|snapshot| ActionOutcome { applied: false, snapshot }),
    };

    match result {
        Ok(outcome) => {
            let minutes = match phase {
                Phase::Session => outcome.snapshot.session_minutes,
                Phase::Break => outcome.snapshot.break_minutes,
            };
            let applied = format!("{} length set to {} minutes", phase, minutes);
            let ignored = format!("{} length unchanged at {} minutes", phase, minutes);
            Ok(Json(ApiResponse::from_outcome(outcome, &applied, &ignored)))
        }
        Err(e) => {
            error!("Failed to adjust {} length: {}", kind, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /status - Return the clock and server status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let clock = match state.snapshot() {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to get clock state: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let alert_playing = match state.alert_playing() {
        Ok(playing) => playing,
        Err(e) => {
            error!("Failed to get alert state: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        clock,
        alert_playing,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /events - Stream clock events as server-sent events
pub async fn events_handler(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let events = stream::unfold(state.subscribe(), |mut rx| async move {
        loop {
            match rx.recv().await {
                Ok(event) => match serde_json::to_string(&event) {
                    Ok(data) => {
                        let sse = Event::default().event(event.name()).data(data);
                        return Some((Ok::<_, Infallible>(sse), rx));
                    }
                    Err(e) => warn!("Failed to serialize clock event: {}", e),
                },
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Event stream lagged, skipped {} events", skipped);
                }
                Err(RecvError::Closed) => return None,
            }
        }
    });

    Sse::new(events).keep_alive(KeepAlive::default())
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
