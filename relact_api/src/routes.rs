//! Router and request handlers.

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::routing::{get, post};
use relact_control::ActuatorController;
use relact_control::command::{Command, execute};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, warn};

use crate::error::{ApiError, ApiReply};

/// Shared handler state.
type Controller = Arc<ActuatorController>;

const INDEX: &str = "relact actuator controller\n\n\
GET  /api/status          - current status\n\
POST /api/start           - start cycling\n\
POST /api/stop            - stop cycling\n\
POST /api/configure       - set wait time {\"wait_seconds\": n}\n\
POST /api/cycle_wait_time - set wait time {\"time\": n}\n";

/// Build the application router around a shared controller.
pub fn router(controller: Controller) -> Router {
    Router::new()
        .route("/", get(|| async { INDEX }))
        .route("/api/status", get(status))
        .route("/api/start", post(start))
        .route("/api/stop", post(stop))
        .route("/api/configure", post(configure))
        .route("/api/cycle_wait_time", post(cycle_wait_time))
        .with_state(controller)
}

async fn status(State(ctrl): State<Controller>) -> ApiReply {
    execute(&ctrl, Command::Status).into()
}

async fn start(State(ctrl): State<Controller>) -> ApiReply {
    run_blocking(ctrl, Command::Start).await
}

async fn stop(State(ctrl): State<Controller>) -> ApiReply {
    run_blocking(ctrl, Command::Stop).await
}

async fn configure(State(ctrl): State<Controller>, body: Bytes) -> ApiReply {
    set_wait(&ctrl, &body, "wait_seconds")
}

/// Older clients post `{"time": n}`.
async fn cycle_wait_time(State(ctrl): State<Controller>, body: Bytes) -> ApiReply {
    set_wait(&ctrl, &body, "time")
}

/// Start and stop can block on the runner thread; keep them off the
/// async workers.
async fn run_blocking(ctrl: Controller, command: Command) -> ApiReply {
    let worker = Arc::clone(&ctrl);
    match tokio::task::spawn_blocking(move || execute(&worker, command)).await {
        Ok(reply) => {
            debug!("{:?} -> {}", command, reply.message());
            reply.into()
        }
        Err(e) => {
            error!("{:?} task failed: {}", command, e);
            ApiReply::error(&ApiError::Internal(e.to_string()), ctrl.status())
        }
    }
}

fn set_wait(ctrl: &ActuatorController, body: &[u8], field: &'static str) -> ApiReply {
    match wait_seconds(body, field) {
        Ok(wait_seconds) => execute(ctrl, Command::Configure { wait_seconds }).into(),
        Err(e) => {
            warn!("Rejected wait time request: {}", e);
            ApiReply::error(&e, ctrl.status())
        }
    }
}

/// Pull a numeric field out of a JSON object body.
fn wait_seconds(body: &[u8], field: &'static str) -> Result<f64, ApiError> {
    let value: Value =
        serde_json::from_slice(body).map_err(|e| ApiError::InvalidBody(e.to_string()))?;
    let object = value
        .as_object()
        .ok_or_else(|| ApiError::InvalidBody("expected a JSON object".to_string()))?;
    let raw = object.get(field).ok_or(ApiError::MissingField(field))?;
    raw.as_f64().ok_or(ApiError::InvalidNumber { field })
}
