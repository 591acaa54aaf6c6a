//! HTTP front end for the relay.
//!
//! One working endpoint: `POST /run` (with `/` as an alias for old
//! embeds) takes a multipart upload of source files plus a JSON
//! `command` field and answers with a JSON display action, or a plain
//! `Error: ...` string when the request never reaches the interpreter.
//! Pre-flight `OPTIONS` and the `Access-Control-Allow-Origin: *` header
//! on every response are handled by the CORS layer; the blog and the
//! relay live on different origins.

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Bytes,
    extract::{Multipart, State},
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, error, info, warn};

use inkproto::{Command, DisplayAction, RelayError};

use crate::interpret::interpret;
use crate::invoke::Invoker;
use crate::session::{Session, SessionStore};
use crate::translate::translate;

/// Shared state for web handlers.
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionStore>,
    pub invoker: Arc<dyn Invoker>,
    pub start_time: Instant,
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .max_age(Duration::from_secs(3600));

    Router::new()
        .route("/run", post(handle_run))
        .route("/", post(handle_run))
        .route("/health", get(handle_health))
        .layer(cors)
        .with_state(state)
}

/// Health check endpoint.
async fn handle_health(State(state): State<AppState>) -> Json<serde_json::Value> {
    let uptime = state.start_time.elapsed();
    Json(serde_json::json!({
        "status": "healthy",
        "uptime_secs": uptime.as_secs(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Run one playground command against an uploaded workspace.
async fn handle_run(State(state): State<AppState>, multipart: Multipart) -> Response {
    let session = match state.sessions.create().await {
        Ok(session) => session,
        Err(e) => {
            error!(error = %format!("{e:#}"), "workspace allocation failed");
            return error_response(&RelayError::Workspace(format!("{e:#}")));
        }
    };

    let result = process(&state, &session, multipart).await;
    // Cleanup runs on every path, including after errors; the Session
    // guard also covers panics between here and the response.
    session.cleanup().await;

    match result {
        Ok(action) => Json(action).into_response(),
        Err(err) => {
            warn!(error = %err, "request rejected");
            error_response(&err)
        }
    }
}

/// Translation and launch failures answer with a plain error string,
/// not a display action; the client shows it in the diagnostic panel.
fn error_response(err: &RelayError) -> Response {
    (StatusCode::OK, format!("Error: {err}")).into_response()
}

async fn process(
    state: &AppState,
    session: &Session,
    mut multipart: Multipart,
) -> Result<DisplayAction, RelayError> {
    let bad_payload =
        |e: axum::extract::multipart::MultipartError| RelayError::UnrecognizedCommand(format!("invalid multipart payload: {e}"));

    let mut uploads: Vec<(String, Bytes)> = Vec::new();
    let mut command_json: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(bad_payload)? {
        if let Some(file_name) = field.file_name().map(str::to_owned) {
            // File part; the filename carries the workspace-relative path.
            let bytes = field.bytes().await.map_err(bad_payload)?;
            uploads.push((file_name, bytes));
        } else if field.name() == Some("command") {
            command_json = Some(field.text().await.map_err(bad_payload)?);
        }
        // Unknown text fields are ignored.
    }

    let command_json = command_json
        .ok_or_else(|| RelayError::UnrecognizedCommand("missing command field".to_string()))?;
    let command = Command::parse(&command_json)?;

    // Barrier: every upload must be fully on disk before the toolchain
    // runs, not just received.
    let staged = futures::future::try_join_all(
        uploads
            .iter()
            .map(|(name, bytes)| session.stash(name, bytes)),
    )
    .await
    .map_err(|e| RelayError::Workspace(format!("{e:#}")))?;

    info!(
        action = command.action_name(),
        file = command.file(),
        files = staged.len(),
        workspace = %session.path().display(),
        "dispatching command"
    );

    let invocation = translate(&command)?;
    let output = state.invoker.run(&invocation, session.path()).await?;
    debug!(exit_code = output.exit_code, "interpreting toolchain output");

    Ok(interpret(&command, &output))
}
