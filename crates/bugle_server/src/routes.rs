//! HTTP routes for the command API.

use axum::{
    Router,
    extract::{Form, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
};
use bugle_command::CommandRegistry;
use bugle_core::Command;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;

/// API state containing the command registry.
#[derive(Clone)]
pub struct AppState {
    registry: Arc<CommandRegistry>,
}

impl AppState {
    /// Creates new route state around a command registry.
    pub fn new(registry: Arc<CommandRegistry>) -> Self {
        Self { registry }
    }
}

/// Creates the command API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/v1", post(handle_command))
        .route("/health", get(health_check))
        .with_state(state)
}

/// Slash-command endpoint.
///
/// Every outcome is a `200` with the result in the body; the chat
/// platform shows the body to the invoking user, so errors land there
/// rather than in a status code.
async fn handle_command(
    State(state): State<AppState>,
    Form(fields): Form<HashMap<String, String>>,
) -> (StatusCode, String) {
    let command = command_from_fields(fields);
    tracing::info!(command = %command.name, "Received command request");

    let body = match state.registry.dispatch(&command).await {
        Ok(reply) if reply.postponed => String::new(),
        Ok(reply) => reply.text,
        Err(e) => {
            tracing::warn!(command = %command.name, error = %e, "Command failed");
            format!("Error: {:?}", e.kind.to_string())
        }
    };

    (StatusCode::OK, body)
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}

/// Build a command from the url-encoded request fields.
///
/// The `command` field arrives with a leading slash, `token` carries the
/// platform verification token, and every remaining field is kept as an
/// argument.
fn command_from_fields(mut fields: HashMap<String, String>) -> Command {
    let name = fields.remove("command").unwrap_or_default();
    let token = fields.remove("token").unwrap_or_default();
    Command {
        name: name.strip_prefix('/').unwrap_or(&name).to_string(),
        token,
        arguments: fields,
    }
}
