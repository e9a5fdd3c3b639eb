//! HTTP handlers for the operations API
//!
//! Provides 3 REST endpoints:
//! - GET    /health                   : liveness probe
//! - GET    /api/v1/operations        : operation catalog
//! - POST   /api/v1/operations/:name  : invoke an operation

use crate::connector::TelegramConnector;
use crate::error::Error;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Shared state for operation handlers
#[derive(Clone)]
pub struct OperationsState {
    pub connector: Arc<TelegramConnector>,
}

/// Create the operations router with all REST endpoints
pub fn operations_router(state: OperationsState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/v1/operations", get(list_operations))
        .route("/api/v1/operations/:name", post(invoke_operation))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// =============================================================================
// Handlers
// =============================================================================

/// GET /health
async fn health() -> impl IntoResponse {
    Json(json!({"status": "ok"}))
}

/// GET /api/v1/operations
async fn list_operations(State(state): State<OperationsState>) -> impl IntoResponse {
    Json(state.connector.manifest())
}

/// POST /api/v1/operations/:name
async fn invoke_operation(
    State(state): State<OperationsState>,
    Path(name): Path<String>,
    Json(params): Json<Value>,
) -> Response {
    match state.connector.invoke(&name, params).await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(e) => error_response(e),
    }
}

// =============================================================================
// Error mapping
// =============================================================================

fn error_response(err: Error) -> Response {
    let (status, body) = match &err {
        Error::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, json!({"error": msg})),
        Error::UnknownOperation(_) => (StatusCode::NOT_FOUND, json!({"error": err.to_string()})),
        Error::Telegram(api) => {
            let status = api
                .status
                .and_then(|s| StatusCode::from_u16(s).ok())
                .filter(|s| s.is_client_error() || s.is_server_error())
                .unwrap_or(StatusCode::BAD_GATEWAY);
            (
                status,
                json!({
                    "error": api.message,
                    "status": api.status,
                    "data": api.data,
                }),
            )
        }
        Error::Transport(e) => (
            StatusCode::BAD_GATEWAY,
            json!({"error": e.to_string(), "status": e.status()}),
        ),
        _ => (
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({"error": err.to_string()}),
        ),
    };
    (status, Json(body)).into_response()
}
