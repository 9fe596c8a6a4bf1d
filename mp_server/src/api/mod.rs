//! HTTP/WebSocket API for the board game server.
//!
//! # Architecture
//!
//! - **Axum**: async web framework for HTTP/WebSocket
//! - **Actor model**: room state managed by dedicated room actor tasks in
//!   the `monopoly` crate; handlers only resolve handles and send events
//!
//! # Modules
//!
//! - [`rooms`]: room lifecycle management (create, inspect, close)
//! - [`websocket`]: real-time event traffic and room broadcasts
//!
//! # Endpoints Overview
//!
//! - `GET  /health` - Server health status
//! - `POST /api/rooms` - Create a room from a seat list
//! - `GET  /api/rooms/{room_id}` - Room snapshot
//! - `DELETE /api/rooms/{room_id}` - Close a room
//! - `GET  /ws/{room_id}` - Establish WebSocket connection; the trailing
//!   path segment is the room id

pub mod rooms;
pub mod websocket;

use std::sync::Arc;

use axum::{
    Router,
    response::Json,
    routing::{get, post},
};
use monopoly::{SessionRegistry, StaticDirectory};
use serde_json::json;
use tower_http::cors::CorsLayer;

use crate::config::ServerConfig;

/// Application state shared across all HTTP handlers and WebSocket
/// connections. Cloned per request; cheap due to the Arc wrappers.
#[derive(Clone)]
pub struct AppState {
    /// Owner of all live room actors
    pub registry: Arc<SessionRegistry>,
    /// Profile directory backing `init` rosters
    pub directory: Arc<StaticDirectory>,
    /// Server configuration (starting cash, dice seed)
    pub config: ServerConfig,
}

/// Create the complete API router with all endpoints and middleware.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/rooms", post(rooms::create_room))
        .route(
            "/api/rooms/{room_id}",
            get(rooms::room_state).delete(rooms::close_room),
        )
        .route("/ws/{room_id}", get(websocket::websocket_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}
