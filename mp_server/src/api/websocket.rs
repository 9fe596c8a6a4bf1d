//! WebSocket handler for room event traffic.
//!
//! # Connection Flow
//!
//! 1. Client connects via `GET /ws/{room_id}`; the trailing path segment
//!    selects the room.
//! 2. The connection subscribes to the room's broadcast group; the room
//!    answers with an `init` broadcast carrying the roster.
//! 3. A send task forwards room broadcasts and command responses to the
//!    socket; the receive loop parses client events.
//! 4. On disconnect the subscription is dropped.
//!
//! # Client Messages
//!
//! JSON frames tagged by `action`: `roll`, `confirm_decision`,
//! `cancel_decision`. None carry a payload; the acting player is implicit
//! (the room's current player).
//!
//! # Server Messages
//!
//! Room broadcasts (`init`, `roll_res`, `buy_land`, `construct`,
//! `cancel_decision`) go to every connection in the room. Command
//! responses (`{"type": "success" | "error", ...}`) go only to the sender;
//! a rejected event is never broadcast.

use axum::{
    extract::{
        Path, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use futures_util::{SinkExt, StreamExt};
use log::{info, warn};
use monopoly::RoomHandle;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::AppState;

/// Client events received via WebSocket
#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
enum ClientMessage {
    /// Roll the dice for the current player
    Roll,
    /// Accept the pending decision
    ConfirmDecision,
    /// Reject the pending decision
    CancelDecision,
}

/// Response messages sent to the issuing client only
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ServerResponse {
    Success { message: String },
    Error { message: String },
}

/// Upgrade HTTP connection to WebSocket for room event traffic.
///
/// The room must already exist; connections to unknown rooms are rejected
/// with `404 Not Found` before the upgrade.
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    Path(room_id): Path<String>,
    State(state): State<AppState>,
) -> Response {
    match state.registry.get(&room_id).await {
        Ok(room) => ws.on_upgrade(move |socket| handle_socket(socket, room_id, room)),
        Err(_) => (StatusCode::NOT_FOUND, "Room not found").into_response(),
    }
}

/// Handle an established WebSocket connection.
async fn handle_socket(socket: WebSocket, room_id: String, room: RoomHandle) {
    let (mut sender, mut receiver) = socket.split();
    let conn_id = Uuid::new_v4();

    info!("WebSocket connected: room={room_id}, conn={conn_id}");

    // Broadcast frames from the room actor
    let (frames_tx, mut frames_rx) = tokio::sync::mpsc::channel::<String>(32);
    // Command responses for this connection only
    let (response_tx, mut response_rx) = tokio::sync::mpsc::channel::<String>(32);

    if let Err(err) = room.connect(conn_id, frames_tx).await {
        warn!("room {room_id}: connect rejected: {err}");
        let _ = sender.send(Message::Close(None)).await;
        return;
    }

    // Forward room broadcasts and command responses to the socket
    let send_task = tokio::spawn(async move {
        loop {
            tokio::select! {
                Some(frame) = frames_rx.recv() => {
                    if sender.send(Message::Text(frame.into())).await.is_err() {
                        break;
                    }
                }
                Some(response) = response_rx.recv() => {
                    if sender.send(Message::Text(response.into())).await.is_err() {
                        break;
                    }
                }
                else => break,
            }
        }
    });

    // Receive events from the client
    while let Some(msg) = receiver.next().await {
        match msg {
            Ok(Message::Text(text)) => {
                let response = match serde_json::from_str::<ClientMessage>(&text) {
                    Ok(event) => handle_client_message(event, &room).await,
                    Err(err) => {
                        warn!("room {room_id}: unparseable client frame: {err}");
                        ServerResponse::Error {
                            message: "invalid message format".to_string(),
                        }
                    }
                };

                if let Ok(json) = serde_json::to_string(&response)
                    && response_tx.send(json).await.is_err()
                {
                    break;
                }
            }
            Ok(Message::Close(_)) => {
                info!("WebSocket closed: room={room_id}, conn={conn_id}");
                break;
            }
            Err(err) => {
                warn!("WebSocket error: {err}");
                break;
            }
            _ => {}
        }
    }

    // Cleanup - drop the broadcast subscription
    send_task.abort();
    let _ = room.disconnect(conn_id).await;

    info!("WebSocket disconnected: room={room_id}, conn={conn_id}");
}

/// Process one client event and build the response for the sender.
///
/// The event is forwarded to the room actor, which serializes it with all
/// other events for that room. Errors reject the event only; room state and
/// the broadcast stream are untouched.
async fn handle_client_message(event: ClientMessage, room: &RoomHandle) -> ServerResponse {
    let result = match event {
        ClientMessage::Roll => room.roll().await,
        ClientMessage::ConfirmDecision => room.confirm_decision().await,
        ClientMessage::CancelDecision => room.cancel_decision().await,
    };

    match result {
        Ok(()) => ServerResponse::Success {
            message: "event processed".to_string(),
        },
        Err(err) => ServerResponse::Error {
            message: err.to_string(),
        },
    }
}
