//! Room management API handlers.
//!
//! Room lifecycle is driven over HTTP, separate from the WebSocket event
//! traffic: a room is created with its full seat list, then players connect
//! to `/ws/{room_id}`.
//!
//! Create a room:
//! ```bash
//! curl -X POST http://localhost:8008/api/rooms \
//!   -H "Content-Type: application/json" \
//!   -d '{"room_id": "r1", "players": [{"user_name": "alice"}, {"user_name": "bob"}]}'
//! ```

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use log::warn;
use monopoly::{BoardEngine, GameEngine, Profile, RoomError, RoomSnapshot};
use serde::{Deserialize, Serialize};

use super::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateRoomRequest {
    pub room_id: String,
    pub players: Vec<SeatRequest>,
}

/// One seat in a new room. Display fields are optional; missing ones fall
/// back to the username and an empty avatar.
#[derive(Debug, Deserialize)]
pub struct SeatRequest {
    pub user_name: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RoomCreatedResponse {
    pub room_id: String,
    pub players: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn error_response(status: StatusCode, message: impl Into<String>) -> (StatusCode, Json<ErrorResponse>) {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

/// Create a room and spawn its actor.
///
/// # Response
///
/// Returns `201 Created` with the room id and seat order, `409 Conflict`
/// when the room id is already live, `400 Bad Request` on an unusable seat
/// list.
pub async fn create_room(
    State(state): State<AppState>,
    Json(request): Json<CreateRoomRequest>,
) -> Result<(StatusCode, Json<RoomCreatedResponse>), (StatusCode, Json<ErrorResponse>)> {
    if request.room_id.is_empty() {
        return Err(error_response(StatusCode::BAD_REQUEST, "room id is empty"));
    }
    if request.players.len() < 2 {
        return Err(error_response(StatusCode::BAD_REQUEST, "need 2+ players"));
    }

    let usernames: Vec<String> = request
        .players
        .iter()
        .map(|seat| seat.user_name.clone())
        .collect();
    let mut distinct = usernames.clone();
    distinct.sort();
    distinct.dedup();
    if distinct.len() != usernames.len() {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            "duplicate player names",
        ));
    }

    for seat in &request.players {
        state.directory.insert(Profile {
            full_name: seat
                .full_name
                .clone()
                .unwrap_or_else(|| seat.user_name.clone()),
            user_name: seat.user_name.clone(),
            avatar: seat.avatar.clone().unwrap_or_default(),
        });
    }

    let engine: Box<dyn GameEngine> = match state.config.dice_seed {
        Some(seed) => Box::new(BoardEngine::with_seed(
            usernames.clone(),
            state.config.starting_cash,
            seed,
        )),
        None => Box::new(BoardEngine::new(
            usernames.clone(),
            state.config.starting_cash,
        )),
    };

    match state.registry.create(request.room_id.clone(), engine).await {
        Ok(_) => Ok((
            StatusCode::CREATED,
            Json(RoomCreatedResponse {
                room_id: request.room_id,
                players: usernames,
            }),
        )),
        Err(RoomError::RoomExists) => Err(error_response(
            StatusCode::CONFLICT,
            "room already exists",
        )),
        Err(err) => {
            warn!("failed to create room {}: {}", request.room_id, err);
            Err(error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                err.to_string(),
            ))
        }
    }
}

/// Get a read-only snapshot of a room.
pub async fn room_state(
    State(state): State<AppState>,
    Path(room_id): Path<String>,
) -> Result<Json<RoomSnapshot>, (StatusCode, Json<ErrorResponse>)> {
    let room = state
        .registry
        .get(&room_id)
        .await
        .map_err(|err| error_response(StatusCode::NOT_FOUND, err.to_string()))?;

    let snapshot = room
        .snapshot()
        .await
        .map_err(|err| error_response(StatusCode::INTERNAL_SERVER_ERROR, err.to_string()))?;

    Ok(Json(snapshot))
}

/// Close a room and drop it from the registry.
pub async fn close_room(
    State(state): State<AppState>,
    Path(room_id): Path<String>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    state
        .registry
        .remove(&room_id)
        .await
        .map_err(|err| error_response(StatusCode::NOT_FOUND, err.to_string()))?;

    Ok(StatusCode::NO_CONTENT)
}
