//! Room actor message types.

use tokio::sync::{mpsc, oneshot};
use uuid::Uuid;

use super::errors::RoomError;
use crate::engine::{Money, TileId, Username};

/// Messages that can be sent to a `RoomActor`
#[derive(Debug)]
pub enum RoomMessage {
    /// New connection joined the room's broadcast group; triggers `init`.
    Connect {
        conn_id: Uuid,
        frames: mpsc::Sender<String>,
        response: oneshot::Sender<Result<(), RoomError>>,
    },

    /// Connection left the room.
    Disconnect { conn_id: Uuid },

    /// Current player rolls the dice.
    Roll {
        response: oneshot::Sender<Result<(), RoomError>>,
    },

    /// Accept the pending decision.
    ConfirmDecision {
        response: oneshot::Sender<Result<(), RoomError>>,
    },

    /// Reject the pending decision.
    CancelDecision {
        response: oneshot::Sender<Result<(), RoomError>>,
    },

    /// Read-only view of the room.
    GetSnapshot {
        response: oneshot::Sender<RoomSnapshot>,
    },

    /// Shut the room down.
    Close,
}

/// Read-only view of one room's state
#[derive(Clone, Debug, serde::Serialize)]
pub struct RoomSnapshot {
    /// Room ID
    pub room_id: String,

    /// Seated players in turn order
    pub players: Vec<Username>,

    /// Cash per seat
    pub cash: Vec<Money>,

    /// Board position per seat
    pub positions: Vec<TileId>,

    /// Player whose turn it is
    pub current_player: Username,

    /// Whether a decision is awaiting confirmation
    pub awaiting_decision: bool,

    /// Connections currently in the broadcast group
    pub connections: usize,
}
