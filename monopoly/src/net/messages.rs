//! Canonical outgoing wire messages.
//!
//! Exactly one message goes out per state transition, broadcast to every
//! connection in the room. The wire format keeps the original protocol's
//! quirks for client compatibility: the three roll flags are `"true"` /
//! `"false"` strings, `init` uses camelCase keys while everything else is
//! snake_case, and `curr_cash` is only populated when cash actually changed.
//! Internally everything is typed; the stringly booleans exist only at the
//! serde boundary.

use serde::{Serialize, Serializer};

use super::errors::SerializationError;
use crate::engine::{Money, MoveOutcome, OutcomeKind, TileId, Username};
use crate::identity::Profile;

/// A message from the room to every connection in its broadcast group.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum OutgoingMessage {
    /// Roster and current turn, sent when a connection joins the room.
    #[serde(rename_all = "camelCase")]
    Init {
        players: Vec<Profile>,
        change_cash: Money,
        next_player: Username,
    },
    /// Result of a dice roll.
    RollRes {
        curr_player: Username,
        steps: u32,
        result: String,
        #[serde(serialize_with = "bool_as_str")]
        is_option: bool,
        #[serde(serialize_with = "bool_as_str")]
        is_cash_change: bool,
        #[serde(serialize_with = "bool_as_str")]
        new_event: bool,
        new_pos: TileId,
        curr_cash: Vec<Money>,
        next_player: Option<Username>,
    },
    /// A confirmed land purchase.
    BuyLand {
        curr_player: Username,
        curr_cash: Vec<Money>,
        tile_id: TileId,
        next_player: Username,
    },
    /// A confirmed construction.
    Construct {
        curr_cash: Vec<Money>,
        tile_id: TileId,
        build_type: u8,
        next_player: Username,
    },
    /// A cancelled decision; the turn does not advance.
    CancelDecision { next_player: Username },
}

impl OutgoingMessage {
    /// Build a `roll_res` message from a move outcome.
    ///
    /// The three wire flags are derived from the outcome kind here so call
    /// sites cannot drift out of sync with it: option outcomes set
    /// `is_option` and carry no cash or next player, cash outcomes set
    /// `is_cash_change`, and a `Nothing` outcome clears `new_event` so
    /// clients skip the event animation.
    pub fn roll_result(
        curr_player: Username,
        outcome: &MoveOutcome,
        new_pos: TileId,
        curr_cash: Vec<Money>,
        next_player: Option<Username>,
    ) -> Self {
        Self::RollRes {
            curr_player,
            steps: outcome.steps,
            result: outcome.description.clone(),
            is_option: outcome.kind.is_option(),
            is_cash_change: matches!(outcome.kind, OutcomeKind::Payment | OutcomeKind::Reward),
            new_event: !matches!(outcome.kind, OutcomeKind::Nothing),
            new_pos,
            curr_cash,
            next_player,
        }
    }

    /// Encode to the JSON text sent over the broadcast channel.
    pub fn encode(&self) -> Result<String, SerializationError> {
        Ok(serde_json::to_string(self)?)
    }
}

fn bool_as_str<S>(value: &bool, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(if *value { "true" } else { "false" })
}
