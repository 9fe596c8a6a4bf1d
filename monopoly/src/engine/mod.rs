//! Rules engine boundary: move outcomes and the engine contract.
//!
//! The engine owns authoritative game state for one room. The room
//! coordination core never reaches past this interface: it rolls, inspects
//! the resulting [`MoveOutcome`], and either applies it immediately or parks
//! it as a pending decision until the player confirms or cancels.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub mod board;

pub use board::BoardEngine;

/// Player identifier as it appears on the wire.
pub type Username = String;

/// Cash amount in game currency units.
pub type Money = i64;

/// Board tile index.
pub type TileId = u32;

/// Errors from rules engine operations
#[derive(Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum EngineError {
    #[error("player does not exist")]
    UnknownPlayer,
    #[error("tile {0} is not on the board")]
    InvalidTile(TileId),
    #[error("not enough cash")]
    InsufficientFunds,
}

/// Classification of what a dice roll produced.
///
/// Option kinds carry the tile they refer to; terminal kinds carry nothing
/// extra, the engine re-derives their effect from the roller's position.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum OutcomeKind {
    /// The roller may build on a street they already own.
    ConstructionOption { tile: TileId },
    /// The roller may purchase an unowned street.
    BuyLandOption { tile: TileId },
    /// The roller owes money (rent, tax).
    Payment,
    /// The roller receives money.
    Reward,
    /// The landing tile has no effect.
    Nothing,
    /// Any other non-option, non-terminal result.
    Other,
}

impl OutcomeKind {
    /// Whether this outcome requires player confirmation before it applies.
    pub fn is_option(&self) -> bool {
        matches!(
            self,
            Self::ConstructionOption { .. } | Self::BuyLandOption { .. }
        )
    }

    /// Tile referenced by an option outcome.
    pub fn tile(&self) -> Option<TileId> {
        match self {
            Self::ConstructionOption { tile } | Self::BuyLandOption { tile } => Some(*tile),
            _ => None,
        }
    }
}

/// Result of a single dice roll, before any decision is applied.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct MoveOutcome {
    /// Steps the roller moved.
    pub steps: u32,
    /// Human-readable description, forwarded verbatim to clients.
    pub description: String,
    /// What the landing tile produced.
    pub kind: OutcomeKind,
}

impl fmt::Display for MoveOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description)
    }
}

/// Contract between the room coordination core and a rules engine.
///
/// `roll` moves the current player and classifies the landing tile without
/// committing side effects; `apply` commits an outcome's effect and ends the
/// turn. Callers re-query [`GameEngine::current_player`] after every
/// mutation instead of caching it.
pub trait GameEngine: Send {
    /// Roll the dice for the current player and classify the landing tile.
    fn roll(&mut self) -> MoveOutcome;

    /// Commit an outcome's effect and advance to the next turn.
    fn apply(&mut self, outcome: &MoveOutcome) -> Result<(), EngineError>;

    /// Player whose turn it is.
    fn current_player(&self) -> Username;

    /// All seated players in turn order.
    fn players(&self) -> Vec<Username>;

    /// Cash of every seated player, in seat order.
    fn cash_sheet(&self) -> Vec<Money>;

    /// Cash of one player.
    fn cash(&self, player: &str) -> Result<Money, EngineError>;

    /// Board position of one player.
    fn position(&self, player: &str) -> Result<TileId, EngineError>;

    /// Building level of a street tile.
    fn build_level(&self, tile: TileId) -> Result<u8, EngineError>;
}
