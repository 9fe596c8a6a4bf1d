//! Room protocol error types.

use thiserror::Error;

use crate::engine::EngineError;

/// Errors from room protocol events.
///
/// Protocol errors reject the triggering event: no broadcast goes out and
/// room state is left unchanged.
#[derive(Debug, Eq, Error, PartialEq)]
pub enum RoomError {
    #[error("room does not exist")]
    RoomNotFound,
    #[error("room already exists")]
    RoomExists,
    #[error("no decision is pending")]
    NoPendingDecision,
    #[error("a decision is already pending")]
    DecisionPending,
    #[error("pending decision cannot be confirmed")]
    InvalidConfirmTarget,
    #[error("room is closed")]
    RoomClosed,
    #[error(transparent)]
    Engine(#[from] EngineError),
}
