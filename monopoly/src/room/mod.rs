//! Room module: the decision coordination protocol.
//!
//! This module implements:
//! - `RoomActor`: async actor serializing one room's protocol events
//! - `SessionRegistry`: owner of all live rooms
//! - `DecisionSlot`: per-room store for the decision awaiting confirmation
//! - Message-based communication with tokio channels
//!
//! ## Architecture
//!
//! Each room runs in a separate tokio task with an mpsc message inbox; the
//! inbox is the room's critical section, so roll/confirm/cancel for one
//! room never interleave while independent rooms stay fully parallel. The
//! `SessionRegistry` spawns and owns `RoomActor` instances and resolves
//! room ids to handles.

pub mod actor;
pub mod decision;
pub mod errors;
pub mod messages;
pub mod registry;

pub use actor::{RoomActor, RoomHandle, RoomId};
pub use decision::{DecisionSlot, PendingDecision};
pub use errors::RoomError;
pub use messages::{RoomMessage, RoomSnapshot};
pub use registry::SessionRegistry;
