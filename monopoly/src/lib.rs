//! # Monopoly
//!
//! Room coordination core for a turn-based multiplayer board game.
//!
//! Players connect to a room over a persistent connection and must all see
//! the same sequence of turn events. The core of this crate is the
//! room-scoped decision protocol: a roll either applies immediately or
//! parks an option (buy land, build) as a pending decision, and exactly one
//! canonical message is broadcast to the room per state transition.
//!
//! ## Architecture
//!
//! Each room is an actor task owning its rules engine handle, its
//! single-slot decision store and its broadcast group; the actor inbox
//! serializes all events for that room. The board rules themselves live
//! behind the [`engine::GameEngine`] trait.
//!
//! ## Core Modules
//!
//! - [`engine`]: rules engine boundary and the default board engine
//! - [`room`]: room actors, session registry, decision store
//! - [`net`]: canonical outgoing wire messages
//! - [`identity`]: player profile lookup for room rosters
//!
//! ## Example
//!
//! ```no_run
//! use monopoly::{BoardEngine, SessionRegistry, StaticDirectory};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let registry = SessionRegistry::new(Arc::new(StaticDirectory::new()));
//!     let engine = BoardEngine::new(vec!["alice".into(), "bob".into()], 1_500);
//!     let room = registry.create("r1".into(), Box::new(engine)).await.unwrap();
//!     room.roll().await.unwrap();
//! }
//! ```

/// Rules engine boundary and the default board engine.
pub mod engine;
pub use engine::{BoardEngine, EngineError, GameEngine, MoveOutcome, OutcomeKind};

/// Player profile lookup for room rosters.
pub mod identity;
pub use identity::{IdentityLookup, Profile, StaticDirectory};

/// Canonical outgoing wire messages.
pub mod net;
pub use net::{OutgoingMessage, SerializationError};

/// Room actors, session registry and decision store.
pub mod room;
pub use room::{RoomError, RoomHandle, RoomSnapshot, SessionRegistry};
