//! Session registry mapping room ids to live room actors.

use std::collections::HashMap;
use std::sync::Arc;

use log::info;
use tokio::sync::RwLock;

use super::{
    actor::{RoomActor, RoomHandle, RoomId},
    errors::RoomError,
};
use crate::engine::GameEngine;
use crate::identity::IdentityLookup;

/// Owns every live game session, keyed by room id.
///
/// Session creation and removal are lifecycle events driven from outside
/// the decision protocol; event dispatch itself only ever calls
/// [`SessionRegistry::get`], and unknown rooms are a hard error rather
/// than an implicit create.
pub struct SessionRegistry {
    identity: Arc<dyn IdentityLookup>,
    rooms: RwLock<HashMap<RoomId, RoomHandle>>,
}

impl SessionRegistry {
    pub fn new(identity: Arc<dyn IdentityLookup>) -> Self {
        Self {
            identity,
            rooms: RwLock::new(HashMap::new()),
        }
    }

    /// Spawn a room actor around an engine handle. Fails if the id is taken.
    pub async fn create(
        &self,
        room_id: RoomId,
        engine: Box<dyn GameEngine>,
    ) -> Result<RoomHandle, RoomError> {
        let mut rooms = self.rooms.write().await;
        if rooms.contains_key(&room_id) {
            return Err(RoomError::RoomExists);
        }

        let (actor, handle) = RoomActor::new(room_id.clone(), engine, self.identity.clone());
        rooms.insert(room_id.clone(), handle.clone());
        tokio::spawn(actor.run());

        info!("created room {room_id}");
        Ok(handle)
    }

    /// Look up a live session.
    pub async fn get(&self, room_id: &str) -> Result<RoomHandle, RoomError> {
        let rooms = self.rooms.read().await;
        rooms.get(room_id).cloned().ok_or(RoomError::RoomNotFound)
    }

    /// Close a room and drop it from the registry.
    pub async fn remove(&self, room_id: &str) -> Result<(), RoomError> {
        let handle = {
            let mut rooms = self.rooms.write().await;
            rooms.remove(room_id).ok_or(RoomError::RoomNotFound)?
        };
        let _ = handle.close().await;

        info!("closed room {room_id}");
        Ok(())
    }

    /// Number of live rooms.
    pub async fn room_count(&self) -> usize {
        let rooms = self.rooms.read().await;
        rooms.len()
    }
}
