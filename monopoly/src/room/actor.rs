//! Room actor: serializes all decision-protocol events for one room.
//!
//! Every room runs as one task draining an mpsc inbox. That inbox is the
//! room's exclusive critical section: roll, confirm, cancel and connect can
//! never interleave for the same room, while independent rooms progress
//! fully in parallel. The actor owns the engine handle, the decision slot
//! and the broadcast subscriber set; nothing else touches them.

use std::collections::HashMap;
use std::sync::Arc;

use log::{debug, info, warn};
use tokio::sync::{mpsc, oneshot};
use uuid::Uuid;

use super::{
    decision::DecisionSlot,
    errors::RoomError,
    messages::{RoomMessage, RoomSnapshot},
};
use crate::engine::{GameEngine, OutcomeKind, Username};
use crate::identity::{IdentityLookup, Profile};
use crate::net::OutgoingMessage;

/// Room identifier, derived from the connection path.
pub type RoomId = String;

const INBOX_CAPACITY: usize = 64;

/// Room actor handle for sending events
#[derive(Clone, Debug)]
pub struct RoomHandle {
    sender: mpsc::Sender<RoomMessage>,
    room_id: RoomId,
}

impl RoomHandle {
    fn new(sender: mpsc::Sender<RoomMessage>, room_id: RoomId) -> Self {
        Self { sender, room_id }
    }

    /// Room this handle points at.
    pub fn room_id(&self) -> &str {
        &self.room_id
    }

    /// Send a message to the room.
    pub async fn send(&self, message: RoomMessage) -> Result<(), RoomError> {
        self.sender
            .send(message)
            .await
            .map_err(|_| RoomError::RoomClosed)
    }

    /// Join the room's broadcast group; the roster `init` goes out to every
    /// connection once the subscription is in place.
    pub async fn connect(
        &self,
        conn_id: Uuid,
        frames: mpsc::Sender<String>,
    ) -> Result<(), RoomError> {
        let (tx, rx) = oneshot::channel();
        self.send(RoomMessage::Connect {
            conn_id,
            frames,
            response: tx,
        })
        .await?;
        rx.await.map_err(|_| RoomError::RoomClosed)?
    }

    /// Leave the room's broadcast group.
    pub async fn disconnect(&self, conn_id: Uuid) -> Result<(), RoomError> {
        self.send(RoomMessage::Disconnect { conn_id }).await
    }

    /// Roll the dice for the current player.
    pub async fn roll(&self) -> Result<(), RoomError> {
        let (tx, rx) = oneshot::channel();
        self.send(RoomMessage::Roll { response: tx }).await?;
        rx.await.map_err(|_| RoomError::RoomClosed)?
    }

    /// Accept the pending decision.
    pub async fn confirm_decision(&self) -> Result<(), RoomError> {
        let (tx, rx) = oneshot::channel();
        self.send(RoomMessage::ConfirmDecision { response: tx })
            .await?;
        rx.await.map_err(|_| RoomError::RoomClosed)?
    }

    /// Reject the pending decision.
    pub async fn cancel_decision(&self) -> Result<(), RoomError> {
        let (tx, rx) = oneshot::channel();
        self.send(RoomMessage::CancelDecision { response: tx })
            .await?;
        rx.await.map_err(|_| RoomError::RoomClosed)?
    }

    /// Read-only view of the room.
    pub async fn snapshot(&self) -> Result<RoomSnapshot, RoomError> {
        let (tx, rx) = oneshot::channel();
        self.send(RoomMessage::GetSnapshot { response: tx }).await?;
        rx.await.map_err(|_| RoomError::RoomClosed)
    }

    /// Shut the room down.
    pub async fn close(&self) -> Result<(), RoomError> {
        self.send(RoomMessage::Close).await
    }
}

/// Actor owning one room's game session
pub struct RoomActor {
    /// Room ID
    id: RoomId,

    /// Rules engine handle, the authoritative game state
    engine: Box<dyn GameEngine>,

    /// Seated players in turn order
    players: Vec<Username>,

    /// Slot for the decision awaiting confirmation
    decision: DecisionSlot,

    /// Profile lookup for `init` rosters
    identity: Arc<dyn IdentityLookup>,

    /// Message inbox
    inbox: mpsc::Receiver<RoomMessage>,

    /// Broadcast group: frame senders keyed by connection id
    subscribers: HashMap<Uuid, mpsc::Sender<String>>,
}

impl RoomActor {
    /// Create a new room actor and its handle.
    pub fn new(
        id: RoomId,
        engine: Box<dyn GameEngine>,
        identity: Arc<dyn IdentityLookup>,
    ) -> (Self, RoomHandle) {
        let (sender, inbox) = mpsc::channel(INBOX_CAPACITY);
        let players = engine.players();
        let handle = RoomHandle::new(sender, id.clone());
        let actor = Self {
            id,
            engine,
            players,
            decision: DecisionSlot::new(),
            identity,
            inbox,
            subscribers: HashMap::new(),
        };
        (actor, handle)
    }

    /// Run the room event loop until the room is closed or every handle is
    /// dropped.
    pub async fn run(mut self) {
        info!("room {} open with {} seats", self.id, self.players.len());

        while let Some(message) = self.inbox.recv().await {
            match message {
                RoomMessage::Connect {
                    conn_id,
                    frames,
                    response,
                } => {
                    let result = self.handle_connect(conn_id, frames).await;
                    let _ = response.send(result);
                }

                RoomMessage::Disconnect { conn_id } => {
                    self.subscribers.remove(&conn_id);
                    debug!("room {}: connection {} left", self.id, conn_id);
                }

                RoomMessage::Roll { response } => {
                    let _ = response.send(self.handle_roll());
                }

                RoomMessage::ConfirmDecision { response } => {
                    let _ = response.send(self.handle_confirm());
                }

                RoomMessage::CancelDecision { response } => {
                    let _ = response.send(self.handle_cancel());
                }

                RoomMessage::GetSnapshot { response } => {
                    let _ = response.send(self.snapshot());
                }

                RoomMessage::Close => break,
            }
        }

        info!("room {} closed", self.id);
    }

    /// Subscribe a connection and broadcast the roster.
    ///
    /// Profile lookups are cosmetic: a failed one degrades to an empty
    /// avatar instead of blocking the `init` broadcast.
    async fn handle_connect(
        &mut self,
        conn_id: Uuid,
        frames: mpsc::Sender<String>,
    ) -> Result<(), RoomError> {
        let mut roster = Vec::with_capacity(self.players.len());
        for username in &self.players {
            let profile = match self.identity.profile(username).await {
                Ok(profile) => profile,
                Err(err) => {
                    warn!(
                        "room {}: profile lookup for {} failed: {}",
                        self.id, username, err
                    );
                    Profile::degraded(username)
                }
            };
            roster.push(profile);
        }

        let next_player = self.engine.current_player();
        let change_cash = self.engine.cash(&next_player)?;
        self.subscribers.insert(conn_id, frames);
        debug!("room {}: connection {} joined", self.id, conn_id);

        self.broadcast(&OutgoingMessage::Init {
            players: roster,
            change_cash,
            next_player,
        });
        Ok(())
    }

    /// Roll for the current player and branch on the outcome kind.
    fn handle_roll(&mut self) -> Result<(), RoomError> {
        if self.decision.is_pending() {
            return Err(RoomError::DecisionPending);
        }

        let curr_player = self.engine.current_player();
        let outcome = self.engine.roll();
        let new_pos = self.engine.position(&curr_player)?;
        debug!("room {}: {} rolled: {}", self.id, curr_player, outcome);

        let message = match outcome.kind {
            OutcomeKind::ConstructionOption { .. } | OutcomeKind::BuyLandOption { .. } => {
                // park the outcome; it only takes effect on confirm
                let message = OutgoingMessage::roll_result(
                    curr_player,
                    &outcome,
                    new_pos,
                    Vec::new(),
                    None,
                );
                self.decision.set(outcome)?;
                message
            }
            OutcomeKind::Payment | OutcomeKind::Reward => {
                self.engine.apply(&outcome)?;
                OutgoingMessage::roll_result(
                    curr_player,
                    &outcome,
                    new_pos,
                    self.engine.cash_sheet(),
                    Some(self.engine.current_player()),
                )
            }
            OutcomeKind::Nothing | OutcomeKind::Other => {
                self.engine.apply(&outcome)?;
                OutgoingMessage::roll_result(
                    curr_player,
                    &outcome,
                    new_pos,
                    Vec::new(),
                    Some(self.engine.current_player()),
                )
            }
        };

        self.broadcast(&message);
        Ok(())
    }

    /// Accept the pending decision and commit it to the engine.
    fn handle_confirm(&mut self) -> Result<(), RoomError> {
        let tile = match self.decision.pending() {
            None => return Err(RoomError::NoPendingDecision),
            Some(decision) => match decision.outcome().kind.tile() {
                Some(tile) => tile,
                None => return Err(RoomError::InvalidConfirmTarget),
            },
        };

        let curr_player = self.engine.current_player();
        let mut decision = self.decision.take()?;
        decision.resolve(true)?;
        self.engine.apply(decision.outcome())?;
        debug!(
            "room {}: {} confirmed: {}",
            self.id,
            curr_player,
            decision.outcome()
        );

        let curr_cash = self.engine.cash_sheet();
        let next_player = self.engine.current_player();
        let message = match decision.outcome().kind {
            OutcomeKind::BuyLandOption { .. } => OutgoingMessage::BuyLand {
                curr_player,
                curr_cash,
                tile_id: tile,
                next_player,
            },
            OutcomeKind::ConstructionOption { .. } => OutgoingMessage::Construct {
                curr_cash,
                tile_id: tile,
                build_type: self.engine.build_level(tile)?,
                next_player,
            },
            // unreachable: only option outcomes are ever installed
            _ => return Err(RoomError::InvalidConfirmTarget),
        };

        self.broadcast(&message);
        Ok(())
    }

    /// Reject the pending decision; the engine is left untouched and the
    /// turn does not advance.
    fn handle_cancel(&mut self) -> Result<(), RoomError> {
        let mut decision = self.decision.take()?;
        decision.resolve(false)?;
        debug!("room {}: cancelled: {}", self.id, decision.outcome());

        self.broadcast(&OutgoingMessage::CancelDecision {
            next_player: self.engine.current_player(),
        });
        Ok(())
    }

    fn snapshot(&self) -> RoomSnapshot {
        RoomSnapshot {
            room_id: self.id.clone(),
            players: self.players.clone(),
            cash: self.engine.cash_sheet(),
            positions: self
                .players
                .iter()
                .map(|player| self.engine.position(player).unwrap_or_default())
                .collect(),
            current_player: self.engine.current_player(),
            awaiting_decision: self.decision.is_pending(),
            connections: self.subscribers.len(),
        }
    }

    /// Fan one encoded frame out to every connection in the room.
    ///
    /// Fire-and-forget: the transition that produced the message is already
    /// committed, so delivery failures only prune or lag the subscriber.
    fn broadcast(&mut self, message: &OutgoingMessage) {
        let frame = match message.encode() {
            Ok(frame) => frame,
            Err(err) => {
                warn!("room {}: dropping undeliverable broadcast: {}", self.id, err);
                return;
            }
        };

        let room_id = &self.id;
        self.subscribers
            .retain(|conn_id, sender| match sender.try_send(frame.clone()) {
                Ok(()) => true,
                Err(mpsc::error::TrySendError::Full(_)) => {
                    warn!("room {room_id}: connection {conn_id} lagging, dropping frame");
                    true
                }
                Err(mpsc::error::TrySendError::Closed(_)) => {
                    debug!("room {room_id}: connection {conn_id} gone, pruning");
                    false
                }
            });
    }
}
