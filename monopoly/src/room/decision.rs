//! Single-slot store for the decision awaiting player confirmation.

use super::errors::RoomError;
use crate::engine::MoveOutcome;

/// An option-type move outcome waiting for the player to confirm or cancel.
///
/// The resolution flag is set exactly once; the outcome is only applied to
/// the engine when the flag says accepted.
#[derive(Clone, Debug, PartialEq)]
pub struct PendingDecision {
    outcome: MoveOutcome,
    resolution: Option<bool>,
}

impl PendingDecision {
    fn new(outcome: MoveOutcome) -> Self {
        Self {
            outcome,
            resolution: None,
        }
    }

    pub fn outcome(&self) -> &MoveOutcome {
        &self.outcome
    }

    /// Mark the decision accepted or rejected. Fails if already resolved.
    pub fn resolve(&mut self, accepted: bool) -> Result<(), RoomError> {
        if self.resolution.is_some() {
            return Err(RoomError::NoPendingDecision);
        }
        self.resolution = Some(accepted);
        Ok(())
    }

    pub fn is_accepted(&self) -> bool {
        self.resolution == Some(true)
    }
}

/// Per-room slot holding at most one unresolved decision.
///
/// A room has a pending decision here iff its last roll produced an option
/// outcome that has not been confirmed or cancelled yet. Installing over an
/// unresolved decision is rejected rather than silently discarding it.
#[derive(Debug, Default)]
pub struct DecisionSlot {
    current: Option<PendingDecision>,
}

impl DecisionSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a new pending decision. Fails while one is unresolved.
    pub fn set(&mut self, outcome: MoveOutcome) -> Result<(), RoomError> {
        if self.current.is_some() {
            return Err(RoomError::DecisionPending);
        }
        self.current = Some(PendingDecision::new(outcome));
        Ok(())
    }

    /// Remove and return the pending decision.
    pub fn take(&mut self) -> Result<PendingDecision, RoomError> {
        self.current.take().ok_or(RoomError::NoPendingDecision)
    }

    /// Borrow the pending decision without clearing the slot.
    pub fn pending(&self) -> Option<&PendingDecision> {
        self.current.as_ref()
    }

    pub fn is_pending(&self) -> bool {
        self.current.is_some()
    }
}
