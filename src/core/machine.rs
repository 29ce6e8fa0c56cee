//! Pure status transitions.
//!
//! The machine only decides whether a move is legal and what the target
//! is. Applying the move to a shipment is the history ledger's job, so
//! that every status change lands on the same undoable timeline as field
//! edits.

use super::state::ShipmentStatus;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Operator request that moves a shipment through its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LifecycleAction {
    Advance,
    Cancel,
}

impl fmt::Display for LifecycleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Advance => "advance",
            Self::Cancel => "cancel",
        })
    }
}

/// Errors that can occur during status transitions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("cannot {action} a shipment in terminal status '{from}'")]
    Terminal {
        from: ShipmentStatus,
        action: LifecycleAction,
    },

    #[error("transition from '{from}' to '{to}' is not permitted")]
    NotPermitted {
        from: ShipmentStatus,
        to: ShipmentStatus,
    },
}

/// A legal move computed by the machine, not yet applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusTransition {
    pub from: ShipmentStatus,
    pub to: ShipmentStatus,
    pub action: LifecycleAction,
}

/// Compute the forward move from `current`.
pub fn advance(current: ShipmentStatus) -> Result<StatusTransition, TransitionError> {
    let to = current.next().ok_or(TransitionError::Terminal {
        from: current,
        action: LifecycleAction::Advance,
    })?;
    transition(current, to, LifecycleAction::Advance)
}

/// Compute the cancellation move from `current`.
pub fn cancel(current: ShipmentStatus) -> Result<StatusTransition, TransitionError> {
    if current.is_final() {
        return Err(TransitionError::Terminal {
            from: current,
            action: LifecycleAction::Cancel,
        });
    }
    transition(current, ShipmentStatus::Cancelled, LifecycleAction::Cancel)
}

/// Check `from -> to` against the transition table.
pub fn transition(
    from: ShipmentStatus,
    to: ShipmentStatus,
    action: LifecycleAction,
) -> Result<StatusTransition, TransitionError> {
    if !from.can_transition_to(to) {
        return Err(TransitionError::NotPermitted { from, to });
    }
    Ok(StatusTransition { from, to, action })
}
