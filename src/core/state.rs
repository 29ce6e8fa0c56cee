//! Shipment lifecycle states and the transition table.
//!
//! ```text
//! PendingValidation ──▶ InPreparation ──▶ InTransit ──▶ InLocalDistribution ──▶ Delivered
//!         │                   │               │                  │
//!         └───────────────────┴───────────────┴──────────────────┴──▶ Cancelled
//! ```
//!
//! `Delivered` and `Cancelled` are terminal.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a shipment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ShipmentStatus {
    /// Registered, waiting for validation.
    PendingValidation,
    /// Being packed and routed.
    InPreparation,
    /// On the way to the destination hub.
    InTransit,
    /// At the local hub, out for final delivery.
    InLocalDistribution,
    /// Handed to the recipient (terminal).
    Delivered,
    /// Withdrawn before delivery (terminal).
    Cancelled,
}

/// Legal targets for every state, in preference order.
///
/// The first non-`Cancelled` target is the forward move.
static TRANSITIONS: [(ShipmentStatus, &[ShipmentStatus]); 6] = [
    (
        ShipmentStatus::PendingValidation,
        &[ShipmentStatus::InPreparation, ShipmentStatus::Cancelled],
    ),
    (
        ShipmentStatus::InPreparation,
        &[ShipmentStatus::InTransit, ShipmentStatus::Cancelled],
    ),
    (
        ShipmentStatus::InTransit,
        &[ShipmentStatus::InLocalDistribution, ShipmentStatus::Cancelled],
    ),
    (
        ShipmentStatus::InLocalDistribution,
        &[ShipmentStatus::Delivered, ShipmentStatus::Cancelled],
    ),
    (ShipmentStatus::Delivered, &[]),
    (ShipmentStatus::Cancelled, &[]),
];

impl ShipmentStatus {
    /// Forward delivery order, excluding cancellation.
    pub const FORWARD: [ShipmentStatus; 5] = [
        Self::PendingValidation,
        Self::InPreparation,
        Self::InTransit,
        Self::InLocalDistribution,
        Self::Delivered,
    ];

    /// Every state, forward order first.
    pub const ALL: [ShipmentStatus; 6] = [
        Self::PendingValidation,
        Self::InPreparation,
        Self::InTransit,
        Self::InLocalDistribution,
        Self::Delivered,
        Self::Cancelled,
    ];

    /// Stable machine-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::PendingValidation => "PendingValidation",
            Self::InPreparation => "InPreparation",
            Self::InTransit => "InTransit",
            Self::InLocalDistribution => "InLocalDistribution",
            Self::Delivered => "Delivered",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Human-readable label for reports and history entries.
    pub fn description(&self) -> &'static str {
        match self {
            Self::PendingValidation => "Pending validation",
            Self::InPreparation => "In preparation",
            Self::InTransit => "In transit to destination",
            Self::InLocalDistribution => "In local distribution",
            Self::Delivered => "Delivered",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Check if this is a terminal state.
    pub fn is_final(&self) -> bool {
        self.legal_targets().is_empty()
    }

    /// States reachable from this one in a single transition.
    pub fn legal_targets(&self) -> &'static [ShipmentStatus] {
        TRANSITIONS
            .iter()
            .find(|(from, _)| from == self)
            .map(|(_, targets)| *targets)
            .unwrap_or(&[])
    }

    pub fn can_transition_to(&self, to: ShipmentStatus) -> bool {
        self.legal_targets().contains(&to)
    }

    /// The next state in forward order, if any.
    pub fn next(&self) -> Option<ShipmentStatus> {
        self.legal_targets()
            .iter()
            .copied()
            .find(|target| *target != Self::Cancelled)
    }
}

impl fmt::Display for ShipmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_final_identifies_terminal_states() {
        assert!(!ShipmentStatus::PendingValidation.is_final());
        assert!(!ShipmentStatus::InPreparation.is_final());
        assert!(!ShipmentStatus::InTransit.is_final());
        assert!(!ShipmentStatus::InLocalDistribution.is_final());
        assert!(ShipmentStatus::Delivered.is_final());
        assert!(ShipmentStatus::Cancelled.is_final());
    }

    #[test]
    fn next_follows_forward_order() {
        for pair in ShipmentStatus::FORWARD.windows(2) {
            assert_eq!(pair[0].next(), Some(pair[1]));
        }
        assert_eq!(ShipmentStatus::Delivered.next(), None);
        assert_eq!(ShipmentStatus::Cancelled.next(), None);
    }

    #[test]
    fn every_non_terminal_state_can_cancel() {
        for status in ShipmentStatus::ALL {
            assert_eq!(
                status.can_transition_to(ShipmentStatus::Cancelled),
                !status.is_final(),
                "{status}"
            );
        }
    }

    #[test]
    fn no_backward_transitions_exist() {
        for (index, status) in ShipmentStatus::FORWARD.iter().enumerate() {
            for earlier in &ShipmentStatus::FORWARD[..index] {
                assert!(!status.can_transition_to(*earlier));
            }
        }
    }

    #[test]
    fn table_covers_every_state() {
        for status in ShipmentStatus::ALL {
            assert!(TRANSITIONS.iter().any(|(from, _)| *from == status));
        }
    }

    #[test]
    fn status_serializes_correctly() {
        let json = serde_json::to_string(&ShipmentStatus::InTransit).unwrap();
        let deserialized: ShipmentStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, ShipmentStatus::InTransit);
    }
}
