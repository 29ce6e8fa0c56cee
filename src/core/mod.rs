//! Core shipment types and engines.
//!
//! This module contains the pure core of the system:
//! - Shipment records and their mutable fields
//! - The lifecycle transition table and state machine
//! - The undoable change-history ledger
//! - Pricing, discount and delivery-time computations
//!
//! Nothing here performs I/O or locking; the repository layers that on top.

mod distance;
mod estimate;
mod field;
mod history;
mod machine;
mod pricing;
mod shipment;
mod state;

pub use distance::{AddressLengthModel, DistanceModel};
pub use estimate::{DeliveryEstimate, DeliverySchedule};
pub use field::{FieldError, FieldValue, MutableField};
pub use history::{Change, HistoryEntry, HistoryError, HistoryLedger, HistoryView};
pub use machine::{advance, cancel, transition, LifecycleAction, StatusTransition, TransitionError};
pub use pricing::{AppliedDiscount, Bracket, DiscountBreakdown, DiscountTable, Quote, Tariff};
pub use shipment::{ParseKindError, PerKind, Shipment, ShipmentId, ShipmentKind};
pub use state::ShipmentStatus;

#[cfg(test)]
pub(crate) use shipment::tests::sample as sample_shipment;
