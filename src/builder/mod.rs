//! Builder API for shipment drafts.
//!
//! A [`ShipmentDraft`] carries the operator-supplied attributes of a new
//! shipment. The fluent [`DraftBuilder`] reports missing required fields as
//! [`BuildError`]s; content rules (empty names, weight limits) are checked
//! by the repository at registration.

pub mod draft;
pub mod error;

pub use draft::{DraftBuilder, ShipmentDraft};
pub use error::BuildError;
