//! Accumulating validation for new shipments and field edits.
//!
//! Rules return Stillwater's `Validation` so that every problem with a
//! request is reported in one pass instead of one at a time:
//!
//! ```rust
//! use waybill::builder::ShipmentDraft;
//! use waybill::core::ShipmentKind;
//! use waybill::validation::{into_result, ValidationLimits};
//!
//! let draft = ShipmentDraft::builder()
//!     .kind(ShipmentKind::Express)
//!     .sender("")
//!     .recipient("Luis")
//!     .origin("Depot")
//!     .destination("Plaza")
//!     .weight_kg(0.0)
//!     .build()
//!     .unwrap();
//!
//! let violations = into_result(ValidationLimits::default().check_draft(&draft, 40.0)).unwrap_err();
//! assert_eq!(violations.len(), 2);
//! ```

pub mod rules;
pub mod violations;

pub use rules::{into_result, Checked, ValidationLimits};
pub use violations::{Violation, Violations};
