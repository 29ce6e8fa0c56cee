//! Waybill: shipment lifecycle, pricing and undoable change history
//!
//! Waybill follows a "pure core, imperative shell" layout. The core is a set
//! of pure functions and plain data: the lifecycle transition table, the
//! change ledger, the tariff and discount tables and the delivery schedule.
//! The [`Repository`] is the shell that owns records, locks them, logs and
//! maps failures to [`ShipmentError`] kinds.
//!
//! # Core Concepts
//!
//! - **Lifecycle**: `PendingValidation → InPreparation → InTransit →
//!   InLocalDistribution → Delivered`, with `Cancelled` reachable from any
//!   non-terminal state
//! - **History**: every field edit and status change is a reversible entry on
//!   one timeline per shipment, navigated with undo and redo
//! - **Pricing**: cost is quoted once at registration; discounts and delivery
//!   estimates are derived on demand from current values
//!
//! # Example
//!
//! ```rust
//! use waybill::builder::ShipmentDraft;
//! use waybill::core::{ShipmentKind, ShipmentStatus};
//! use waybill::{EngineConfig, ErrorKind, Repository};
//!
//! let repository = Repository::with_distance_model(EngineConfig::default(), |_: &str, _: &str| 100.0);
//! let shipment = repository
//!     .create(
//!         ShipmentDraft::builder()
//!             .kind(ShipmentKind::Express)
//!             .sender("Ana Torres")
//!             .recipient("Luis Pardo")
//!             .origin("Av. Central 100")
//!             .destination("Calle 9 #12")
//!             .weight_kg(2.0)
//!             .build()
//!             .unwrap(),
//!     )
//!     .unwrap();
//! let id = shipment.id();
//!
//! repository.modify_field(id, "weight", "5.0").unwrap();
//! repository.undo(id).unwrap();
//! assert_eq!(repository.get(id).unwrap().weight_kg(), 2.0);
//!
//! for _ in 0..4 {
//!     repository.advance(id).unwrap();
//! }
//! assert_eq!(repository.get(id).unwrap().status(), ShipmentStatus::Delivered);
//!
//! let error = repository.cancel(id).unwrap_err();
//! assert_eq!(error.kind(), ErrorKind::InvalidTransition);
//! ```

pub mod builder;
pub mod checkpoint;
pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod report;
pub mod repository;
pub mod validation;

// Re-export commonly used types
pub use config::{load_config_file, EngineConfig};
pub use crate::core::{FieldValue, Shipment, ShipmentId, ShipmentKind, ShipmentStatus};
pub use error::{ErrorKind, ShipmentError};
pub use repository::{Repository, ShipmentRecord};
