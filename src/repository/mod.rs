//! In-memory shipment repository.
//!
//! The repository is the imperative shell around the pure core: it owns the
//! records, serializes access to each one, derives distance and cost at
//! registration, and turns every failure into a [`ShipmentError`].
//!
//! Records live behind `Arc<Mutex<_>>` in a map guarded by an `RwLock`.
//! Operations on one shipment run one at a time while different shipments
//! proceed in parallel; the map lock is only held long enough to look a
//! record up.
//!
//! # Example
//!
//! ```rust
//! use waybill::builder::ShipmentDraft;
//! use waybill::core::{ShipmentKind, ShipmentStatus};
//! use waybill::{EngineConfig, Repository};
//!
//! let repository = Repository::with_distance_model(EngineConfig::default(), |_: &str, _: &str| 100.0);
//! let draft = ShipmentDraft::builder()
//!     .kind(ShipmentKind::Express)
//!     .sender("Ana")
//!     .recipient("Luis")
//!     .origin("Depot")
//!     .destination("Plaza Mayor 3")
//!     .weight_kg(2.0)
//!     .build()
//!     .unwrap();
//!
//! let shipment = repository.create(draft).unwrap();
//! repository.advance(shipment.id()).unwrap();
//! repository.undo(shipment.id()).unwrap();
//!
//! let current = repository.get(shipment.id()).unwrap();
//! assert_eq!(current.status(), ShipmentStatus::PendingValidation);
//! ```

mod record;

pub use record::ShipmentRecord;

use crate::builder::ShipmentDraft;
use crate::checkpoint::Checkpoint;
use crate::config::EngineConfig;
use crate::core::{
    AddressLengthModel, DeliveryEstimate, DiscountBreakdown, DistanceModel, FieldValue,
    HistoryView, MutableField, Shipment, ShipmentId,
};
use crate::error::{Result, ShipmentError};
use crate::report::{render_shipment, FleetSummary};
use crate::validation::into_result;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use tracing::{debug, info, warn};

#[derive(Default)]
struct Store {
    records: HashMap<ShipmentId, Arc<Mutex<ShipmentRecord>>>,
    /// Ids in registration order
    order: Vec<ShipmentId>,
}

/// Thread-safe registry of shipments and their histories.
pub struct Repository {
    config: EngineConfig,
    distance: Box<dyn DistanceModel>,
    store: RwLock<Store>,
}

impl Default for Repository {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Repository {
    /// Repository deriving distance from the destination address.
    pub fn new(config: EngineConfig) -> Self {
        Self::with_distance_model(config, AddressLengthModel::default())
    }

    pub fn with_distance_model(config: EngineConfig, model: impl DistanceModel + 'static) -> Self {
        Self {
            config,
            distance: Box::new(model),
            store: RwLock::new(Store::default()),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Validate a draft and register it.
    ///
    /// Distance is derived first because the service-range rule needs it.
    /// Negative distances count as zero; non-finite ones are rejected.
    /// Every violation is reported at once.
    pub fn create(&self, draft: ShipmentDraft) -> Result<Shipment> {
        let distance_km = self.distance.distance_km(&draft.origin, &draft.destination);
        let distance_km = if distance_km.is_finite() {
            distance_km.max(0.0)
        } else {
            distance_km
        };

        if let Err(violations) = into_result(self.config.limits.check_draft(&draft, distance_km)) {
            warn!(
                kind = %draft.kind,
                violations = violations.len(),
                reason = %violations,
                "shipment rejected"
            );
            return Err(violations.into());
        }

        let quote = self.config.pricing.quote(
            draft.kind,
            draft.weight_kg,
            distance_km,
            draft.fragile,
            draft.declared_value,
        );
        let shipment = Shipment::register(
            ShipmentId::new(),
            draft,
            distance_km,
            quote.total,
            Utc::now(),
        );
        let id = shipment.id();

        let mut store = self.store.write().unwrap_or_else(PoisonError::into_inner);
        store
            .records
            .insert(id, Arc::new(Mutex::new(ShipmentRecord::new(shipment.clone()))));
        store.order.push(id);
        drop(store);

        info!(
            shipment_id = %id,
            kind = %shipment.kind(),
            distance_km,
            cost = quote.total,
            "shipment created"
        );
        Ok(shipment)
    }

    fn lookup(&self, id: ShipmentId) -> Result<Arc<Mutex<ShipmentRecord>>> {
        let store = self.store.read().unwrap_or_else(PoisonError::into_inner);
        store.records.get(&id).cloned().ok_or_else(|| {
            debug!(shipment_id = %id, "shipment not found");
            ShipmentError::NotFound(id)
        })
    }

    /// Run `f` on the locked record, logging rejections.
    fn with_record<T>(
        &self,
        id: ShipmentId,
        operation: &'static str,
        f: impl FnOnce(&mut ShipmentRecord) -> Result<T>,
    ) -> Result<T> {
        let cell = self.lookup(id)?;
        let mut record = cell.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut *record).map_err(|error| {
            warn!(shipment_id = %id, operation, code = error.kind().code(), %error, "request rejected");
            error
        })
    }

    pub fn get(&self, id: ShipmentId) -> Result<Shipment> {
        debug!(shipment_id = %id, "get");
        self.with_record(id, "get", |record| Ok(record.shipment().clone()))
    }

    /// All shipments in registration order.
    pub fn list(&self) -> Vec<Shipment> {
        let cells: Vec<_> = {
            let store = self.store.read().unwrap_or_else(PoisonError::into_inner);
            store
                .order
                .iter()
                .filter_map(|id| store.records.get(id).cloned())
                .collect()
        };
        cells
            .iter()
            .map(|cell| {
                cell.lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .shipment()
                    .clone()
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.store
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .order
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Move one step forward in the delivery lifecycle.
    pub fn advance(&self, id: ShipmentId) -> Result<Shipment> {
        self.with_record(id, "advance", |record| {
            let step = record.advance()?;
            info!(shipment_id = %id, from = %step.from, to = %step.to, "shipment advanced");
            Ok(record.shipment().clone())
        })
    }

    pub fn cancel(&self, id: ShipmentId) -> Result<Shipment> {
        self.with_record(id, "cancel", |record| {
            let step = record.cancel()?;
            info!(shipment_id = %id, from = %step.from, "shipment cancelled");
            Ok(record.shipment().clone())
        })
    }

    /// Edit a field by name with a textual value.
    ///
    /// Unknown and immutable field names are `InvalidField`; values that do
    /// not parse or break a limit are `ValidationError`.
    pub fn modify_field(&self, id: ShipmentId, field: &str, value: &str) -> Result<Shipment> {
        // existence first, so a bad request for a missing id is NotFound
        self.lookup(id)?;
        let parsed = field
            .parse::<MutableField>()
            .map_err(ShipmentError::from)
            .and_then(|field| FieldValue::parse(field, value).map_err(ShipmentError::from));

        match parsed {
            Ok(value) => self.modify(id, value),
            Err(error) => {
                warn!(shipment_id = %id, field, code = error.kind().code(), %error, "request rejected");
                Err(error)
            }
        }
    }

    /// Edit a field with an already-typed value.
    pub fn modify(&self, id: ShipmentId, value: FieldValue) -> Result<Shipment> {
        self.with_record(id, "modify", |record| {
            into_result(self.config.limits.check_field(&value))?;
            let field = value.field();
            let sequence = record.edit(value);
            info!(shipment_id = %id, %field, sequence, "shipment modified");
            Ok(record.shipment().clone())
        })
    }

    /// Revert the most recent applied change.
    pub fn undo(&self, id: ShipmentId) -> Result<Shipment> {
        self.with_record(id, "undo", |record| {
            let entry = record.undo()?;
            info!(shipment_id = %id, sequence = entry.sequence, change = %entry.description, "change undone");
            Ok(record.shipment().clone())
        })
    }

    /// Reapply the most recently undone change.
    pub fn redo(&self, id: ShipmentId) -> Result<Shipment> {
        self.with_record(id, "redo", |record| {
            let entry = record.redo()?;
            info!(shipment_id = %id, sequence = entry.sequence, change = %entry.description, "change redone");
            Ok(record.shipment().clone())
        })
    }

    pub fn history(&self, id: ShipmentId) -> Result<HistoryView> {
        debug!(shipment_id = %id, "history");
        self.with_record(id, "history", |record| Ok(record.ledger().view()))
    }

    pub fn estimate(&self, id: ShipmentId) -> Result<DeliveryEstimate> {
        debug!(shipment_id = %id, "estimate");
        self.with_record(id, "estimate", |record| {
            Ok(self.config.delivery.estimate(record.shipment()))
        })
    }

    pub fn discount(&self, id: ShipmentId) -> Result<DiscountBreakdown> {
        debug!(shipment_id = %id, "discount");
        self.with_record(id, "discount", |record| {
            Ok(self.config.discounts.compute_discount(record.shipment()))
        })
    }

    /// Whether the shipment's current attributes call for insurance.
    pub fn requires_insurance(&self, id: ShipmentId) -> Result<bool> {
        self.with_record(id, "requires_insurance", |record| {
            Ok(self
                .config
                .pricing
                .shipment_requires_insurance(record.shipment()))
        })
    }

    /// Text report of the shipment's current values.
    pub fn report(&self, id: ShipmentId) -> Result<String> {
        debug!(shipment_id = %id, "report");
        self.with_record(id, "report", |record| {
            let shipment = record.shipment();
            Ok(render_shipment(
                shipment,
                self.config.pricing.shipment_requires_insurance(shipment),
                &self.config.discounts.compute_discount(shipment),
                &self.config.delivery.estimate(shipment),
            ))
        })
    }

    /// Aggregate counts and revenue over every shipment.
    pub fn summary(&self) -> FleetSummary {
        let mut summary = FleetSummary::default();
        for shipment in self.list() {
            summary.add(&shipment, &self.config.discounts.compute_discount(&shipment));
        }
        summary
    }

    /// Remove a shipment and its history. Returns the removed shipment.
    pub fn purge(&self, id: ShipmentId) -> Result<Shipment> {
        let mut store = self.store.write().unwrap_or_else(PoisonError::into_inner);
        let cell = store.records.remove(&id).ok_or_else(|| {
            warn!(shipment_id = %id, operation = "purge", code = "not_found", "request rejected");
            ShipmentError::NotFound(id)
        })?;
        store.order.retain(|other| *other != id);
        drop(store);

        let shipment = cell
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .shipment()
            .clone();
        info!(shipment_id = %id, "shipment purged");
        Ok(shipment)
    }

    /// Snapshot a shipment and its full ledger.
    pub fn checkpoint(&self, id: ShipmentId) -> Result<Checkpoint> {
        self.with_record(id, "checkpoint", |record| {
            let checkpoint = Checkpoint::capture(record);
            debug!(shipment_id = %id, checkpoint_id = %checkpoint.id, "checkpoint captured");
            Ok(checkpoint)
        })
    }

    /// Load a checkpoint, replacing any record with the same id.
    pub fn restore(&self, checkpoint: Checkpoint) -> Result<ShipmentId> {
        checkpoint.validate().map_err(|error| {
            warn!(checkpoint_id = %checkpoint.id, %error, "checkpoint rejected");
            ShipmentError::from(error)
        })?;

        let record = checkpoint.record;
        let id = record.shipment().id();
        let mut store = self.store.write().unwrap_or_else(PoisonError::into_inner);
        let replaced = store
            .records
            .insert(id, Arc::new(Mutex::new(record)))
            .is_some();
        if !replaced {
            store.order.push(id);
        }
        drop(store);

        info!(shipment_id = %id, checkpoint_id = %checkpoint.id, replaced, "checkpoint restored");
        Ok(id)
    }
}
