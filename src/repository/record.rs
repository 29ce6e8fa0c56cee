//! A shipment together with its change history.

use crate::core::{
    advance, cancel, Change, FieldValue, HistoryEntry, HistoryError, HistoryLedger, Shipment,
    ShipmentStatus, StatusTransition, TransitionError,
};
use serde::{Deserialize, Serialize};

/// A shipment and the ledger that owns every change made to it.
///
/// All mutations go through the ledger so the two can never drift apart.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShipmentRecord {
    shipment: Shipment,
    ledger: HistoryLedger,
}

impl ShipmentRecord {
    pub(crate) fn new(shipment: Shipment) -> Self {
        let description = format!(
            "Shipment created: {} from {} to {}",
            shipment.kind(),
            shipment.sender(),
            shipment.recipient()
        );
        let ledger = HistoryLedger::new(description, shipment.created_at());
        Self { shipment, ledger }
    }

    pub fn shipment(&self) -> &Shipment {
        &self.shipment
    }

    pub fn ledger(&self) -> &HistoryLedger {
        &self.ledger
    }

    /// Ledger invariants hold and the shipment matches the applied entries.
    ///
    /// Status changes up to the cursor must chain through legal transitions
    /// from `PendingValidation`, and every edited field must hold the value of
    /// its latest applied edit.
    pub fn is_consistent(&self) -> bool {
        if !self.ledger.is_consistent() {
            return false;
        }

        let applied = &self.ledger.entries()[..=self.ledger.cursor()];
        let mut status = ShipmentStatus::PendingValidation;
        let mut latest: Vec<&FieldValue> = Vec::new();

        for entry in applied {
            match &entry.change {
                Change::Created => {}
                Change::Status { from, to } => {
                    if *from != status || !from.can_transition_to(*to) {
                        return false;
                    }
                    status = *to;
                }
                Change::Field { after, .. } => {
                    latest.retain(|value| value.field() != after.field());
                    latest.push(after);
                }
            }
        }

        status == self.shipment.status()
            && latest
                .iter()
                .all(|value| self.shipment.field_value(value.field()) == **value)
    }

    pub(crate) fn advance(&mut self) -> Result<StatusTransition, TransitionError> {
        let step = advance(self.shipment.status())?;
        self.record_status(step);
        Ok(step)
    }

    pub(crate) fn cancel(&mut self) -> Result<StatusTransition, TransitionError> {
        let step = cancel(self.shipment.status())?;
        self.record_status(step);
        Ok(step)
    }

    fn record_status(&mut self, step: StatusTransition) {
        let description = format!("Status changed: {} -> {}", step.from, step.to);
        self.ledger.record(
            &mut self.shipment,
            description,
            Change::Status {
                from: step.from,
                to: step.to,
            },
        );
    }

    /// Record a field edit. The value must already be validated.
    pub(crate) fn edit(&mut self, value: FieldValue) -> usize {
        let value = value.normalized();
        let field = value.field();
        let before = self.shipment.field_value(field);
        let description = format!("Field '{field}' changed: {before} -> {value}");
        self.ledger.record(
            &mut self.shipment,
            description,
            Change::Field {
                before,
                after: value,
            },
        )
    }

    pub(crate) fn undo(&mut self) -> Result<HistoryEntry, HistoryError> {
        self.ledger.undo(&mut self.shipment).cloned()
    }

    pub(crate) fn redo(&mut self) -> Result<HistoryEntry, HistoryError> {
        self.ledger.redo(&mut self.shipment).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{sample_shipment, MutableField, ShipmentKind};

    fn record() -> ShipmentRecord {
        ShipmentRecord::new(sample_shipment(ShipmentKind::Standard, 2.0))
    }

    #[test]
    fn new_record_has_creation_entry() {
        let record = record();
        assert_eq!(record.ledger().len(), 1);
        assert!(record.ledger().entries()[0]
            .description
            .starts_with("Shipment created: Standard"));
        assert!(record.is_consistent());
    }

    #[test]
    fn advance_records_one_entry() {
        let mut record = record();
        let step = record.advance().unwrap();

        assert_eq!(step.to, ShipmentStatus::InPreparation);
        assert_eq!(record.shipment().status(), ShipmentStatus::InPreparation);
        assert_eq!(record.ledger().len(), 2);
        assert_eq!(
            record.ledger().entries()[1].description,
            "Status changed: PendingValidation -> InPreparation"
        );
    }

    #[test]
    fn rejected_transition_leaves_record_untouched() {
        let mut record = record();
        record.cancel().unwrap();
        let before = record.clone();

        assert!(record.advance().is_err());
        assert!(record.cancel().is_err());
        assert_eq!(record, before);
    }

    #[test]
    fn edit_describes_before_and_after() {
        let mut record = record();
        record.edit(FieldValue::Weight(5.0));

        assert_eq!(record.shipment().weight_kg(), 5.0);
        let entry = &record.ledger().entries()[1];
        assert_eq!(entry.change.field(), Some(MutableField::Weight));
        assert_eq!(entry.description, "Field 'weight' changed: 2 kg -> 5 kg");
    }

    #[test]
    fn undo_of_cancel_allows_advancing_again() {
        let mut record = record();
        record.cancel().unwrap();
        record.undo().unwrap();

        assert_eq!(record.shipment().status(), ShipmentStatus::PendingValidation);
        assert!(record.advance().is_ok());
        assert!(record.is_consistent());
    }

    #[test]
    fn tampered_record_is_inconsistent() {
        let mut record = record();
        record.edit(FieldValue::Fragile(true));
        assert!(record.is_consistent());

        record.shipment.set_status(ShipmentStatus::Delivered);
        assert!(!record.is_consistent());

        record.shipment.set_status(ShipmentStatus::PendingValidation);
        record.shipment.assign(&FieldValue::Fragile(false));
        assert!(!record.is_consistent());
    }
}
