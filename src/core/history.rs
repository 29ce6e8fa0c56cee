//! Per-shipment change history with undo and redo.
//!
//! The ledger is a linear sequence of reversible change records plus a
//! cursor. Entry 0 is always the creation entry. Recording while the cursor
//! is behind the tail discards the undone suffix, so the timeline never
//! branches.

use super::field::{FieldValue, MutableField};
use super::shipment::Shipment;
use super::state::ShipmentStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors for cursor moves past either end of the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HistoryError {
    #[error("nothing to undo")]
    NothingToUndo,

    #[error("nothing to redo")]
    NothingToRedo,
}

/// A reversible change to a shipment.
///
/// Each variant carries both the prior and the new value so it can be
/// reverted and reapplied any number of times.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Change {
    /// The registration of the shipment. Never reverted.
    Created,
    /// An edit of one mutable field.
    Field { before: FieldValue, after: FieldValue },
    /// A lifecycle transition.
    Status {
        from: ShipmentStatus,
        to: ShipmentStatus,
    },
}

impl Change {
    /// The edited field, for field changes.
    pub fn field(&self) -> Option<MutableField> {
        match self {
            Self::Field { after, .. } => Some(after.field()),
            _ => None,
        }
    }

    pub(crate) fn apply(&self, shipment: &mut Shipment) {
        match self {
            Self::Created => {}
            Self::Field { after, .. } => shipment.assign(after),
            Self::Status { to, .. } => shipment.set_status(*to),
        }
    }

    pub(crate) fn revert(&self, shipment: &mut Shipment) {
        match self {
            Self::Created => {}
            Self::Field { before, .. } => shipment.assign(before),
            Self::Status { from, .. } => shipment.set_status(*from),
        }
    }
}

/// One recorded change.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Position in the ledger
    pub sequence: usize,
    /// When the change was recorded
    pub timestamp: DateTime<Utc>,
    /// Human-readable summary of the change
    pub description: String,
    /// What changed, with enough data to reverse it
    pub change: Change,
}

/// Ordered change history of one shipment with an undo/redo cursor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryLedger {
    entries: Vec<HistoryEntry>,
    cursor: usize,
}

impl HistoryLedger {
    /// Create a ledger holding only the creation entry.
    pub fn new(description: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            entries: vec![HistoryEntry {
                sequence: 0,
                timestamp,
                description: description.into(),
                change: Change::Created,
            }],
            cursor: 0,
        }
    }

    /// Record `change`, applying it to `shipment`.
    ///
    /// Any entries after the cursor are discarded first. Returns the
    /// sequence number of the new entry, which is also the new cursor.
    pub fn record(
        &mut self,
        shipment: &mut Shipment,
        description: impl Into<String>,
        change: Change,
    ) -> usize {
        self.entries.truncate(self.cursor + 1);
        change.apply(shipment);

        let sequence = self.entries.len();
        self.entries.push(HistoryEntry {
            sequence,
            timestamp: Utc::now(),
            description: description.into(),
            change,
        });
        self.cursor = sequence;
        sequence
    }

    /// Revert the entry under the cursor and step back.
    ///
    /// Fails at the creation entry, leaving everything unchanged. Returns
    /// the entry that was reverted.
    pub fn undo(&mut self, shipment: &mut Shipment) -> Result<&HistoryEntry, HistoryError> {
        let index = self.cursor;
        if index == 0 {
            return Err(HistoryError::NothingToUndo);
        }
        let entry = self
            .entries
            .get(index)
            .ok_or(HistoryError::NothingToUndo)?;
        entry.change.revert(shipment);
        self.cursor = index - 1;
        Ok(entry)
    }

    /// Step forward and reapply the entry now under the cursor.
    ///
    /// Fails at the tail, leaving everything unchanged. Returns the entry
    /// that was reapplied.
    pub fn redo(&mut self, shipment: &mut Shipment) -> Result<&HistoryEntry, HistoryError> {
        let index = self.cursor + 1;
        let entry = self
            .entries
            .get(index)
            .ok_or(HistoryError::NothingToRedo)?;
        entry.change.apply(shipment);
        self.cursor = index;
        Ok(entry)
    }

    /// All entries, including undone ones still eligible for redo.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Index of the active entry.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`: the creation entry is never removed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Number of undone entries that the next `record` would discard.
    pub fn future_len(&self) -> usize {
        self.entries.len().saturating_sub(self.cursor + 1)
    }

    /// Verify the structural invariants.
    ///
    /// Ledgers built through this API always hold; deserialized ones might
    /// not.
    pub fn is_consistent(&self) -> bool {
        let starts_with_creation = matches!(
            self.entries.first(),
            Some(HistoryEntry {
                change: Change::Created,
                ..
            })
        );
        let single_creation = self
            .entries
            .iter()
            .skip(1)
            .all(|entry| entry.change != Change::Created);
        let sequenced = self
            .entries
            .iter()
            .enumerate()
            .all(|(index, entry)| entry.sequence == index);

        starts_with_creation && single_creation && sequenced && self.cursor < self.entries.len()
    }

    /// Owned read-only snapshot for display.
    pub fn view(&self) -> HistoryView {
        HistoryView {
            entries: self.entries.clone(),
            cursor: self.cursor,
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
        }
    }
}

/// Snapshot of a ledger returned to callers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryView {
    pub entries: Vec<HistoryEntry>,
    pub cursor: usize,
    pub can_undo: bool,
    pub can_redo: bool,
}

impl HistoryView {
    /// The active entry.
    pub fn current(&self) -> Option<&HistoryEntry> {
        self.entries.get(self.cursor)
    }
}
