//! Snapshots of shipment records.
//!
//! A checkpoint captures a shipment together with its full ledger, so that
//! undo and redo keep working after the record is persisted and restored.
//! Checkpoints serialize to JSON for inspection or to bincode for compact
//! storage.

use crate::repository::ShipmentRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod error;

pub use error::CheckpointError;

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serializable checkpoint of one shipment record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: Uuid,

    /// When checkpoint was created
    pub timestamp: DateTime<Utc>,

    /// The shipment and its ledger
    pub record: ShipmentRecord,
}

impl Checkpoint {
    /// Snapshot `record` as it is now.
    pub fn capture(record: &ShipmentRecord) -> Self {
        Self {
            version: CHECKPOINT_VERSION,
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            record: record.clone(),
        }
    }

    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CheckpointError::Encode(e.to_string()))
    }

    /// Parse and validate a JSON checkpoint.
    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        let checkpoint: Self = serde_json::from_str(json)
            .map_err(|e| CheckpointError::Decode(e.to_string()))?;
        checkpoint.validate()?;
        Ok(checkpoint)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::Encode(e.to_string()))
    }

    /// Decode and validate a binary checkpoint.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CheckpointError> {
        let checkpoint: Self = bincode::deserialize(bytes)
            .map_err(|e| CheckpointError::Decode(e.to_string()))?;
        checkpoint.validate()?;
        Ok(checkpoint)
    }

    /// Reject checkpoints from other format versions or with a record whose
    /// shipment and ledger disagree.
    pub fn validate(&self) -> Result<(), CheckpointError> {
        if self.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            });
        }

        let shipment = self.record.shipment();
        if shipment.weight_kg().is_nan() || shipment.weight_kg() <= 0.0 {
            return Err(CheckpointError::Inconsistent(format!(
                "weight must be positive, got {}",
                shipment.weight_kg()
            )));
        }
        if shipment.cost() < 0.0 || shipment.distance_km() < 0.0 {
            return Err(CheckpointError::Inconsistent(
                "cost and distance must not be negative".to_string(),
            ));
        }
        if !self.record.is_consistent() {
            return Err(CheckpointError::Inconsistent(format!(
                "history of shipment {} does not match its current state",
                shipment.id()
            )));
        }

        Ok(())
    }
}
