//! Builder for constructing shipment drafts.

use crate::builder::error::BuildError;
use crate::core::ShipmentKind;
use serde::{Deserialize, Serialize};

/// Everything the operator supplies to register a shipment.
///
/// A draft is not validated; the repository checks it (and derives the
/// distance) when registering.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShipmentDraft {
    pub kind: ShipmentKind,
    pub sender: String,
    pub recipient: String,
    pub origin: String,
    pub destination: String,
    pub weight_kg: f64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub fragile: bool,
    #[serde(default)]
    pub declared_value: Option<f64>,
}

impl ShipmentDraft {
    pub fn builder() -> DraftBuilder {
        DraftBuilder::new()
    }
}

/// Builder for shipment drafts with a fluent API.
#[derive(Clone, Debug, Default)]
pub struct DraftBuilder {
    kind: Option<ShipmentKind>,
    sender: Option<String>,
    recipient: Option<String>,
    origin: Option<String>,
    destination: Option<String>,
    weight_kg: Option<f64>,
    description: Option<String>,
    fragile: bool,
    declared_value: Option<f64>,
}

impl DraftBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the service level (required).
    pub fn kind(mut self, kind: ShipmentKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Set the sender name (required).
    pub fn sender(mut self, name: impl Into<String>) -> Self {
        self.sender = Some(name.into());
        self
    }

    /// Set the recipient name (required).
    pub fn recipient(mut self, name: impl Into<String>) -> Self {
        self.recipient = Some(name.into());
        self
    }

    /// Set the origin address (required).
    pub fn origin(mut self, address: impl Into<String>) -> Self {
        self.origin = Some(address.into());
        self
    }

    /// Set the destination address (required).
    pub fn destination(mut self, address: impl Into<String>) -> Self {
        self.destination = Some(address.into());
        self
    }

    /// Set the weight in kilograms (required).
    pub fn weight_kg(mut self, weight_kg: f64) -> Self {
        self.weight_kg = Some(weight_kg);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn fragile(mut self, fragile: bool) -> Self {
        self.fragile = fragile;
        self
    }

    pub fn declared_value(mut self, value: f64) -> Self {
        self.declared_value = Some(value);
        self
    }

    /// Build the draft.
    /// Returns an error if a required field is missing.
    pub fn build(self) -> Result<ShipmentDraft, BuildError> {
        Ok(ShipmentDraft {
            kind: self.kind.ok_or(BuildError::MissingKind)?,
            sender: self.sender.ok_or(BuildError::MissingSender)?,
            recipient: self.recipient.ok_or(BuildError::MissingRecipient)?,
            origin: self.origin.ok_or(BuildError::MissingOrigin)?,
            destination: self.destination.ok_or(BuildError::MissingDestination)?,
            weight_kg: self.weight_kg.ok_or(BuildError::MissingWeight)?,
            description: self.description,
            fragile: self.fragile,
            declared_value: self.declared_value,
        })
    }
}
