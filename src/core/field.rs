//! The operator-editable fields of a shipment.
//!
//! Only weight, description and the fragile flag may change after creation.
//! Status has its own path through the state machine and everything else is
//! fixed at registration.

use crate::validation::Violation;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Fields that exist on a shipment but can never be edited.
const IMMUTABLE_FIELDS: &[&str] = &[
    "id",
    "kind",
    "type",
    "sender",
    "recipient",
    "origin",
    "destination",
    "declared_value",
    "distance",
    "distance_km",
    "status",
    "cost",
    "created_at",
    "requires_insurance",
];

/// Errors for field names that cannot be edited.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("field '{0}' does not exist")]
    Unknown(String),

    #[error("field '{0}' cannot be modified")]
    Immutable(String),
}

/// A field the operator may change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MutableField {
    Weight,
    Description,
    Fragile,
}

impl MutableField {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Weight => "weight",
            Self::Description => "description",
            Self::Fragile => "fragile",
        }
    }
}

impl fmt::Display for MutableField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MutableField {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        match name.as_str() {
            "weight" | "weight_kg" => Ok(Self::Weight),
            "description" => Ok(Self::Description),
            "fragile" | "is_fragile" => Ok(Self::Fragile),
            other if IMMUTABLE_FIELDS.contains(&other) => Err(FieldError::Immutable(s.to_string())),
            _ => Err(FieldError::Unknown(s.to_string())),
        }
    }
}

/// Trimmed description, or `None` when nothing is left.
pub(crate) fn clean_description(description: Option<&str>) -> Option<String> {
    description
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
}

/// A typed value for one of the mutable fields.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    Weight(f64),
    Description(Option<String>),
    Fragile(bool),
}

impl FieldValue {
    pub fn field(&self) -> MutableField {
        match self {
            Self::Weight(_) => MutableField::Weight,
            Self::Description(_) => MutableField::Description,
            Self::Fragile(_) => MutableField::Fragile,
        }
    }

    /// Canonical form stored on a shipment.
    ///
    /// Descriptions are trimmed and a blank one clears the field.
    pub fn normalized(self) -> Self {
        match self {
            Self::Description(description) => {
                Self::Description(clean_description(description.as_deref()))
            }
            other => other,
        }
    }

    /// Parse a raw textual value for `field`.
    ///
    /// Blank descriptions clear the field. Fragile accepts
    /// `true/false`, `yes/no` and `1/0`.
    pub fn parse(field: MutableField, raw: &str) -> Result<Self, Violation> {
        let trimmed = raw.trim();
        let unparsable = || Violation::UnparsableValue {
            field: field.name(),
            value: raw.to_string(),
        };

        match field {
            MutableField::Weight => trimmed
                .parse::<f64>()
                .map(Self::Weight)
                .map_err(|_| unparsable()),
            MutableField::Description => Ok(Self::Description(clean_description(Some(trimmed)))),
            MutableField::Fragile => match trimmed.to_ascii_lowercase().as_str() {
                "true" | "yes" | "1" => Ok(Self::Fragile(true)),
                "false" | "no" | "0" => Ok(Self::Fragile(false)),
                _ => Err(unparsable()),
            },
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Weight(weight) => write!(f, "{weight} kg"),
            Self::Description(Some(description)) => write!(f, "\"{description}\""),
            Self::Description(None) => f.write_str("(none)"),
            Self::Fragile(true) => f.write_str("fragile"),
            Self::Fragile(false) => f.write_str("not fragile"),
        }
    }
}
