//! Rule violations reported when a draft or an edit is rejected.

use crate::core::ShipmentKind;
use std::fmt;
use thiserror::Error;

/// A single failed validation rule.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum Violation {
    #[error("{field} must not be empty")]
    MissingText { field: &'static str },

    #[error("weight {weight} kg is outside the accepted range {min}-{max} kg")]
    WeightOutOfRange { weight: f64, min: f64, max: f64 },

    #[error("{kind} service covers at most {limit_km} km (route is {distance_km} km)")]
    ServiceRangeExceeded {
        kind: ShipmentKind,
        distance_km: f64,
        limit_km: f64,
    },

    #[error("route distance {0} km is not a finite number")]
    UnmeasurableDistance(f64),

    #[error("declared value must not be negative (got {0})")]
    NegativeDeclaredValue(f64),

    #[error("'{value}' is not a valid value for {field}")]
    UnparsableValue { field: &'static str, value: String },

    #[error("unknown shipment type '{0}'")]
    UnknownKind(String),
}

/// Every violation found in one request, in rule order.
#[derive(Debug, Clone, PartialEq)]
pub struct Violations(Vec<Violation>);

impl Violations {
    pub fn new(violations: Vec<Violation>) -> Self {
        Self(violations)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Violation> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<Violation> {
        self.0
    }
}

impl From<Violation> for Violations {
    fn from(violation: Violation) -> Self {
        Self(vec![violation])
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, violation) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{violation}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Violations {}
