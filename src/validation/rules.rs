//! Validation rules for drafts and edits using Validation.

use crate::builder::ShipmentDraft;
use crate::core::{FieldValue, ShipmentKind};
use crate::validation::violations::{Violation, Violations};
use serde::{Deserialize, Serialize};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Outcome of one or more rule checks.
pub type Checked = Validation<(), NonEmptyVec<Violation>>;

/// Bounds enforced on new shipments and weight edits.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidationLimits {
    pub min_weight_kg: f64,
    pub max_weight_kg: f64,
    /// Longest route the Express service accepts
    pub express_max_distance_km: f64,
}

impl Default for ValidationLimits {
    fn default() -> Self {
        Self {
            min_weight_kg: 0.1,
            max_weight_kg: 1000.0,
            express_max_distance_km: 500.0,
        }
    }
}

fn require_text(field: &'static str, value: &str) -> Checked {
    if value.trim().is_empty() {
        Validation::fail(Violation::MissingText { field })
    } else {
        Validation::success(())
    }
}

impl ValidationLimits {
    pub fn check_weight(&self, weight: f64) -> Checked {
        // NaN fails the range check too
        if weight.is_finite() && (self.min_weight_kg..=self.max_weight_kg).contains(&weight) {
            Validation::success(())
        } else {
            Validation::fail(Violation::WeightOutOfRange {
                weight,
                min: self.min_weight_kg,
                max: self.max_weight_kg,
            })
        }
    }

    pub fn check_service_range(&self, kind: ShipmentKind, distance_km: f64) -> Checked {
        if kind == ShipmentKind::Express && distance_km > self.express_max_distance_km {
            Validation::fail(Violation::ServiceRangeExceeded {
                kind,
                distance_km,
                limit_km: self.express_max_distance_km,
            })
        } else {
            Validation::success(())
        }
    }

    /// The distance model must yield a real number of kilometres.
    pub fn check_distance(&self, distance_km: f64) -> Checked {
        if distance_km.is_finite() {
            Validation::success(())
        } else {
            Validation::fail(Violation::UnmeasurableDistance(distance_km))
        }
    }

    /// Check every rule on a draft, accumulating ALL violations.
    pub fn check_draft(&self, draft: &ShipmentDraft, distance_km: f64) -> Checked {
        let mut checks: Vec<Checked> = vec![
            require_text("sender", &draft.sender),
            require_text("recipient", &draft.recipient),
            require_text("origin", &draft.origin),
            require_text("destination", &draft.destination),
            self.check_weight(draft.weight_kg),
            self.check_distance(distance_km),
            self.check_service_range(draft.kind, distance_km),
        ];

        if let Some(value) = draft.declared_value {
            checks.push(if value < 0.0 || !value.is_finite() {
                Validation::fail(Violation::NegativeDeclaredValue(value))
            } else {
                Validation::success(())
            });
        }

        Validation::all_vec(checks).map(|_| ())
    }

    /// Check a new value for an editable field.
    pub fn check_field(&self, value: &FieldValue) -> Checked {
        match value {
            FieldValue::Weight(weight) => self.check_weight(*weight),
            FieldValue::Description(_) | FieldValue::Fragile(_) => Validation::success(()),
        }
    }
}

/// Collapse a validation outcome into a `Result`.
pub fn into_result(checked: Checked) -> Result<(), Violations> {
    match checked {
        Validation::Success(_) => Ok(()),
        Validation::Failure(errors) => Err(Violations::new(errors.iter().cloned().collect())),
    }
}
