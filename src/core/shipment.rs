//! Shipment records and their identity.
//!
//! A [`Shipment`] is created once from a validated [`ShipmentDraft`] and is
//! afterwards only touched through the history ledger, which is why every
//! setter here is crate-private.

use super::field::{clean_description, FieldValue, MutableField};
use super::state::ShipmentStatus;
use crate::builder::ShipmentDraft;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Unique, immutable identifier of a shipment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShipmentId(Uuid);

impl ShipmentId {
    /// Generate a fresh random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// The underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ShipmentId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for ShipmentId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for ShipmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for ShipmentId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

/// Service level of a shipment.
///
/// Ordered from fastest and most expensive to slowest and cheapest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShipmentKind {
    Express,
    Standard,
    Economy,
}

impl ShipmentKind {
    /// All service levels, fastest first.
    pub const ALL: [ShipmentKind; 3] = [Self::Express, Self::Standard, Self::Economy];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Express => "Express",
            Self::Standard => "Standard",
            Self::Economy => "Economy",
        }
    }
}

impl fmt::Display for ShipmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a service level name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown shipment type '{0}', expected one of: Express, Standard, Economy")]
pub struct ParseKindError(pub String);

impl FromStr for ShipmentKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "express" => Ok(Self::Express),
            "standard" => Ok(Self::Standard),
            "economy" => Ok(Self::Economy),
            _ => Err(ParseKindError(s.to_string())),
        }
    }
}

/// One value per service level.
///
/// Used by the tariff, discount and delivery tables so that every table is
/// total over [`ShipmentKind`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PerKind<T> {
    pub express: T,
    pub standard: T,
    pub economy: T,
}

impl<T: Copy> PerKind<T> {
    pub fn new(express: T, standard: T, economy: T) -> Self {
        Self {
            express,
            standard,
            economy,
        }
    }

    pub fn get(&self, kind: ShipmentKind) -> T {
        match kind {
            ShipmentKind::Express => self.express,
            ShipmentKind::Standard => self.standard,
            ShipmentKind::Economy => self.economy,
        }
    }

    /// Iterate `(kind, value)` pairs in service-level order.
    pub fn iter(&self) -> impl Iterator<Item = (ShipmentKind, T)> + '_ {
        ShipmentKind::ALL.into_iter().map(move |kind| (kind, self.get(kind)))
    }
}

/// A tracked parcel-delivery record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Shipment {
    id: ShipmentId,
    kind: ShipmentKind,
    sender: String,
    recipient: String,
    origin: String,
    destination: String,
    weight_kg: f64,
    description: Option<String>,
    fragile: bool,
    declared_value: Option<f64>,
    distance_km: f64,
    status: ShipmentStatus,
    cost: f64,
    created_at: DateTime<Utc>,
}

impl Shipment {
    /// Build the record for a draft that already passed validation.
    pub(crate) fn register(
        id: ShipmentId,
        draft: ShipmentDraft,
        distance_km: f64,
        cost: f64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            kind: draft.kind,
            sender: draft.sender,
            recipient: draft.recipient,
            origin: draft.origin,
            destination: draft.destination,
            weight_kg: draft.weight_kg,
            description: clean_description(draft.description.as_deref()),
            fragile: draft.fragile,
            declared_value: draft.declared_value,
            distance_km,
            status: ShipmentStatus::PendingValidation,
            cost,
            created_at,
        }
    }

    pub fn id(&self) -> ShipmentId {
        self.id
    }

    pub fn kind(&self) -> ShipmentKind {
        self.kind
    }

    pub fn sender(&self) -> &str {
        &self.sender
    }

    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn weight_kg(&self) -> f64 {
        self.weight_kg
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn is_fragile(&self) -> bool {
        self.fragile
    }

    pub fn declared_value(&self) -> Option<f64> {
        self.declared_value
    }

    /// Distance derived from the addresses at creation time.
    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }

    pub fn status(&self) -> ShipmentStatus {
        self.status
    }

    /// Cost quoted at creation. Never recomputed.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Current value of one of the mutable fields.
    pub fn field_value(&self, field: MutableField) -> FieldValue {
        match field {
            MutableField::Weight => FieldValue::Weight(self.weight_kg),
            MutableField::Description => FieldValue::Description(self.description.clone()),
            MutableField::Fragile => FieldValue::Fragile(self.fragile),
        }
    }

    pub(crate) fn assign(&mut self, value: &FieldValue) {
        match value {
            FieldValue::Weight(weight) => self.weight_kg = *weight,
            FieldValue::Description(description) => self.description = description.clone(),
            FieldValue::Fragile(fragile) => self.fragile = *fragile,
        }
    }

    pub(crate) fn set_status(&mut self, status: ShipmentStatus) {
        self.status = status;
    }
}

impl fmt::Display for Shipment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Shipment {}: {} -> {} ({}, {})",
            self.id, self.sender, self.recipient, self.kind, self.status
        )
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::builder::ShipmentDraft;

    pub(crate) fn sample(kind: ShipmentKind, weight_kg: f64) -> Shipment {
        let draft = ShipmentDraft::builder()
            .kind(kind)
            .sender("Ana Torres")
            .recipient("Luis Pardo")
            .origin("Av. Central 100")
            .destination("Calle 9 #12")
            .weight_kg(weight_kg)
            .build()
            .unwrap();
        Shipment::register(ShipmentId::new(), draft, 100.0, 80.0, Utc::now())
    }

    #[test]
    fn kind_parses_case_insensitively() {
        assert_eq!("express".parse::<ShipmentKind>(), Ok(ShipmentKind::Express));
        assert_eq!(" Standard ".parse::<ShipmentKind>(), Ok(ShipmentKind::Standard));
        assert_eq!("ECONOMY".parse::<ShipmentKind>(), Ok(ShipmentKind::Economy));
        assert!("overnight".parse::<ShipmentKind>().is_err());
    }

    #[test]
    fn per_kind_lookup_is_total() {
        let table = PerKind::new(1, 2, 3);
        assert_eq!(table.get(ShipmentKind::Express), 1);
        assert_eq!(table.get(ShipmentKind::Standard), 2);
        assert_eq!(table.get(ShipmentKind::Economy), 3);
        assert_eq!(table.iter().count(), 3);
    }

    #[test]
    fn registered_shipment_starts_pending() {
        let shipment = sample(ShipmentKind::Express, 2.0);
        assert_eq!(shipment.status(), ShipmentStatus::PendingValidation);
        assert_eq!(shipment.weight_kg(), 2.0);
        assert_eq!(shipment.distance_km(), 100.0);
        assert!(shipment.description().is_none());
    }

    #[test]
    fn assign_updates_only_the_named_field() {
        let mut shipment = sample(ShipmentKind::Standard, 3.0);
        let before = shipment.clone();

        shipment.assign(&FieldValue::Fragile(true));

        assert!(shipment.is_fragile());
        assert_eq!(shipment.weight_kg(), before.weight_kg());
        assert_eq!(shipment.status(), before.status());
        assert_eq!(shipment.cost(), before.cost());
    }

    #[test]
    fn id_round_trips_through_display() {
        let id = ShipmentId::new();
        let parsed: ShipmentId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn shipment_serializes_correctly() {
        let shipment = sample(ShipmentKind::Economy, 7.5);
        let json = serde_json::to_string(&shipment).unwrap();
        let deserialized: Shipment = serde_json::from_str(&json).unwrap();
        assert_eq!(shipment, deserialized);
    }
}
