//! Cost quoting and discount computation.
//!
//! Both tables are plain data so they can be loaded from configuration and
//! tested in isolation. Everything here is pure.

use super::shipment::{PerKind, Shipment, ShipmentKind};
use serde::{Deserialize, Serialize};

/// Per-unit rates and surcharges used to quote a shipment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Tariff {
    /// Rate per kilogram
    pub per_kg: PerKind<f64>,
    /// Rate per kilometre
    pub per_km: PerKind<f64>,
    /// Weight above which the heavy surcharge applies
    pub heavy_threshold_kg: f64,
    /// Surcharge per kilogram above the heavy threshold
    pub heavy_surcharge_per_kg: f64,
    /// Flat surcharge for fragile parcels
    pub fragile_surcharge: f64,
    /// Insurance premium as a fraction of the pre-insurance total
    pub insurance_rate: f64,
    /// Weight above which insurance is required
    pub insurance_weight_threshold_kg: f64,
    /// Declared value above which insurance is required
    pub insurance_value_threshold: f64,
}

impl Default for Tariff {
    fn default() -> Self {
        Self {
            per_kg: PerKind::new(15.0, 8.0, 4.0),
            per_km: PerKind::new(0.5, 0.5, 0.5),
            heavy_threshold_kg: 50.0,
            heavy_surcharge_per_kg: 2.0,
            fragile_surcharge: 50.0,
            insurance_rate: 0.02,
            insurance_weight_threshold_kg: 50.0,
            insurance_value_threshold: 1000.0,
        }
    }
}

/// Itemised creation-time cost.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub base: f64,
    pub fragile_surcharge: f64,
    pub insurance_premium: f64,
    pub total: f64,
}

impl Tariff {
    /// Base cost from service level, weight and distance.
    ///
    /// Non-negative and strictly increasing in weight as long as the
    /// per-kilogram rates are positive.
    pub fn compute_cost(&self, kind: ShipmentKind, weight_kg: f64, distance_km: f64) -> f64 {
        let weight = weight_kg.max(0.0);
        let distance = distance_km.max(0.0);

        let by_weight = weight * self.per_kg.get(kind);
        let by_distance = distance * self.per_km.get(kind);
        let heavy = (weight - self.heavy_threshold_kg).max(0.0) * self.heavy_surcharge_per_kg;

        by_weight + by_distance + heavy
    }

    pub fn requires_insurance(
        &self,
        weight_kg: f64,
        fragile: bool,
        declared_value: Option<f64>,
    ) -> bool {
        fragile
            || weight_kg > self.insurance_weight_threshold_kg
            || declared_value.is_some_and(|value| value > self.insurance_value_threshold)
    }

    /// Insurance requirement for the shipment's current attributes.
    pub fn shipment_requires_insurance(&self, shipment: &Shipment) -> bool {
        self.requires_insurance(
            shipment.weight_kg(),
            shipment.is_fragile(),
            shipment.declared_value(),
        )
    }

    /// Full quote including fragile surcharge and insurance premium.
    pub fn quote(
        &self,
        kind: ShipmentKind,
        weight_kg: f64,
        distance_km: f64,
        fragile: bool,
        declared_value: Option<f64>,
    ) -> Quote {
        let base = self.compute_cost(kind, weight_kg, distance_km);
        let fragile_surcharge = if fragile { self.fragile_surcharge } else { 0.0 };
        let subtotal = base + fragile_surcharge;
        let insurance_premium = if self.requires_insurance(weight_kg, fragile, declared_value) {
            subtotal * self.insurance_rate
        } else {
            0.0
        };

        Quote {
            base,
            fragile_surcharge,
            insurance_premium,
            total: subtotal + insurance_premium,
        }
    }
}

/// A discount that applies strictly above a threshold.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Bracket {
    pub above: f64,
    pub rate: f64,
    pub label: String,
}

impl Bracket {
    pub fn new(above: f64, rate: f64, label: impl Into<String>) -> Self {
        Self {
            above,
            rate,
            label: label.into(),
        }
    }
}

/// Declarative discount tiers.
///
/// Within each bracket list only the highest matching bracket applies.
/// Rates from the weight bracket, the distance bracket and the service
/// level are summed and clamped to `[0, 1]`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiscountTable {
    pub weight_brackets: Vec<Bracket>,
    pub distance_brackets: Vec<Bracket>,
    pub per_kind: PerKind<f64>,
}

impl Default for DiscountTable {
    fn default() -> Self {
        Self {
            weight_brackets: vec![
                Bracket::new(50.0, 0.05, "Volume discount (over 50 kg)"),
                Bracket::new(100.0, 0.10, "Volume discount (over 100 kg)"),
            ],
            distance_brackets: vec![Bracket::new(
                1000.0,
                0.08,
                "Long-distance discount (over 1000 km)",
            )],
            per_kind: PerKind::new(0.0, 0.0, 0.05),
        }
    }
}

/// One tier that contributed to a discount.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AppliedDiscount {
    pub label: String,
    pub rate: f64,
    pub amount: f64,
}

/// Original cost, discount and discounted total.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DiscountBreakdown {
    pub original: f64,
    /// Effective rate after clamping
    pub rate: f64,
    pub discount: f64,
    pub total: f64,
    pub applied: Vec<AppliedDiscount>,
}

fn best_bracket(brackets: &[Bracket], value: f64) -> Option<&Bracket> {
    brackets
        .iter()
        .filter(|bracket| value > bracket.above)
        .max_by(|a, b| a.above.total_cmp(&b.above))
}

impl DiscountTable {
    /// Discount for the shipment's current attributes.
    ///
    /// Depends only on the quoted cost, service level, weight and distance,
    /// never on status or history.
    pub fn compute_discount(&self, shipment: &Shipment) -> DiscountBreakdown {
        let original = shipment.cost().max(0.0);
        let mut tiers: Vec<(String, f64)> = Vec::new();

        if let Some(bracket) = best_bracket(&self.weight_brackets, shipment.weight_kg()) {
            tiers.push((bracket.label.clone(), bracket.rate));
        }
        if let Some(bracket) = best_bracket(&self.distance_brackets, shipment.distance_km()) {
            tiers.push((bracket.label.clone(), bracket.rate));
        }
        let kind_rate = self.per_kind.get(shipment.kind());
        if kind_rate > 0.0 {
            tiers.push((format!("{} service discount", shipment.kind()), kind_rate));
        }

        let rate = tiers.iter().map(|(_, rate)| rate).sum::<f64>().clamp(0.0, 1.0);
        let discount = original * rate;
        let applied = tiers
            .into_iter()
            .map(|(label, rate)| AppliedDiscount {
                label,
                rate,
                amount: original * rate,
            })
            .collect();

        DiscountBreakdown {
            original,
            rate,
            discount,
            total: original - discount,
            applied,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::ShipmentDraft;
    use crate::core::shipment::ShipmentId;
    use chrono::Utc;

    fn shipment(kind: ShipmentKind, weight_kg: f64, distance_km: f64, cost: f64) -> Shipment {
        let draft = ShipmentDraft::builder()
            .kind(kind)
            .sender("Marta")
            .recipient("Jorge")
            .origin("Depot 1")
            .destination("Plaza Mayor 3")
            .weight_kg(weight_kg)
            .build()
            .unwrap();
        Shipment::register(ShipmentId::new(), draft, distance_km, cost, Utc::now())
    }

    #[test]
    fn compute_cost_matches_tariff() {
        let tariff = Tariff::default();
        // 2 kg * 15 + 100 km * 0.5
        assert_eq!(tariff.compute_cost(ShipmentKind::Express, 2.0, 100.0), 80.0);
        // 2 kg * 4 + 100 km * 0.5
        assert_eq!(tariff.compute_cost(ShipmentKind::Economy, 2.0, 100.0), 58.0);
    }

    #[test]
    fn heavy_surcharge_applies_above_threshold() {
        let tariff = Tariff::default();
        let at = tariff.compute_cost(ShipmentKind::Standard, 50.0, 0.0);
        let above = tariff.compute_cost(ShipmentKind::Standard, 60.0, 0.0);
        assert_eq!(at, 400.0);
        assert_eq!(above, 60.0 * 8.0 + 10.0 * 2.0);
    }

    #[test]
    fn service_levels_are_ordered_by_price() {
        let tariff = Tariff::default();
        let express = tariff.compute_cost(ShipmentKind::Express, 10.0, 200.0);
        let standard = tariff.compute_cost(ShipmentKind::Standard, 10.0, 200.0);
        let economy = tariff.compute_cost(ShipmentKind::Economy, 10.0, 200.0);
        assert!(express > standard && standard > economy);
    }

    #[test]
    fn quote_adds_fragile_surcharge_and_insurance() {
        let tariff = Tariff::default();
        let quote = tariff.quote(ShipmentKind::Express, 2.0, 100.0, true, None);
        assert_eq!(quote.base, 80.0);
        assert_eq!(quote.fragile_surcharge, 50.0);
        assert!((quote.insurance_premium - 2.6).abs() < 1e-9);
        assert!((quote.total - 132.6).abs() < 1e-9);
    }

    #[test]
    fn plain_quote_equals_base_cost() {
        let tariff = Tariff::default();
        let quote = tariff.quote(ShipmentKind::Standard, 3.0, 40.0, false, Some(10.0));
        assert_eq!(quote.total, tariff.compute_cost(ShipmentKind::Standard, 3.0, 40.0));
        assert_eq!(quote.insurance_premium, 0.0);
    }

    #[test]
    fn insurance_triggers() {
        let tariff = Tariff::default();
        assert!(tariff.requires_insurance(1.0, true, None));
        assert!(tariff.requires_insurance(51.0, false, None));
        assert!(tariff.requires_insurance(1.0, false, Some(5000.0)));
        assert!(!tariff.requires_insurance(50.0, false, Some(1000.0)));
    }

    #[test]
    fn no_discount_for_light_short_express() {
        let table = DiscountTable::default();
        let breakdown = table.compute_discount(&shipment(ShipmentKind::Express, 2.0, 100.0, 80.0));
        assert_eq!(breakdown.discount, 0.0);
        assert_eq!(breakdown.total, 80.0);
        assert!(breakdown.applied.is_empty());
    }

    #[test]
    fn highest_weight_bracket_wins() {
        let table = DiscountTable::default();
        let breakdown =
            table.compute_discount(&shipment(ShipmentKind::Standard, 150.0, 10.0, 1000.0));
        assert_eq!(breakdown.applied.len(), 1);
        assert_eq!(breakdown.rate, 0.10);
        assert_eq!(breakdown.discount, 100.0);
        assert_eq!(breakdown.total, 900.0);
    }

    #[test]
    fn tiers_stack_across_dimensions() {
        let table = DiscountTable::default();
        let breakdown =
            table.compute_discount(&shipment(ShipmentKind::Economy, 60.0, 1500.0, 1000.0));
        // 5% weight + 8% distance + 5% economy
        assert_eq!(breakdown.applied.len(), 3);
        assert!((breakdown.rate - 0.18).abs() < 1e-9);
        assert!((breakdown.total - 820.0).abs() < 1e-9);
    }

    #[test]
    fn discount_never_exceeds_cost() {
        let table = DiscountTable {
            weight_brackets: vec![Bracket::new(0.0, 0.9, "huge")],
            distance_brackets: vec![Bracket::new(0.0, 0.9, "huger")],
            per_kind: PerKind::new(0.0, 0.0, 0.0),
        };
        let breakdown = table.compute_discount(&shipment(ShipmentKind::Express, 5.0, 5.0, 200.0));
        assert_eq!(breakdown.rate, 1.0);
        assert_eq!(breakdown.discount, 200.0);
        assert_eq!(breakdown.total, 0.0);
    }

    #[test]
    fn tariff_deserializes_with_defaults() {
        let tariff: Tariff = toml::from_str("fragile_surcharge = 75.0").unwrap();
        assert_eq!(tariff.fragile_surcharge, 75.0);
        assert_eq!(tariff.per_kg, Tariff::default().per_kg);
    }
}
