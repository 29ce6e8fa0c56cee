//! Delivery-time estimation.

use super::shipment::{PerKind, Shipment, ShipmentKind};
use serde::{Deserialize, Serialize};

/// Throughput and handling times per service level.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeliverySchedule {
    /// Kilometres covered per day in transit
    pub km_per_day: PerKind<f64>,
    /// Days spent at the origin before dispatch
    pub processing_days: PerKind<u32>,
    /// Extra days for special handling of fragile parcels
    pub fragile_extra_days: u32,
}

impl Default for DeliverySchedule {
    fn default() -> Self {
        Self {
            km_per_day: PerKind::new(500.0, 300.0, 150.0),
            processing_days: PerKind::new(0, 1, 2),
            fragile_extra_days: 1,
        }
    }
}

/// Estimated delivery time with its components.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryEstimate {
    pub processing_days: u32,
    pub transit_days: u32,
    pub handling_days: u32,
    pub days: u32,
}

impl DeliverySchedule {
    /// Whole days in transit: every started leg of `km_per_day` counts,
    /// plus the final day.
    ///
    /// Saturates at `u32::MAX` for unbounded distances.
    fn transit_days(&self, kind: ShipmentKind, distance_km: f64) -> u32 {
        let speed = self.km_per_day.get(kind);
        if speed <= 0.0 || distance_km.is_nan() {
            return 1;
        }
        // float-to-int `as` saturates, so +inf maps to u32::MAX
        let legs = (distance_km.max(0.0) / speed).floor() as u32;
        legs.saturating_add(1)
    }

    /// Estimated days from service level and distance alone.
    ///
    /// With the default schedule Express is strictly faster than Standard,
    /// which is strictly faster than Economy, for every distance.
    pub fn estimate_days(&self, kind: ShipmentKind, distance_km: f64) -> u32 {
        self.processing_days
            .get(kind)
            .saturating_add(self.transit_days(kind, distance_km))
    }

    /// Full estimate for a shipment, including fragile handling.
    pub fn estimate(&self, shipment: &Shipment) -> DeliveryEstimate {
        let processing_days = self.processing_days.get(shipment.kind());
        let transit_days = self.transit_days(shipment.kind(), shipment.distance_km());
        let handling_days = if shipment.is_fragile() {
            self.fragile_extra_days
        } else {
            0
        };

        DeliveryEstimate {
            processing_days,
            transit_days,
            handling_days,
            days: processing_days
                .saturating_add(transit_days)
                .saturating_add(handling_days),
        }
    }
}
