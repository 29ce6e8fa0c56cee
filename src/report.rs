//! Plain-text reports.

use crate::core::{DeliveryEstimate, DiscountBreakdown, Shipment, ShipmentStatus};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// One shipment with its current values, discount and estimate.
pub struct ShipmentReport<'a> {
    pub shipment: &'a Shipment,
    pub requires_insurance: bool,
    pub discount: &'a DiscountBreakdown,
    pub estimate: &'a DeliveryEstimate,
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

impl fmt::Display for ShipmentReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shipment = self.shipment;
        writeln!(f, "Shipment {}", shipment.id())?;
        writeln!(f, "  Type:          {}", shipment.kind())?;
        writeln!(
            f,
            "  Status:        {} ({})",
            shipment.status(),
            shipment.status().description()
        )?;
        writeln!(f, "  Sender:        {}", shipment.sender())?;
        writeln!(f, "  Recipient:     {}", shipment.recipient())?;
        writeln!(
            f,
            "  Route:         {} -> {} ({:.1} km)",
            shipment.origin(),
            shipment.destination(),
            shipment.distance_km()
        )?;
        writeln!(f, "  Weight:        {:.2} kg", shipment.weight_kg())?;
        if let Some(description) = shipment.description() {
            writeln!(f, "  Description:   {description}")?;
        }
        writeln!(f, "  Fragile:       {}", yes_no(shipment.is_fragile()))?;
        if let Some(value) = shipment.declared_value() {
            writeln!(f, "  Declared:      {value:.2}")?;
        }
        writeln!(f, "  Insurance:     {}", yes_no(self.requires_insurance))?;
        writeln!(
            f,
            "  Created:       {}",
            shipment.created_at().format("%Y-%m-%d %H:%M:%S UTC")
        )?;

        writeln!(f, "Cost")?;
        writeln!(f, "  Quoted:        {:.2}", self.discount.original)?;
        for applied in &self.discount.applied {
            writeln!(
                f,
                "  - {} ({:.0}%): -{:.2}",
                applied.label,
                applied.rate * 100.0,
                applied.amount
            )?;
        }
        writeln!(f, "  Total:         {:.2}", self.discount.total)?;

        let estimate = self.estimate;
        writeln!(f, "Delivery")?;
        writeln!(
            f,
            "  Estimate:      {} day(s) (processing {}, transit {}, handling {})",
            estimate.days, estimate.processing_days, estimate.transit_days, estimate.handling_days
        )
    }
}

/// Render one shipment with its current values, discount and estimate.
pub fn render_shipment(
    shipment: &Shipment,
    requires_insurance: bool,
    discount: &DiscountBreakdown,
    estimate: &DeliveryEstimate,
) -> String {
    ShipmentReport {
        shipment,
        requires_insurance,
        discount,
        estimate,
    }
    .to_string()
}

/// Aggregate figures over every shipment in a repository.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FleetSummary {
    pub total: usize,
    pub by_status: BTreeMap<ShipmentStatus, usize>,
    /// Sum of quoted costs
    pub total_cost: f64,
    /// Sum of costs after discounts
    pub total_discounted: f64,
}

impl FleetSummary {
    pub(crate) fn add(&mut self, shipment: &Shipment, discount: &DiscountBreakdown) {
        self.total += 1;
        *self.by_status.entry(shipment.status()).or_insert(0) += 1;
        self.total_cost += discount.original;
        self.total_discounted += discount.total;
    }

    pub fn count(&self, status: ShipmentStatus) -> usize {
        self.by_status.get(&status).copied().unwrap_or(0)
    }
}

impl fmt::Display for FleetSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Shipments: {}", self.total)?;
        for status in ShipmentStatus::ALL {
            let count = self.count(status);
            if count > 0 {
                writeln!(f, "  {:<22} {count}", status.description())?;
            }
        }
        writeln!(f, "Quoted revenue:     {:.2}", self.total_cost)?;
        writeln!(f, "Discounted revenue: {:.2}", self.total_discounted)
    }
}

pub fn render_summary(summary: &FleetSummary) -> String {
    summary.to_string()
}
