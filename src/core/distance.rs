//! Route distance derivation.
//!
//! Distance is computed once, when a shipment is registered. Real
//! deployments plug in a geocoding-backed model; the default is a
//! deterministic stand-in based on the destination address.

/// Derives the route length between two addresses, in kilometres.
pub trait DistanceModel: Send + Sync {
    fn distance_km(&self, origin: &str, destination: &str) -> f64;
}

impl<F> DistanceModel for F
where
    F: Fn(&str, &str) -> f64 + Send + Sync,
{
    fn distance_km(&self, origin: &str, destination: &str) -> f64 {
        self(origin, destination)
    }
}

/// Distance proportional to the length of the destination address.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AddressLengthModel {
    pub km_per_char: f64,
}

impl Default for AddressLengthModel {
    fn default() -> Self {
        Self { km_per_char: 10.0 }
    }
}

impl DistanceModel for AddressLengthModel {
    fn distance_km(&self, _origin: &str, destination: &str) -> f64 {
        destination.chars().count() as f64 * self.km_per_char
    }
}
