//! Engine configuration loaded from TOML.
//!
//! Every section is optional. Missing values fall back to the standard
//! tariffs, so an empty file and no file at all behave the same.
//!
//! ```toml
//! [pricing]
//! fragile_surcharge = 60.0
//! per_kg = { express = 16.0, standard = 8.0, economy = 4.0 }
//!
//! [discounts]
//! per_kind = { express = 0.0, standard = 0.02, economy = 0.05 }
//!
//! [limits]
//! express_max_distance_km = 650.0
//!
//! [logging]
//! filter = "waybill=debug"
//! ```

use crate::core::{DeliverySchedule, DiscountTable, Tariff};
use crate::validation::ValidationLimits;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Errors from loading or checking configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Failed to read config file (permissions, not a file, ...).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    /// Config file contains invalid TOML or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    /// Values parse but cannot be used.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Logging section.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

/// Complete engine configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub pricing: Tariff,
    pub discounts: DiscountTable,
    pub delivery: DeliverySchedule,
    pub limits: ValidationLimits,
    pub logging: LoggingConfig,
}

impl EngineConfig {
    /// Parse configuration from TOML text and validate it.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents).map_err(|e| ConfigError::ParseError {
            path: PathBuf::from("<inline>"),
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject tables that would break the engine's guarantees.
    ///
    /// All problems are reported together.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut problems = Vec::new();

        for (kind, rate) in self.pricing.per_kg.iter() {
            if !(rate.is_finite() && rate > 0.0) {
                problems.push(format!(
                    "pricing.per_kg.{} must be positive",
                    kind.name().to_lowercase()
                ));
            }
        }
        for (kind, rate) in self.pricing.per_km.iter() {
            if !(rate.is_finite() && rate >= 0.0) {
                problems.push(format!(
                    "pricing.per_km.{} must not be negative",
                    kind.name().to_lowercase()
                ));
            }
        }
        for (name, value) in [
            ("pricing.heavy_surcharge_per_kg", self.pricing.heavy_surcharge_per_kg),
            ("pricing.fragile_surcharge", self.pricing.fragile_surcharge),
            ("pricing.insurance_rate", self.pricing.insurance_rate),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                problems.push(format!("{name} must not be negative"));
            }
        }

        let brackets = self
            .discounts
            .weight_brackets
            .iter()
            .chain(&self.discounts.distance_brackets);
        for bracket in brackets {
            if !(0.0..=1.0).contains(&bracket.rate) {
                problems.push(format!(
                    "discount '{}' rate must be within 0..=1",
                    bracket.label
                ));
            }
        }
        for (kind, rate) in self.discounts.per_kind.iter() {
            if !(0.0..=1.0).contains(&rate) {
                problems.push(format!(
                    "discounts.per_kind.{} must be within 0..=1",
                    kind.name().to_lowercase()
                ));
            }
        }

        for (kind, speed) in self.delivery.km_per_day.iter() {
            if !(speed.is_finite() && speed > 0.0) {
                problems.push(format!(
                    "delivery.km_per_day.{} must be positive",
                    kind.name().to_lowercase()
                ));
            }
        }

        let limits = &self.limits;
        if !(limits.min_weight_kg > 0.0 && limits.min_weight_kg <= limits.max_weight_kg) {
            problems.push(format!(
                "limits.min_weight_kg ({}) must be positive and not above limits.max_weight_kg ({})",
                limits.min_weight_kg, limits.max_weight_kg
            ));
        }
        if limits.express_max_distance_km.is_nan() || limits.express_max_distance_km <= 0.0 {
            problems.push("limits.express_max_distance_km must be positive".to_string());
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid(problems.join("; ")))
        }
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if the file doesn't exist (use defaults).
/// Returns `Err` if the file exists but cannot be read, parsed or validated.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<EngineConfig>, ConfigError> {
    let path = path.into();

    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: EngineConfig = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;
    config.validate()?;

    Ok(Some(config))
}
