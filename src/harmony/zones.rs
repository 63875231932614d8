//! Zone health status with derived levels
//!
//! A zone's level is always derived from its value against its threshold;
//! it is never set by hand. Mutation goes through `set_value`, which
//! re-derives, so a stored status can never disagree with the numbers.

use serde::{Deserialize, Serialize};

use crate::core::config::config;
use crate::core::types::{Element, FrequencyBand};

/// Derived health level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusLevel {
    Optimal,
    Warning,
    Critical,
}

/// Health snapshot for one zone
///
/// `value` and `threshold` are 0-100 readings; out-of-range input clamps at
/// construction and mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneStatus {
    pub id: FrequencyBand,
    pub name: String,
    pub element: Element,
    status: StatusLevel,
    value: f64,
    threshold: f64,
}

impl ZoneStatus {
    pub fn new(id: FrequencyBand, name: &str, element: Element, value: f64, threshold: f64) -> Self {
        let value = value.clamp(0.0, 100.0);
        let threshold = threshold.clamp(0.0, 100.0);
        Self {
            id,
            name: name.into(),
            element,
            status: derive_level(value, threshold),
            value,
            threshold,
        }
    }

    pub fn status(&self) -> StatusLevel {
        self.status
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Update the reading; the level re-derives on every call
    pub fn set_value(&mut self, value: f64) {
        self.value = value.clamp(0.0, 100.0);
        self.status = derive_level(self.value, self.threshold);
    }
}

/// Zone snapshots keyed by band
pub type ZoneMap = ahash::AHashMap<FrequencyBand, ZoneStatus>;

fn derive_level(value: f64, threshold: f64) -> StatusLevel {
    if value >= threshold {
        StatusLevel::Optimal
    } else if value >= threshold * config().warning_ratio {
        StatusLevel::Warning
    } else {
        StatusLevel::Critical
    }
}
