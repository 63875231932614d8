//! Engine configuration with documented constants
//!
//! All magic numbers are collected here with explanations of their purpose
//! and how they interact with each other.

/// Configuration for the timing and assignment calculations
///
/// These values come from the underlying astronomy and horticulture, not from
/// tuning. Changing them changes what the engine computes, so overrides are
/// intended for tests only.
#[derive(Debug, Clone)]
pub struct AlmanacConfig {
    // === ASTRONOMY ===
    /// Length of the synodic month in days (new moon to new moon)
    ///
    /// Drives phase, category, and illumination. day_in_cycle is always
    /// normalized into [0, synodic_length).
    pub synodic_length: f64,

    /// Length of the sidereal month in days (return to the same zodiac position)
    ///
    /// Drives the zodiac sign index; the two cycles are deliberately
    /// independent moduli over the same epoch offset.
    pub sidereal_length: f64,

    // === ZONE HEALTH ===
    /// Fraction of a zone's threshold below which status drops from
    /// Warning to Critical
    ///
    /// At 0.6, a zone with threshold 70 reads Optimal at >= 70,
    /// Warning at >= 42, Critical below 42.
    pub warning_ratio: f64,

    // === BED PACKING ===
    /// Hexagonal packing density factor for plant-count estimates
    ///
    /// Plants per bed = floor(area / (spacing^2 * 0.866)). Hex packing fits
    /// ~15% more plants than a square grid at the same spacing.
    pub hex_packing_factor: f64,
}

impl Default for AlmanacConfig {
    fn default() -> Self {
        Self {
            synodic_length: 29.530_588_67,
            sidereal_length: 27.321_66,
            warning_ratio: 0.6,
            hex_packing_factor: 0.866,
        }
    }
}

impl AlmanacConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.synodic_length <= 0.0 || self.sidereal_length <= 0.0 {
            return Err("Cycle lengths must be positive".into());
        }

        // The sidereal month is shorter than the synodic month; a table that
        // inverts them is misconfigured.
        if self.sidereal_length >= self.synodic_length {
            return Err(format!(
                "sidereal_length ({}) should be < synodic_length ({})",
                self.sidereal_length, self.synodic_length
            ));
        }

        if !(0.0..1.0).contains(&self.warning_ratio) {
            return Err(format!(
                "warning_ratio ({}) must be in [0, 1)",
                self.warning_ratio
            ));
        }

        if self.hex_packing_factor <= 0.0 || self.hex_packing_factor > 1.0 {
            return Err(format!(
                "hex_packing_factor ({}) must be in (0, 1]",
                self.hex_packing_factor
            ));
        }

        Ok(())
    }
}

// === GLOBAL CONFIG ACCESS ===

use std::sync::OnceLock;

static CONFIG: OnceLock<AlmanacConfig> = OnceLock::new();

/// Get the global almanac config (initializes with defaults if not set)
pub fn config() -> &'static AlmanacConfig {
    CONFIG.get_or_init(AlmanacConfig::default)
}

/// Set the global almanac config (can only be called once)
///
/// Returns Err if config was already set.
pub fn set_config(config: AlmanacConfig) -> Result<(), AlmanacConfig> {
    CONFIG.set(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(AlmanacConfig::default().validate().is_ok());
    }

    #[test]
    fn test_inverted_cycles_rejected() {
        let mut cfg = AlmanacConfig::default();
        cfg.sidereal_length = 30.0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_warning_ratio_bounds() {
        let mut cfg = AlmanacConfig::default();
        cfg.warning_ratio = 1.0;
        assert!(cfg.validate().is_err());
        cfg.warning_ratio = 0.0;
        assert!(cfg.validate().is_ok());
    }
}
