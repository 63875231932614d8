//! Lunar phase and illumination from the synodic cycle
//!
//! Everything here is a pure function of a timestamp: days since a fixed
//! reference new moon, reduced modulo the synodic month, then mapped through
//! fixed phase thresholds. The same instant always yields the same state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::astro::zodiac::ZodiacSign;
use crate::core::config::config;
use crate::core::types::Element;

// ============================================================================
// Constants
// ============================================================================

/// Reference new moon: 2000-01-06T18:14:00Z, as a unix timestamp
pub const EPOCH_UNIX_SECS: i64 = 947_182_440;

/// Phase boundaries in days into the synodic cycle, ascending
///
/// Each boundary opens the next phase; ranges are half-open [lo, hi), so a
/// day of exactly 1.85 is already Waxing Crescent. The final phase runs from
/// 23.99 to the cycle wrap.
pub const PHASE_BOUNDS: [f64; 7] = [1.85, 7.38, 9.23, 14.77, 16.61, 22.15, 23.99];

// ============================================================================
// Enums
// ============================================================================

/// The eight lunar phases in cycle order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LunarPhase {
    /// Days [0, 1.85)
    New,
    /// Days [1.85, 7.38)
    WaxingCrescent,
    /// Days [7.38, 9.23)
    FirstQuarter,
    /// Days [9.23, 14.77)
    WaxingGibbous,
    /// Days [14.77, 16.61)
    Full,
    /// Days [16.61, 22.15)
    WaningGibbous,
    /// Days [22.15, 23.99)
    LastQuarter,
    /// Days [23.99, cycle end)
    WaningCrescent,
}

impl LunarPhase {
    /// Get the phase for a day offset into the synodic cycle
    ///
    /// `day` must already be normalized into [0, synodic_length).
    pub fn from_cycle_day(day: f64) -> Self {
        match day {
            d if d < PHASE_BOUNDS[0] => LunarPhase::New,
            d if d < PHASE_BOUNDS[1] => LunarPhase::WaxingCrescent,
            d if d < PHASE_BOUNDS[2] => LunarPhase::FirstQuarter,
            d if d < PHASE_BOUNDS[3] => LunarPhase::WaxingGibbous,
            d if d < PHASE_BOUNDS[4] => LunarPhase::Full,
            d if d < PHASE_BOUNDS[5] => LunarPhase::WaningGibbous,
            d if d < PHASE_BOUNDS[6] => LunarPhase::LastQuarter,
            _ => LunarPhase::WaningCrescent,
        }
    }

    /// The coarse category; a strict function of phase
    pub fn category(&self) -> LunarCategory {
        match self {
            LunarPhase::New => LunarCategory::New,
            LunarPhase::WaxingCrescent | LunarPhase::FirstQuarter | LunarPhase::WaxingGibbous => {
                LunarCategory::Waxing
            }
            LunarPhase::Full => LunarCategory::Full,
            LunarPhase::WaningGibbous | LunarPhase::LastQuarter | LunarPhase::WaningCrescent => {
                LunarCategory::Waning
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            LunarPhase::New => "new",
            LunarPhase::WaxingCrescent => "waxing crescent",
            LunarPhase::FirstQuarter => "first quarter",
            LunarPhase::WaxingGibbous => "waxing gibbous",
            LunarPhase::Full => "full",
            LunarPhase::WaningGibbous => "waning gibbous",
            LunarPhase::LastQuarter => "last quarter",
            LunarPhase::WaningCrescent => "waning crescent",
        }
    }
}

/// Coarse phase bucket used by the gate rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LunarCategory {
    New,
    Waxing,
    Full,
    Waning,
}

impl LunarCategory {
    pub fn name(&self) -> &'static str {
        match self {
            LunarCategory::New => "new",
            LunarCategory::Waxing => "waxing",
            LunarCategory::Full => "full",
            LunarCategory::Waning => "waning",
        }
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Fractional days since the reference new moon (negative before it)
pub fn days_since_epoch(at: DateTime<Utc>) -> f64 {
    (at.timestamp_millis() - EPOCH_UNIX_SECS * 1000) as f64 / 86_400_000.0
}

/// Reduce a day count modulo a cycle length, normalized non-negative
///
/// Timestamps before the epoch produce a negative raw remainder; one added
/// cycle puts them back in range.
pub fn normalize_cycle_day(days: f64, cycle: f64) -> f64 {
    let raw = days % cycle;
    if raw < 0.0 {
        raw + cycle
    } else {
        raw
    }
}

/// Illumination percent for a day offset into the synodic cycle
///
/// Cosine approximation: 0 at new moon, 100 at full. Result clamps to
/// [0, 100] against rounding overshoot.
pub fn illumination_percent(day: f64, cycle: f64) -> u8 {
    let frac = (1.0 - (std::f64::consts::TAU * day / cycle).cos()) / 2.0;
    (frac * 100.0).round().clamp(0.0, 100.0) as u8
}

// ============================================================================
// LunarState
// ============================================================================

/// Full astronomical state for one instant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LunarState {
    pub phase: LunarPhase,
    /// Coarse bucket, always phase.category()
    pub category: LunarCategory,
    /// 0 at new moon, 100 at full
    pub illumination_percent: u8,
    /// Days into the synodic cycle, in [0, synodic_length)
    pub day_in_cycle: f64,
    pub zodiac_sign: ZodiacSign,
    /// Always zodiac_sign.element()
    pub element: Element,
}

impl LunarState {
    /// Compute the state for an explicit instant
    pub fn at(instant: DateTime<Utc>) -> Self {
        let cfg = config();
        let days = days_since_epoch(instant);

        let day_in_cycle = normalize_cycle_day(days, cfg.synodic_length);
        let phase = LunarPhase::from_cycle_day(day_in_cycle);

        let zodiac_day = normalize_cycle_day(days, cfg.sidereal_length);
        let zodiac_sign = ZodiacSign::from_sidereal_day(zodiac_day);

        Self {
            phase,
            category: phase.category(),
            illumination_percent: illumination_percent(day_in_cycle, cfg.synodic_length),
            day_in_cycle,
            zodiac_sign,
            element: zodiac_sign.element(),
        }
    }

    /// Compute the state for the current instant
    pub fn now() -> Self {
        Self::at(Utc::now())
    }
}

// ============================================================================
// Tests
// ============================================================================
