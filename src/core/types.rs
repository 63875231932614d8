//! Core type definitions used throughout the engine

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::error::{AlmanacError, Result};

/// Unique identifier for planting beds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BedId(pub Uuid);

impl BedId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for BedId {
    fn default() -> Self {
        Self::new()
    }
}

/// Frequency band - the nominal numeric label that groups zones, beds, and
/// recipes. Used as the join key across the gate, dependency, and assignment
/// subsystems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrequencyBand(pub u16);

impl FrequencyBand {
    pub fn new(hz: u16) -> Self {
        Self(hz)
    }
}

/// Classical element associated with zodiac signs and zones
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Fire,
    Earth,
    Air,
    Water,
}

impl Element {
    /// A "dry day" element supports seed preservation (fire or air)
    pub fn is_dry(&self) -> bool {
        matches!(self, Element::Fire | Element::Air)
    }
}

/// A month-day pair for seasonal windows, independent of year
///
/// Ordinal encoding is `month * 100 + day` so windows compare with plain
/// integer comparison. Construction validates ranges; out-of-range input is
/// rejected, not clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthDay {
    pub month: u32,
    pub day: u32,
}

impl MonthDay {
    pub fn new(month: u32, day: u32) -> Result<Self> {
        if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
            return Err(AlmanacError::InvalidMonthDay { month, day });
        }
        Ok(Self { month, day })
    }

    /// Integer code for window comparison (e.g. Mar 15 -> 315)
    pub fn code(&self) -> u32 {
        self.month * 100 + self.day
    }
}

impl std::fmt::Display for MonthDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}-{:02}", self.month, self.day)
    }
}
