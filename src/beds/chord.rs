//! Planting beds and their four chord role-slots
//!
//! A bed owns exactly four role-slots (Root, Third, Fifth, Seventh), each
//! holding at most one assignment, plus two overlay slots (a fungal-inoculant
//! flag and an aerial companion) outside the uniqueness constraint.
//! Assignment never overwrites: an occupied slot must be removed first.
//! Callers serialize writes per bed; occupancy is re-checked at write time.

use serde::{Deserialize, Serialize};

use crate::catalog::Crop;
use crate::core::config::config;
use crate::core::error::{AlmanacError, Result};
use crate::core::types::{BedId, FrequencyBand};

/// The four structural roles of a bed's companion chord
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChordRole {
    Root,
    Third,
    Fifth,
    Seventh,
}

impl ChordRole {
    pub const ALL: [ChordRole; 4] = [
        ChordRole::Root,
        ChordRole::Third,
        ChordRole::Fifth,
        ChordRole::Seventh,
    ];

    fn index(self) -> usize {
        match self {
            ChordRole::Root => 0,
            ChordRole::Third => 1,
            ChordRole::Fifth => 2,
            ChordRole::Seventh => 3,
        }
    }
}

/// One crop filling one role-slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropAssignment {
    pub crop: String,
    pub role: ChordRole,
    pub plant_count: u32,
}

/// A planting bed with fixed dimensions (inches) and a frequency band
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bed {
    pub id: BedId,
    pub band: FrequencyBand,
    pub width_in: f64,
    pub length_in: f64,
    slots: [Option<CropAssignment>; 4],
    /// Overlay: fungal inoculant worked into the bed
    pub fungal_inoculant: bool,
    /// Overlay: a crop trellised above the chord, outside the four slots
    pub aerial_companion: Option<String>,
}

impl Bed {
    pub fn new(band: FrequencyBand, width_in: f64, length_in: f64) -> Self {
        Self {
            id: BedId::new(),
            band,
            width_in,
            length_in,
            slots: [None, None, None, None],
            fungal_inoculant: false,
            aerial_companion: None,
        }
    }

    pub fn area_sq_in(&self) -> f64 {
        self.width_in * self.length_in
    }

    pub fn slot(&self, role: ChordRole) -> Option<&CropAssignment> {
        self.slots[role.index()].as_ref()
    }

    pub fn is_empty(&self, role: ChordRole) -> bool {
        self.slots[role.index()].is_none()
    }

    pub fn empty_roles(&self) -> Vec<ChordRole> {
        ChordRole::ALL
            .into_iter()
            .filter(|r| self.is_empty(*r))
            .collect()
    }

    /// Assign a crop to its declared role-slot
    ///
    /// Rejects with `RoleMissing` if the crop declares no role, and with
    /// `SlotOccupied` if the slot already holds an assignment.
    pub fn assign(&mut self, crop: &Crop) -> Result<CropAssignment> {
        let role = crop
            .role
            .ok_or_else(|| AlmanacError::RoleMissing(crop.name.clone()))?;
        self.assign_to(role, &crop.name, crop.spacing_in)
    }

    /// Assign a crop to an explicit role-slot
    pub fn assign_to(
        &mut self,
        role: ChordRole,
        crop: &str,
        spacing_in: Option<f64>,
    ) -> Result<CropAssignment> {
        if self.slots[role.index()].is_some() {
            return Err(AlmanacError::SlotOccupied(role));
        }
        let assignment = CropAssignment {
            crop: crop.to_string(),
            role,
            plant_count: self.plant_count(spacing_in),
        };
        tracing::debug!(bed = ?self.id, ?role, crop, count = assignment.plant_count, "slot assigned");
        self.slots[role.index()] = Some(assignment.clone());
        Ok(assignment)
    }

    /// Remove the assignment in a role-slot
    ///
    /// Removing an empty slot is a reportable `SlotEmpty` error, not a
    /// silent no-op.
    pub fn remove(&mut self, role: ChordRole) -> Result<CropAssignment> {
        self.slots[role.index()]
            .take()
            .ok_or(AlmanacError::SlotEmpty(role))
    }

    /// Plants that fit this bed at the given in-row spacing
    ///
    /// Hexagonal packing: floor(area / (spacing^2 * 0.866)), minimum one
    /// plant. A crop with no declared spacing gets a single plant.
    pub fn plant_count(&self, spacing_in: Option<f64>) -> u32 {
        match spacing_in {
            Some(spacing) if spacing > 0.0 => {
                let per_plant = spacing * spacing * config().hex_packing_factor;
                ((self.area_sq_in() / per_plant).floor() as u32).max(1)
            }
            _ => 1,
        }
    }
}
