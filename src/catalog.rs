//! Crop catalog and persistence collaborator interfaces
//!
//! The engine never owns durable records; it looks crops up through
//! `CropCatalog` and leaves bed storage behind `BedStore`. The in-memory
//! implementations back the suggestion path and the tests.

use serde::{Deserialize, Serialize};

use crate::beds::chord::{Bed, ChordRole};
use crate::core::types::BedId;

/// A crop record as the catalog knows it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Crop {
    pub id: String,
    pub name: String,
    /// The chord role this crop plays, if it plays one
    pub role: Option<ChordRole>,
    /// In-row spacing in inches; None means spacing is unknown
    pub spacing_in: Option<f64>,
    /// Companion crop names, in preference order
    pub companions: Vec<String>,
}

/// Lookup surface for crop records
pub trait CropCatalog {
    fn by_id(&self, id: &str) -> Option<&Crop>;
    fn by_name(&self, name: &str) -> Option<&Crop>;
}

/// In-memory catalog; name lookup is case-insensitive
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    crops: Vec<Crop>,
}

impl StaticCatalog {
    pub fn new(crops: Vec<Crop>) -> Self {
        Self { crops }
    }

    pub fn crops(&self) -> &[Crop] {
        &self.crops
    }
}

impl CropCatalog for StaticCatalog {
    fn by_id(&self, id: &str) -> Option<&Crop> {
        self.crops.iter().find(|c| c.id == id)
    }

    fn by_name(&self, name: &str) -> Option<&Crop> {
        let name = name.to_lowercase();
        self.crops.iter().find(|c| c.name.to_lowercase() == name)
    }
}

/// Durable bed storage, owned by a collaborator
pub trait BedStore {
    fn get(&self, id: BedId) -> Option<Bed>;
    fn put(&mut self, bed: Bed);
}

/// In-memory store for tests and single-process callers
#[derive(Debug, Clone, Default)]
pub struct MemoryBedStore {
    beds: ahash::AHashMap<BedId, Bed>,
}

impl MemoryBedStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BedStore for MemoryBedStore {
    fn get(&self, id: BedId) -> Option<Bed> {
        self.beds.get(&id).cloned()
    }

    fn put(&mut self, bed: Bed) {
        self.beds.insert(bed.id, bed);
    }
}
