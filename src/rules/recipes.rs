//! Band recipes - fallback chord suggestions per frequency band
//!
//! When a bed's root companion list offers nothing for an empty slot, the
//! recipe table keyed by the bed's band supplies the fallback, in declared
//! order.

use serde::{Deserialize, Serialize};

use crate::beds::chord::ChordRole;
use crate::core::types::FrequencyBand;

/// One recipe suggestion: a crop name for a chord role
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeEntry {
    pub role: ChordRole,
    pub crop: String,
}

/// Recipe suggestions keyed by frequency band
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecipeTable {
    recipes: ahash::AHashMap<FrequencyBand, Vec<RecipeEntry>>,
}

impl RecipeTable {
    pub fn new(recipes: ahash::AHashMap<FrequencyBand, Vec<RecipeEntry>>) -> Self {
        Self { recipes }
    }

    pub fn insert(&mut self, band: FrequencyBand, entries: Vec<RecipeEntry>) {
        self.recipes.insert(band, entries);
    }

    /// Recipe entries for a band and role, in declared order
    pub fn entries_for(&self, band: FrequencyBand, role: ChordRole) -> Vec<&RecipeEntry> {
        self.recipes
            .get(&band)
            .map(|entries| entries.iter().filter(|e| e.role == role).collect())
            .unwrap_or_default()
    }
}

fn entry(role: ChordRole, crop: &str) -> RecipeEntry {
    RecipeEntry {
        role,
        crop: crop.into(),
    }
}

/// The built-in recipe table
pub fn default_recipes() -> RecipeTable {
    let mut table = RecipeTable::default();
    table.insert(
        FrequencyBand(396),
        vec![
            entry(ChordRole::Root, "Carrot"),
            entry(ChordRole::Third, "Onion"),
            entry(ChordRole::Fifth, "Thyme"),
            entry(ChordRole::Seventh, "Calendula"),
        ],
    );
    table.insert(
        FrequencyBand(528),
        vec![
            entry(ChordRole::Root, "Tomato"),
            entry(ChordRole::Third, "Basil"),
            entry(ChordRole::Fifth, "Marigold"),
            entry(ChordRole::Seventh, "Borage"),
        ],
    );
    table.insert(
        FrequencyBand(639),
        vec![
            entry(ChordRole::Root, "Squash"),
            entry(ChordRole::Third, "Bean"),
            entry(ChordRole::Fifth, "Nasturtium"),
            entry(ChordRole::Seventh, "Dill"),
        ],
    );
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_filter_by_role() {
        let table = default_recipes();
        let thirds = table.entries_for(FrequencyBand(528), ChordRole::Third);
        assert_eq!(thirds.len(), 1);
        assert_eq!(thirds[0].crop, "Basil");
    }

    #[test]
    fn test_unknown_band_yields_nothing() {
        let table = default_recipes();
        assert!(table.entries_for(FrequencyBand(111), ChordRole::Root).is_empty());
    }
}
