//! Ranked suggestions for empty chord slots
//!
//! Resolution order per slot: the Root occupant's companion list first, then
//! the recipe table for the bed's band. Both paths filter by physical fit
//! (spacing no wider than the bed). A slot with neither source is simply no
//! suggestion. Slots resolve independently; bulk apply fills one at a time
//! and reports partial success.

use serde::{Deserialize, Serialize};

use crate::beds::chord::{Bed, ChordRole};
use crate::catalog::CropCatalog;
use crate::rules::recipes::RecipeTable;

/// Where a suggestion came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SuggestionSource {
    /// The Root occupant's companion list
    Companion,
    /// The band recipe table
    Recipe,
}

/// A proposed fill for one empty slot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suggestion {
    pub role: ChordRole,
    pub crop: String,
    pub spacing_in: Option<f64>,
    pub source: SuggestionSource,
}

/// Outcome of a bulk apply; `applied` of `attempted` slots were filled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyReport {
    pub attempted: usize,
    pub applied: usize,
}

fn fits(spacing_in: Option<f64>, bed: &Bed) -> bool {
    // Unknown spacing is assumed to fit; the assignment then plants one
    spacing_in.map_or(true, |s| s <= bed.width_in)
}

/// Suggest a crop for one empty slot, companions before recipes
pub fn suggest_for_slot(
    bed: &Bed,
    role: ChordRole,
    catalog: &dyn CropCatalog,
    recipes: &RecipeTable,
) -> Option<Suggestion> {
    // Companion path needs a Root occupant with a catalog record
    if let Some(root) = bed.slot(ChordRole::Root) {
        if let Some(root_crop) = catalog.by_name(&root.crop) {
            for companion_name in &root_crop.companions {
                if let Some(companion) = catalog.by_name(companion_name) {
                    if companion.role == Some(role) && fits(companion.spacing_in, bed) {
                        return Some(Suggestion {
                            role,
                            crop: companion.name.clone(),
                            spacing_in: companion.spacing_in,
                            source: SuggestionSource::Companion,
                        });
                    }
                }
            }
        }
    }

    // Recipe fallback, keyed by the bed's band
    for entry in recipes.entries_for(bed.band, role) {
        let spacing = catalog.by_name(&entry.crop).and_then(|c| c.spacing_in);
        if fits(spacing, bed) {
            return Some(Suggestion {
                role,
                crop: entry.crop.clone(),
                spacing_in: spacing,
                source: SuggestionSource::Recipe,
            });
        }
    }

    None
}

/// Suggestions for every empty slot; slots resolve independently
pub fn suggest_all(
    bed: &Bed,
    catalog: &dyn CropCatalog,
    recipes: &RecipeTable,
) -> Vec<Suggestion> {
    bed.empty_roles()
        .into_iter()
        .filter_map(|role| suggest_for_slot(bed, role, catalog, recipes))
        .collect()
}

/// Apply suggestions one at a time; a failure on one slot never blocks the rest
pub fn apply_suggestions(bed: &mut Bed, suggestions: &[Suggestion]) -> ApplyReport {
    let mut applied = 0;
    for suggestion in suggestions {
        match bed.assign_to(suggestion.role, &suggestion.crop, suggestion.spacing_in) {
            Ok(_) => applied += 1,
            Err(err) => {
                tracing::debug!(role = ?suggestion.role, crop = %suggestion.crop, %err, "suggestion skipped");
            }
        }
    }
    ApplyReport {
        attempted: suggestions.len(),
        applied,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Crop, StaticCatalog};
    use crate::core::types::FrequencyBand;
    use crate::rules::recipes::default_recipes;

    fn crop(name: &str, role: Option<ChordRole>, spacing: Option<f64>, companions: &[&str]) -> Crop {
        Crop {
            id: name.to_lowercase(),
            name: name.into(),
            role,
            spacing_in: spacing,
            companions: companions.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn catalog() -> StaticCatalog {
        StaticCatalog::new(vec![
            crop("Tomato", Some(ChordRole::Root), Some(24.0), &["Basil", "Marigold", "Borage"]),
            crop("Basil", Some(ChordRole::Third), Some(10.0), &[]),
            crop("Marigold", Some(ChordRole::Fifth), Some(8.0), &[]),
            crop("Borage", Some(ChordRole::Seventh), Some(60.0), &[]),
            crop("Dill", Some(ChordRole::Seventh), Some(9.0), &[]),
        ])
    }

    fn bed_with_tomato() -> Bed {
        let mut bed = Bed::new(FrequencyBand(528), 48.0, 96.0);
        bed.assign_to(ChordRole::Root, "Tomato", Some(24.0)).unwrap();
        bed
    }

    #[test]
    fn test_companion_preferred_over_recipe() {
        let bed = bed_with_tomato();
        let s = suggest_for_slot(&bed, ChordRole::Third, &catalog(), &default_recipes()).unwrap();
        assert_eq!(s.crop, "Basil");
        assert_eq!(s.source, SuggestionSource::Companion);
    }

    #[test]
    fn test_fit_filter_applies_to_both_paths() {
        // Borage needs 60in in a 48in bed. It is Tomato's only Seventh
        // companion and also the 528-band recipe's Seventh, so both paths
        // reject it and the slot yields no suggestion.
        let bed = bed_with_tomato();
        let s = suggest_for_slot(&bed, ChordRole::Seventh, &catalog(), &default_recipes());
        assert!(s.is_none());
    }

    #[test]
    fn test_recipe_fallback_without_root_occupant() {
        let bed = Bed::new(FrequencyBand(528), 48.0, 96.0);
        let s = suggest_for_slot(&bed, ChordRole::Third, &catalog(), &default_recipes()).unwrap();
        assert_eq!(s.crop, "Basil");
        assert_eq!(s.source, SuggestionSource::Recipe);
    }

    #[test]
    fn test_unknown_band_and_no_companions_yields_none() {
        let bed = Bed::new(FrequencyBand(111), 48.0, 96.0);
        let s = suggest_for_slot(&bed, ChordRole::Fifth, &catalog(), &default_recipes());
        assert!(s.is_none());
    }

    #[test]
    fn test_suggest_all_only_empty_slots() {
        let bed = bed_with_tomato();
        let suggestions = suggest_all(&bed, &catalog(), &default_recipes());
        assert!(suggestions.iter().all(|s| s.role != ChordRole::Root));
        // Third and Fifth resolve from companions; Seventh has no fit
        assert_eq!(suggestions.len(), 2);
    }

    #[test]
    fn test_apply_reports_partial_success() {
        let mut bed = bed_with_tomato();
        let suggestions = vec![
            Suggestion {
                role: ChordRole::Third,
                crop: "Basil".into(),
                spacing_in: Some(10.0),
                source: SuggestionSource::Companion,
            },
            // Occupied mid-batch: Root already holds Tomato
            Suggestion {
                role: ChordRole::Root,
                crop: "Pepper".into(),
                spacing_in: Some(18.0),
                source: SuggestionSource::Recipe,
            },
            Suggestion {
                role: ChordRole::Fifth,
                crop: "Marigold".into(),
                spacing_in: Some(8.0),
                source: SuggestionSource::Companion,
            },
        ];
        let report = apply_suggestions(&mut bed, &suggestions);
        assert_eq!(report, ApplyReport { attempted: 3, applied: 2 });
        assert_eq!(bed.slot(ChordRole::Root).unwrap().crop, "Tomato");
        assert_eq!(bed.slot(ChordRole::Third).unwrap().crop, "Basil");
        assert_eq!(bed.slot(ChordRole::Fifth).unwrap().crop, "Marigold");
    }
}
