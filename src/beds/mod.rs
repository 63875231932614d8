pub mod chord;
pub mod suggest;

pub use chord::{Bed, ChordRole, CropAssignment};
pub use suggest::{apply_suggestions, suggest_all, suggest_for_slot, ApplyReport, Suggestion};
