pub mod dependencies;
pub mod loader;
pub mod movements;
pub mod recipes;

pub use dependencies::{DependencyTable, HarmonicDependency, ZoneTarget};
pub use movements::{MovementTable, SeasonalMovement};
pub use recipes::{RecipeEntry, RecipeTable};
