pub mod resolver;
pub mod signal;
pub mod zones;

pub use resolver::{DirectiveBoard, HarmonicAlert, HarmonicDependencyResolver};
pub use signal::SignalBus;
pub use zones::{StatusLevel, ZoneMap, ZoneStatus};
