//! Cosmic Almanac - Timing & Dependency Validation Engine

pub mod astro;
pub mod beds;
pub mod catalog;
pub mod core;
pub mod gates;
pub mod harmony;
pub mod rules;
