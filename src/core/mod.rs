pub mod config;
pub mod error;
pub mod types;

pub use error::{AlmanacError, Result};
pub use types::{Element, FrequencyBand, MonthDay};
