use thiserror::Error;

use crate::beds::chord::ChordRole;

#[derive(Error, Debug)]
pub enum AlmanacError {
    #[error("Slot {0:?} is already occupied; remove the current assignment first")]
    SlotOccupied(ChordRole),

    #[error("Slot {0:?} is empty; nothing to remove")]
    SlotEmpty(ChordRole),

    #[error("Crop '{0}' declares no chord role and cannot be assigned directly")]
    RoleMissing(String),

    #[error("Invalid month-day: month {month}, day {day}")]
    InvalidMonthDay { month: u32, day: u32 },

    #[error("Rule table error: {0}")]
    RuleTable(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AlmanacError>;
