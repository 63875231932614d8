//! Seasonal movements - the named date windows that partition the year
//!
//! Each movement is a month-day window with ordered allow/block crop token
//! lists. The full table partitions the calendar exactly: no gaps, no
//! overlaps, and exactly one wraparound window spanning New Year.

use serde::{Deserialize, Serialize};

use crate::core::types::MonthDay;

/// One named window of the seasonal calendar
///
/// `allowed_crops` and `blocked_crops` are ordered lists of lowercase name
/// substrings; matching is case-insensitive contains with first-match-wins
/// precedence. Overlapping tokens across movements are resolved by declared
/// order, never deduplicated here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonalMovement {
    pub id: String,
    pub name: String,
    pub start: MonthDay,
    pub end: MonthDay,
    pub allowed_crops: Vec<String>,
    pub blocked_crops: Vec<String>,
    pub block_message: String,
}

impl SeasonalMovement {
    /// Does this window wrap across New Year?
    pub fn wraps(&self) -> bool {
        self.start.code() > self.end.code()
    }

    /// Does the given date code fall inside this window?
    pub fn contains_code(&self, code: u32) -> bool {
        let (start, end) = (self.start.code(), self.end.code());
        if start <= end {
            start <= code && code <= end
        } else {
            code >= start || code <= end
        }
    }

    /// First blocked token the crop name contains, if any (case-insensitive)
    pub fn blocked_token_for(&self, crop: &str) -> Option<&str> {
        let crop = crop.to_lowercase();
        self.blocked_crops
            .iter()
            .find(|token| crop.contains(&token.to_lowercase()))
            .map(|s| s.as_str())
    }

    /// Does this movement's allow list match the crop name?
    pub fn allows(&self, crop: &str) -> bool {
        let crop = crop.to_lowercase();
        self.allowed_crops
            .iter()
            .any(|token| crop.contains(&token.to_lowercase()))
    }
}

/// The ordered movement table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovementTable {
    movements: Vec<SeasonalMovement>,
}

impl MovementTable {
    pub fn new(movements: Vec<SeasonalMovement>) -> Self {
        Self { movements }
    }

    pub fn movements(&self) -> &[SeasonalMovement] {
        &self.movements
    }

    /// Resolve the active movement for a date
    ///
    /// First match in declared order. A well-formed table matches exactly one
    /// movement for every date; if a malformed table matches none, the first
    /// declared movement is returned as the documented fallback and a warning
    /// is logged. Use `validate()` to reject malformed tables up front.
    pub fn resolve(&self, date: MonthDay) -> Option<&SeasonalMovement> {
        let code = date.code();
        if let Some(movement) = self.movements.iter().find(|m| m.contains_code(code)) {
            return Some(movement);
        }
        let fallback = self.movements.first();
        if let Some(m) = fallback {
            tracing::warn!(
                date = %date,
                fallback = %m.name,
                "no movement matched; table does not partition the year"
            );
        }
        fallback
    }

    /// First movement (in declared order) whose allow list matches the crop
    pub fn find_allowing(&self, crop: &str) -> Option<&SeasonalMovement> {
        self.movements.iter().find(|m| m.allows(crop))
    }

    /// Validate that the table partitions the calendar year
    ///
    /// Checks every valid month-day code maps to exactly one movement and
    /// that exactly one window wraps New Year.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.movements.is_empty() {
            return Err(vec!["movement table is empty".into()]);
        }

        let wrap_count = self.movements.iter().filter(|m| m.wraps()).count();
        if wrap_count != 1 {
            errors.push(format!(
                "expected exactly one wraparound window, found {}",
                wrap_count
            ));
        }

        // Feb 29 included so leap-day queries also resolve uniquely
        const DAYS_IN_MONTH: [u32; 12] = [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
        for month in 1..=12u32 {
            for day in 1..=DAYS_IN_MONTH[(month - 1) as usize] {
                let code = month * 100 + day;
                let matches = self
                    .movements
                    .iter()
                    .filter(|m| m.contains_code(code))
                    .count();
                match matches {
                    0 => errors.push(format!("date {:02}-{:02} matches no movement", month, day)),
                    1 => {}
                    n => errors.push(format!(
                        "date {:02}-{:02} matches {} movements",
                        month, day, n
                    )),
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl Default for MovementTable {
    fn default() -> Self {
        Self::new(default_movements())
    }
}

fn movement(
    id: &str,
    name: &str,
    start: (u32, u32),
    end: (u32, u32),
    allowed: &[&str],
    blocked: &[&str],
    block_message: &str,
) -> SeasonalMovement {
    SeasonalMovement {
        id: id.into(),
        name: name.into(),
        start: MonthDay {
            month: start.0,
            day: start.1,
        },
        end: MonthDay {
            month: end.0,
            day: end.1,
        },
        allowed_crops: allowed.iter().map(|s| s.to_string()).collect(),
        blocked_crops: blocked.iter().map(|s| s.to_string()).collect(),
        block_message: block_message.into(),
    }
}

/// The built-in five-movement year
pub fn default_movements() -> Vec<SeasonalMovement> {
    vec![
        movement(
            "root-whisper",
            "Root Whisper",
            (1, 15),
            (3, 15),
            &["garlic", "onion", "carrot", "parsnip", "radish"],
            &["watermelon", "melon", "tomato", "pepper", "squash", "cucumber"],
            "The soil still sleeps; heat-loving crops wait for the Solar Peak.",
        ),
        movement(
            "verdant-crescendo",
            "Verdant Crescendo",
            (3, 16),
            (5, 20),
            &["lettuce", "spinach", "kale", "pea", "chard"],
            &["watermelon", "melon", "okra"],
            "Nights run cold yet for tropical vines.",
        ),
        movement(
            "solar-peak",
            "Solar Peak",
            (5, 21),
            (8, 10),
            &["watermelon", "melon", "tomato", "pepper", "squash", "cucumber", "okra", "basil"],
            &["spinach", "lettuce", "pea"],
            "Cool-season greens bolt under the Solar Peak.",
        ),
        movement(
            "harvest-refrain",
            "Harvest Refrain",
            (8, 11),
            (10, 31),
            &["garlic", "spinach", "lettuce", "turnip", "rye"],
            &["watermelon", "melon", "tomato"],
            "Too few warm days remain to ripen long-season fruit.",
        ),
        movement(
            "quiet-interlude",
            "Quiet Interlude",
            (11, 1),
            (1, 14),
            &["rye", "fava"],
            &["watermelon", "tomato", "pepper", "cucumber", "squash", "basil"],
            "The garden rests; only cover crops sow now.",
        ),
    ]
}
